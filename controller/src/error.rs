use thiserror::Error;

// Fatal at startup; the operator restarts the device, there is no retry.
#[derive(Debug, Error)]
pub enum JoinError {
    #[error("wifi association could not be started: {0}")]
    Begin(#[source] anyhow::Error),
    #[error("wifi status query failed: {0}")]
    Status(#[source] anyhow::Error),
    #[error("no wifi connection after {waited_secs}s")]
    TimedOut { waited_secs: u64 },
    #[error("wifi link is up but no address was assigned")]
    MissingAddress,
}

// Recovered per connection: logged, the connection is closed, and the
// accept loop continues.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("accept failed: {0}")]
    Accept(#[source] std::io::Error),
    #[error("request read failed: {0}")]
    Read(#[source] std::io::Error),
    #[error("response write failed: {0}")]
    Write(#[source] std::io::Error),
    #[error("device action failed: {0}")]
    Device(#[source] anyhow::Error),
}
