use std::{
    io::{Read, Write},
    net::{Ipv4Addr, TcpListener},
    thread,
    time::Duration,
};

use log::{debug, info, warn};
use rand::Rng;

use picopanel_common::{page, route, PanelAction, PanelEngine, Route, TemperatureReading};

use crate::{
    error::ConnectionError,
    hal::{Indicator, RawAdc, Restart},
};

// Everything the dispatch loop touches, built once at startup and threaded
// through by reference; the single-threaded accept loop is the only writer.
pub struct PanelContext<I, A, R> {
    pub engine: PanelEngine,
    pub indicator: I,
    pub adc: A,
    pub restart: R,
    pub address: Ipv4Addr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Continue,
    Shutdown,
}

pub fn execute_actions<I: Indicator>(
    indicator: &mut I,
    actions: &[PanelAction],
) -> anyhow::Result<()> {
    for action in actions {
        match action {
            PanelAction::IndicatorHigh => indicator.set_high()?,
            PanelAction::IndicatorLow => indicator.set_low()?,
            PanelAction::Delay(ms) => thread::sleep(Duration::from_millis(*ms)),
        }
    }
    Ok(())
}

// One request per connection: single bounded read, token dispatch, fresh
// temperature sample, full page render. The shutdown route skips the render
// and hands control back to the serve loop for the reset sequence.
pub fn handle_request<S, I, A, R>(
    stream: &mut S,
    ctx: &mut PanelContext<I, A, R>,
) -> Result<RequestOutcome, ConnectionError>
where
    S: Read + Write,
    I: Indicator,
    A: RawAdc,
    R: Restart,
{
    let mut buffer = vec![0_u8; ctx.engine.config.recv_buffer_bytes];
    let received = stream.read(&mut buffer).map_err(ConnectionError::Read)?;

    let request = String::from_utf8_lossy(&buffer[..received]);
    let token = route::path_token(&request);
    let matched = token.and_then(Route::from_path_token);
    debug!("request token {token:?} matched {matched:?}");

    let actions = match matched {
        Some(Route::Shutdown) => {
            info!("shutdown requested");
            stream
                .write_all(page::RESPONSE_HEADER.as_bytes())
                .and_then(|()| stream.write_all(page::SHUTDOWN_PAGE.as_bytes()))
                .and_then(|()| stream.flush())
                .map_err(ConnectionError::Write)?;
            return Ok(RequestOutcome::Shutdown);
        }
        Some(Route::LightOn) => ctx.engine.light_on(),
        Some(Route::LightOff) => ctx.engine.light_off(),
        Some(Route::LightBlink) => ctx.engine.light_blink(),
        Some(Route::FetchValue) => {
            let value = rand::thread_rng().gen_range(0..=ctx.engine.config.value_max);
            ctx.engine.fetch_value(value)
        }
        None => Vec::new(),
    };

    execute_actions(&mut ctx.indicator, &actions).map_err(ConnectionError::Device)?;

    let raw = ctx.adc.read_raw().map_err(ConnectionError::Device)?;
    let reading = TemperatureReading::from_raw(raw);

    let body = page::StatusPage {
        last_sample: ctx.engine.last_sample(),
        indicator: ctx.engine.indicator().as_str(),
        celsius: reading.celsius,
        fahrenheit: reading.fahrenheit,
        address: ctx.address.to_string(),
    }
    .to_html();

    stream
        .write_all(page::RESPONSE_HEADER.as_bytes())
        .and_then(|()| stream.write_all(body.as_bytes()))
        .and_then(|()| stream.flush())
        .map_err(ConnectionError::Write)?;

    match serde_json::to_string(&ctx.engine.state_payload(&reading)) {
        Ok(payload) => info!("panel state: {payload}"),
        Err(err) => warn!("panel state serialization failed: {err}"),
    }

    Ok(RequestOutcome::Continue)
}

// One connection at a time; a failed connection is logged and closed while
// the loop moves on to the next accept. Returns only after a shutdown
// request on targets where the reset primitive hands control back.
pub fn serve_forever<I, A, R>(
    listener: &TcpListener,
    ctx: &mut PanelContext<I, A, R>,
) -> anyhow::Result<()>
where
    I: Indicator,
    A: RawAdc,
    R: Restart,
{
    loop {
        let (mut stream, peer) = match listener.accept() {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!("{}", ConnectionError::Accept(err));
                continue;
            }
        };
        info!("connection from {peer}");

        match handle_request(&mut stream, ctx) {
            Ok(RequestOutcome::Continue) => {}
            Ok(RequestOutcome::Shutdown) => {
                drop(stream);
                thread::sleep(Duration::from_millis(ctx.engine.config.shutdown_grace_ms));
                info!("restarting device");
                ctx.restart.restart();
                return Ok(());
            }
            Err(err) => {
                warn!("{err}");
                info!("connection closed");
            }
        }
    }
}
