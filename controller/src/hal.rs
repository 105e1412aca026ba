use std::net::Ipv4Addr;

/// Digital output driving the onboard indicator.
pub trait Indicator {
    fn set_high(&mut self) -> anyhow::Result<()>;
    fn set_low(&mut self) -> anyhow::Result<()>;
}

/// Raw analog sample source for the temperature channel.
pub trait RawAdc {
    fn read_raw(&mut self) -> anyhow::Result<u16>;
}

/// Hardware reset primitive; on real hardware this does not return.
pub trait Restart {
    fn restart(&mut self);
}

/// Wireless link as seen by the join loop: start association once, then
/// poll until the link is up with an address assigned.
pub trait NetworkLink {
    fn begin(&mut self, ssid: &str, password: &str) -> anyhow::Result<()>;
    fn is_connected(&mut self) -> anyhow::Result<bool>;
    fn address(&mut self) -> anyhow::Result<Option<Ipv4Addr>>;
}
