use std::net::Ipv4Addr;

use anyhow::Context;
use rand::Rng;
use tracing::{debug, info};

use picopanel_common::{PanelEngine, RuntimeConfig};

use crate::{
    hal::{Indicator, NetworkLink, RawAdc, Restart},
    net,
    server::{self, PanelContext},
};

// Simulated hardware so the panel can be driven on a workstation:
// the indicator logs level changes, the ADC wobbles around an ambient
// baseline, and a reset request simply ends the serve loop.

pub struct SimIndicator;

impl Indicator for SimIndicator {
    fn set_high(&mut self) -> anyhow::Result<()> {
        debug!("indicator output high");
        Ok(())
    }

    fn set_low(&mut self) -> anyhow::Result<()> {
        debug!("indicator output low");
        Ok(())
    }
}

pub struct SimAdc {
    baseline: u16,
}

impl Default for SimAdc {
    fn default() -> Self {
        // Raw count that lands near 21°C on the calibration line.
        Self { baseline: 14226 }
    }
}

impl RawAdc for SimAdc {
    fn read_raw(&mut self) -> anyhow::Result<u16> {
        let jitter: i32 = rand::thread_rng().gen_range(-128..=128);
        Ok((self.baseline as i32 + jitter) as u16)
    }
}

pub struct SimRestart;

impl Restart for SimRestart {
    fn restart(&mut self) {
        info!("hardware reset requested; leaving serve loop");
    }
}

pub struct SimLink {
    polls_remaining: u32,
}

impl Default for SimLink {
    fn default() -> Self {
        Self { polls_remaining: 2 }
    }
}

impl NetworkLink for SimLink {
    fn begin(&mut self, ssid: &str, _password: &str) -> anyhow::Result<()> {
        info!("associating with `{ssid}`");
        Ok(())
    }

    fn is_connected(&mut self) -> anyhow::Result<bool> {
        if self.polls_remaining == 0 {
            return Ok(true);
        }
        self.polls_remaining -= 1;
        Ok(false)
    }

    fn address(&mut self) -> anyhow::Result<Option<Ipv4Addr>> {
        Ok(Some(Ipv4Addr::LOCALHOST))
    }
}

pub fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut runtime = RuntimeConfig::default();
    runtime.panel.sanitize();

    if let Ok(ssid) = std::env::var("WIFI_SSID") {
        runtime.network.wifi_ssid = ssid;
    }
    if let Ok(pass) = std::env::var("WIFI_PASS") {
        runtime.network.wifi_pass = pass;
    }
    runtime.panel.http_port = std::env::var("PANEL_HTTP_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(runtime.panel.http_port);

    let mut link = SimLink::default();
    let address = net::join_network(&mut link, &runtime.network)
        .context("failed to establish a network connection")?;

    let listener = net::bind_listener(runtime.panel.http_port)?;
    info!("listening on {}", listener.local_addr()?);

    let mut ctx = PanelContext {
        engine: PanelEngine::new(runtime.panel.clone()),
        indicator: SimIndicator,
        adc: SimAdc::default(),
        restart: SimRestart,
        address,
    };

    server::serve_forever(&listener, &mut ctx)
}
