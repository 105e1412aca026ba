use std::net::Ipv4Addr;

use anyhow::{anyhow, Context};
use embedded_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};
use esp_idf_hal::{
    adc::{
        attenuation::DB_11,
        oneshot::{config::AdcChannelConfig, AdcChannelDriver, AdcDriver},
        ADC1,
    },
    gpio::{Gpio2, Gpio34, Output, PinDriver},
    prelude::Peripherals,
};
use esp_idf_svc::{
    eventloop::EspSystemEventLoop, log::EspLogger, nvs::EspDefaultNvsPartition, wifi::EspWifi,
};
use log::info;

use picopanel_common::{PanelEngine, RuntimeConfig};

use crate::{
    hal::{Indicator, NetworkLink, RawAdc, Restart},
    net,
    server::{self, PanelContext},
};

struct EspIndicator {
    pin: PinDriver<'static, Gpio2, Output>,
}

impl Indicator for EspIndicator {
    fn set_high(&mut self) -> anyhow::Result<()> {
        self.pin.set_high()?;
        Ok(())
    }

    fn set_low(&mut self) -> anyhow::Result<()> {
        self.pin.set_low()?;
        Ok(())
    }
}

struct EspAdc {
    adc: AdcDriver<'static, ADC1>,
    pin: Gpio34,
    config: AdcChannelConfig,
}

impl RawAdc for EspAdc {
    fn read_raw(&mut self) -> anyhow::Result<u16> {
        let mut channel = AdcChannelDriver::new(&self.adc, &mut self.pin, &self.config)?;
        let raw = self.adc.read_raw(&mut channel)?;
        // 12-bit reading scaled to the 16-bit sample domain of the
        // calibration formula.
        Ok(raw << 4)
    }
}

struct EspRestart;

impl Restart for EspRestart {
    fn restart(&mut self) {
        unsafe { esp_idf_svc::sys::esp_restart() };
    }
}

struct EspLink {
    wifi: EspWifi<'static>,
}

impl NetworkLink for EspLink {
    fn begin(&mut self, ssid: &str, password: &str) -> anyhow::Result<()> {
        let auth_method = if password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPAWPA2Personal
        };

        self.wifi
            .set_configuration(&Configuration::Client(ClientConfiguration {
                ssid: ssid.try_into().map_err(|_| anyhow!("wifi ssid too long"))?,
                password: password
                    .try_into()
                    .map_err(|_| anyhow!("wifi password too long"))?,
                auth_method,
                ..Default::default()
            }))?;

        self.wifi.start()?;
        self.wifi.connect()?;
        Ok(())
    }

    fn is_connected(&mut self) -> anyhow::Result<bool> {
        Ok(self.wifi.is_up()?)
    }

    fn address(&mut self) -> anyhow::Result<Option<Ipv4Addr>> {
        let info = self.wifi.sta_netif().get_ip_info()?;
        Ok((!info.ip.is_unspecified()).then_some(info.ip))
    }
}

fn ensure_wifi_defaults(runtime: &mut RuntimeConfig) {
    if runtime.network.wifi_ssid.is_empty() {
        runtime.network.wifi_ssid = option_env!("WIFI_SSID").unwrap_or("CHANGE_ME").to_string();
    }

    if runtime.network.wifi_pass.is_empty() {
        runtime.network.wifi_pass = option_env!("WIFI_PASS").unwrap_or("CHANGE_ME").to_string();
    }
}

pub fn run() -> anyhow::Result<()> {
    esp_idf_svc::sys::link_patches();
    EspLogger::initialize_default();

    let mut runtime = RuntimeConfig::default();
    runtime.panel.sanitize();
    ensure_wifi_defaults(&mut runtime);

    let sys_loop = EspSystemEventLoop::take()?;
    let nvs_partition = EspDefaultNvsPartition::take()?;
    let peripherals = Peripherals::take()?;

    let indicator = EspIndicator {
        pin: PinDriver::output(peripherals.pins.gpio2)?,
    };

    let adc = EspAdc {
        adc: AdcDriver::new(peripherals.adc1)?,
        pin: peripherals.pins.gpio34,
        config: AdcChannelConfig {
            attenuation: DB_11,
            ..Default::default()
        },
    };

    let wifi = EspWifi::new(peripherals.modem, sys_loop, Some(nvs_partition))?;
    let mut link = EspLink { wifi };
    let address = net::join_network(&mut link, &runtime.network)
        .context("failed to establish a network connection")?;

    let listener = net::bind_listener(runtime.panel.http_port)?;
    info!("listening on {}:{}", address, runtime.panel.http_port);

    let mut ctx = PanelContext {
        engine: PanelEngine::new(runtime.panel.clone()),
        indicator,
        adc,
        restart: EspRestart,
        address,
    };

    // The wifi driver must stay alive for the serving lifetime.
    let _link = link;
    server::serve_forever(&listener, &mut ctx)
}
