use crate::{
    config::PanelConfig,
    temperature::TemperatureReading,
    types::{IndicatorState, PanelStatePayload},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    IndicatorHigh,
    IndicatorLow,
    Delay(u64),
}

#[derive(Debug, Clone)]
pub struct PanelEngine {
    pub config: PanelConfig,
    indicator: IndicatorState,
    last_sample: u8,
}

impl PanelEngine {
    pub fn new(mut config: PanelConfig) -> Self {
        config.sanitize();
        Self {
            config,
            indicator: IndicatorState::Off,
            last_sample: 0,
        }
    }

    pub fn indicator(&self) -> IndicatorState {
        self.indicator
    }

    pub fn last_sample(&self) -> u8 {
        self.last_sample
    }

    pub fn light_on(&mut self) -> Vec<PanelAction> {
        self.indicator = IndicatorState::On;
        vec![PanelAction::IndicatorHigh]
    }

    pub fn light_off(&mut self) -> Vec<PanelAction> {
        self.indicator = IndicatorState::Off;
        vec![PanelAction::IndicatorLow]
    }

    pub fn light_blink(&mut self) -> Vec<PanelAction> {
        let cycles = self.config.blink_cycles as usize;
        let dwell = self.config.blink_dwell_ms;

        let mut actions = Vec::with_capacity(cycles * 4);
        for _ in 0..cycles {
            actions.push(PanelAction::IndicatorHigh);
            actions.push(PanelAction::Delay(dwell));
            actions.push(PanelAction::IndicatorLow);
            actions.push(PanelAction::Delay(dwell));
        }

        // The BLINKING label stays until the next command even though the
        // sequence leaves the output low.
        self.indicator = IndicatorState::Blinking;
        actions
    }

    // Visual feedback pulse only; the reported indicator label is untouched.
    pub fn fetch_value(&mut self, value: u8) -> Vec<PanelAction> {
        self.last_sample = value.min(self.config.value_max);
        vec![
            PanelAction::IndicatorHigh,
            PanelAction::Delay(self.config.value_pulse_ms),
            PanelAction::IndicatorLow,
        ]
    }

    pub fn state_payload(&self, reading: &TemperatureReading) -> PanelStatePayload {
        PanelStatePayload {
            indicator: self.indicator.as_str(),
            last_sample: self.last_sample,
            celsius: reading.celsius,
            fahrenheit: reading.fahrenheit,
        }
    }
}
