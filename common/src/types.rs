use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndicatorState {
    Off,
    On,
    Blinking,
}

impl IndicatorState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
            Self::Blinking => "BLINKING",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PanelStatePayload {
    pub indicator: &'static str,
    #[serde(rename = "lastSample")]
    pub last_sample: u8,
    pub celsius: f32,
    pub fahrenheit: f32,
}
