pub mod config;
pub mod page;
pub mod panel;
pub mod route;
pub mod temperature;
pub mod types;

pub use config::{NetworkConfig, PanelConfig, RuntimeConfig};
pub use page::StatusPage;
pub use panel::{PanelAction, PanelEngine};
pub use route::Route;
pub use temperature::{celsius_from_raw, celsius_to_fahrenheit, TemperatureReading};
pub use types::{IndicatorState, PanelStatePayload};
