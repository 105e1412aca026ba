use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    pub http_port: u16,
    pub recv_buffer_bytes: usize,
    pub blink_cycles: u32,
    pub blink_dwell_ms: u64,
    pub value_pulse_ms: u64,
    pub value_max: u8,
    pub shutdown_grace_ms: u64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            http_port: 80,
            recv_buffer_bytes: 1024,
            blink_cycles: 3,
            blink_dwell_ms: 500,
            value_pulse_ms: 250,
            value_max: 20,
            shutdown_grace_ms: 1_000,
        }
    }
}

impl PanelConfig {
    pub fn sanitize(&mut self) {
        self.recv_buffer_bytes = self.recv_buffer_bytes.clamp(64, 65_536);
        self.blink_cycles = self.blink_cycles.max(1);
        self.value_max = self.value_max.clamp(1, 20);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub wifi_ssid: String,
    pub wifi_pass: String,
    pub connect_timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            wifi_ssid: String::new(),
            wifi_pass: String::new(),
            connect_timeout_secs: 10,
            poll_interval_ms: 1_000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub panel: PanelConfig,
    pub network: NetworkConfig,
}
