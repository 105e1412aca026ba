pub mod error;
pub mod hal;
pub mod net;
pub mod server;

#[cfg(feature = "esp32")]
pub mod esp;
#[cfg(not(feature = "esp32"))]
pub mod host;
