#[cfg(not(feature = "esp32"))]
fn main() -> anyhow::Result<()> {
    picopanel_controller::host::run()
}

#[cfg(feature = "esp32")]
fn main() -> anyhow::Result<()> {
    picopanel_controller::esp::run()
}
