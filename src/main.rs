//! Application entry point and thread bootstrapper.

mod decode;
mod input;
mod logic;
mod models;
mod persistence;
mod render;
mod shared;
mod state;
mod system;
mod views;

use crate::models::ConfiguratorConfig;
use crate::models::settings::CONFIG_PATH;
use crate::system::bus::SystemBus;
use std::path::PathBuf;

fn main() {
    if std::env::var_os("RUST_LOG").is_none() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    log::info!("MAIN: Booting configurator...");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_PATH));
    let config = ConfiguratorConfig::load(&config_path);

    let bus = SystemBus::new();

    let decode_bus = bus.clone();
    let input_bus = bus.clone();
    let logic_bus = bus.clone();
    let render_bus = bus.clone();

    let input_manager = input::manager::InputManager::new();

    decode::start_thread(decode_bus);
    input::start_thread(input_bus, input_manager);
    logic::start_thread(logic_bus, config.clone());

    if let Err(e) = render::app::App::run(render_bus, config) {
        log::error!("MAIN: Event loop failed: {}", e);
    }
}
