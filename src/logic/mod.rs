//! Logic thread: owns the session and applies every mutation.
//!
//! The thread blocks on the bus until an action, a decode result or a system
//! event arrives, applies it, and publishes a render snapshot when the visible
//! state changed.

use crate::models::ConfiguratorConfig;
use crate::persistence::{FileStorage, KeyValueStorage, MemoryStorage};
use crate::state::Session;
use crate::system::bus::{SystemBus, SystemEvent};
use crossbeam_channel::select;
use std::thread;

/// Opens the configured storage file, or falls back to memory-only storage.
fn open_storage(config: &ConfiguratorConfig) -> Box<dyn KeyValueStorage> {
    match FileStorage::open(&config.storage_path) {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            log::error!(
                "LOGIC: Cannot open storage {:?}, design will not be saved: {}",
                config.storage_path,
                e
            );
            Box::new(MemoryStorage::default())
        }
    }
}

/// Spawns the logic thread.
pub fn start_thread(bus: SystemBus, config: ConfiguratorConfig) {
    thread::Builder::new()
        .name("Logic Thread".to_string())
        .spawn(move || {
            log::info!("LOGIC: Thread started");

            let storage = open_storage(&config);
            let mut session = Session::new(&config, storage, bus.decode_tx.clone());

            loop {
                if let Some(snapshot) = session.take_render_state()
                    && bus.render_tx.send(snapshot).is_err()
                {
                    log::error!("LOGIC: Render thread gone");
                    break;
                }

                select! {
                    recv(bus.action_rx) -> msg => match msg {
                        Ok(action) => session.handle_action(action),
                        Err(_) => break,
                    },
                    recv(bus.decoded_rx) -> msg => match msg {
                        Ok(outcome) => session.handle_decode(outcome),
                        Err(_) => break,
                    },
                    recv(bus.sys_rx) -> msg => match msg {
                        Ok(SystemEvent::Quit) | Err(_) => {
                            log::info!("LOGIC: Quit received...");
                            break;
                        }
                    },
                }
            }

            session.shutdown();
        })
        .expect("Failed to spawn Logic thread");
}
