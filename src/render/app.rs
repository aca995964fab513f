//! Application window and event loop handler.
//!
//! This module manages the main window and bridges winit events to the
//! configurator's internal event system.

use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::input::events::RawInputEvent;
use crate::models::ConfiguratorConfig;
use crate::render::renderer::Renderer;
use crate::system::bus::{SystemBus, SystemEvent};
use crate::views::navbar::APP_TITLE;

/// Main application struct handling window events.
pub struct App {
    bus: SystemBus,
    config: ConfiguratorConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
}

impl App {
    pub fn new(bus: SystemBus, config: ConfiguratorConfig) -> Self {
        Self {
            bus,
            config,
            window: None,
            renderer: None,
        }
    }

    /// Runs the application event loop (blocking).
    pub fn run(
        bus: SystemBus,
        config: ConfiguratorConfig,
    ) -> Result<(), winit::error::EventLoopError> {
        let event_loop = winit::event_loop::EventLoop::new()?;
        event_loop.set_control_flow(winit::event_loop::ControlFlow::Poll);

        let mut app = App::new(bus, config);
        event_loop.run_app(&mut app)
    }

    fn quit(&self, event_loop: &ActiveEventLoop) {
        let _ = self.bus.sys_tx.send(SystemEvent::Quit);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!("RENDER: Creating window...");
        let win_attr = Window::default_attributes()
            .with_title(APP_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));

        let window = match event_loop.create_window(win_attr) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("RENDER: Cannot create window: {}", e);
                self.quit(event_loop);
                return;
            }
        };
        self.window = Some(window.clone());

        log::info!("RENDER: Initializing WGPU...");
        match pollster::block_on(Renderer::new(window.clone(), &self.config)) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                log::error!("RENDER: {}", e);
                self.quit(event_loop);
                return;
            }
        }

        window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(renderer) = self.renderer.as_mut()
            && let Some(window) = self.window.as_ref()
            && renderer.handle_event(window, &event)
        {
            return;
        }

        match event {
            WindowEvent::KeyboardInput { .. } => {
                if let Some(raw_event) = RawInputEvent::from_winit(&event) {
                    let _ = self.bus.raw_input_tx.send(raw_event);
                }
            }
            WindowEvent::CloseRequested => {
                log::info!("RENDER: Close requested");
                self.quit(event_loop);
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                let (Some(window), Some(renderer)) = (self.window.as_ref(), self.renderer.as_mut())
                else {
                    return;
                };

                // Update state from logic thread
                if let Some(snapshot) = self.bus.render_rx.try_iter().last() {
                    renderer.update_state(snapshot);
                }

                match renderer.render(window) {
                    Ok(actions) => {
                        for action in actions {
                            let _ = self.bus.action_tx.send(action);
                        }
                    }
                    // Surface lost or outdated - reconfigure
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        renderer.resize(window.inner_size());
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Render error: Out of memory!");
                        let _ = self.bus.sys_tx.send(SystemEvent::Quit);
                        event_loop.exit();
                    }
                    Err(wgpu::SurfaceError::Timeout) => {
                        log::warn!("Render timeout - frame dropped");
                    }
                    #[allow(unreachable_patterns)]
                    Err(e) => log::error!("Render error: {e:?}"),
                }
                window.request_redraw();
            }
            _ => {}
        }
    }
}
