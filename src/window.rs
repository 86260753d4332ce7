//! Window, event loop and the per-frame driver.

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::gpu::GpuState;
use crate::scene::Scene;
use crate::time::FrameClock;
use crate::ui::{self, UiAction};

/// Frames between FPS log lines.
const FPS_LOG_INTERVAL: u64 = 600;

struct App {
    config: SceneConfig,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    scene: Option<Scene>,
    clock: FrameClock,
    /// First fatal error, returned from [`run`] after the loop exits.
    error: Option<SceneError>,
}

impl App {
    fn new(config: SceneConfig) -> Self {
        Self {
            config,
            window: None,
            gpu_state: None,
            scene: None,
            clock: FrameClock::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SceneError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let logical = window
            .inner_size()
            .to_logical::<f32>(window.scale_factor());

        let scene = Scene::new(self.config.clone(), logical.width, logical.height);
        let gpu_state = pollster::block_on(GpuState::new(window.clone(), &scene))?;

        window.request_redraw();
        self.window = Some(window);
        self.scene = Some(scene);
        self.gpu_state = Some(gpu_state);
        self.clock = FrameClock::new();
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match &event.logical_key {
            Key::Named(NamedKey::Space | NamedKey::Enter) => {
                if let Some(scene) = &mut self.scene {
                    scene.trigger_reveal();
                }
            }
            Key::Named(NamedKey::Escape) => event_loop.exit(),
            _ => {}
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu_state), Some(scene)) =
            (&self.window, &mut self.gpu_state, &mut self.scene)
        else {
            return;
        };

        let delta = self.clock.tick();
        if self.clock.frame() % FPS_LOG_INTERVAL == 0 {
            log::debug!("{:.1} fps", self.clock.fps());
        }

        let mut action = None;
        let ui_output = gpu_state.egui.run(window, |ctx| {
            action = ui::draw(ctx, scene);
        });

        match action {
            Some(UiAction::Start) => {
                scene.trigger_reveal();
            }
            Some(UiAction::SayThanks) => {
                log::info!("Opening thanks link: {}", scene.thanks_link());
            }
            None => {}
        }

        scene.update(delta);

        match gpu_state.render(scene, &ui_output) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu_state.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory; exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }

        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("Failed to start: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) {
            if gpu_state.egui.on_window_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                if let (Some(window), Some(scene)) = (&self.window, &mut self.scene) {
                    let logical = physical_size.to_logical::<f32>(window.scale_factor());
                    scene.resize(logical.width, logical.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event_loop, &event);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }
}

/// Open the window and run until it is closed.
pub fn run(config: SceneConfig) -> Result<(), SceneError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
