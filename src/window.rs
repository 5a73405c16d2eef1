//! Interactive window: a full-window fireworks field.
//!
//! Wires `winit` events to a [`Scene`]: resize, clicks, keys, the burst
//! timer (checked every loop iteration) and one tick + render per redraw.
//! While the field is empty the loop sleeps until [`Scene::idle_for`]
//! says something is due.

use crate::canvas::Canvas;
use crate::config::SkyburstConfig;
use crate::error::RunError;
use crate::gpu::GpuCanvas;
use crate::input::Input;
use crate::scene::{Scene, SceneEvent};
use crate::schedule::FrameClock;
use crate::share::ShareAction;
use std::sync::Arc;
use std::time::{Instant, SystemTime};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

/// Open the window and run until it is closed.
pub fn run(config: SkyburstConfig, seed: u64) -> Result<(), RunError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, seed);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    config: SkyburstConfig,
    window: Option<Arc<Window>>,
    canvas: Option<GpuCanvas>,
    scene: Scene,
    input: Input,
    clock: FrameClock,
    last_update: Instant,
    error: Option<RunError>,
}

impl App {
    fn new(config: SkyburstConfig, seed: u64) -> Self {
        let scene = Scene::new(&config, config.window.width, config.window.height, seed);
        Self {
            config,
            window: None,
            canvas: None,
            scene,
            input: Input::new(),
            clock: FrameClock::new(),
            last_update: Instant::now(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let canvas = pollster::block_on(GpuCanvas::new(window.clone()))?;
        let (width, height) = canvas.size();
        self.scene.resize(width, height);

        self.window = Some(window);
        self.canvas = Some(canvas);
        self.last_update = Instant::now();
        tracing::info!(width, height, "window ready");
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.clock.handle().cancel();
        self.scene.stop();
        event_loop.exit();
    }

    fn handle_scene_event(&mut self, event: SceneEvent, event_loop: &ActiveEventLoop) {
        match event {
            SceneEvent::Greeting(wish) => tracing::info!("{wish}"),
            SceneEvent::Music(label) => tracing::info!(label, "music button"),
            SceneEvent::Share(ShareAction::OpenWindow { url, .. }) => {
                tracing::info!(%url, "share link")
            }
            SceneEvent::Share(ShareAction::CopyLink { url, instructions }) => {
                tracing::info!(%url, "{instructions}")
            }
            SceneEvent::CopyLink(url) => tracing::info!(%url, "link to copy"),
            SceneEvent::CopyFeedbackHidden => tracing::debug!("copy notice hidden"),
            SceneEvent::Countdown(left, _) => {
                if let Some(window) = &self.window {
                    window.set_title(&format!("{} | {left}", self.config.window.title));
                }
            }
            SceneEvent::CelebrationStarted => {
                if let Some(window) = &self.window {
                    window.set_title(&format!("{} | Happy New Year!", self.config.window.title));
                }
            }
            SceneEvent::Quit => self.shutdown(event_loop),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                tracing::error!(error = %e, "setup failed");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(command) = self.input.handle_event(&event) {
            if let Some(scene_event) = self.scene.apply(command) {
                self.handle_scene_event(scene_event, event_loop);
            }
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(physical_size) => {
                if let Some(canvas) = &mut self.canvas {
                    canvas.resize(physical_size.width, physical_size.height);
                }
                self.scene.resize(physical_size.width, physical_size.height);
                tracing::info!(
                    width = physical_size.width,
                    height = physical_size.height,
                    "resized"
                );
            }
            WindowEvent::RedrawRequested => {
                if !self.clock.is_running() {
                    return;
                }
                self.clock.update();
                let mut out_of_memory = false;
                if let Some(canvas) = &mut self.canvas {
                    self.scene.frame(canvas);
                    match canvas.present() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            tracing::warn!("surface lost, reconfiguring");
                            canvas.reconfigure();
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => out_of_memory = true,
                        Err(e) => tracing::warn!(error = %e, "render error"),
                    }
                }
                if out_of_memory {
                    tracing::error!("out of GPU memory");
                    self.shutdown(event_loop);
                    return;
                }
                if self.clock.frame() % 600 == 0 {
                    tracing::debug!(
                        fps = self.clock.fps(),
                        live = self.scene.field().len(),
                        "frame stats"
                    );
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_update);
        self.last_update = now;

        for scene_event in self.scene.advance(dt, SystemTime::now()) {
            self.handle_scene_event(scene_event, event_loop);
        }

        if !self.clock.is_running() {
            return;
        }
        // Sleep until the next scheduled change while nothing is on screen.
        match self.scene.idle_for(SystemTime::now()) {
            Some(wait) => event_loop.set_control_flow(ControlFlow::WaitUntil(now + wait)),
            None => {
                event_loop.set_control_flow(ControlFlow::Poll);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
        }
    }
}
