use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{CursorGrabMode, Window, WindowId},
};

use rayview::camera::Camera;
use rayview::cli::Cli;
use rayview::clock::FrameClock;
use rayview::config::ViewerConfig;
use rayview::input::{CursorRequest, InputDispatcher};
use rayview::renderer::Renderer;

const FPS_UPDATE_INTERVAL: f32 = 1.0;

struct App {
    config: ViewerConfig,
    shader_path: PathBuf,
    no_ui: bool,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    camera: Camera,
    dispatcher: InputDispatcher,
    clock: FrameClock,
    delta: f32,
    frame_count: u32,
    fps: f32,
    fps_update_timer: f32,
    init_error: Option<anyhow::Error>,
}

impl App {
    fn new(config: ViewerConfig, shader_path: PathBuf, no_ui: bool) -> Self {
        let camera = Camera::new(config.movement_speed, config.bounds);
        let dispatcher = InputDispatcher::new(config.mouse_sensitivity, config.width, config.height);
        Self {
            config,
            shader_path,
            no_ui,
            window: None,
            renderer: None,
            camera,
            dispatcher,
            clock: FrameClock::new(),
            delta: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_update_timer: 0.0,
            init_error: None,
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.fps_update_timer;
            debug!("fps: {:.1}", self.fps);
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }

    /// Apply a pointer side effect requested by the dispatcher. Grab and
    /// reposition failures are platform limitations, not fatal.
    fn apply_cursor_request(&self, request: CursorRequest) {
        let Some(window) = &self.window else { return };
        let center = self.dispatcher.window_center();
        let center = winit::dpi::PhysicalPosition::new(center.x as f64, center.y as f64);
        match request {
            CursorRequest::Lock => {
                if let Err(e) = window.set_cursor_position(center) {
                    debug!("cursor reposition unsupported: {e}");
                }
                if let Err(e) = window
                    .set_cursor_grab(CursorGrabMode::Locked)
                    .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
                {
                    warn!("cursor grab unsupported: {e}");
                }
                window.set_cursor_visible(false);
            }
            CursorRequest::Release => {
                if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                    warn!("cursor release failed: {e}");
                }
                window.set_cursor_visible(true);
            }
            CursorRequest::Recenter => {
                if let Err(e) = window.set_cursor_position(center) {
                    debug!("cursor reposition unsupported: {e}");
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        // Shutdown is honored at the iteration boundary; no further frames
        // are rendered once it is requested.
        if self.dispatcher.control.shutdown_requested {
            event_loop.exit();
            return;
        }

        self.delta = self.clock.tick();
        let delta = self.delta;
        self.update_fps(delta);

        if self.dispatcher.control.take_reload_request() {
            if let Some(renderer) = &mut self.renderer {
                renderer.reload_shader();
            }
        }

        self.dispatcher.apply_held_movement(&mut self.camera, delta);

        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            match renderer.render(&self.camera, &self.dispatcher.control, window, self.fps) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = renderer.size();
                    renderer.resize(size);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    error!("surface out of memory");
                    event_loop.exit();
                }
                Err(e) => warn!("frame dropped: {e:?}"),
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(self.config.width, self.config.height));

        let window = match event_loop.create_window(attributes) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.init_error = Some(anyhow::anyhow!("failed to create window: {e}"));
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.dispatcher.set_window_size(size.width, size.height);

        let renderer = match pollster::block_on(Renderer::new(
            window.clone(),
            &self.config,
            &self.shader_path,
            self.no_ui,
        )) {
            Ok(r) => r,
            Err(e) => {
                self.init_error = Some(e.context("failed to initialize renderer"));
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.renderer = Some(renderer);
        // Discard time spent on GPU setup so the first frame delta is small
        self.clock.reset();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let the overlay consume its own events first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                self.dispatcher.set_window_size(size.width, size.height);
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(request) = self.dispatcher.handle_key(&event) {
                    self.apply_cursor_request(request);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                if let Some((look, request)) = self.dispatcher.handle_pointer(position, self.delta)
                {
                    self.camera.apply_look(look);
                    self.apply_cursor_request(request);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };

    info!("controls: C lock camera, WASD/E/Q move, V/B rebounds, R reload shader, Esc quit");

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(config, cli.shader, cli.no_ui);
    event_loop.run_app(&mut app)?;

    // Initialization failures exit the loop early; report them as a
    // nonzero process status.
    if let Some(e) = app.init_error.take() {
        return Err(e);
    }
    Ok(())
}
