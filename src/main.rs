use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use camera_lab::camera::Camera;
use camera_lab::cli::Cli;
use camera_lab::config::AppConfig;
use camera_lab::core::{CameraRig, Clock, FrameEvents, FrameInput, WinitController};
use camera_lab::render::SkyRenderer;

const HUD_UPDATE_INTERVAL: f32 = 0.1;

const HELP: &str = "\
Controls:
  W/A/S/D, Space/Shift  move
  Arrow keys, Q/E       yaw/pitch, roll
  Tab                   capture mouse (look + wheel zoom)
  M                     toggle Euler / quaternion mode
  L                     look at target
  1                     quaternion preset on world axes (pitch 90 by default)
  2                     quaternion from axis-angle
  3 / 4                 step about the world axis / the camera's own axis
  R                     reset camera
  Escape                quit";

struct App {
    config: AppConfig,
    show_ui: bool,
    window: Option<Arc<Window>>,
    renderer: Option<SkyRenderer>,
    rig: CameraRig,
    controller: WinitController,
    clock: Clock,
    hud_timer: f32,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: AppConfig, show_ui: bool) -> Result<Self> {
        let rig = CameraRig::new(config.camera.clone()).context("invalid camera config")?;
        Ok(Self {
            config,
            show_ui,
            window: None,
            renderer: None,
            rig,
            controller: WinitController::new(),
            clock: Clock::new(),
            hud_timer: 0.0,
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = event_loop
            .create_window(
                Window::default_attributes()
                    .with_title(self.config.window.title.clone())
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        self.config.window.width,
                        self.config.window.height,
                    )),
            )
            .context("failed to create window")?;
        let window = Arc::new(window);

        let renderer = pollster::block_on(SkyRenderer::new(window.clone()))
            .context("failed to initialize renderer")?;

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.clock.reset();
        Ok(())
    }

    fn frame(&mut self) {
        let delta = self.clock.tick();
        let input = FrameInput::capture(&self.controller);
        self.controller.reset_deltas();

        match self.rig.update(&input, delta) {
            Ok(events) => self.apply_events(events),
            Err(e) => log::error!("camera update failed: {}", e),
        }

        self.hud_timer += delta;
        if self.show_ui && self.hud_timer >= HUD_UPDATE_INTERVAL {
            self.hud_timer = 0.0;
            if let Some(window) = &self.window {
                window.set_title(&hud_title(&self.config.window.title, self.rig.camera()));
            }
        }

        if let Some(renderer) = &mut self.renderer {
            let uniform = self.rig.camera().to_uniform(renderer.aspect());
            if let Err(e) = renderer.render(&uniform) {
                log::error!("render error: {:#}", e);
            }
        }
    }

    fn apply_events(&mut self, events: FrameEvents) {
        if let Some(captured) = events.capture_changed {
            if let Some(window) = &self.window {
                set_cursor_captured(window, captured);
            }
            // positions went stale while the cursor was grabbed
            self.controller.forget_cursor();
            log::info!("mouse capture {}", if captured { "on" } else { "off" });
        }
        if let Some(preset) = events.preset {
            log::info!("applied {}, front {}", preset, self.rig.camera().front());
        }
        if events.looked_at_target {
            log::info!("looking at {}", self.rig.config().look_target());
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::Focused(false) => {
                self.controller.process_event(&event);
                if self.rig.is_captured() {
                    self.rig.set_captured(false);
                    self.controller.forget_cursor();
                    if let Some(window) = &self.window {
                        set_cursor_captured(window, false);
                    }
                }
            }
            // captured look reads device motion instead
            WindowEvent::CursorMoved { .. } if self.rig.is_captured() => {}
            WindowEvent::RedrawRequested => self.frame(),
            _ => self.controller.process_event(&event),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if self.rig.is_captured() {
                self.controller.add_motion(dx as f32, dy as f32);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn set_cursor_captured(window: &Window, captured: bool) {
    let result = if captured {
        window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
    } else {
        window.set_cursor_grab(CursorGrabMode::None)
    };
    if let Err(e) = result {
        log::warn!("cursor grab unavailable: {}", e);
    }
    window.set_cursor_visible(!captured);
}

fn hud_title(title: &str, camera: &Camera) -> String {
    let orientation = match (camera.euler_angles(), camera.quaternion()) {
        (Some(angles), _) => format!(
            "yaw {:.1} pitch {:.1} roll {:.1}",
            angles.yaw, angles.pitch, angles.roll
        ),
        (None, Some(q)) => format!("q ({:.3}, {:.3}, {:.3}, {:.3})", q.w, q.x, q.y, q.z),
        (None, None) => String::new(),
    };
    format!(
        "{} | {} | {} | fov {:.1}",
        title,
        camera.mode(),
        orientation,
        camera.fov()
    )
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.camera.mode = mode.into();
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if cli.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }
    if !cli.no_ui {
        println!("{}", HELP);
    }

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(config, !cli.no_ui)?;
    log::info!("starting in {} mode", app.rig.camera().mode());

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
