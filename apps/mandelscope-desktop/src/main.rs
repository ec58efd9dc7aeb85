mod bindings;

use anyhow::Result;
use clap::Parser;
use crossbeam_channel::Receiver;
use glam::Vec2;
use mandelscope_console::ConsoleCommand;
use mandelscope_input::{Action, JULIA_PRESETS};
use mandelscope_render_wgpu::FractalRenderer;
use mandelscope_view::FractalView;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "mandelscope", about = "Interactive GPU Mandelbrot/Julia viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// WGSL shader file overriding the built-in fractal shader
    #[arg(long)]
    shader: Option<PathBuf>,
}

/// Scroll-wheel zoom factor per line.
const WHEEL_ZOOM_BASE: f32 = 1.1;
/// Pixels of wheel travel treated as one line (touchpads report pixels).
const WHEEL_PIXELS_PER_LINE: f32 = 120.0;

/// Application state: the fractal view plus transient input state.
struct AppState {
    view: FractalView,
    keys_held: HashSet<KeyCode>,
    dragging: bool,
    cursor: Option<Vec2>,
    size: PhysicalSize<u32>,
    console_rx: Receiver<ConsoleCommand>,
}

impl AppState {
    fn new(console_rx: Receiver<ConsoleCommand>) -> Self {
        Self {
            view: FractalView::new(),
            keys_held: HashSet::new(),
            dragging: false,
            cursor: None,
            size: PhysicalSize::new(1280, 720),
            console_rx,
        }
    }

    fn aspect(&self) -> f32 {
        self.size.width as f32 / self.size.height.max(1) as f32
    }

    /// Cursor position in normalized device coordinates (y up).
    fn cursor_ndc(&self) -> Option<Vec2> {
        let cursor = self.cursor?;
        Some(Vec2::new(
            cursor.x / self.size.width.max(1) as f32 * 2.0 - 1.0,
            1.0 - cursor.y / self.size.height.max(1) as f32 * 2.0,
        ))
    }

    fn fine_modifier(&self) -> bool {
        self.keys_held.contains(&KeyCode::ShiftLeft)
            || self.keys_held.contains(&KeyCode::ShiftRight)
    }

    /// Per-frame update: apply held-key actions, then advance animations.
    fn update(&mut self) {
        let held: Vec<Action> = self
            .keys_held
            .iter()
            .filter_map(|key| bindings::held_action(*key))
            .collect();
        for action in held {
            self.apply_action(action);
        }
        self.view.tick();
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::Pan(dir) => self.view.pan_step(dir, self.fine_modifier()),
            Action::ZoomIn => self.view.key_zoom_in(),
            Action::ZoomOut => self.view.key_zoom_out(),
            Action::ToggleKind => self.view.toggle_kind(),
            Action::IterationsUp => {
                let n = self.view.max_iterations().saturating_mul(2);
                self.view.set_max_iterations(n);
            }
            Action::IterationsDown => {
                let n = self.view.max_iterations() / 2;
                self.view.set_max_iterations(n);
            }
            Action::JuliaPreset(i) => {
                if let Some(c) = JULIA_PRESETS.get(i) {
                    self.view.begin_julia_tween(*c);
                }
            }
            Action::ResetView => self.view.reset(),
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            let newly_pressed = self.keys_held.insert(key);
            if newly_pressed {
                if let Some(action) = bindings::pressed_action(key) {
                    self.apply_action(action);
                }
            }
        } else {
            self.keys_held.remove(&key);
        }
    }

    fn on_cursor_moved(&mut self, pos: Vec2) {
        if self.dragging {
            if let Some(last) = self.cursor {
                let delta_px = pos - last;
                let half = self.view.half_extents(self.aspect());
                // Content follows the cursor: screen y grows downward.
                self.view.pan_by(Vec2::new(
                    -delta_px.x / self.size.width.max(1) as f32 * 2.0 * half.x,
                    delta_px.y / self.size.height.max(1) as f32 * 2.0 * half.y,
                ));
            }
        }
        self.cursor = Some(pos);
    }

    fn on_scroll(&mut self, delta: MouseScrollDelta) {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / WHEEL_PIXELS_PER_LINE,
        };
        if lines == 0.0 {
            return;
        }
        let factor = WHEEL_ZOOM_BASE.powf(lines);
        match self.cursor_ndc() {
            Some(ndc) => self.view.zoom_at(ndc, self.aspect(), factor),
            None => self.view.zoom_by(factor),
        }
    }

    /// Apply everything the console thread sent since last frame. Returns
    /// true when the user asked to quit.
    fn drain_console(&mut self) -> bool {
        let mut quit = false;
        while let Ok(cmd) = self.console_rx.try_recv() {
            match cmd {
                ConsoleCommand::SetIterations(n) => {
                    self.view.set_max_iterations(n);
                    tracing::info!("max iterations = {}", self.view.max_iterations());
                }
                ConsoleCommand::SetZoom(z) => {
                    self.view.set_zoom(z);
                    tracing::info!("zoom = {}", self.view.zoom());
                }
                ConsoleCommand::SetCenter(c) => {
                    self.view.set_center(c);
                    tracing::info!("center = ({}, {})", c.x, c.y);
                }
                ConsoleCommand::SetJulia(c) => {
                    self.view.begin_julia_tween(c);
                    tracing::info!("julia constant -> ({}, {})", c.x, c.y);
                }
                ConsoleCommand::SetKind(kind) => self.view.set_kind(kind),
                ConsoleCommand::Reset => self.view.reset(),
                // Answered directly by the reader thread.
                ConsoleCommand::Help => {}
                ConsoleCommand::Quit => quit = true,
            }
        }
        quit
    }
}

struct GpuApp {
    state: AppState,
    shader_override: Option<String>,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<FractalRenderer>,
}

impl GpuApp {
    fn new(console_rx: Receiver<ConsoleCommand>, shader_override: Option<String>) -> Self {
        Self {
            state: AppState::new(console_rx),
            shader_override,
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Mandelscope")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("mandelscope_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state.size = size;

        let renderer =
            FractalRenderer::new(&device, surface_format, self.shader_override.as_deref());

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.state.size = new_size;
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                self.state.dragging = btn_state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state
                    .on_cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.state.cursor = None;
                self.state.dragging = false;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.state.on_scroll(delta);
            }
            WindowEvent::RedrawRequested => {
                if self.state.drain_console() {
                    event_loop.exit();
                    return;
                }
                self.state.update();

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let target = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                if let Some(renderer) = &self.renderer {
                    renderer.render(device, queue, &target, &self.state.view, self.state.aspect());
                }

                output.present();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("mandelscope starting (type `help` for console commands)");

    let shader_override = match &cli.shader {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(source) => Some(source),
            Err(e) => {
                tracing::warn!("could not read shader {}: {e}", path.display());
                None
            }
        },
        None => None,
    };

    let console_rx = mandelscope_console::spawn_reader();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(console_rx, shader_override);
    event_loop.run_app(&mut app)?;

    Ok(())
}
