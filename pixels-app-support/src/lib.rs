#![deny(clippy::all)]
#![forbid(unsafe_code)]

use error_iter::ErrorIter as _;
use life_grid::World;
use life_view::{Rasterizer, ViewCommand, ViewController, Viewport};
use log::{error, info};
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{
    ElementState, KeyEvent, MouseButton, MouseScrollDelta, StartCause, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Cursor, CursorIcon, Window, WindowId};

const BACKGROUND_COLOR: Color = Color::BLACK;

/// Static configuration for the window and frame pacing.
#[derive(Clone, Copy, Debug)]
pub struct AppConfig {
    pub title: &'static str,
    pub out_width: u32,
    pub out_height: u32,
    pub frame_delay_millis: u64,
}

/// Runs the event loop until quit: translates window events into view
/// commands, advances the world one generation per pacing tick, rasterizes
/// the visible sub-rectangle and presents it.
pub fn animate<W: World>(config: AppConfig, world: W) {
    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop
        .run_app(&mut AppEventHandler::new(config, world))
        .unwrap();
}

struct App<W: World> {
    world: W,
    controller: ViewController,
    rasterizer: Rasterizer,
    window: Arc<Window>,
    pixels: Pixels<'static>,
    cursor: PhysicalPosition<f64>,
    next_update: Instant,
    generations: u64,
}

impl<W: World> App<W> {
    fn new(event_loop: &ActiveEventLoop, config: &AppConfig, world: W) -> Self {
        let window = Arc::new(Self::build_window(event_loop, config));
        let pixels = Self::build_pixels(&window, config.out_width, config.out_height);
        let viewport = Viewport::new(
            world.width(),
            world.height(),
            config.out_width,
            config.out_height,
        );
        Self {
            world,
            controller: ViewController::new(viewport, config.frame_delay_millis),
            rasterizer: Rasterizer::new(config.out_width, config.out_height),
            window,
            pixels,
            cursor: PhysicalPosition::new(0.0, 0.0),
            next_update: Instant::now(),
            generations: 0,
        }
    }

    fn build_window(event_loop: &ActiveEventLoop, config: &AppConfig) -> Window {
        let window_attributes = Window::default_attributes()
            .with_title(config.title)
            .with_inner_size(PhysicalSize::new(config.out_width, config.out_height))
            .with_cursor(Cursor::Icon(CursorIcon::Crosshair))
            .with_visible(false);
        event_loop.create_window(window_attributes).unwrap()
    }

    fn build_pixels(window: &Arc<Window>, width: u32, height: u32) -> Pixels<'static> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        PixelsBuilder::new(width, height, surface_texture)
            .clear_color(BACKGROUND_COLOR)
            .build()
            .unwrap()
    }

    fn on_create(&mut self) {
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn on_time_step(&mut self) {
        self.world.update();
        self.generations += 1;
        self.window.request_redraw();

        while self.next_update < Instant::now() {
            self.next_update += self.controller.frame_delay();
        }
    }

    fn on_redraw(&mut self) -> Result<(), pixels::Error> {
        let frame = self.rasterizer.render(&self.world, self.controller.viewport());
        let screen = self.pixels.frame_mut();
        debug_assert_eq!(screen.len(), 4 * frame.len());

        for (argb, pixel) in frame.iter().zip(screen.chunks_exact_mut(4)) {
            let [a, r, g, b] = argb.to_be_bytes();
            pixel.copy_from_slice(&[r, g, b, a]);
        }
        self.pixels.render()
    }

    fn apply(&mut self, command: ViewCommand) {
        self.controller.apply(command);
        self.window.request_redraw();
    }

    fn cursor_y(&self) -> i32 {
        self.cursor.y as i32
    }

    fn cursor_x(&self) -> i32 {
        self.cursor.x as i32
    }
}

struct AppEventHandler<W: World> {
    config: AppConfig,
    pending_world: Option<W>,
    app: Option<App<W>>,
}

impl<W: World> AppEventHandler<W> {
    fn new(config: AppConfig, world: W) -> Self {
        Self {
            config,
            pending_world: Some(world),
            app: None,
        }
    }

    fn app(&mut self) -> &mut App<W> {
        self.app.as_mut().unwrap()
    }

    fn quit(&mut self, event_loop: &ActiveEventLoop) {
        info!("exiting after {} generations", self.app().generations);
        event_loop.exit();
    }
}

impl<W: World> ApplicationHandler for AppEventHandler<W> {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            self.app().on_time_step();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_none() {
            let world = self.pending_world.take().unwrap();
            self.app = Some(App::new(event_loop, &self.config, world));
            self.app().on_create();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.quit(event_loop);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Released,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape | KeyCode::KeyQ => self.quit(event_loop),
                KeyCode::ArrowUp => self.app().apply(ViewCommand::SpeedUp),
                KeyCode::ArrowDown => self.app().apply(ViewCommand::SpeedDown),
                _ => (),
            },
            WindowEvent::CursorMoved { position, .. } => {
                let app = self.app();
                app.cursor = position;
                let command = ViewCommand::DragMove {
                    y: app.cursor_y(),
                    x: app.cursor_x(),
                };
                app.apply(command);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let app = self.app();
                let command = match state {
                    ElementState::Pressed => ViewCommand::DragStart {
                        y: app.cursor_y(),
                        x: app.cursor_x(),
                    },
                    ElementState::Released => ViewCommand::DragEnd,
                };
                app.apply(command);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = wheel_steps(delta);
                if steps != 0 {
                    let app = self.app();
                    let command = ViewCommand::Zoom {
                        delta: steps,
                        y: app.cursor_y(),
                        x: app.cursor_x(),
                    };
                    app.apply(command);
                }
            }
            WindowEvent::Resized(size) => {
                if let Err(err) = self.app().pixels.resize_surface(size.width, size.height) {
                    log_error("resize_surface", err);
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.app().on_redraw() {
                    log_error("render", err);
                    event_loop.exit();
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let wakeup_time = self.app().next_update;
        event_loop.set_control_flow(ControlFlow::WaitUntil(wakeup_time));
    }
}

fn wheel_steps(delta: MouseScrollDelta) -> i32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y.round() as i32,
        MouseScrollDelta::PixelDelta(position) => {
            if position.y > 0.0 {
                1
            } else if position.y < 0.0 {
                -1
            } else {
                0
            }
        }
    }
}

fn log_error<E: std::error::Error + 'static>(method_name: &str, err: E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}
