use std::collections::HashSet;
use std::error::Error;
use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::Vec2;
use log::LevelFilter;
use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes};

use grid_raycast::visualization::{draw_scene, save_snapshot};
use grid_raycast::{Scene, SceneConfig, load_scene_config};

const FRAME_TIME: Duration = Duration::from_micros(16_667);

const CONTROLS: [&str; 7] = [
    "[wasd] to move origin",
    "[mouse] to move target",
    "[left click] to paint tile",
    "[right click] to remove tile",
    "[c] to clear tiles",
    "[t] to toggle traversed cells",
    "[p] to save a snapshot",
];

fn main() -> Result<(), Box<dyn Error>> {
    init_logger(LevelFilter::Info);

    let mut args = std::env::args();
    let _binary = args.next();
    let config = match args.next() {
        Some(path) => load_scene_config(&path)?,
        None => SceneConfig::default(),
    };

    for line in CONTROLS {
        log::info!("{line}");
    }

    let scene = Scene::new(&config)?;
    let event_loop = EventLoop::new()?;
    let mut app = ViewerApp::new(scene);
    event_loop.run_app(&mut app)?;

    Ok(())
}

fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

struct ViewerApp {
    scene: Scene,
    frame: image::RgbaImage,
    held_keys: HashSet<KeyCode>,
    painting: bool,
    erasing: bool,
    snapshots: u32,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
}

impl ViewerApp {
    fn new(scene: Scene) -> Self {
        let size = scene.screen_size();
        Self {
            frame: image::RgbaImage::new(size.x as u32, size.y as u32),
            scene,
            held_keys: HashSet::new(),
            painting: false,
            erasing: false,
            snapshots: 0,
            window: None,
            pixels: None,
        }
    }

    fn movement_axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.held_keys.contains(&KeyCode::KeyW) {
            axis.y -= 1.0;
        }
        if self.held_keys.contains(&KeyCode::KeyA) {
            axis.x -= 1.0;
        }
        if self.held_keys.contains(&KeyCode::KeyS) {
            axis.y += 1.0;
        }
        if self.held_keys.contains(&KeyCode::KeyD) {
            axis.x += 1.0;
        }
        axis
    }

    /// Advance the scene by one frame of held input.
    fn update(&mut self) {
        self.scene.move_origin(self.movement_axis());

        let target = self.scene.target();
        if self.painting {
            self.scene.paint(target);
        } else if self.erasing {
            self.scene.erase(target);
        }
    }

    fn handle_key_press(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        match key {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::KeyC => self.scene.clear(),
            KeyCode::KeyT => self.scene.toggle_traversal(),
            KeyCode::KeyP => {
                let path = format!("raycast-snapshot-{:03}.png", self.snapshots);
                self.snapshots += 1;
                if let Err(err) = save_snapshot(&self.scene, &path) {
                    log::error!("failed to save snapshot: {err}");
                }
            }
            _ => {}
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.update();

        let Some(pixels) = self.pixels.as_mut() else {
            return;
        };

        let ray = self.scene.cast();
        draw_scene(&self.scene, &ray, &mut self.frame);
        let frame = pixels.frame_mut();
        if frame.len() == self.frame.as_raw().len() {
            frame.copy_from_slice(self.frame.as_raw());
        }
        if let Err(err) = pixels.render() {
            log::error!("render failed: {err}");
            event_loop.exit();
            return;
        }

        if let Some(window) = &self.window {
            window.set_title(&self.scene.hud_lines(&ray).join("  |  "));
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let (width, height) = self.frame.dimensions();
        let window = match event_loop.create_window(
            WindowAttributes::default()
                .with_title("raycasting")
                .with_inner_size(PhysicalSize::new(width, height))
                .with_resizable(false),
        ) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        let pixels = match Pixels::new(width, height, surface_texture) {
            Ok(pixels) => pixels,
            Err(err) => {
                log::error!("failed to create pixels surface: {err}");
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.pixels = Some(pixels);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(pixels) = self.pixels.as_mut() {
                    if pixels.resize_surface(size.width, size.height).is_err() {
                        event_loop.exit();
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };
                match event.state {
                    ElementState::Pressed => {
                        if !event.repeat {
                            self.handle_key_press(event_loop, key);
                        }
                        self.held_keys.insert(key);
                    }
                    ElementState::Released => {
                        self.held_keys.remove(&key);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(pixels) = self.pixels.as_ref() {
                    let pos = (position.x as f32, position.y as f32);
                    let target = match pixels.window_pos_to_pixel(pos) {
                        Ok((x, y)) => Vec2::new(x as f32, y as f32),
                        Err((x, y)) => Vec2::new(x as f32, y as f32),
                    };
                    self.scene.set_target(target);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.painting = pressed,
                    MouseButton::Right => self.erasing = pressed,
                    _ => {}
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + FRAME_TIME));
    }
}
