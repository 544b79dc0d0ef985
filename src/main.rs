use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info, warn};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

mod core;
mod engine;
mod game;

use engine::assets::{AssetLoader, SpriteSheet};
use engine::game_loop::{GameLoop, FIXED_TIMESTEP};
use engine::input::{Action, InputManager};
use engine::renderer::{Camera, Renderer};
use game::config::{WorldConfig, DEFAULT_PLAYER, DEFAULT_WORLD};
use game::player::PlayerController;
use game::scene::Scene;

const CHARACTER_SHEET: &str = "characters.png";
const SHEET_CELL_SIZE: u32 = 16;

/// Log the measured FPS once every this many frames
const FPS_LOG_INTERVAL: u64 = 300;

/// Everything the event loop touches
struct App {
    window: Arc<Window>,
    renderer: Renderer,
    input: InputManager,
    game_loop: GameLoop,
    world: WorldConfig,
    player: PlayerController,
    sprites: Option<SpriteSheet>,
}

impl App {
    fn tick(&mut self) {
        let updates = self.game_loop.begin_frame();
        for _ in 0..updates {
            self.player.update(FIXED_TIMESTEP, self.input.controls());
        }

        if self.game_loop.frame_count() % FPS_LOG_INTERVAL == 0 {
            debug!(
                "FPS: {:.1} ({} updates so far)",
                self.game_loop.fps(),
                self.game_loop.update_count()
            );
        }

        self.window.request_redraw();
    }

    /// Returns false when the app should exit
    fn redraw(&mut self) -> bool {
        let commands = Scene::draw_commands(&self.world, &self.player, self.sprites.as_ref());
        match self.renderer.render(&commands) {
            Ok(()) => true,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                self.renderer.reconfigure();
                true
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                false
            }
            Err(e) => {
                warn!("Skipping frame: {:?}", e);
                true
            }
        }
    }
}

fn load_sprites() -> Option<SpriteSheet> {
    let loader = AssetLoader::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"));
    let sheet = loader
        .load_bytes(CHARACTER_SHEET)
        .and_then(|bytes| SpriteSheet::from_bytes(&bytes, SHEET_CELL_SIZE, SHEET_CELL_SIZE));

    match sheet {
        Ok(sheet) => {
            info!(
                "Loaded sprite sheet {} ({}x{} cells)",
                CHARACTER_SHEET,
                sheet.cols(),
                sheet.rows()
            );
            Some(sheet)
        }
        Err(e) => {
            warn!("Failed to load sprite sheet, drawing placeholders: {}", e);
            None
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting chargejump...");

    let world = DEFAULT_WORLD;
    let player = PlayerController::new(DEFAULT_PLAYER, world)?;

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Chargejump")
            .with_inner_size(winit::dpi::LogicalSize::new(world.width, world.height))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let sprites = load_sprites();
    let camera = Camera::new(world.width, world.height);
    let renderer = pollster::block_on(Renderer::new(
        window.clone(),
        &camera,
        sprites.as_ref().map(|sheet| sheet.image()),
    ))?;

    let mut app = App {
        window,
        renderer,
        input: InputManager::default(),
        game_loop: GameLoop::new(),
        world,
        player,
        sprites,
    };

    event_loop.set_control_flow(ControlFlow::Poll);

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    app.input.process_keyboard_event(&event);
                    if app.input.is_pressed(Action::Quit) {
                        info!("Quit pressed, shutting down...");
                        elwt.exit();
                    }
                }
                WindowEvent::Focused(false) => app.input.reset(),
                WindowEvent::Resized(physical_size) => app.renderer.resize(physical_size),
                WindowEvent::RedrawRequested => {
                    if !app.redraw() {
                        elwt.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => app.tick(),
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    info!("Goodbye");
    Ok(())
}
