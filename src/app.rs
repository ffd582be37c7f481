//! Interactive and headless front ends around the frame renderer.

use std::fmt;

use log::{debug, info};

use crate::camera::{Camera, CameraController};
use crate::config::Config;
use crate::demo;
use crate::engine::{Engine, RenderContext};
use crate::input::{Command, LoopControl};
use crate::math::vec3::Vec3;
use crate::mesh::LoadError;
use crate::scene::Scene;
use crate::texture::{TextureError, TextureImage};
use crate::window::{FrameLimiter, Window, WindowEvent};

#[derive(Debug)]
pub enum AppError {
    Window(String),
    Load(LoadError),
    Texture(TextureError),
    Image(image::ImageError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Window(e) => write!(f, "window error: {e}"),
            AppError::Load(e) => write!(f, "{e}"),
            AppError::Texture(e) => write!(f, "{e}"),
            AppError::Image(e) => write!(f, "failed to write image: {e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Window(_) => None,
            AppError::Load(e) => Some(e),
            AppError::Texture(e) => Some(e),
            AppError::Image(e) => Some(e),
        }
    }
}

impl From<String> for AppError {
    fn from(e: String) -> Self {
        AppError::Window(e)
    }
}

impl From<LoadError> for AppError {
    fn from(e: LoadError) -> Self {
        AppError::Load(e)
    }
}

impl From<TextureError> for AppError {
    fn from(e: TextureError) -> Self {
        AppError::Texture(e)
    }
}

impl From<image::ImageError> for AppError {
    fn from(e: image::ImageError) -> Self {
        AppError::Image(e)
    }
}

/// Loads the texture (unless disabled) and the scene described by `config`.
pub fn load_scene(config: &Config) -> Result<Scene, AppError> {
    let texture = if config.no_texture {
        None
    } else {
        let texture = TextureImage::from_file(&config.texture)?;
        info!(
            "Loaded texture {} ({}x{})",
            config.texture.display(),
            texture.width(),
            texture.height()
        );
        Some(texture)
    };

    let mut scene = Scene::load(&config.obj, &config.scene_options(texture.as_ref()))?;
    if let Some(texture) = texture {
        scene = scene.with_texture(texture);
    }
    scene.check_texture();
    Ok(scene)
}

pub struct App {
    config: Config,
    scene: Scene,
    engine: Engine,
    context: RenderContext,
    controller: CameraController,
    rng: rand::rngs::ThreadRng,
}

impl App {
    pub fn new(config: Config, scene: Scene) -> Self {
        let camera = Camera::new(crate::camera::DEFAULT_POSITION, config.focal_length);
        let engine = Engine::new(config.width, config.height);
        let context = RenderContext::new(camera, config.width, config.height);
        Self {
            config,
            scene,
            engine,
            context,
            controller: CameraController::default(),
            rng: rand::rng(),
        }
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Applies one command. Returns [`LoopControl::Exit`] on quit.
    pub fn handle(&mut self, command: Command) -> Result<LoopControl, AppError> {
        debug!("command: {command:?}");
        match command {
            Command::Quit => return Ok(LoopControl::Exit),
            Command::Save => self.save()?,
            Command::ClearOverlay => self.context.clear_overlay(),
            Command::Draw(mode) => {
                let demo = demo::for_mode(&mut self.rng, mode, self.config.width, self.config.height);
                self.context.push_overlay(demo);
            }
            camera_command => {
                self.controller.apply(&mut self.context.camera, camera_command);
            }
        }
        Ok(LoopControl::Continue)
    }

    /// Re-aims the camera (unless free look is on) and renders a frame.
    pub fn draw(&mut self) {
        if !self.config.free_look {
            self.context.camera.look_at(Vec3::ZERO);
        }
        self.engine.render_frame(&mut self.context, &self.scene);
    }

    pub fn save(&self) -> Result<(), AppError> {
        self.context.renderer.save_ppm(&self.config.output)?;
        info!("Saved frame to {}", self.config.output.display());
        Ok(())
    }

    /// Renders one frame and writes it to the output file.
    pub fn run_headless(mut self) -> Result<(), AppError> {
        self.draw();
        self.save()
    }

    /// Runs the interactive loop until the window is closed.
    pub fn run(mut self) -> Result<(), AppError> {
        let mut window = Window::new("redraster", self.config.width, self.config.height)?;
        let mut limiter = FrameLimiter::new(&window);
        info!(
            "Rendering {} triangles at {}x{}",
            self.scene.triangles().len(),
            window.width(),
            window.height()
        );

        loop {
            if self.step(&mut window)? == LoopControl::Exit {
                break;
            }
            limiter.wait_and_get_delta(&window);
        }
        Ok(())
    }

    fn step(&mut self, window: &mut Window) -> Result<LoopControl, AppError> {
        if let WindowEvent::Command(command) = window.poll_event() {
            if self.handle(command)? == LoopControl::Exit {
                return Ok(LoopControl::Exit);
            }
        }
        self.draw();
        window.present(self.context.renderer.as_bytes())?;
        Ok(LoopControl::Continue)
    }
}
