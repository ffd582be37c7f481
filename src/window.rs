use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::input::{Axis, Command};
use crate::render::DrawMode;

pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Command(Command),
}

/// Maps a pressed key to its command.
pub fn command_for_key(key: Keycode) -> Option<Command> {
    let movement = |axis, positive| Some(Command::Move { axis, positive });
    let orbit = |axis, positive| Some(Command::Orbit { axis, positive });
    let turn = |axis, positive| Some(Command::Turn { axis, positive });
    match key {
        Keycode::W => movement(Axis::Z, false),
        Keycode::S => movement(Axis::Z, true),
        Keycode::Z => movement(Axis::X, false),
        Keycode::C => movement(Axis::X, true),
        Keycode::Q => movement(Axis::Y, true),
        Keycode::E => movement(Axis::Y, false),
        Keycode::A => orbit(Axis::Y, true),
        Keycode::D => orbit(Axis::Y, false),
        Keycode::R => orbit(Axis::X, true),
        Keycode::V => orbit(Axis::X, false),
        Keycode::N => turn(Axis::Y, true),
        Keycode::M => turn(Axis::Y, false),
        Keycode::J => turn(Axis::X, true),
        Keycode::K => turn(Axis::X, false),
        Keycode::U => Some(Command::Draw(DrawMode::Stroked)),
        Keycode::F => Some(Command::Draw(DrawMode::Filled)),
        Keycode::T => Some(Command::Draw(DrawMode::Textured)),
        Keycode::Backspace => Some(Command::ClearOverlay),
        Keycode::Escape => Some(Command::Quit),
        _ => None,
    }
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time - self.previous_frame_time;

        if delta_time < FRAME_TARGET_TIME as u64 {
            let time_to_wait = (FRAME_TARGET_TIME as u64) - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time - self.previous_frame_time;
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // Field order matters: the texture must drop before its creator.
    texture: sdl2::render::Texture<'static>,
    _texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // The texture field is declared first so it is dropped before the creator.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            canvas,
            texture,
            _texture_creator: texture_creator,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    /// Takes at most one pending event off the queue without blocking.
    pub fn poll_event(&mut self) -> WindowEvent {
        let Some(event) = self.event_pump.poll_event() else {
            return WindowEvent::None;
        };
        let command = match event {
            Event::Quit { .. } => Some(Command::Quit),
            Event::KeyDown {
                keycode: Some(key), ..
            } => command_for_key(key),
            Event::MouseButtonDown { .. } => Some(Command::Save),
            _ => None,
        };
        command.map_or(WindowEvent::None, WindowEvent::Command)
    }

    /// Uploads an ARGB8888 frame and shows it.
    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}
