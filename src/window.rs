//! SDL2 window, event translation and presentation.
//!
//! Only this module and `error` know about SDL. Events come out as
//! platform-neutral [`WindowEvent`]s carrying [`Key`]s and mouse buttons from
//! `input`.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::messagebox::{show_simple_message_box, MessageBoxFlag};
use sdl2::mouse::MouseButton as SdlMouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::error::DemoError;
use crate::input::{Key, MouseButton};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Quit,
    Key(Key),
    MouseDown { button: MouseButton, x: i32, y: i32 },
    MouseUp { button: MouseButton },
    MouseMotion { x: i32, y: i32 },
    /// Vertical wheel movement, positive away from the user.
    Wheel(i32),
    Resize(u32, u32),
    /// The window contents were lost and must be presented again.
    Exposed,
    /// Anything the demo ignores.
    Other,
}

pub struct Window {
    // Field order matters: the texture borrows from the texture creator and
    // must be dropped first.
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, DemoError> {
        let sdl_context = sdl2::init().map_err(DemoError::Window)?;
        let video_subsystem = sdl_context.video().map_err(DemoError::Window)?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()?;

        let canvas = window.into_canvas().build()?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump().map_err(DemoError::Window)?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // The texture field is declared first, so it is dropped first.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture =
            texture_creator_ref.create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)?;

        log::info!("window {}x{} created", width, height);
        Ok(Self {
            texture,
            texture_creator,
            canvas,
            event_pump,
            width,
            height,
        })
    }

    /// Blocks until the next event arrives.
    pub fn wait_event(&mut self) -> WindowEvent {
        translate(self.event_pump.wait_event())
    }

    pub fn present(&mut self, buffer: &[u8]) -> Result<(), DemoError> {
        self.texture.update(None, buffer, (self.width * 4) as usize)?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))
            .map_err(DemoError::Window)?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), DemoError> {
        // SAFETY: Same as in new() - texture_creator outlives texture
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(self.texture_creator.as_ref() as *const _) };
        self.texture =
            texture_creator_ref.create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)?;
        self.width = width;
        self.height = height;
        log::debug!("window resized to {}x{}", width, height);
        Ok(())
    }

    /// Shows a blocking informational message box over the window.
    pub fn show_message(&self, title: &str, message: &str) {
        if let Err(err) =
            show_simple_message_box(MessageBoxFlag::INFORMATION, title, message, self.canvas.window())
        {
            log::warn!("message box failed: {:?}", err);
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Shows a blocking error box without a parent window.
pub fn show_error(message: &str) {
    let parent: Option<&sdl2::video::Window> = None;
    if let Err(err) = show_simple_message_box(MessageBoxFlag::ERROR, "Error", message, parent) {
        log::warn!("message box failed: {:?}", err);
    }
}

fn translate(event: Event) -> WindowEvent {
    match event {
        Event::Quit { .. } => WindowEvent::Quit,
        Event::KeyDown {
            keycode: Some(keycode),
            ..
        } => WindowEvent::Key(map_key(keycode)),
        Event::MouseButtonDown {
            mouse_btn, x, y, ..
        } => match map_button(mouse_btn) {
            Some(button) => WindowEvent::MouseDown { button, x, y },
            None => WindowEvent::Other,
        },
        Event::MouseButtonUp { mouse_btn, .. } => match map_button(mouse_btn) {
            Some(button) => WindowEvent::MouseUp { button },
            None => WindowEvent::Other,
        },
        Event::MouseMotion { x, y, .. } => WindowEvent::MouseMotion { x, y },
        Event::MouseWheel { y, .. } if y != 0 => WindowEvent::Wheel(y),
        Event::Window { win_event, .. } => match win_event {
            sdl2::event::WindowEvent::Resized(w, h)
            | sdl2::event::WindowEvent::SizeChanged(w, h) => {
                WindowEvent::Resize(w.max(1) as u32, h.max(1) as u32)
            }
            sdl2::event::WindowEvent::Exposed => WindowEvent::Exposed,
            _ => WindowEvent::Other,
        },
        _ => WindowEvent::Other,
    }
}

fn map_key(keycode: Keycode) -> Key {
    match keycode {
        Keycode::F1 => Key::F1,
        Keycode::F2 => Key::F2,
        Keycode::F3 => Key::F3,
        Keycode::F4 => Key::F4,
        Keycode::F5 => Key::F5,
        Keycode::F6 => Key::F6,
        Keycode::F7 => Key::F7,
        Keycode::F8 => Key::F8,
        Keycode::F9 => Key::F9,
        Keycode::F10 => Key::F10,
        Keycode::F11 => Key::F11,
        Keycode::F12 => Key::F12,
        Keycode::Num1 | Keycode::Kp1 => Key::Num1,
        Keycode::Num2 | Keycode::Kp2 => Key::Num2,
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::PageUp => Key::PageUp,
        Keycode::PageDown => Key::PageDown,
        Keycode::Escape => Key::Escape,
        _ => Key::Other,
    }
}

fn map_button(button: SdlMouseButton) -> Option<MouseButton> {
    match button {
        SdlMouseButton::Left => Some(MouseButton::Left),
        SdlMouseButton::Right => Some(MouseButton::Right),
        _ => None,
    }
}
