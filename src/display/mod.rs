mod pixel_buffer;

pub use pixel_buffer::PixelBuffer;

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;
use shadelab::config::DisplaySettings;
use shadelab::Vec2;

/// Used when the settings ask for a zero-sized window
pub const DEFAULT_WIDTH: u32 = 600;
pub const DEFAULT_HEIGHT: u32 = 400;

const TITLE: &str = "shadelab";

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    width: u32,
    height: u32,
}

/// Streaming texture the pixel buffer is uploaded into each frame
pub struct RenderTarget<'a> {
    texture: Texture<'a>,
}

/// Host input, already in the demos' terms: pointer positions are window
/// pixels as `Vec2`, buttons are the two the demos act on
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
    KeyUp(Keycode),
    PointerMove(Vec2),
    PointerDown { at: Vec2, button: PointerButton },
    PointerUp { at: Vec2, button: PointerButton },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button: probing and picking
    Primary,
    /// Right button: orbit drag
    Secondary,
}

impl Display {
    /// Open a window sized by `settings`; vsync=false gives an uncapped
    /// framerate for timing runs
    pub fn open(
        settings: &DisplaySettings,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        let width = if settings.width > 0 {
            settings.width
        } else {
            DEFAULT_WIDTH
        };
        let height = if settings.height > 0 {
            settings.height
        } else {
            DEFAULT_HEIGHT
        };

        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let window = video_subsystem
            .window(TITLE, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if settings.vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build().map_err(|e| e.to_string())?;
        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;

        Ok((
            Self {
                canvas,
                event_pump,
                width,
                height,
            },
            texture_creator,
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel buffer matching the window
    pub fn pixel_buffer(&self) -> PixelBuffer {
        PixelBuffer::with_size(self.width, self.height)
    }

    /// Show the active demo in the title bar
    pub fn set_demo_title(&mut self, demo: &str) -> Result<(), String> {
        self.canvas
            .window_mut()
            .set_title(&format!("{TITLE} - {demo}"))
            .map_err(|e| e.to_string())
    }

    pub fn present(
        &mut self,
        target: &mut RenderTarget,
        buffer: &PixelBuffer,
    ) -> Result<(), String> {
        target
            .texture
            .update(None, buffer.as_bytes(), (buffer.width() * 4) as usize)
            .map_err(|e| e.to_string())?;
        self.canvas.copy(&target.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        self.event_pump.poll_iter().filter_map(translate).collect()
    }
}

impl<'a> RenderTarget<'a> {
    /// Texture sized to the display's window
    pub fn for_display(
        texture_creator: &'a TextureCreator<WindowContext>,
        display: &Display,
    ) -> Result<Self, String> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA8888, display.width, display.height)
            .map_err(|e| e.to_string())?;
        Ok(Self { texture })
    }
}

/// SDL event to host input; key repeats and unused events are dropped
fn translate(event: Event) -> Option<InputEvent> {
    let at = |x: i32, y: i32| Vec2::new(x as f32, y as f32);
    match event {
        Event::Quit { .. } => Some(InputEvent::Quit),
        Event::KeyDown {
            keycode: Some(k),
            repeat: false,
            ..
        } => Some(InputEvent::KeyDown(k)),
        Event::KeyUp {
            keycode: Some(k), ..
        } => Some(InputEvent::KeyUp(k)),
        Event::MouseMotion { x, y, .. } => Some(InputEvent::PointerMove(at(x, y))),
        Event::MouseButtonDown {
            x, y, mouse_btn, ..
        } => pointer_button(mouse_btn).map(|button| InputEvent::PointerDown {
            at: at(x, y),
            button,
        }),
        Event::MouseButtonUp {
            x, y, mouse_btn, ..
        } => pointer_button(mouse_btn).map(|button| InputEvent::PointerUp {
            at: at(x, y),
            button,
        }),
        _ => None,
    }
}

fn pointer_button(btn: MouseButton) -> Option<PointerButton> {
    match btn {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        _ => None,
    }
}
