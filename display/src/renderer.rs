use sdl2::pixels::PixelFormatEnum;

use chip8_core::{Display, Screen, BASE_HEIGHT, BASE_WIDTH};

/// # Renderer
/// Presents a [`Screen`] in an SDL2 window as black/white pixels.
///
/// The window is sized for the base 64x32 resolution times `scale`; the
/// per-frame texture takes whatever resolution the screen currently has
/// and is stretched over the whole canvas, so extended mode needs no
/// window resize.
pub struct Renderer {
    canvas: sdl2::render::WindowCanvas,
}

impl Renderer {
    /// Creates a new renderer bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each base-resolution pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "chip8",
                BASE_WIDTH as u32 * scale,
                BASE_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

        Ok(Renderer { canvas })
    }

    /// Flattens a row-major pixel buffer into an SDL2 RGB24 texture body.
    ///
    /// Each on/off pixel becomes three bytes of 255/0 intensity.
    fn pixels_to_sdl_texture(pixels: &[bool]) -> Vec<u8> {
        pixels
            .iter()
            .flat_map(|&on| {
                let intensity = if on { 255 } else { 0 };
                [intensity; 3]
            })
            .collect()
    }

    /// Formats the screen buffer as an SDL2 RGB24 texture and renders it.
    pub fn render(&mut self, screen: &Screen) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                screen.width() as u32,
                screen.height() as u32,
            )
            .map_err(|e| e.to_string())?;

        texture
            .with_lock(None, |buffer: &mut [u8], _pitch: usize| {
                buffer.copy_from_slice(&Renderer::pixels_to_sdl_texture(screen.pixels()));
            })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
