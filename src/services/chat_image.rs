use std::path::Path;

use anyhow::{anyhow, Context, Result};
use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache};
use image::{Rgb, RgbImage};
use log::debug;

use crate::models::ChatSettings;

const TEXT_ORIGIN: (f32, f32) = (10.0, 10.0);

/// Raster primitives for the chat screenshot: the canvas starts blank and
/// receives text only. `y` is the top of the text line.
pub trait ImageCanvas {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Rgb<u8>);
}

pub fn chat_line(sender: &str, excuse: &str) -> String {
    format!("{sender}: {excuse}")
}

pub fn draw_chat<C: ImageCanvas + ?Sized>(canvas: &mut C, settings: &ChatSettings, excuse: &str) {
    canvas.draw_text(
        &chat_line(&settings.sender, excuse),
        TEXT_ORIGIN.0,
        TEXT_ORIGIN.1,
        settings.font_size,
        Rgb([0, 0, 0]),
    );
}

/// Shapes and rasterizes text with cosmic-text. Holding one of these keeps
/// the system font database loaded between screenshots.
pub struct TextRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl TextRasterizer {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
        }
    }

    pub fn canvas(&mut self, width: u32, height: u32) -> RasterCanvas<'_> {
        RasterCanvas {
            image: RgbImage::from_pixel(width, height, Rgb([255, 255, 255])),
            rasterizer: self,
        }
    }
}

impl Default for TextRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

pub struct RasterCanvas<'a> {
    image: RgbImage,
    rasterizer: &'a mut TextRasterizer,
}

impl RasterCanvas<'_> {
    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

impl ImageCanvas for RasterCanvas<'_> {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Rgb<u8>) {
        let TextRasterizer {
            font_system,
            swash_cache,
        } = &mut *self.rasterizer;

        let mut buffer = Buffer::new(font_system, Metrics::new(size, size * 1.2));
        let attrs = Attrs::new().family(Family::SansSerif);
        buffer.set_text(font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(font_system, false);

        let (width, height) = (self.image.width() as i32, self.image.height() as i32);
        for run in buffer.layout_runs() {
            for glyph in run.glyphs.iter() {
                let physical = glyph.physical((x, y + run.line_y), 1.0);
                let Some(raster) = swash_cache.get_image(font_system, physical.cache_key) else {
                    continue;
                };
                let left = physical.x + raster.placement.left;
                let top = physical.y - raster.placement.top;
                let glyph_w = raster.placement.width as i32;
                let glyph_h = raster.placement.height as i32;

                for gy in 0..glyph_h {
                    let py = top + gy;
                    if py < 0 || py >= height {
                        continue;
                    }
                    for gx in 0..glyph_w {
                        let px = left + gx;
                        if px < 0 || px >= width {
                            continue;
                        }
                        let Some(&alpha) = raster.data.get((gy * glyph_w + gx) as usize) else {
                            continue;
                        };
                        if alpha == 0 {
                            continue;
                        }
                        let pixel = self.image.get_pixel_mut(px as u32, py as u32);
                        let a = alpha as u32;
                        for channel in 0..3 {
                            pixel[channel] = ((color[channel] as u32 * a
                                + pixel[channel] as u32 * (255 - a))
                                / 255) as u8;
                        }
                    }
                }
            }
        }
    }
}

/// Render a chat screenshot PNG to `path`.
pub fn write_chat_screenshot(
    rasterizer: &mut TextRasterizer,
    settings: &ChatSettings,
    excuse: &str,
    path: &Path,
) -> Result<()> {
    settings.validate().map_err(|e| anyhow!(e))?;
    let mut canvas = rasterizer.canvas(settings.width, settings.height);
    draw_chat(&mut canvas, settings, excuse);
    let image = canvas.into_image();
    image
        .save(path)
        .with_context(|| format!("failed to write PNG {}", path.display()))?;
    debug!("[Proof] chat screenshot {}x{} -> {}", image.width(), image.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingCanvas {
        calls: Vec<(String, f32, f32)>,
    }

    impl ImageCanvas for RecordingCanvas {
        fn draw_text(&mut self, text: &str, x: f32, y: f32, _size: f32, _color: Rgb<u8>) {
            self.calls.push((text.to_string(), x, y));
        }
    }

    #[test]
    fn chat_draws_a_single_friend_line_at_fixed_offset() {
        let mut canvas = RecordingCanvas::default();
        draw_chat(&mut canvas, &ChatSettings::default(), "I missed the bus.");
        assert_eq!(
            canvas.calls,
            vec![("Friend: I missed the bus.".to_string(), 10.0, 10.0)]
        );
    }

    #[test]
    fn writes_png_with_configured_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.png");
        let mut rasterizer = TextRasterizer::new();
        write_chat_screenshot(&mut rasterizer, &ChatSettings::default(), "reason", &path).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.width(), 400);
        assert_eq!(decoded.height(), 600);
        let rgb = decoded.to_rgb8();
        // Bottom-right corner is well away from the text.
        assert_eq!(rgb.get_pixel(399, 599), &Rgb([255, 255, 255]));

        let dark = (0..40)
            .flat_map(|y| (0..200).map(move |x| (x, y)))
            .filter(|&(x, y)| rgb.get_pixel(x, y)[0] < 128)
            .count();
        assert!(dark > 20, "expected text near the origin, found {dark} dark pixels");
    }

    #[test]
    fn unusable_settings_fail_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.png");
        let mut rasterizer = TextRasterizer::new();

        let zero_font = ChatSettings {
            font_size: 0.0,
            ..ChatSettings::default()
        };
        assert!(write_chat_screenshot(&mut rasterizer, &zero_font, "reason", &path).is_err());

        let huge = ChatSettings {
            width: u32::MAX,
            height: u32::MAX,
            ..ChatSettings::default()
        };
        assert!(write_chat_screenshot(&mut rasterizer, &huge, "reason", &path).is_err());
        assert!(!path.exists());
    }
}
