use std::path::Path;

use log::warn;
use rayon::prelude::*;

use crate::disc::Disc;
use crate::simulation::Simulation;

/// Page background, `#F0EBE6`.
pub const BACKGROUND: [u8; 4] = [240, 235, 230, 255];
/// Ink used for the fallback stroke and the overlay text, `#080807`.
const INK: [u8; 3] = [8, 8, 7];

const BYTES_PER_PIXEL: usize = 4;
const STROKE_WIDTH: f32 = 3.0;
/// Anti-aliasing edge width, pixels.
const FEATHER: f32 = 1.0;
const OVERLAY_PX: f32 = 17.0;

/// Decoded RGBA sprite drawn for each disc.
pub struct Sprite {
    width: usize,
    height: usize,
    rgba: Vec<u8>,
}

impl Sprite {
    pub fn load(path: &Path) -> Result<Self, image::ImageError> {
        let img = image::open(path)?.into_rgba8();
        let (width, height) = (img.width() as usize, img.height() as usize);
        Ok(Self {
            width,
            height,
            rgba: img.into_raw(),
        })
    }

    fn texel(&self, x: usize, y: usize) -> [f32; 4] {
        let idx = (y * self.width + x) * BYTES_PER_PIXEL;
        [
            self.rgba[idx] as f32,
            self.rgba[idx + 1] as f32,
            self.rgba[idx + 2] as f32,
            self.rgba[idx + 3] as f32,
        ]
    }

    /// Bilinear sample at normalized coordinates in [0, 1].
    fn sample(&self, u: f32, v: f32) -> [f32; 4] {
        let max_x = (self.width - 1) as f32;
        let max_y = (self.height - 1) as f32;
        let x = (u * max_x).clamp(0.0, max_x);
        let y = (v * max_y).clamp(0.0, max_y);
        let x0 = x.floor() as usize;
        let y0 = y.floor() as usize;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let fx = x - x0 as f32;
        let fy = y - y0 as f32;

        let mut out = [0.0; 4];
        let (t00, t10) = (self.texel(x0, y0), self.texel(x1, y0));
        let (t01, t11) = (self.texel(x0, y1), self.texel(x1, y1));
        for c in 0..4 {
            let top = t00[c] * (1.0 - fx) + t10[c] * fx;
            let bottom = t01[c] * (1.0 - fx) + t11[c] * fx;
            out[c] = top * (1.0 - fy) + bottom * fy;
        }
        out
    }
}

/// Software render pass: draws the current disc set into an RGBA frame,
/// one row per rayon task. Reads the simulation, never mutates it.
#[derive(Default)]
pub struct Renderer {
    sprite: Option<Sprite>,
    font: Option<fontdue::Font>,
}

impl Renderer {
    /// Try to load the disc sprite. On failure rendering simply stays on
    /// the stroked-circle fallback.
    pub fn load_sprite(&mut self, path: &Path) {
        match Sprite::load(path) {
            Ok(sprite) => self.sprite = Some(sprite),
            Err(err) => warn!("sprite {} unavailable, using circles: {err}", path.display()),
        }
    }

    /// Try to load the overlay font; without one the FPS overlay is off.
    pub fn load_font(&mut self, path: &Path) {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("font {} unavailable, overlay off: {err}", path.display());
                return;
            }
        };
        match fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()) {
            Ok(font) => self.font = Some(font),
            Err(err) => warn!("font {} failed to parse: {err}", path.display()),
        }
    }

    /// Draw one frame. `frame` is tightly packed RGBA sized to the
    /// simulation's canvas.
    pub fn draw(&self, sim: &Simulation, frame: &mut [u8]) {
        let width = sim.width() as usize;
        let discs = sim.discs();

        frame
            .par_chunks_mut(width * BYTES_PER_PIXEL)
            .enumerate()
            .for_each(|(y, row)| {
                for pixel in row.chunks_exact_mut(BYTES_PER_PIXEL) {
                    pixel.copy_from_slice(&BACKGROUND);
                }
                for d in discs {
                    match &self.sprite {
                        Some(sprite) => draw_sprite_row(row, y, width, d, sprite),
                        None => draw_circle_row(row, y, width, d),
                    }
                }
            });
    }

    /// Blend a line of text into the frame; no-op without a font.
    pub fn draw_overlay(&self, frame: &mut [u8], width: usize, height: usize, text: &str) {
        let Some(font) = &self.font else { return };

        let mut cursor_x = 10usize;
        let baseline = 20usize;
        for c in text.chars() {
            let (metrics, bitmap) = font.rasterize(c, OVERLAY_PX);
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let alpha = bitmap[row * metrics.width + col] as f32 / 255.0;
                    if alpha <= 0.0 {
                        continue;
                    }
                    let x = cursor_x + col;
                    let y = baseline + row;
                    if x >= width || y >= height {
                        continue;
                    }
                    let idx = (y * width + x) * BYTES_PER_PIXEL;
                    if idx + 3 < frame.len() {
                        for ch in 0..3 {
                            let cur = frame[idx + ch] as f32;
                            frame[idx + ch] =
                                (cur * (1.0 - alpha) + INK[ch] as f32 * alpha) as u8;
                        }
                        frame[idx + 3] = 255;
                    }
                }
            }
            cursor_x += metrics.width + 1;
        }
    }
}

fn blend(pixel: &mut [u8], color: [f32; 3], alpha: f32) {
    for c in 0..3 {
        let cur = pixel[c] as f32;
        pixel[c] = (cur * (1.0 - alpha) + color[c] * alpha) as u8;
    }
    pixel[3] = 255;
}

/// Sprite pass: the bitmap is blitted over a `2r × 2r` square centered
/// on the disc, carrying its own alpha.
fn draw_sprite_row(row: &mut [u8], y: usize, width: usize, d: &Disc, sprite: &Sprite) {
    let r = d.radius();
    let dy = y as f32 - d.pos.y;
    if dy.abs() > r {
        return;
    }
    let v = (dy + r) / (2.0 * r);

    let x0 = (d.pos.x - r).floor().max(0.0) as usize;
    let x1 = (d.pos.x + r).ceil().min((width - 1) as f32) as usize;
    for x in x0..=x1 {
        let dx = x as f32 - d.pos.x;
        if dx.abs() > r {
            continue;
        }
        let u = (dx + r) / (2.0 * r);
        let texel = sprite.sample(u, v);
        let alpha = texel[3] / 255.0;
        if alpha <= 0.0 {
            continue;
        }
        blend(
            &mut row[x * BYTES_PER_PIXEL..x * BYTES_PER_PIXEL + 4],
            [texel[0], texel[1], texel[2]],
            alpha,
        );
    }
}

/// Fallback pass before a sprite is available: white disc, dark stroke,
/// feathered edges.
fn draw_circle_row(row: &mut [u8], y: usize, width: usize, d: &Disc) {
    let r = d.radius();
    let dy = y as f32 - d.pos.y;
    if dy.abs() > r + FEATHER {
        return;
    }

    let x0 = (d.pos.x - r - FEATHER).floor().max(0.0) as usize;
    let x1 = (d.pos.x + r + FEATHER).ceil().min((width - 1) as f32) as usize;
    for x in x0..=x1 {
        let dx = x as f32 - d.pos.x;
        let dist = (dx * dx + dy * dy).sqrt();
        let coverage = ((r + FEATHER - dist) / (2.0 * FEATHER)).clamp(0.0, 1.0);
        if coverage <= 0.0 {
            continue;
        }
        // fill-to-stroke transition across the inner stroke edge
        let t = ((dist - (r - STROKE_WIDTH - FEATHER)) / (2.0 * FEATHER)).clamp(0.0, 1.0);
        let ink = 255.0 * (1.0 - t) + INK[0] as f32 * t;
        blend(
            &mut row[x * BYTES_PER_PIXEL..x * BYTES_PER_PIXEL + 4],
            [ink, ink, ink],
            coverage,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disc::Disc;
    use crate::simulation::Simulation;
    use crate::vec2::Vec2;

    #[test]
    fn clears_to_background_and_paints_discs() {
        let mut sim = Simulation::new(64.0, 64.0, 0);
        sim.add_disc(Disc::new(Vec2::new(32.0, 32.0), Vec2::ZERO, 10.0));

        let mut frame = vec![0u8; 64 * 64 * 4];
        Renderer::default().draw(&sim, &mut frame);

        // corner pixel is untouched background
        assert_eq!(&frame[0..4], &BACKGROUND);
        // disc center is the white fill of the fallback circle
        let center = (32 * 64 + 32) * 4;
        assert!(frame[center] > 200);
        // the stroke ring is darker than both fill and background
        let ring = (32 * 64 + (32 + 9)) * 4;
        assert!(frame[ring] < 100);
    }

    #[test]
    fn overlay_without_font_is_a_no_op() {
        let mut frame = vec![7u8; 32 * 32 * 4];
        let before = frame.clone();
        Renderer::default().draw_overlay(&mut frame, 32, 32, "FPS: 60.0");
        assert_eq!(frame, before);
    }
}
