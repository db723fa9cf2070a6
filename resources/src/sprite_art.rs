use crate::bmp::{pack_bgr, Pixel, BMP};
use anyhow::Context;
use std::path::Path;

pub const SPRITE_WIDTH: usize = 48;
pub const SPRITE_HEIGHT: usize = 64;

const BACKGROUND: Pixel = Pixel::rgb(255, 255, 255);
const OUTLINE: Pixel = Pixel::rgb(0, 0, 0);
const BODY: Pixel = Pixel::rgb(34, 139, 34);
const FACE: Pixel = Pixel::rgb(255, 224, 189);

/// Draws a small figure: a round head over a rectangular body, outlined.
pub fn sample_sprite(width: usize, height: usize) -> Vec<Pixel> {
    let mut pixels = vec![BACKGROUND; width * height];
    let head_r = (width.min(height) / 4) as i64;
    let (head_cx, head_cy) = ((width / 2) as i64, head_r + 1);
    let body_top = (2 * head_r + 2) as usize;

    for y in 0..height {
        for x in 0..width {
            let (dx, dy) = (x as i64 - head_cx, y as i64 - head_cy);
            let d2 = dx * dx + dy * dy;
            let px = &mut pixels[y * width + x];
            if d2 <= head_r * head_r {
                *px = if d2 >= (head_r - 1) * (head_r - 1) {
                    OUTLINE
                } else {
                    FACE
                };
            } else if y >= body_top && x >= width / 6 && x < width - width / 6 {
                let edge = y == body_top
                    || y == height - 1
                    || x == width / 6
                    || x == width - width / 6 - 1;
                *px = if edge { OUTLINE } else { BODY };
            }
        }
    }
    pixels
}

pub fn write_sample_sprite(path: &Path) -> anyhow::Result<()> {
    let pixels = pack_bgr(&sample_sprite(SPRITE_WIDTH, SPRITE_HEIGHT));
    let bmp = BMP::from_mem(SPRITE_WIDTH, SPRITE_HEIGHT, &pixels)?;
    bmp.to_file(path)
        .with_context(|| format!("writing sprite bitmap {path:?}"))?;
    log::info!("wrote {SPRITE_WIDTH} x {SPRITE_HEIGHT} sprite to {path:?}");
    Ok(())
}
