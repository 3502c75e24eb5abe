//! Software rendering of a [`Scene`] into an RGBA image.
//!
//! The viewer copies the image straight into its frame buffer; the same image
//! is written to disk for snapshots.

use std::path::Path;

use glam::{IVec2, Vec2};
use image::{Rgba, RgbaImage};

use crate::grid::Grid;
use crate::scene::{Scene, SceneRay};
use crate::types::RaycastError;

pub const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const GRID_LINE: Rgba<u8> = Rgba([130, 130, 130, 255]);
pub const WALL: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const TRAVERSED: Rgba<u8> = Rgba([0, 82, 172, 255]);
pub const RAY: Rgba<u8> = Rgba([253, 249, 0, 255]);
pub const ORIGIN: Rgba<u8> = Rgba([230, 41, 55, 255]);
pub const TARGET: Rgba<u8> = Rgba([0, 228, 48, 255]);
pub const HIT: Rgba<u8> = Rgba([0, 121, 241, 255]);

const MARKER_RADIUS: i32 = 5;
const HIT_RADIUS: i32 = 2;
const HIT_RING_RADIUS: i32 = 6;
/// Length of one dash (and one gap) of the dotted ray extension.
const DASH_LENGTH: f32 = 4.0;

/// Render the scene into a new image the size of the scene's screen.
pub fn render_scene(scene: &Scene) -> RgbaImage {
    let size = scene.screen_size();
    let mut img = RgbaImage::from_pixel(size.x as u32, size.y as u32, BACKGROUND);
    draw_scene(scene, &scene.cast(), &mut img);
    img
}

/// Draw the scene and its already cast `ray` over `img`, clearing it first.
pub fn draw_scene(scene: &Scene, ray: &SceneRay, img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        *px = BACKGROUND;
    }

    let grid = scene.grid();
    let cell_size = grid.cell_size();
    let cell_extent = Vec2::splat(cell_size);
    let (width, height) = (img.width() as f32, img.height() as f32);

    if scene.show_traversal() {
        for cell in scene.traversed_cells(ray) {
            fill_rect(img, grid.cell_origin(cell), cell_extent, TRAVERSED);
        }
    }

    for row in 0..grid.rows() {
        let y = row as f32 * cell_size;
        draw_line(img, Vec2::new(0.0, y), Vec2::new(width, y), GRID_LINE);
    }
    for col in 0..grid.cols() {
        let x = col as f32 * cell_size;
        draw_line(img, Vec2::new(x, 0.0), Vec2::new(x, height), GRID_LINE);
    }

    for cell in grid.walls() {
        fill_rect(img, grid.cell_origin(cell), cell_extent, WALL);
    }

    let origin = scene.origin();
    let target = scene.target();
    draw_line(img, origin, target, RAY);
    if let Some(dir) = ray.direction {
        // Long enough to leave the screen from anywhere on it.
        let reach = width + height;
        draw_dotted_line(img, target, target + dir * reach, RAY);
    }

    fill_circle(img, origin, MARKER_RADIUS, ORIGIN);
    fill_circle(img, target, MARKER_RADIUS, TARGET);

    if ray.direction.is_some() {
        fill_circle(img, ray.end, HIT_RADIUS, HIT);
        draw_circle(img, ray.end, HIT_RING_RADIUS, HIT);
    }
}

/// Render the scene and write it as an image file (format from the extension).
pub fn save_snapshot(scene: &Scene, path: impl AsRef<Path>) -> Result<(), RaycastError> {
    let path = path.as_ref();
    render_scene(scene).save(path)?;
    log::info!("saved snapshot to {}", path.display());
    Ok(())
}

#[inline]
fn plot(img: &mut RgbaImage, p: IVec2, color: Rgba<u8>) {
    if p.x >= 0 && p.y >= 0 && (p.x as u32) < img.width() && (p.y as u32) < img.height() {
        img.put_pixel(p.x as u32, p.y as u32, color);
    }
}

/// Axis-aligned filled rectangle `[min, min + size)`, clipped to the image.
pub fn fill_rect(img: &mut RgbaImage, min: Vec2, size: Vec2, color: Rgba<u8>) {
    let x0 = (min.x as i32).max(0);
    let y0 = (min.y as i32).max(0);
    let x1 = ((min.x + size.x) as i32).min(img.width() as i32);
    let y1 = ((min.y + size.y) as i32).min(img.height() as i32);

    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Bresenham line between two pixel positions, inclusive of both ends.
pub fn draw_line(img: &mut RgbaImage, from: Vec2, to: Vec2, color: Rgba<u8>) {
    let mut x0 = from.x.round() as i32;
    let mut y0 = from.y.round() as i32;
    let x1 = to.x.round() as i32;
    let y1 = to.y.round() as i32;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        plot(img, IVec2::new(x0, y0), color);

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Dashed line: a gap of `DASH_LENGTH`, then alternating dashes and gaps.
pub fn draw_dotted_line(img: &mut RgbaImage, from: Vec2, to: Vec2, color: Rgba<u8>) {
    let Some(dir) = (to - from).try_normalize() else {
        return;
    };
    let segments = (from.distance(to) / DASH_LENGTH) as u32;

    for i in (1..segments).step_by(2) {
        let start = from + dir * (i as f32 * DASH_LENGTH);
        let end = start + dir * DASH_LENGTH;
        draw_line(img, start, end, color);
    }
}

pub fn fill_circle(img: &mut RgbaImage, center: Vec2, radius: i32, color: Rgba<u8>) {
    let c = center.round().as_ivec2();
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                plot(img, c + IVec2::new(dx, dy), color);
            }
        }
    }
}

/// Midpoint circle outline.
pub fn draw_circle(img: &mut RgbaImage, center: Vec2, radius: i32, color: Rgba<u8>) {
    let c = center.round().as_ivec2();
    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        for (px, py) in [
            (x, y),
            (y, x),
            (-y, x),
            (-x, y),
            (-x, -y),
            (-y, -x),
            (y, -x),
            (x, -y),
        ] {
            plot(img, c + IVec2::new(px, py), color);
        }

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}
