/// Side length of the normalized raster.
pub const CANVAS_SIZE: u32 = 28;

/// Longest side of the digit once scaled, leaving a 4px margin all round.
pub const TARGET_SIZE: u32 = 20;

/// Where the scaled source lands on the 28×28 canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub draw_w: u32,
    pub draw_h: u32,
    pub dx: u32,
    pub dy: u32,
}

/// Fits a `width × height` source inside the 20×20 target box without
/// changing its aspect ratio, then centers it on the canvas.
///
/// Each drawn side is at least 1px. Odd leftovers are floored, so the
/// image may sit 1px closer to the top/left edge.
pub fn placement(width: u32, height: u32) -> Placement {
    let target = TARGET_SIZE as f64;
    let scale = (target / width as f64).min(target / height as f64);

    let draw_w = ((width as f64 * scale).round() as u32).clamp(1, TARGET_SIZE);
    let draw_h = ((height as f64 * scale).round() as u32).clamp(1, TARGET_SIZE);

    Placement {
        draw_w,
        draw_h,
        dx: (CANVAS_SIZE - draw_w) / 2,
        dy: (CANVAS_SIZE - draw_h) / 2,
    }
}
