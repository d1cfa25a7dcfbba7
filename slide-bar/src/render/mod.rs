//! Drawing a laid-out [`Scene`] onto a canvas and saving it.

mod raster;
mod vector;

use std::path::Path;

use color_lib::color::WHITE;
use color_lib::sRGB;

use crate::error::Result;
use crate::layout::Scene;

pub use raster::{save_raster, RasterCanvas};
pub use vector::{make_document, save_svg, VectorCanvas};

/// Where text sits relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Centered, baseline on the point.
    Above,
    /// Centered, top edge on the point.
    Below,
    /// Right-aligned, vertically centered.
    Left,
}

/// The handful of primitives a chart is built from. Coordinates are pixels.
pub trait Canvas {
    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: sRGB, width: f64) -> Result<()>;

    fn circle(
        &mut self,
        center: (f64, f64),
        radius: f64,
        fill: sRGB,
        outline: Option<(sRGB, f64)>,
    ) -> Result<()>;

    fn text(&mut self, at: (f64, f64), content: &str, color: sRGB, anchor: Anchor) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Raster,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => OutputFormat::Svg,
            _ => OutputFormat::Raster,
        }
    }
}

/// Draws back to front: reference line, lane backgrounds, mean labels,
/// samples, mean markers, then the axes.
pub fn draw_scene<C: Canvas + ?Sized>(scene: &Scene, canvas: &mut C) -> Result<()> {
    let frame = &scene.frame;
    let style = &scene.style;
    let (y_lo, y_hi) = frame.y_range;

    canvas.line(
        frame.map((0.0, y_lo)),
        frame.map((0.0, y_hi)),
        style.zero_line_color,
        scene.px(style.zero_line_width),
    )?;

    for lane in &scene.lanes {
        let (lo, hi) = crate::layout::LANE_EXTENT;
        canvas.line(
            frame.map((lo, lane.y)),
            frame.map((hi, lane.y)),
            lane.entry.pale,
            scene.px(style.lane_width),
        )?;
    }

    for lane in &scene.lanes {
        if let (Some(mean), Some(label)) = (lane.mean, lane.mean_label()) {
            canvas.text(
                frame.map((mean, lane.y + style.annotation_offset)),
                &label,
                lane.entry.primary,
                Anchor::Above,
            )?;
        }
    }

    let dot = scene.marker_radius(style.dot_size);
    let ring = scene.marker_radius(style.mean_ring_size);
    let core = scene.marker_radius(style.mean_core_size);
    for lane in &scene.lanes {
        let primary = lane.entry.primary;
        for &v in lane.values.iter().filter(|v| v.is_finite()) {
            canvas.circle(frame.map((v, lane.y)), dot, primary, None)?;
        }
        if let Some(mean) = lane.mean {
            let center = frame.map((mean, lane.y));
            canvas.circle(
                center,
                ring,
                WHITE,
                Some((primary, scene.px(style.mean_ring_width))),
            )?;
            canvas.circle(center, core, primary, None)?;
        }
    }

    draw_axes(scene, canvas)
}

// Only the bottom spine is drawn; top, right and left are hidden.
fn draw_axes<C: Canvas + ?Sized>(scene: &Scene, canvas: &mut C) -> Result<()> {
    let frame = &scene.frame;
    let style = &scene.style;
    let color = style.axis_color;
    let spine = scene.px(style.spine_width);
    let tick = scene.px(style.tick_length);
    let pad = scene.px(style.tick_pad);

    canvas.line(
        (frame.left, frame.bottom),
        (frame.right, frame.bottom),
        color,
        spine,
    )?;

    for t in &scene.x_ticks {
        let x = frame.x(t.position);
        canvas.line((x, frame.bottom), (x, frame.bottom + tick), color, spine)?;
        canvas.text((x, frame.bottom + tick + pad), &t.label, color, Anchor::Below)?;
    }

    for t in &scene.y_ticks {
        let y = frame.y(t.position);
        canvas.line((frame.left - tick, y), (frame.left, y), color, spine)?;
        canvas.text((frame.left - tick - pad, y), &t.label, color, Anchor::Left)?;
    }

    Ok(())
}

/// Writes the scene to `path`, as SVG for `.svg` and as a raster image for
/// every other extension the `image` crate can encode.
pub fn save<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<()> {
    let path = path.as_ref();
    match OutputFormat::from_path(path) {
        OutputFormat::Svg => save_svg(scene, path),
        OutputFormat::Raster => save_raster(scene, path),
    }
}
