use std::borrow::Cow;

use itertools::Itertools;
use tracing::debug;

use color_lib::palette::{Palette, PaletteEntry};

use crate::error::{Result, SlideBarError};
use crate::options::ChartOptions;
use crate::style::{points_to_pixels, Style};
use crate::table::Table;

/// Positions of the x ticks before scaling by the range magnitude.
pub const X_TICK_POSITIONS: [f64; 9] = [-1.0, -0.75, -0.5, -0.25, 0.0, 0.25, 0.5, 0.75, 1.0];

/// Every lane's background spans the full symmetric range.
pub const LANE_EXTENT: (f64, f64) = (-1.0, 1.0);

// Fraction of the data span added on each side of the x axis.
const X_MARGIN: f64 = 0.05;
// The bottom lane sits at 1, the top lane at n; the extra room on top
// holds the top lane's mean label.
const Y_MIN: f64 = 0.6;
const Y_TOP_PAD: f64 = 0.6;
// Advance width of a monospace glyph relative to its size.
const CHAR_ASPECT: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// One row of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub label: String,
    /// Height in data units. The first column gets the largest.
    pub y: f64,
    pub entry: PaletteEntry,
    pub values: Vec<f64>,
    pub mean: Option<f64>,
}

impl Lane {
    /// Text drawn above the mean marker.
    pub fn mean_label(&self) -> Option<String> {
        self.mean.map(|m| format!("{:.2}", m.abs()))
    }
}

/// Maps data coordinates onto the pixel rectangle of the plot area.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl Frame {
    pub fn x(&self, v: f64) -> f64 {
        let (lo, hi) = self.x_range;
        self.left + (v - lo) / (hi - lo) * (self.right - self.left)
    }

    pub fn y(&self, v: f64) -> f64 {
        let (lo, hi) = self.y_range;
        self.top + (hi - v) / (hi - lo) * (self.bottom - self.top)
    }

    pub fn map(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (self.x(x), self.y(y))
    }
}

/// A fully resolved chart: labels, palette and geometry, ready for a canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub frame: Frame,
    pub lanes: Vec<Lane>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub style: Style,
    pub dpi: f64,
    /// Palette entries generated because too few colors were given.
    pub synthesized: usize,
}

impl Scene {
    pub fn px(&self, points: f64) -> f64 {
        points_to_pixels(points, self.dpi)
    }

    pub fn marker_radius(&self, size: f64) -> f64 {
        Style::marker_radius(size, self.dpi)
    }
}

pub fn x_ticks(min_max: f64) -> Vec<Tick> {
    X_TICK_POSITIONS
        .iter()
        .map(|&position| Tick {
            position,
            label: format!("{:.2}", position * min_max),
        })
        .collect()
}

/// [-1, 1] widened to cover every sample, plus a margin on each side.
fn x_range<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold(LANE_EXTENT, |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let margin = (hi - lo) * X_MARGIN;
    (lo - margin, hi + margin)
}

fn text_width(text: &str, font_px: f64) -> f64 {
    text.chars().count() as f64 * font_px * CHAR_ASPECT
}

fn fit_frame(
    options: &ChartOptions,
    x_range: (f64, f64),
    y_range: (f64, f64),
    x_ticks: &[Tick],
    y_ticks: &[Tick],
) -> Result<Frame> {
    let (width, height) = options.pixel_size()?;
    let style = &options.style;
    let px = |pt| points_to_pixels(pt, options.dpi);
    let font_px = style.font_px(options.dpi);
    let pad = px(style.figure_pad);
    let tick = px(style.tick_length + style.tick_pad);

    let widest_label = y_ticks
        .iter()
        .map(|t| text_width(&t.label, font_px))
        .fold(0.0, f64::max);
    // x labels are centered on their tick, so the outer ones overhang
    let overhang = |t: Option<&Tick>| t.map_or(0.0, |t| text_width(&t.label, font_px) / 2.0);

    let left = (pad + widest_label + tick).max(pad + overhang(x_ticks.first()));
    let right = width as f64 - pad - overhang(x_ticks.last());
    let top = pad;
    let bottom = height as f64 - pad - font_px - tick;

    if right <= left || bottom <= top {
        let (w, h) = options.figsize;
        return Err(SlideBarError::InvalidFigure {
            width: w,
            height: h,
            dpi: options.dpi,
        });
    }

    Ok(Frame {
        width,
        height,
        left,
        right,
        top,
        bottom,
        x_range,
        y_range,
    })
}

/// Resolves labels, sign and palette, and places every lane.
///
/// The caller's table and option lists are only read; the palette is built
/// fresh for this call.
pub fn layout(table: &Table, options: &ChartOptions) -> Result<Scene> {
    if table.is_empty() {
        return Err(SlideBarError::EmptyTable);
    }
    options.validate()?;

    let n = table.len();
    let labels = options.resolve_tick_labels(table);

    let table = if options.lr_reverse {
        Cow::Owned(table.negated())
    } else {
        Cow::Borrowed(table)
    };

    let mut rng = options.rng();
    let palette = Palette::resolve(
        n,
        options.colors.as_deref(),
        options.pale_colors.as_deref(),
        &mut rng,
    );

    let lanes = table
        .columns()
        .iter()
        .zip(labels)
        .zip(palette.entries())
        .enumerate()
        .map(|(i, ((column, label), entry))| Lane {
            label,
            y: (n - i) as f64,
            entry: *entry,
            values: column.values.clone(),
            mean: column.mean(),
        })
        .collect_vec();

    let x_ticks = x_ticks(options.min_max);
    // Tick order follows lane order, top to bottom.
    let y_ticks = lanes
        .iter()
        .map(|lane| Tick {
            position: lane.y,
            label: lane.label.clone(),
        })
        .collect_vec();

    let x_range = x_range(lanes.iter().flat_map(|lane| lane.values.iter()));
    let y_range = (Y_MIN, n as f64 + Y_TOP_PAD);
    let frame = fit_frame(options, x_range, y_range, &x_ticks, &y_ticks)?;

    debug!(
        lanes = n,
        synthesized = palette.synthesized(),
        width = frame.width,
        height = frame.height,
        "laid out chart"
    );

    Ok(Scene {
        frame,
        lanes,
        x_ticks,
        y_ticks,
        style: options.style.clone(),
        dpi: options.dpi,
        synthesized: palette.synthesized(),
    })
}
