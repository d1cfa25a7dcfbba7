use color_lib::color::{BLACK, WHITE};
use color_lib::sRGB;

pub const POINTS_PER_INCH: f64 = 72.0;

/// Fonts, stroke widths and marker sizes for one render.
///
/// Lengths are in points and marker sizes are areas in points², so a figure
/// keeps its proportions when rendered at a different dpi.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub font_family: String,
    pub font_size: f64,

    pub dot_size: f64,
    pub mean_ring_size: f64,
    pub mean_ring_width: f64,
    pub mean_core_size: f64,
    /// Vertical offset of the mean label, in data units.
    pub annotation_offset: f64,

    pub lane_width: f64,
    pub zero_line_width: f64,
    pub zero_line_color: sRGB,

    pub axis_color: sRGB,
    pub background: sRGB,
    pub spine_width: f64,
    pub tick_length: f64,
    pub tick_pad: f64,
    pub figure_pad: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font_family: "Consolas".to_string(),
            font_size: 50.0,
            dot_size: 100.0,
            mean_ring_size: 2500.0,
            mean_ring_width: 3.0,
            mean_core_size: 800.0,
            annotation_offset: 0.27,
            lane_width: 40.0,
            zero_line_width: 5.0,
            zero_line_color: [0x99, 0x99, 0x99],
            axis_color: BLACK,
            background: WHITE,
            spine_width: 0.8,
            tick_length: 3.5,
            tick_pad: 3.5,
            figure_pad: 10.8,
        }
    }
}

pub fn points_to_pixels(points: f64, dpi: f64) -> f64 {
    points * dpi / POINTS_PER_INCH
}

impl Style {
    pub fn font_px(&self, dpi: f64) -> f64 {
        points_to_pixels(self.font_size, dpi)
    }

    /// Radius in pixels of a circular marker whose size is an area in points².
    pub fn marker_radius(size: f64, dpi: f64) -> f64 {
        points_to_pixels(size.max(0.0).sqrt() / 2.0, dpi)
    }
}
