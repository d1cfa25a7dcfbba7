use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use color_lib::sRGB;

use crate::error::{Result, SlideBarError};
use crate::style::Style;
use crate::table::Table;

pub const DEFAULT_FIGSIZE: (f64, f64) = (22.0, 10.0);
pub const DEFAULT_DPI: f64 = 100.0;
pub const DEFAULT_FILE_NAME: &str = "tmp.png";

/// Everything a single render needs besides the table.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Lane labels, top to bottom. Ignored unless there is one per column.
    pub tick_labels: Option<Vec<String>>,
    pub colors: Option<Vec<sRGB>>,
    pub pale_colors: Option<Vec<sRGB>>,
    /// Absolute value of the theoretical min and max. Only the x tick text
    /// is scaled by it; the data is drawn as is.
    pub min_max: f64,
    /// Negate every value before drawing.
    pub lr_reverse: bool,
    /// Width and height in inches.
    pub figsize: (f64, f64),
    pub dpi: f64,
    pub file_name: PathBuf,
    pub style: Style,
    /// Seed for synthesized colors. Unseeded renders draw from entropy.
    pub seed: Option<u64>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            tick_labels: None,
            colors: None,
            pale_colors: None,
            min_max: 1.0,
            lr_reverse: false,
            figsize: DEFAULT_FIGSIZE,
            dpi: DEFAULT_DPI,
            file_name: PathBuf::from(DEFAULT_FILE_NAME),
            style: Style::default(),
            seed: None,
        }
    }
}

impl ChartOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.min_max.is_finite() && self.min_max > 0.0) {
            return Err(SlideBarError::InvalidRange(self.min_max));
        }
        self.pixel_size().map(|_| ())
    }

    pub fn pixel_size(&self) -> Result<(u32, u32)> {
        let (width, height) = self.figsize;
        let invalid = || SlideBarError::InvalidFigure {
            width,
            height,
            dpi: self.dpi,
        };
        let w = (width * self.dpi).round();
        let h = (height * self.dpi).round();
        if !(w.is_finite() && h.is_finite() && w >= 1.0 && h >= 1.0) {
            return Err(invalid());
        }
        if w > u32::MAX as f64 || h > u32::MAX as f64 {
            return Err(invalid());
        }
        Ok((w as u32, h as u32))
    }

    /// Caller labels when they cover every column, otherwise column names.
    pub fn resolve_tick_labels(&self, table: &Table) -> Vec<String> {
        match &self.tick_labels {
            Some(labels) if labels.len() >= table.len() => labels[..table.len()].to_vec(),
            _ => table.names(),
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
