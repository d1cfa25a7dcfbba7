use std::path::PathBuf;

use color_lib::color::ColorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlideBarError {
    #[error("Failed to read table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to open table: {path}")]
    TableOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Column `{column}` is not numeric: `{value}` on line {line}")]
    NonNumeric {
        column: String,
        line: u64,
        value: String,
    },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Nothing to plot: the table has no columns")]
    EmptyTable,

    #[error("Invalid color: {0}")]
    Color(#[from] ColorError),

    #[error("Invalid figure size {width}x{height} at {dpi} dpi")]
    InvalidFigure { width: f64, height: f64, dpi: f64 },

    #[error("Range magnitude must be positive and finite, got {0}")]
    InvalidRange(f64),

    #[error("Drawing error: {0}")]
    Draw(String),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SlideBarError>;
