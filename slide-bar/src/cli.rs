use std::path::PathBuf;

use clap::Parser;

use color_lib::color::parse;

use crate::error::Result;
use crate::options::{ChartOptions, DEFAULT_DPI, DEFAULT_FILE_NAME};
use crate::style::Style;

fn parse_figsize(s: &str) -> std::result::Result<(f64, f64), String> {
    let (w, h) = s
        .split_once(',')
        .ok_or_else(|| format!("expected WIDTH,HEIGHT, got `{s}`"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid size `{v}`: {e}"))
    };
    Ok((parse(w)?, parse(h)?))
}

#[derive(Parser, Debug)]
#[command(name = "slide-bar")]
#[command(author, version, about = "Draw one lane per column: samples as dots, the mean as a ring")]
pub struct Cli {
    /// CSV file with a header row
    pub input: PathBuf,

    /// Plot only these columns, in this order
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Lane labels; ignored unless there is one per column
    #[arg(long, value_delimiter = ',')]
    pub tick_labels: Option<Vec<String>>,

    /// Dot colors as #RRGGBB
    #[arg(long, value_delimiter = ',')]
    pub colors: Option<Vec<String>>,

    /// Lane background colors as #RRGGBB
    #[arg(long, value_delimiter = ',')]
    pub pale_colors: Option<Vec<String>>,

    /// Absolute value of the theoretical min and max, used for the x tick text
    #[arg(long, default_value_t = 1.0)]
    pub min_max: f64,

    /// Invert the sign of every value
    #[arg(long)]
    pub lr_reverse: bool,

    /// Figure size in inches
    #[arg(long, value_name = "WIDTH,HEIGHT", value_parser = parse_figsize, default_value = "22,10")]
    pub figsize: (f64, f64),

    #[arg(long, default_value_t = DEFAULT_DPI)]
    pub dpi: f64,

    #[arg(long)]
    pub font_family: Option<String>,

    /// Font size in points
    #[arg(long)]
    pub font_size: Option<f64>,

    /// Seed for generated colors
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output image; `.svg` writes a vector file
    #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
    pub output: PathBuf,

    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn to_options(&self) -> Result<ChartOptions> {
        let parse_all = |list: &Option<Vec<String>>| {
            list.as_ref()
                .map(|l| l.iter().map(|c| parse(c)).collect::<std::result::Result<Vec<_>, _>>())
                .transpose()
        };

        let mut style = Style::default();
        if let Some(family) = &self.font_family {
            style.font_family = family.clone();
        }
        if let Some(size) = self.font_size {
            style.font_size = size;
        }

        Ok(ChartOptions {
            tick_labels: self.tick_labels.clone(),
            colors: parse_all(&self.colors)?,
            pale_colors: parse_all(&self.pale_colors)?,
            min_max: self.min_max,
            lr_reverse: self.lr_reverse,
            figsize: self.figsize,
            dpi: self.dpi,
            file_name: self.output.clone(),
            style,
            seed: self.seed,
        })
    }
}
