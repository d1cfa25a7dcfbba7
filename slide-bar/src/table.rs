use std::fs::File;
use std::io::Read;
use std::path::Path;

use itertools::Itertools;
use tracing::debug;

use crate::error::{Result, SlideBarError};

/// One named series of samples. Drawn as one lane.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Arithmetic mean, or `None` for a column without samples.
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    pub fn negated(&self) -> Self {
        Self {
            name: self.name.clone(),
            values: self.values.iter().map(|v| -v).collect(),
        }
    }
}

/// Ordered numeric columns. All columns are assumed to share one theoretical
/// range, e.g. [-1, 1] for correlations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn from_columns<S: Into<String>>(columns: impl IntoIterator<Item = (S, Vec<f64>)>) -> Self {
        Self::new(
            columns
                .into_iter()
                .map(|(name, values)| Column::new(name, values))
                .collect(),
        )
    }

    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SlideBarError::TableOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Reads a CSV with a header row. Empty cells and `NaN` are missing
    /// samples; anything else that fails to parse as a number is an error.
    /// Cells past the last header are dropped and logged at debug level.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut columns = rdr
            .headers()?
            .iter()
            .map(|name| Column::new(name, Vec::new()))
            .collect_vec();

        for record in rdr.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());
            if record.len() > columns.len() {
                debug!(
                    line,
                    extra = record.len() - columns.len(),
                    "ignoring cells beyond the header row"
                );
            }
            for (column, field) in columns.iter_mut().zip(record.iter()) {
                if field.is_empty() {
                    continue;
                }
                let value: f64 = field.parse().map_err(|_| SlideBarError::NonNumeric {
                    column: column.name.clone(),
                    line,
                    value: field.to_string(),
                })?;
                if !value.is_nan() {
                    column.values.push(value);
                }
            }
        }

        Ok(Self::new(columns))
    }

    /// Keeps only the named columns, in the order given.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.column(name)
                    .cloned()
                    .ok_or_else(|| SlideBarError::UnknownColumn(name.to_string()))
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    pub fn negated(&self) -> Self {
        Self::new(self.columns.iter().map(Column::negated).collect())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
