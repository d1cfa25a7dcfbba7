pub mod cli;
pub mod error;
pub mod layout;
pub mod options;
pub mod render;
pub mod style;
pub mod table;

use tracing::info;

pub use error::{Result, SlideBarError};
pub use layout::{layout, Scene};
pub use options::ChartOptions;
pub use table::{Column, Table};

/// Draws one lane per column of `table` and saves the figure to
/// `options.file_name`. Returns the scene that was drawn.
pub fn slide_bar_graph(table: &Table, options: &ChartOptions) -> Result<Scene> {
    let scene = layout(table, options)?;
    render::save(&scene, &options.file_name)?;
    info!(
        path = %options.file_name.display(),
        lanes = scene.lanes.len(),
        "saved figure"
    );
    Ok(scene)
}
