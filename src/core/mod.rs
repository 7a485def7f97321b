pub mod chart_config;
pub mod dataset;
pub mod rendered_chart;
pub mod selected_file;

pub use chart_config::{
    ChartConfiguration, ChartType, ColorScheme, ConfigField, DEFAULT_HEIGHT, DEFAULT_TITLE,
    DEFAULT_WIDTH, HEIGHT_RANGE, WIDTH_RANGE,
};
pub use dataset::{Dataset, DatasetSummary, PREVIEW_ROW_LIMIT, Record};
pub use rendered_chart::RenderedChart;
pub use selected_file::SelectedFile;
