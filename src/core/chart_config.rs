use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::Dataset;
use crate::error::{PlaygroundError, PlaygroundResult};

pub const DEFAULT_TITLE: &str = "My Chart";
pub const DEFAULT_WIDTH: i64 = 800;
pub const DEFAULT_HEIGHT: i64 = 600;
pub const WIDTH_RANGE: RangeInclusive<i64> = 400..=1200;
pub const HEIGHT_RANGE: RangeInclusive<i64> = 300..=800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Scatter,
    Pie,
    Histogram,
    Heatmap,
}

impl ChartType {
    pub const ALL: [Self; 6] = [
        Self::Bar,
        Self::Line,
        Self::Scatter,
        Self::Pie,
        Self::Histogram,
        Self::Heatmap,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Scatter => "scatter",
            Self::Pie => "pie",
            Self::Histogram => "histogram",
            Self::Heatmap => "heatmap",
        }
    }

    /// Whether a Y column takes part in this chart type.
    #[must_use]
    pub fn uses_y_column(self) -> bool {
        matches!(self, Self::Bar | Self::Line | Self::Scatter)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = PlaygroundError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let needle = input.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| PlaygroundError::InvalidFieldValue {
                field: ConfigField::ChartType,
                reason: format!("unknown chart type `{needle}`"),
            })
    }
}

/// Fixed palette name-set understood by the rendering service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColorScheme {
    #[default]
    #[serde(rename = "viridis")]
    Viridis,
    #[serde(rename = "plasma")]
    Plasma,
    #[serde(rename = "inferno")]
    Inferno,
    #[serde(rename = "magma")]
    Magma,
    #[serde(rename = "cividis")]
    Cividis,
    Blues,
    Greens,
    Reds,
    Set1,
    Set2,
    Pastel1,
}

impl ColorScheme {
    pub const ALL: [Self; 11] = [
        Self::Viridis,
        Self::Plasma,
        Self::Inferno,
        Self::Magma,
        Self::Cividis,
        Self::Blues,
        Self::Greens,
        Self::Reds,
        Self::Set1,
        Self::Set2,
        Self::Pastel1,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Viridis => "viridis",
            Self::Plasma => "plasma",
            Self::Inferno => "inferno",
            Self::Magma => "magma",
            Self::Cividis => "cividis",
            Self::Blues => "Blues",
            Self::Greens => "Greens",
            Self::Reds => "Reds",
            Self::Set1 => "Set1",
            Self::Set2 => "Set2",
            Self::Pastel1 => "Pastel1",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = PlaygroundError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let needle = input.trim();
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == needle)
            .ok_or_else(|| PlaygroundError::InvalidFieldValue {
                field: ConfigField::ColorScheme,
                reason: format!("unknown color scheme `{needle}`"),
            })
    }
}

/// Editable fields of [`ChartConfiguration`], as addressed by UI intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigField {
    ChartType,
    XColumn,
    YColumn,
    ColorScheme,
    Title,
    Width,
    Height,
}

impl ConfigField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChartType => "chart_type",
            Self::XColumn => "x_column",
            Self::YColumn => "y_column",
            Self::ColorScheme => "color_scheme",
            Self::Title => "title",
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-editable description of the desired chart.
///
/// Setters are total: they store what they are given and never judge it
/// against the dataset. Validity is checked when a render is requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfiguration {
    chart_type: ChartType,
    x_column: String,
    y_column: String,
    color_scheme: ColorScheme,
    title: String,
    width: i64,
    height: i64,
}

impl Default for ChartConfiguration {
    fn default() -> Self {
        Self {
            chart_type: ChartType::default(),
            x_column: String::new(),
            y_column: String::new(),
            color_scheme: ColorScheme::default(),
            title: DEFAULT_TITLE.to_owned(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl ChartConfiguration {
    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    #[must_use]
    pub fn x_column(&self) -> &str {
        &self.x_column
    }

    /// Selected Y column; empty means none.
    #[must_use]
    pub fn y_column(&self) -> &str {
        &self.y_column
    }

    #[must_use]
    pub fn color_scheme(&self) -> ColorScheme {
        self.color_scheme
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn width(&self) -> i64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i64 {
        self.height
    }

    #[must_use]
    pub fn y_column_applicable(&self) -> bool {
        self.chart_type.uses_y_column()
    }

    /// Y column as it should travel to the renderer: `None` when empty or
    /// not applicable to the chart type.
    #[must_use]
    pub fn effective_y_column(&self) -> Option<&str> {
        (self.y_column_applicable() && !self.y_column.is_empty()).then_some(self.y_column.as_str())
    }

    pub fn set_chart_type(&mut self, chart_type: ChartType) {
        self.chart_type = chart_type;
    }

    pub fn set_x_column(&mut self, column: impl Into<String>) {
        self.x_column = column.into();
    }

    pub fn set_y_column(&mut self, column: impl Into<String>) {
        self.y_column = column.into();
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.color_scheme = scheme;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Stores the width as given, in range or not.
    pub fn set_width(&mut self, width: i64) {
        self.width = width;
    }

    /// Stores the height as given, in range or not.
    pub fn set_height(&mut self, height: i64) {
        self.height = height;
    }

    /// Applies a raw textual edit coming from the presentation layer.
    ///
    /// Text fields accept anything. Enumerated and numeric fields must parse;
    /// on failure the field keeps its previous value.
    pub fn apply_field_input(&mut self, field: ConfigField, input: &str) -> PlaygroundResult<()> {
        match field {
            ConfigField::ChartType => self.set_chart_type(input.parse()?),
            ConfigField::XColumn => self.set_x_column(input),
            ConfigField::YColumn => self.set_y_column(input),
            ConfigField::ColorScheme => self.set_color_scheme(input.parse()?),
            ConfigField::Title => self.set_title(input),
            ConfigField::Width => self.set_width(parse_dimension(field, input)?),
            ConfigField::Height => self.set_height(parse_dimension(field, input)?),
        }
        Ok(())
    }

    /// Column reset applied after a successful upload. Styling fields
    /// (type, palette, title, size) are preserved.
    pub fn apply_dataset_defaults(&mut self, dataset: &Dataset) {
        self.x_column = dataset.columns().first().cloned().unwrap_or_default();
        self.y_column = dataset
            .numeric_columns()
            .first()
            .cloned()
            .unwrap_or_default();
    }
}

fn parse_dimension(field: ConfigField, input: &str) -> PlaygroundResult<i64> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| PlaygroundError::InvalidFieldValue {
            field,
            reason: format!("`{trimmed}` is not a whole number"),
        })
}
