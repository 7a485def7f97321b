mod support;

use chart_playground::core::{
    ChartConfiguration, ChartType, ColorScheme, ConfigField, DEFAULT_HEIGHT, DEFAULT_TITLE,
    DEFAULT_WIDTH, Dataset,
};
use chart_playground::service::{RenderRequest, WireChartConfig};
use serde_json::json;

#[test]
fn defaults_match_the_playground_form() {
    let config = ChartConfiguration::default();
    assert_eq!(config.chart_type(), ChartType::Bar);
    assert_eq!(config.color_scheme(), ColorScheme::Viridis);
    assert_eq!(config.title(), DEFAULT_TITLE);
    assert_eq!(config.width(), DEFAULT_WIDTH);
    assert_eq!(config.height(), DEFAULT_HEIGHT);
    assert_eq!(config.x_column(), "");
    assert_eq!(config.y_column(), "");
}

#[test]
fn setters_store_values_without_judging_them() {
    let mut config = ChartConfiguration::default();
    config.set_x_column("not-a-column-yet");
    config.set_width(5_000);
    config.set_height(-1);

    assert_eq!(config.x_column(), "not-a-column-yet");
    assert_eq!(config.width(), 5_000);
    assert_eq!(config.height(), -1);
}

#[test]
fn chart_type_change_keeps_column_selection() {
    let mut config = ChartConfiguration::default();
    config.set_x_column("month");
    config.set_y_column("revenue");
    config.set_chart_type(ChartType::Line);

    assert_eq!(config.x_column(), "month");
    assert_eq!(config.y_column(), "revenue");
}

#[test]
fn y_column_applies_only_to_bar_line_and_scatter() {
    let mut config = ChartConfiguration::default();
    for chart_type in ChartType::ALL {
        config.set_chart_type(chart_type);
        let expected = matches!(chart_type, ChartType::Bar | ChartType::Line | ChartType::Scatter);
        assert_eq!(config.y_column_applicable(), expected, "{chart_type}");
    }
}

#[test]
fn field_input_parses_enumerations_and_dimensions() {
    let mut config = ChartConfiguration::default();
    config
        .apply_field_input(ConfigField::ChartType, "scatter")
        .expect("chart type");
    config
        .apply_field_input(ConfigField::ColorScheme, "Pastel1")
        .expect("color scheme");
    config
        .apply_field_input(ConfigField::Height, " 450 ")
        .expect("height");
    config
        .apply_field_input(ConfigField::Title, "  Q1 revenue ")
        .expect("title");

    assert_eq!(config.chart_type(), ChartType::Scatter);
    assert_eq!(config.color_scheme(), ColorScheme::Pastel1);
    assert_eq!(config.height(), 450);
    assert_eq!(config.title(), "  Q1 revenue ");
}

#[test]
fn rejected_input_leaves_fields_unchanged() {
    let mut config = ChartConfiguration::default();
    let before = config.clone();

    assert!(config.apply_field_input(ConfigField::Height, "12.5").is_err());
    assert!(config.apply_field_input(ConfigField::Width, "").is_err());
    assert!(config.apply_field_input(ConfigField::ChartType, "radar").is_err());
    assert!(config.apply_field_input(ConfigField::ColorScheme, "blues").is_err());
    assert_eq!(config, before);
}

#[test]
fn dataset_defaults_reset_columns_and_keep_styling() {
    let mut config = ChartConfiguration::default();
    config.set_chart_type(ChartType::Line);
    config.set_title("Kept");
    config.set_width(1000);
    config.set_x_column("old");
    config.set_y_column("old");

    let dataset = Dataset::from_ingest_response(support::ingest_response(
        &["label", "a", "b"],
        &["b", "a"],
        3,
    ))
    .expect("valid dataset");
    config.apply_dataset_defaults(&dataset);

    assert_eq!(config.x_column(), "label");
    assert_eq!(config.y_column(), "b");
    assert_eq!(config.chart_type(), ChartType::Line);
    assert_eq!(config.title(), "Kept");
    assert_eq!(config.width(), 1000);
}

#[test]
fn dataset_without_numeric_columns_clears_y() {
    let mut config = ChartConfiguration::default();
    config.set_y_column("old");
    let dataset = Dataset::from_ingest_response(support::ingest_response(&["name"], &[], 2))
        .expect("valid dataset");
    config.apply_dataset_defaults(&dataset);

    assert_eq!(config.x_column(), "name");
    assert_eq!(config.y_column(), "");
}

#[test]
fn render_request_wire_shape() {
    let dataset = Dataset::from_ingest_response(support::ingest_response(&["x", "y"], &["y"], 2))
        .expect("valid dataset");
    let mut config = ChartConfiguration::default();
    config.apply_dataset_defaults(&dataset);
    config.set_chart_type(ChartType::Pie);

    let request = RenderRequest::new(&dataset, &config);
    let body = serde_json::to_value(&request).expect("serialize request");

    assert_eq!(body["filename"], json!("data.csv"));
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
    assert_eq!(
        body["config"],
        json!({
            "chart_type": "pie",
            "x_column": "x",
            "y_column": null,
            "color_scheme": "viridis",
            "title": "My Chart",
            "width": 800,
            "height": 600
        })
    );

    config.set_chart_type(ChartType::Bar);
    config.set_y_column("");
    assert_eq!(WireChartConfig::from(&config).y_column, None);
}
