use std::sync::Arc;

use crate::core::{ChartConfiguration, Dataset, HEIGHT_RANGE, WIDTH_RANGE};
use crate::error::{PlaygroundError, PlaygroundResult};
use crate::orchestrator::{NO_DATASET_MESSAGE, NO_X_COLUMN_MESSAGE};

/// Readiness guard run before a render is admitted.
///
/// Requires a dataset and an X column, then checks the selection against the
/// dataset and the size bounds. Returns the dataset on success.
pub(super) fn validate_for_render<'a>(
    dataset: Option<&'a Arc<Dataset>>,
    config: &ChartConfiguration,
) -> PlaygroundResult<&'a Arc<Dataset>> {
    let dataset = dataset.ok_or_else(|| invalid(NO_DATASET_MESSAGE.to_owned()))?;

    let x_column = config.x_column();
    if x_column.is_empty() {
        return Err(invalid(NO_X_COLUMN_MESSAGE.to_owned()));
    }
    if !dataset.has_column(x_column) {
        return Err(invalid(format!("X column `{x_column}` is not in the dataset")));
    }

    if let Some(y_column) = config.effective_y_column() {
        if !dataset.is_numeric_column(y_column) {
            return Err(invalid(format!("Y column `{y_column}` is not a numeric column")));
        }
    }

    for (name, value, range) in [
        ("Width", config.width(), WIDTH_RANGE),
        ("Height", config.height(), HEIGHT_RANGE),
    ] {
        if !range.contains(&value) {
            return Err(invalid(format!(
                "{name} must be between {} and {}",
                range.start(),
                range.end()
            )));
        }
    }

    Ok(dataset)
}

fn invalid(message: String) -> PlaygroundError {
    PlaygroundError::InvalidConfiguration(message)
}
