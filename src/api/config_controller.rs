use tracing::{debug, trace};

use crate::core::{ChartConfiguration, ChartType, ColorScheme, ConfigField};
use crate::extensions::WorkflowEvent;

use super::{ErrorClearPolicy, ErrorSource, IntentOutcome, SurfacedError, WorkflowController};

impl WorkflowController {
    /// Applies raw UI input to one configuration field.
    ///
    /// Edits are never blocked by an in-flight request; a render already in
    /// flight keeps the configuration it was started with. Input that does
    /// not parse is surfaced as an error and the field keeps its value.
    pub fn on_config_field_changed(&self, field: ConfigField, value: &str) -> IntentOutcome {
        let mut state = self.lock_state();
        match state.config.apply_field_input(field, value) {
            Ok(()) => {
                self.clear_after_edit(&mut state.error);
                trace!(%field, value, "configuration field changed");
                self.commit(state, WorkflowEvent::ConfigChanged { field });
                IntentOutcome::Completed
            }
            Err(err) => {
                debug!(%field, value, error = %err, "configuration input rejected");
                state.raise(ErrorSource::Config, err.to_string());
                self.commit(state, WorkflowEvent::ConfigRejected { field });
                IntentOutcome::Failed(err)
            }
        }
    }

    pub fn set_chart_type(&self, chart_type: ChartType) {
        self.edit_config(ConfigField::ChartType, |config| config.set_chart_type(chart_type));
    }

    pub fn set_x_column(&self, column: impl Into<String>) {
        let column = column.into();
        self.edit_config(ConfigField::XColumn, |config| config.set_x_column(column));
    }

    pub fn set_y_column(&self, column: impl Into<String>) {
        let column = column.into();
        self.edit_config(ConfigField::YColumn, |config| config.set_y_column(column));
    }

    pub fn set_color_scheme(&self, scheme: ColorScheme) {
        self.edit_config(ConfigField::ColorScheme, |config| {
            config.set_color_scheme(scheme);
        });
    }

    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.edit_config(ConfigField::Title, |config| config.set_title(title));
    }

    /// Stores `width` unchanged; the size bounds are checked by `generate`.
    pub fn set_width(&self, width: i64) {
        self.edit_config(ConfigField::Width, |config| config.set_width(width));
    }

    /// Stores `height` unchanged; the size bounds are checked by `generate`.
    pub fn set_height(&self, height: i64) {
        self.edit_config(ConfigField::Height, |config| config.set_height(height));
    }

    fn edit_config(&self, field: ConfigField, edit: impl FnOnce(&mut ChartConfiguration)) {
        let mut state = self.lock_state();
        edit(&mut state.config);
        self.clear_after_edit(&mut state.error);
        trace!(%field, "configuration field set");
        self.commit(state, WorkflowEvent::ConfigChanged { field });
    }

    fn clear_after_edit(&self, error: &mut Option<SurfacedError>) {
        let clear = match self.error_clear_policy {
            ErrorClearPolicy::ClearOnEdit => error.is_some(),
            ErrorClearPolicy::KeepOnEdit => error
                .as_ref()
                .is_some_and(|surfaced| surfaced.source == ErrorSource::Config),
        };
        if clear {
            *error = None;
        }
    }
}
