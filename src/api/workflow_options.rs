use serde::{Deserialize, Serialize};

use crate::core::ChartConfiguration;

/// What a successful configuration edit does to a surfaced error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClearPolicy {
    /// Any surfaced error is cleared: the edit is assumed to address it.
    #[default]
    ClearOnEdit,
    /// Only errors raised by rejected configuration input are cleared.
    KeepOnEdit,
}

/// Controller construction options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkflowOptions {
    #[serde(default)]
    pub error_clear_policy: ErrorClearPolicy,
    #[serde(default)]
    pub initial_configuration: ChartConfiguration,
}

impl WorkflowOptions {
    #[must_use]
    pub fn with_error_clear_policy(mut self, policy: ErrorClearPolicy) -> Self {
        self.error_clear_policy = policy;
        self
    }

    #[must_use]
    pub fn with_initial_configuration(mut self, configuration: ChartConfiguration) -> Self {
        self.initial_configuration = configuration;
        self
    }
}
