//! chart-playground: headless workflow controller for a dataset-to-chart
//! playground.
//!
//! The crate owns the client-side state of the playground (uploaded
//! dataset, chart configuration, last rendered chart and request status)
//! and drives two remote operations, ingestion and rendering, through a
//! pluggable [`service::ChartService`]. Presentation layers read snapshots,
//! subscribe as observers and forward user actions as intents.

pub mod api;
pub mod core;
pub mod error;
pub mod export;
pub mod extensions;
pub mod orchestrator;
pub mod service;
pub mod telemetry;

pub use api::{IntentOutcome, PlaygroundConfig, WorkflowController, WorkflowOptions};
pub use error::{PlaygroundError, PlaygroundResult, ServiceError};
