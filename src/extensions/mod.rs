mod observers;

pub use observers::{WorkflowEvent, WorkflowObserver};
