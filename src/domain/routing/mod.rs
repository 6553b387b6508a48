//! Document routing vocabulary.
//!
//! Only the classification of route steps lives here; the routing engine
//! itself is external.

mod legacy;

#[allow(deprecated)]
pub use legacy::{
    EvaluationOperator, RouteKind, TaskStep, ROUTING_TASK_ACTORS_KEY,
    TASK_STEP_ACTORS_PROPERTY_NAME, TASK_STEP_AUTOMATIC_VALIDATION_PROPERTY_NAME,
    TASK_STEP_COMMENTS_PROPERTY_NAME, TASK_STEP_DIRECTIVE_PROPERTY_NAME,
    TASK_STEP_DUE_DATE_PROPERTY_NAME, TASK_STEP_FACET_NAME,
};
