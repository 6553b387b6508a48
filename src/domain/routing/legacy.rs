//! Task-step routing vocabulary.
//!
//! Step-based routes predate graph routes and are only read, never created.

#![allow(deprecated)]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::document::Document;
use crate::domain::foundation::{Timestamp, ValidationError};

#[deprecated(since = "0.1.0", note = "use graph routes")]
pub const TASK_STEP_FACET_NAME: &str = "TaskStep";

#[deprecated(since = "0.1.0", note = "use graph routes")]
pub const TASK_STEP_ACTORS_PROPERTY_NAME: &str = "tkst:actors";

#[deprecated(since = "0.1.0", note = "use graph routes")]
pub const TASK_STEP_DUE_DATE_PROPERTY_NAME: &str = "tkst:dueDate";

#[deprecated(since = "0.1.0", note = "use graph routes")]
pub const TASK_STEP_AUTOMATIC_VALIDATION_PROPERTY_NAME: &str = "tkst:automaticValidation";

#[deprecated(since = "0.1.0", note = "use graph routes")]
pub const TASK_STEP_DIRECTIVE_PROPERTY_NAME: &str = "tkst:directive";

#[deprecated(since = "0.1.0", note = "use graph routes")]
pub const TASK_STEP_COMMENTS_PROPERTY_NAME: &str = "tkst:comments";

/// Context key under which step actors are exposed.
#[deprecated(since = "0.1.0", note = "use graph routes")]
pub const ROUTING_TASK_ACTORS_KEY: &str = "document.routing.task.actors";

/// Comparison used by step conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationOperator {
    Equal,
    NotEqual,
    LessThan,
    LessOrEqualThan,
    GreaterThan,
    GreaterOrEqualThan,
}

impl EvaluationOperator {
    pub const ALL: [EvaluationOperator; 6] = [
        EvaluationOperator::Equal,
        EvaluationOperator::NotEqual,
        EvaluationOperator::LessThan,
        EvaluationOperator::LessOrEqualThan,
        EvaluationOperator::GreaterThan,
        EvaluationOperator::GreaterOrEqualThan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationOperator::Equal => "equal",
            EvaluationOperator::NotEqual => "not_equal",
            EvaluationOperator::LessThan => "less_than",
            EvaluationOperator::LessOrEqualThan => "less_or_equal_than",
            EvaluationOperator::GreaterThan => "greater_than",
            EvaluationOperator::GreaterOrEqualThan => "greater_or_equal_than",
        }
    }

    /// Applies `left <op> right`. Incomparable values only satisfy `NotEqual`.
    pub fn evaluate<T: PartialOrd + ?Sized>(&self, left: &T, right: &T) -> bool {
        match self {
            EvaluationOperator::Equal => left == right,
            EvaluationOperator::NotEqual => left != right,
            EvaluationOperator::LessThan => left < right,
            EvaluationOperator::LessOrEqualThan => left <= right,
            EvaluationOperator::GreaterThan => left > right,
            EvaluationOperator::GreaterOrEqualThan => left >= right,
        }
    }
}

impl FromStr for EvaluationOperator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("operator", format!("unknown operator `{}`", s))
            })
    }
}

impl fmt::Display for EvaluationOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values of the task-step facet read from a route step document.
#[deprecated(since = "0.1.0", note = "use graph routes")]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStep {
    pub actors: Vec<String>,
    pub due_date: Option<Timestamp>,
    pub automatic_validation: bool,
    pub directive: Option<String>,
    pub comments: Vec<String>,
}

impl TaskStep {
    /// Reads the `tkst:*` properties of a step document.
    ///
    /// Missing or mistyped properties fall back to their defaults.
    pub fn from_document(document: &Document) -> Self {
        let strings = |name: &str| -> Vec<String> {
            document
                .property(name)
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or_default()
        };
        Self {
            actors: strings(TASK_STEP_ACTORS_PROPERTY_NAME),
            due_date: document
                .property(TASK_STEP_DUE_DATE_PROPERTY_NAME)
                .and_then(|v| serde_json::from_value(v).ok()),
            automatic_validation: document
                .property(TASK_STEP_AUTOMATIC_VALIDATION_PROPERTY_NAME)
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            directive: document
                .property(TASK_STEP_DIRECTIVE_PROPERTY_NAME)
                .and_then(|v| v.as_str().map(str::to_string)),
            comments: strings(TASK_STEP_COMMENTS_PROPERTY_NAME),
        }
    }
}

/// Shape of a document route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    Graph,
    #[deprecated(since = "0.1.0", note = "use graph routes")]
    LegacyTaskStep(TaskStep),
}

impl RouteKind {
    /// Classifies a route step by its facets.
    pub fn of(document: &Document, facets: &[&str]) -> Self {
        if facets.contains(&TASK_STEP_FACET_NAME) {
            RouteKind::LegacyTaskStep(TaskStep::from_document(document))
        } else {
            RouteKind::Graph
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, RouteKind::LegacyTaskStep(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::FOLDER_TYPE;
    use serde_json::json;

    #[test]
    fn operators_parse_from_their_names() {
        for op in EvaluationOperator::ALL {
            assert_eq!(op.as_str().parse::<EvaluationOperator>().unwrap(), op);
        }
        assert!("between".parse::<EvaluationOperator>().is_err());
    }

    #[test]
    fn operators_serialize_as_snake_case() {
        assert_eq!(
            serde_json::to_value(EvaluationOperator::LessOrEqualThan).unwrap(),
            json!("less_or_equal_than")
        );
    }

    #[test]
    fn evaluate_compares_values() {
        assert!(EvaluationOperator::Equal.evaluate(&3, &3));
        assert!(EvaluationOperator::NotEqual.evaluate("a", "b"));
        assert!(EvaluationOperator::LessThan.evaluate(&1, &2));
        assert!(EvaluationOperator::LessOrEqualThan.evaluate(&2, &2));
        assert!(EvaluationOperator::GreaterThan.evaluate(&2.5, &1.0));
        assert!(!EvaluationOperator::GreaterOrEqualThan.evaluate(&1, &2));
    }

    #[test]
    fn nan_only_satisfies_not_equal() {
        for op in EvaluationOperator::ALL {
            let expected = op == EvaluationOperator::NotEqual;
            assert_eq!(op.evaluate(&f64::NAN, &1.0), expected, "{op}");
        }
    }

    #[test]
    fn task_step_facet_yields_legacy_route() {
        let mut step = Document::new(None, "step", FOLDER_TYPE).unwrap();
        step.set_property(TASK_STEP_ACTORS_PROPERTY_NAME, json!(["user:john", "group:members"]))
            .unwrap();
        step.set_property(TASK_STEP_AUTOMATIC_VALIDATION_PROPERTY_NAME, json!(true))
            .unwrap();
        step.set_property(TASK_STEP_DIRECTIVE_PROPERTY_NAME, json!("Review"))
            .unwrap();

        match RouteKind::of(&step, &[TASK_STEP_FACET_NAME]) {
            RouteKind::LegacyTaskStep(task) => {
                assert_eq!(task.actors, vec!["user:john", "group:members"]);
                assert!(task.automatic_validation);
                assert_eq!(task.directive.as_deref(), Some("Review"));
                assert!(task.due_date.is_none());
                assert!(task.comments.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn other_steps_are_graph_routes() {
        let step = Document::new(None, "node", FOLDER_TYPE).unwrap();
        assert!(!RouteKind::of(&step, &[]).is_legacy());
    }
}
