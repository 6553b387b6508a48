//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, events, errors)
//! - `document` - Repository documents, blobs and the cold-storage lifecycle
//! - `annotation` - Annotations anchored in document content and their events
//! - `notification` - Subscriptions, notification definitions and matching
//! - `routing` - Route step classification, including task-step routes

pub mod annotation;
pub mod document;
pub mod foundation;
pub mod notification;
pub mod routing;
