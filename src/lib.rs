//! Docvault - Document repository services
//!
//! This crate implements two services of a document repository:
//!
//! - moving a document's main content to a cold storage tier and requesting
//!   its retrieval, exposed as automation operations
//! - annotations on documents, with the comment events they raise and the
//!   notification mail sent to subscribers when a transaction commits
//!
//! The code follows a hexagonal layout: `domain` holds the aggregates and
//! events, `ports` the traits to the outside world, `adapters` their
//! implementations, and `application` the handlers tying them together.
//! [`platform::Platform`] wires everything with in-memory adapters.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod platform;
pub mod ports;
pub mod telemetry;
