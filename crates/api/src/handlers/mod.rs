//! HTTP handlers.
//!
//! Handlers stay thin: parse the request, delegate to the workflow layer,
//! log the outcome, and wrap the result in the standard response envelope.

pub mod assignment;
pub mod defense;
pub mod evaluation;
pub mod project;
