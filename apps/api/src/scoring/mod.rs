// Resume scoring: deterministic checks over a structured resume document.
// The engine is pure; handlers and the schema boundary are the only layers that log.

pub mod bullets;
pub mod engine;
pub mod handlers;
pub mod predicates;
pub mod rules;
pub mod schema;
