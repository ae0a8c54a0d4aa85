//! Airline fare server.
//!
//! Stores directed fares between three-letter location codes and answers
//! "what is the cheapest route from A to B?" over HTTP and on the command
//! line. Fares are kept in memory and persisted to an append-only log that
//! is replayed at startup.

pub mod advisor;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod planner;
pub mod store;
pub mod web;
