//! Web layer for the fare server.
//!
//! Provides HTTP endpoints for adding fares and finding the cheapest route.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
