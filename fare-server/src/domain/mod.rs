//! Domain types for the fare planner.
//!
//! This module contains the core domain model types that represent
//! validated fare data. `LocationCode` and `Fare` enforce their invariants
//! at construction time, so code that receives them can trust their validity.

mod error;
mod fare;
mod location;
pub mod validate;

pub use error::{FareError, QueryError};
pub use fare::{BestRoute, Connection, Fare, FareRequest, ROUTE_SEPARATOR};
pub use location::{InvalidLocationCode, LocationCode};
