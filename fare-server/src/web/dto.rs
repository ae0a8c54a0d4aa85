//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{BestRoute, Fare, FareRequest};

/// Query string for the best-route lookup.
///
/// Missing parameters are treated as empty codes and rejected by validation.
#[derive(Debug, Default, Deserialize)]
pub struct BestRouteQuery {
    /// Boarding location code
    #[serde(default)]
    pub board: String,

    /// Destination location code
    #[serde(default)]
    pub dest: String,
}

/// The cheapest route between two locations.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BestRouteResponse {
    /// Stops joined by `" - "`, e.g. `"GRU - BRC - SCL"`
    pub route: String,

    /// Total cost of the route
    pub cost: u64,
}

impl From<&BestRoute> for BestRouteResponse {
    fn from(best: &BestRoute) -> Self {
        Self {
            route: best.route(),
            cost: best.cost,
        }
    }
}

/// A fare, as stored or as submitted.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FareResponse {
    pub boarding: String,
    pub destination: String,
    pub cost: i64,
}

impl From<&Fare> for FareResponse {
    fn from(fare: &Fare) -> Self {
        Self {
            boarding: fare.boarding.to_string(),
            destination: fare.destination.to_string(),
            cost: i64::from(fare.cost),
        }
    }
}

impl From<&FareRequest> for FareResponse {
    fn from(request: &FareRequest) -> Self {
        Self {
            boarding: request.boarding.clone(),
            destination: request.destination.clone(),
            cost: request.cost,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
