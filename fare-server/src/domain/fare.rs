//! Fares, connections and the best-route result.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::FareError;
use super::location::LocationCode;
use super::validate;

/// Separator between stops in a rendered route.
pub const ROUTE_SEPARATOR: &str = " - ";

/// A fare as handed to us by a caller: unvalidated and in any case.
///
/// This is the insertion input shape shared by the HTTP layer, the CLI and
/// the durable log parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareRequest {
    pub boarding: String,
    pub destination: String,
    pub cost: i64,
}

impl FareRequest {
    pub fn new(boarding: impl Into<String>, destination: impl Into<String>, cost: i64) -> Self {
        Self {
            boarding: boarding.into(),
            destination: destination.into(),
            cost,
        }
    }

    /// Upper-case both location codes. Cost is left untouched.
    pub fn normalized(&self) -> Self {
        Self {
            boarding: self.boarding.to_ascii_uppercase(),
            destination: self.destination.to_ascii_uppercase(),
            cost: self.cost,
        }
    }
}

/// A validated, directed, priced connection between two locations.
///
/// `boarding == destination` is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Fare {
    pub boarding: LocationCode,
    pub destination: LocationCode,
    pub cost: u32,
}

impl Fare {
    /// Build a fare from already-validated parts.
    ///
    /// Returns `None` if the cost is out of range.
    pub fn new(boarding: LocationCode, destination: LocationCode, cost: u32) -> Option<Self> {
        validate::is_valid_cost(i64::from(cost)).then_some(Self {
            boarding,
            destination,
            cost,
        })
    }

    /// Normalize and validate a request.
    ///
    /// Both codes are upper-cased first, so `"gru"` is accepted as `GRU`.
    pub fn from_request(request: &FareRequest) -> Result<Self, FareError> {
        let request = request.normalized();
        if !validate::is_valid_fare(&request) {
            return Err(FareError::InvalidFare);
        }

        let boarding =
            LocationCode::parse(&request.boarding).map_err(|_| FareError::InvalidFare)?;
        let destination =
            LocationCode::parse(&request.destination).map_err(|_| FareError::InvalidFare)?;
        let cost = u32::try_from(request.cost).map_err(|_| FareError::InvalidFare)?;

        Ok(Self {
            boarding,
            destination,
            cost,
        })
    }

    /// The outgoing edge this fare contributes to its boarding location.
    pub fn connection(&self) -> Connection {
        Connection {
            destination: self.destination,
            cost: self.cost,
        }
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{} ({})", self.boarding, self.destination, self.cost)
    }
}

/// One outgoing edge in the edge cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connection {
    pub destination: LocationCode,
    pub cost: u32,
}

/// The cheapest route between two locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestRoute {
    /// Stops from boarding to destination, both inclusive.
    pub stops: Vec<LocationCode>,

    /// Sum of the fares along the route.
    pub cost: u64,
}

impl BestRoute {
    /// The route rendered as `"GRU - BRC - SCL"`.
    pub fn route(&self) -> String {
        self.stops
            .iter()
            .map(LocationCode::as_str)
            .collect::<Vec<_>>()
            .join(ROUTE_SEPARATOR)
    }
}

impl fmt::Display for BestRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} > ${}", self.route(), self.cost)
    }
}
