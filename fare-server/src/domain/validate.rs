//! Format and range checks for incoming fares.
//!
//! Pure predicates with no error type: callers decide which error to report.

use super::fare::FareRequest;
use super::location::LocationCode;

/// Cheapest fare we accept.
pub const MIN_COST: i64 = 1;

/// Most expensive fare we accept.
pub const MAX_COST: i64 = 1_000_000;

/// True iff `code` is exactly 3 uppercase ASCII letters.
pub fn is_valid_location_code(code: &str) -> bool {
    LocationCode::parse(code).is_ok()
}

/// True iff `MIN_COST <= cost <= MAX_COST`.
pub fn is_valid_cost(cost: i64) -> bool {
    (MIN_COST..=MAX_COST).contains(&cost)
}

/// Both endpoints and the cost are valid. No case normalization happens here.
pub fn is_valid_fare(fare: &FareRequest) -> bool {
    is_valid_location_code(&fare.boarding)
        && is_valid_location_code(&fare.destination)
        && is_valid_cost(fare.cost)
}
