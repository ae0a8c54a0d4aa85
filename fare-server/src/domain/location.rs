//! Airport-style location codes.

use std::fmt;

use serde::{Serialize, Serializer};

/// Why a string is not a location code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidLocationCode {
    #[error("location code must have 3 letters, got {0} bytes")]
    Length(usize),

    #[error("location code contains {0:?}, expected A-Z")]
    Character(char),
}

/// Three uppercase ASCII letters naming a fare endpoint, e.g. `GRU`.
///
/// ```
/// use fare_server::domain::LocationCode;
///
/// let scl = LocationCode::parse("SCL").unwrap();
/// assert_eq!(scl.to_string(), "SCL");
/// assert!(LocationCode::parse("scl").is_err());
/// assert_eq!(LocationCode::parse_normalized("scl").unwrap(), scl);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationCode([u8; 3]);

impl LocationCode {
    /// Accept exactly three bytes in `A..=Z`.
    pub fn parse(s: &str) -> Result<Self, InvalidLocationCode> {
        let letters: [u8; 3] = s
            .as_bytes()
            .try_into()
            .map_err(|_| InvalidLocationCode::Length(s.len()))?;

        if let Some(bad) = s.chars().find(|c| !c.is_ascii_uppercase()) {
            return Err(InvalidLocationCode::Character(bad));
        }
        Ok(Self(letters))
    }

    /// Like [`parse`](Self::parse), but upper-cases ASCII letters first.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidLocationCode> {
        Self::parse(&s.to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Debug for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocationCode({})", self.as_str())
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LocationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_airports_parse() {
        for code in ["GRU", "BRC", "SCL", "ORL", "CDG"] {
            assert_eq!(LocationCode::parse(code).unwrap().as_str(), code);
        }
    }

    #[test]
    fn length_errors_report_byte_count() {
        assert_eq!(LocationCode::parse(""), Err(InvalidLocationCode::Length(0)));
        assert_eq!(LocationCode::parse("BR"), Err(InvalidLocationCode::Length(2)));
        assert_eq!(LocationCode::parse("GRUX"), Err(InvalidLocationCode::Length(4)));
        assert_eq!(LocationCode::parse("GÖU"), Err(InvalidLocationCode::Length(4)));
    }

    #[test]
    fn character_errors_name_the_offender() {
        assert_eq!(
            LocationCode::parse("gru"),
            Err(InvalidLocationCode::Character('g'))
        );
        assert_eq!(
            LocationCode::parse("S1L"),
            Err(InvalidLocationCode::Character('1'))
        );
        assert_eq!(
            LocationCode::parse("ab "),
            Err(InvalidLocationCode::Character('a'))
        );
        assert_eq!(
            LocationCode::parse_normalized("ab "),
            Err(InvalidLocationCode::Character(' '))
        );
        // Three bytes, but 'Ö' takes two of them
        assert_eq!(
            LocationCode::parse("GÖ"),
            Err(InvalidLocationCode::Character('Ö'))
        );
    }

    #[test]
    fn normalized_accepts_any_case() {
        let cdg = LocationCode::parse("CDG").unwrap();
        for input in ["cdg", "Cdg", "cDG"] {
            assert_eq!(LocationCode::parse_normalized(input), Ok(cdg));
        }
    }

    #[test]
    fn formatting() {
        let orl = LocationCode::parse("ORL").unwrap();
        assert_eq!(orl.to_string(), "ORL");
        assert_eq!(format!("{orl:?}"), "LocationCode(ORL)");
        assert_eq!(serde_json::to_string(&orl).unwrap(), r#""ORL""#);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn uppercase_triples_are_codes(s in "[A-Z]{3}") {
            let code = LocationCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        #[test]
        fn normalizing_matches_uppercasing(s in "[a-zA-Z]{3}") {
            let upper = s.to_ascii_uppercase();
            prop_assert_eq!(
                LocationCode::parse_normalized(&s).unwrap(),
                LocationCode::parse(&upper).unwrap()
            );
        }

        #[test]
        fn other_lengths_rejected(s in "[A-Z]{0,2}|[A-Z]{4,8}") {
            prop_assert_eq!(LocationCode::parse(&s), Err(InvalidLocationCode::Length(s.len())));
        }
    }
}
