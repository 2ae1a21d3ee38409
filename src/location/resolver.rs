//! Location resolver: free text to validated coordinates.
//!
//! Resolution order:  exact directory name → `"<lat>,<lon>"` pair → range check
//!
//! The resolver holds no mutable state. Suggestion visibility and the input
//! text belong to the caller (see [`super::search::SearchBox`]).

use super::directory::{self, NamedLocation};
use super::types::{Coordinate, ValidationError};
use tracing::debug;

/// Resolves user text against a fixed directory.
#[derive(Debug, Clone, Copy)]
pub struct LocationResolver {
    directory: &'static [NamedLocation],
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationResolver {
    /// Resolver over the built-in directory.
    pub fn new() -> Self {
        Self {
            directory: directory::entries(),
        }
    }

    /// Resolver over a custom directory (for testing).
    pub fn with_directory(directory: &'static [NamedLocation]) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &'static [NamedLocation] {
        self.directory
    }

    /// Directory names containing `partial`, ignoring case, in table order.
    ///
    /// Empty input yields no suggestions.
    pub fn suggest(&self, partial: &str) -> Vec<&'static str> {
        if partial.is_empty() {
            return Vec::new();
        }
        let needle = partial.to_lowercase();
        self.directory
            .iter()
            .filter(|entry| entry.name.to_lowercase().contains(&needle))
            .map(|entry| entry.name)
            .collect()
    }

    /// Turn `text` into a coordinate.
    ///
    /// An exact (case-sensitive) directory name always wins, even when the
    /// name would also parse as a coordinate pair.
    pub fn resolve(&self, text: &str) -> Result<Coordinate, ValidationError> {
        if let Some(entry) = self.directory.iter().find(|entry| entry.name == text) {
            debug!(name = entry.name, "resolved from directory");
            return Ok(entry.coordinate());
        }

        let (lat, lon) = parse_pair(text).ok_or(ValidationError::InvalidInput)?;
        let coord = Coordinate::new(lat, lon)?;
        debug!(lat, lon, "resolved from coordinate pair");
        Ok(coord)
    }
}

/// Parse `"<lat>,<lon>"`. Exactly two comma-separated finite numbers,
/// surrounding whitespace allowed.
fn parse_pair(text: &str) -> Option<(f64, f64)> {
    let mut parts = text.split(',');
    let lat = parse_number(parts.next()?)?;
    let lon = parse_number(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some((lat, lon))
}

fn parse_number(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn resolver() -> LocationResolver {
        LocationResolver::new()
    }

    #[test]
    fn test_every_directory_name_resolves_to_stored_coordinate() {
        let r = resolver();
        for entry in directory::entries() {
            let c = r.resolve(entry.name).unwrap();
            assert_eq!(c, entry.coordinate());
        }
    }

    #[test]
    fn test_resolve_paris() {
        let c = resolver().resolve("Paris").unwrap();
        assert_relative_eq!(c.latitude, 48.8566);
        assert_relative_eq!(c.longitude, 2.3522);
    }

    #[test]
    fn test_directory_match_is_case_sensitive() {
        assert_eq!(resolver().resolve("paris"), Err(ValidationError::InvalidInput));
    }

    #[test]
    fn test_resolve_pair() {
        let c = resolver().resolve("50,15").unwrap();
        assert_relative_eq!(c.latitude, 50.0);
        assert_relative_eq!(c.longitude, 15.0);
    }

    #[test]
    fn test_resolve_pair_with_whitespace() {
        let c = resolver().resolve("  -33.86 ,  151.2 ").unwrap();
        assert_relative_eq!(c.latitude, -33.86);
        assert_relative_eq!(c.longitude, 151.2);
    }

    #[test]
    fn test_resolve_pair_inclusive_bounds() {
        for text in ["90,180", "-90,-180", "0,0", "-90,180"] {
            assert!(resolver().resolve(text).is_ok(), "{text}");
        }
    }

    #[test]
    fn test_out_of_range() {
        for text in ["91,0", "0,181", "-91,5", "0,-180.0001"] {
            assert_eq!(resolver().resolve(text), Err(ValidationError::OutOfRange), "{text}");
        }
    }

    #[test]
    fn test_invalid_input() {
        for text in [
            "", "   ", "Atlantis", "12", "12,", ",12", "1,2,3", "abc,def",
            "12;34", "NaN,0", "inf,0", "10,-inf", "12abc,4",
        ] {
            assert_eq!(
                resolver().resolve(text),
                Err(ValidationError::InvalidInput),
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_directory_beats_pair_syntax() {
        static ODD: &[NamedLocation] = &[NamedLocation {
            name: "10,20",
            latitude: -5.0,
            longitude: 7.0,
        }];
        let r = LocationResolver::with_directory(ODD);
        let c = r.resolve("10,20").unwrap();
        assert_relative_eq!(c.latitude, -5.0);
        assert_relative_eq!(c.longitude, 7.0);
        // Same text with extra spacing is no longer a directory name.
        let c = r.resolve("10, 20").unwrap();
        assert_relative_eq!(c.latitude, 10.0);
    }

    #[test]
    fn test_suggest_contains_ignoring_case() {
        assert_eq!(resolver().suggest("lon"), vec!["London"]);
        assert_eq!(resolver().suggest("LON"), vec!["London"]);
    }

    #[test]
    fn test_suggest_definition_order() {
        // "r" appears in Paris, Prague, Berlin, Rome, Madrid, New York
        assert_eq!(
            resolver().suggest("r"),
            vec!["Paris", "Prague", "Berlin", "Rome", "Madrid", "New York"]
        );
    }

    #[test]
    fn test_suggest_empty_and_no_match() {
        assert!(resolver().suggest("").is_empty());
        assert!(resolver().suggest("xyz").is_empty());
    }

    #[test]
    fn test_suggest_matches_inner_space() {
        assert_eq!(resolver().suggest("w y"), vec!["New York"]);
    }
}
