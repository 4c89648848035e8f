use serde::Serialize;
use std::fmt;

/// Fallback place and region bias for user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationDefaults {
    pub city: String,
    /// Region code appended to bare place names, e.g. "IN"
    pub region: String,
}

impl LocationDefaults {
    /// Query used for empty input, e.g. "Delhi, IN"
    pub fn default_query(&self) -> LocationQuery {
        LocationQuery(format!("{}, {}", self.city, self.region))
    }
}

/// Location string sent to the upstream `q` parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocationQuery(String);

impl LocationQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turn free-text user input into a location query.
///
/// Input with a comma ("Paris, FR") or any digit ("12.9, 77.5") is already
/// specific and passes through trimmed. Anything else is biased towards the
/// configured default region.
///
/// A digit is any Unicode numeric character (`char::is_numeric`), so
/// Arabic-Indic or full-width digits count as well as ASCII ones.
pub fn normalize(raw: Option<&str>, defaults: &LocationDefaults) -> LocationQuery {
    let input = raw.map(str::trim).unwrap_or_default();

    if input.is_empty() {
        return defaults.default_query();
    }

    if input.contains(',') || input.chars().any(char::is_numeric) {
        return LocationQuery(input.to_string());
    }

    LocationQuery(format!("{}, {}", input, defaults.region))
}
