//! lemon.markets REST API endpoint paths.
//!
//! Paths are relative to the base URL and keep their trailing slash; the API
//! redirects slash-less paths, which would drop the `Authorization` header.

/// Base URL for the lemon.markets paper trading REST API.
pub const LEMON_BASE_URL: &str = "https://paper-trading.lemon.markets/rest/v1/";

/// Account-wide state.
pub const STATE: &str = "state/";

/// Paged collection of the account's spaces.
pub const SPACES: &str = "spaces/";

/// State of a single space.
pub fn space(uuid: &str) -> String {
    format!("{SPACES}{uuid}/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_path() {
        assert_eq!(space("a1b2"), "spaces/a1b2/");
    }
}
