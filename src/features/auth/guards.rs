//! Entry guards evaluated once when a screen is mounted. A failed guard is not
//! an error: the caller redirects and never produces a form.

use crate::navigation::{Location, Redirect};

/// Returns a non-blank query parameter or the redirect to `fallback`.
///
/// # Errors
/// Returns the redirect when the parameter is missing or blank.
pub fn require_query(location: &Location, key: &str, fallback: &str) -> Result<String, Redirect> {
    location
        .query(key)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| Redirect::to(fallback))
}

/// Returns the route parameter `name` of `pattern`, parsed with `parse`, or
/// the redirect to `fallback`.
///
/// # Errors
/// Returns the redirect when the path does not match or `parse` rejects the value.
pub fn require_route_param<T>(
    location: &Location,
    pattern: &str,
    name: &str,
    fallback: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<T, Redirect> {
    location
        .route_params(pattern)
        .and_then(|params| params.get(name).and_then(|value| parse(value.as_str())))
        .ok_or_else(|| Redirect::to(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(input: &str) -> Location {
        Location::parse(input).expect("location")
    }

    #[test]
    fn require_query_accepts_present_value() {
        assert_eq!(
            require_query(&location("/auth/reset-password?code=abc123"), "code", "/auth/login"),
            Ok("abc123".to_string())
        );
    }

    #[test]
    fn require_query_redirects_when_missing_or_blank() {
        for input in ["/auth/reset-password", "/auth/reset-password?code=", "/auth/reset-password?code=%20"] {
            assert_eq!(
                require_query(&location(input), "code", "/auth/login"),
                Err(Redirect::to("/auth/login"))
            );
        }
    }

    #[test]
    fn require_route_param_parses_value() {
        let parse = |value: &str| (value == "register").then_some(1);
        assert_eq!(
            require_route_param(&location("/auth/register"), "/auth/:authType", "authType", "/", parse),
            Ok(1)
        );
        assert_eq!(
            require_route_param(&location("/auth/unknown"), "/auth/:authType", "authType", "/", parse),
            Err(Redirect::to("/"))
        );
        assert_eq!(
            require_route_param(&location("/other/register"), "/auth/:authType", "authType", "/", parse),
            Err(Redirect::to("/"))
        );
    }
}
