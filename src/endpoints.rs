//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/entries/{entry_id}', use [format_endpoint].

/// The route to list and create finance entries.
pub const ENTRIES: &str = "/entries";
/// The route to get, update and delete a single finance entry.
pub const ENTRY: &str = "/entries/{entry_id}";
/// The route for checking that the server is up.
pub const HEALTH: &str = "/health";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/entries/{entry_id}', '{entry_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ENTRIES);
        assert_endpoint_is_valid_uri(endpoints::ENTRY);
        assert_endpoint_is_valid_uri(endpoints::HEALTH);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint(endpoints::ENTRY, 1);

        assert_eq!(formatted_path, "/entries/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint(endpoints::ENTRIES, 1);

        assert_eq!(formatted_path, "/entries");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 1);

        assert_eq!(formatted_path, "/hello/1/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
