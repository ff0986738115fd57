//! The backend endpoint URIs used by the client.
//!
//! For endpoints that take a parameter, e.g., '/categories/{category_id}/edit',
//! use [format_endpoint]. Paths are relative to the configured server URL, see
//! [resolve].

/// The route for deleting a transaction.
pub const DELETE_TRANSACTION: &str = "/transactions/{transaction_id}/delete";
/// The route for deleting a category.
pub const DELETE_CATEGORY: &str = "/categories/{category_id}/delete";
/// The route for renaming a category.
pub const EDIT_CATEGORY: &str = "/categories/{category_id}/edit";
/// The route for creating a category.
pub const ADD_CATEGORY: &str = "/categories/add";
/// The route for downloading a report. Takes two parameters, use
/// [format_report_endpoint].
pub const EXPORT_REPORT: &str = "/reports/export/{report_type}/{format}";

/// Replace the first parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/categories/{category_id}/edit',
/// '{category_id}' is the parameter.
///
/// `id` is inserted as a single path segment, so characters that would change
/// the path structure are percent-encoded.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        urlencoding::encode(id),
        &endpoint_path[param_end..]
    )
}

/// Build the export route for `report_type` in `format`, e.g.
/// '/reports/export/current/csv'.
pub fn format_report_endpoint(report_type: &str, format: &str) -> String {
    format_endpoint(&format_endpoint(EXPORT_REPORT, report_type), format)
}

/// Join `path` onto the configured `server_url`.
///
/// The server URL may be an origin ('https://example.com'), an origin with a
/// prefix ('https://example.com/budget/') or a relative prefix ('/'). Exactly
/// one slash separates the two parts.
pub fn resolve(server_url: &str, path: &str) -> String {
    let base = server_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    format!("{base}/{path}")
}

#[cfg(test)]
mod endpoints_tests {
    use super::{
        ADD_CATEGORY, DELETE_CATEGORY, DELETE_TRANSACTION, EDIT_CATEGORY, format_endpoint,
        format_report_endpoint, resolve,
    };

    #[test]
    fn produces_transaction_delete_path() {
        let formatted_path = format_endpoint(DELETE_TRANSACTION, "42");

        assert_eq!(formatted_path, "/transactions/42/delete");
    }

    #[test]
    fn produces_category_paths() {
        assert_eq!(
            format_endpoint(DELETE_CATEGORY, "AB12"),
            "/categories/AB12/delete"
        );
        assert_eq!(
            format_endpoint(EDIT_CATEGORY, "AB12"),
            "/categories/AB12/edit"
        );
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint(ADD_CATEGORY, "1");

        assert_eq!(formatted_path, "/categories/add");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", "1");

        assert_eq!(formatted_path, "/hello/1/bye");
    }

    #[test]
    fn escapes_characters_that_change_the_path() {
        let formatted_path = format_endpoint(DELETE_TRANSACTION, "a/b c");

        assert_eq!(formatted_path, "/transactions/a%2Fb%20c/delete");
    }

    #[test]
    fn escapes_non_ascii_ids() {
        assert_eq!(
            format_endpoint(EDIT_CATEGORY, "café"),
            "/categories/caf%C3%A9/edit"
        );
    }

    #[test]
    fn fills_both_report_parameters() {
        assert_eq!(
            format_report_endpoint("current", "csv"),
            "/reports/export/current/csv"
        );
    }

    #[test]
    fn resolve_joins_with_single_slash() {
        assert_eq!(resolve("/", "/categories/add"), "/categories/add");
        assert_eq!(
            resolve("https://budget.example.com/", "/categories/add"),
            "https://budget.example.com/categories/add"
        );
        assert_eq!(
            resolve("https://example.com/tracker", "categories/add"),
            "https://example.com/tracker/categories/add"
        );
    }
}
