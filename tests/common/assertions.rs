//! Custom assertion macros and utilities
//!
//! Provides assertion helpers for the JSON responses of the API.

use axum::http::StatusCode;
use axum_test::TestResponse;
use serde_json::Value;

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert the status of a response and return its JSON body
pub fn json_with_status(response: &TestResponse, status: StatusCode) -> Value {
    assert_eq!(
        response.status_code(),
        status,
        "unexpected status, body: {}",
        response.text()
    );
    response.json::<Value>()
}

/// Assert an error response carries `status` in both the status line and body
pub fn assert_error(response: &TestResponse, status: StatusCode) -> String {
    let body = json_with_status(response, status);
    assert_eq!(body["status"], status.as_u16());
    body["error"]
        .as_str()
        .unwrap_or_else(|| panic!("error body without message: {}", body))
        .to_string()
}
