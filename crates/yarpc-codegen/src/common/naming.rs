//! Naming-convention conversions.
//!
//! IDL declarations use `snake_case` for fields and methods; Go wants
//! `PascalCase` with well-known initialisms fully capitalized, Ruby wants
//! `snake_case` methods and file names.
//!
//! # Examples
//!
//! ```
//! use yarpc_codegen::common::naming::{camel_to_snake, snake_to_camel, titleize};
//!
//! assert_eq!(snake_to_camel("user_id"), "UserID");
//! assert_eq!(camel_to_snake("UserName"), "user_name");
//! assert_eq!(titleize("catalog"), "Catalog");
//! ```

use regex::Regex;
use std::sync::LazyLock;

/// Initialisms kept fully upper-cased by [`snake_to_camel`]. Sorted.
const INITIALISMS: &[&str] = &[
    "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID", "IP",
    "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS", "TTL",
    "UDP", "UI", "UID", "URI", "URL", "UTF8", "UUID", "VM", "XML", "XMPP", "XSRF", "XSS",
];

static FIRST_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("valid regex"));
static ALL_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));

/// Returns `true` if `word` (already upper-cased) is a known initialism.
#[must_use]
pub fn is_initialism(word: &str) -> bool {
    INITIALISMS.binary_search(&word).is_ok()
}

/// Converts `snake_case` to `PascalCase`, keeping initialisms upper-cased.
///
/// Empty components (leading, trailing or doubled underscores) are dropped.
///
/// # Examples
///
/// ```
/// use yarpc_codegen::common::naming::snake_to_camel;
///
/// assert_eq!(snake_to_camel("get_user"), "GetUser");
/// assert_eq!(snake_to_camel("callback_url"), "CallbackURL");
/// assert_eq!(snake_to_camel("HTTP_status"), "HTTPStatus");
/// ```
#[must_use]
pub fn snake_to_camel(input: &str) -> String {
    input
        .to_lowercase()
        .split('_')
        .filter(|component| !component.is_empty())
        .map(|component| {
            let upper = component.to_uppercase();
            if is_initialism(&upper) {
                upper
            } else {
                titleize(component)
            }
        })
        .collect()
}

/// Converts `CamelCase` or `PascalCase` to `snake_case`.
///
/// Initialism information is not recoverable: `UserID` becomes `user_id`,
/// and so does `UserId`.
///
/// # Examples
///
/// ```
/// use yarpc_codegen::common::naming::camel_to_snake;
///
/// assert_eq!(camel_to_snake("GetUser"), "get_user");
/// assert_eq!(camel_to_snake("HTTPServer"), "http_server");
/// assert_eq!(camel_to_snake("already_snake"), "already_snake");
/// ```
#[must_use]
pub fn camel_to_snake(input: &str) -> String {
    let snake = FIRST_CAP.replace_all(input, "${1}_${2}");
    let snake = ALL_CAP.replace_all(&snake, "${1}_${2}");
    snake.to_lowercase()
}

/// Upper-cases the first character of `input`, leaving the rest unchanged.
#[must_use]
pub fn titleize(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialisms_sorted() {
        let mut sorted = INITIALISMS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, INITIALISMS);
    }

    #[test]
    fn test_snake_to_camel_acronyms() {
        assert_eq!(snake_to_camel("user_id"), "UserID");
        assert_eq!(snake_to_camel("json_api_url"), "JSONAPIURL");
        assert_eq!(snake_to_camel("id"), "ID");
        assert!(!snake_to_camel("user_id").ends_with("Id"));
    }

    #[test]
    fn test_snake_to_camel_edges() {
        assert_eq!(snake_to_camel(""), "");
        assert_eq!(snake_to_camel("_private__name_"), "PrivateName");
        assert_eq!(snake_to_camel("v2_items"), "V2Items");
        assert_eq!(snake_to_camel("ALREADY_UPPER"), "AlreadyUpper");
    }

    #[test]
    fn test_round_trip_acronym_free_words() {
        for name in [
            "name",
            "user_name",
            "created_at",
            "list_all_items",
            "v2_name",
            "item_count",
        ] {
            assert_eq!(camel_to_snake(&snake_to_camel(name)), name, "{name}");
        }
    }

    #[test]
    fn test_round_trip_with_acronym() {
        assert_eq!(camel_to_snake(&snake_to_camel("user_id")), "user_id");
    }

    #[test]
    fn test_camel_to_snake_shapes() {
        assert_eq!(camel_to_snake("Item"), "item");
        assert_eq!(camel_to_snake("getItem"), "get_item");
        assert_eq!(camel_to_snake("ItemV2"), "item_v2");
        assert_eq!(camel_to_snake("ServeHTTP"), "serve_http");
    }

    #[test]
    fn test_titleize() {
        assert_eq!(titleize(""), "");
        assert_eq!(titleize("item"), "Item");
        assert_eq!(titleize("iTEM"), "ITEM");
        assert_eq!(titleize("Item"), "Item");
    }
}
