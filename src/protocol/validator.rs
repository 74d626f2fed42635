//! Structural request validation.
//!
//! # Responsibilities
//! - Check field presence and well-formedness independent of routing
//! - Collect every applicable violation, in evaluation order
//!
//! # Design Decisions
//! - No short-circuit: a request missing three fields reports all three
//! - Purely structural: never consults the store, never parses the URL
//!   beyond checking that a path is present

use crate::protocol::request::{Method, Request};

/// A single structural defect in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    MissingMethod,
    IllegalMethod,
    MissingPath,
    MissingDate,
    IllegalDate,
    MissingBody,
    IllegalBody,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Violation::MissingMethod => "missing method",
            Violation::IllegalMethod => "illegal method",
            Violation::MissingPath => "missing path",
            Violation::MissingDate => "missing date",
            Violation::IllegalDate => "illegal date",
            Violation::MissingBody => "missing body",
            Violation::IllegalBody => "illegal body",
        };
        f.write_str(reason)
    }
}

/// Render a violation list the way the status line carries it.
pub fn join_reasons(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_blank(field: &Option<String>) -> bool {
    match field {
        None => true,
        Some(text) => text.trim().is_empty(),
    }
}

/// Validate a decoded request.
///
/// Runs every applicable check and returns the violations in evaluation
/// order: method, path, date, then body. Body rules only apply once the
/// method is known to require one.
pub fn validate(request: &Request) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();

    let method = match request.method.as_deref() {
        None | Some("") => {
            violations.push(Violation::MissingMethod);
            None
        }
        Some(raw) => {
            let parsed = Method::parse(raw);
            if parsed.is_none() {
                violations.push(Violation::IllegalMethod);
            }
            parsed
        }
    };

    if is_blank(&request.path) {
        violations.push(Violation::MissingPath);
    }

    if is_blank(&request.date) {
        violations.push(Violation::MissingDate);
    } else if let Some(date) = request.date.as_deref() {
        if date.trim().parse::<i64>().is_err() {
            violations.push(Violation::IllegalDate);
        }
    }

    if let Some(method) = method {
        if method.requires_body() {
            if is_blank(&request.body) {
                violations.push(Violation::MissingBody);
            } else if method.requires_json_body() && !is_valid_json(request.body.as_deref().unwrap_or_default()) {
                violations.push(Violation::IllegalBody);
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn is_valid_json(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        method: Option<&str>,
        path: Option<&str>,
        date: Option<&str>,
        body: Option<&str>,
    ) -> Request {
        Request {
            method: method.map(String::from),
            path: path.map(String::from),
            date: date.map(String::from),
            body: body.map(String::from),
        }
    }

    #[test]
    fn valid_read_passes() {
        let req = request(Some("read"), Some("/api/categories"), Some("1691404800"), None);
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn empty_request_reports_every_missing_field() {
        let violations = validate(&Request::default()).unwrap_err();
        assert_eq!(
            violations,
            vec![
                Violation::MissingMethod,
                Violation::MissingPath,
                Violation::MissingDate,
            ]
        );
        assert_eq!(
            join_reasons(&violations),
            "missing method, missing path, missing date"
        );
    }

    #[test]
    fn unknown_method_is_illegal_not_missing() {
        let req = request(Some("patch"), Some("/api/categories"), Some("0"), None);
        assert_eq!(validate(&req).unwrap_err(), vec![Violation::IllegalMethod]);
    }

    #[test]
    fn method_casing_is_accepted() {
        let req = request(Some("READ"), Some("/api/categories"), Some("0"), None);
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn non_numeric_date_is_illegal() {
        let req = request(Some("read"), Some("/api/categories"), Some("tomorrow"), None);
        assert_eq!(validate(&req).unwrap_err(), vec![Violation::IllegalDate]);
    }

    #[test]
    fn blank_path_counts_as_missing() {
        let req = request(Some("read"), Some("   "), Some("0"), None);
        assert_eq!(validate(&req).unwrap_err(), vec![Violation::MissingPath]);
    }

    #[test]
    fn create_without_body_is_missing_body() {
        let req = request(Some("create"), Some("/api/categories"), Some("0"), None);
        assert_eq!(validate(&req).unwrap_err(), vec![Violation::MissingBody]);
    }

    #[test]
    fn create_with_non_json_body_is_illegal_body() {
        let req = request(
            Some("create"),
            Some("/api/categories"),
            Some("0"),
            Some("not json at all"),
        );
        assert_eq!(validate(&req).unwrap_err(), vec![Violation::IllegalBody]);
    }

    #[test]
    fn echo_accepts_any_non_empty_body() {
        let req = request(Some("echo"), Some("/test"), Some("0"), Some("plain text"));
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn echo_without_body_is_missing_body() {
        let req = request(Some("echo"), Some("/test"), Some("0"), None);
        assert_eq!(validate(&req).unwrap_err(), vec![Violation::MissingBody]);
    }

    #[test]
    fn body_rules_do_not_apply_to_unrecognized_methods() {
        // An illegal method cannot establish a body requirement.
        let req = request(Some("insert"), Some("/api/categories"), Some("0"), None);
        assert_eq!(validate(&req).unwrap_err(), vec![Violation::IllegalMethod]);
    }

    #[test]
    fn reasons_accumulate_in_evaluation_order() {
        let req = request(Some("create"), None, Some("soon"), None);
        assert_eq!(
            validate(&req).unwrap_err(),
            vec![
                Violation::MissingPath,
                Violation::IllegalDate,
                Violation::MissingBody,
            ]
        );
    }
}
