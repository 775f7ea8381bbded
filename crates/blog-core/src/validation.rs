//! Request validation - gates every mutating request before it reaches a store.
//!
//! Checks run against the raw JSON body before any field is read: presence
//! first, in declared field order, then the shape check performed by
//! [`decode`].

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

/// Fields required to create a blog post, in check order.
pub const CREATE_POST_FIELDS: &[&str] = &["title", "content", "author"];

/// Fields required to update a blog post, in check order.
pub const UPDATE_POST_FIELDS: &[&str] = &["title", "content", "author", "id"];

/// Fields required to create an author, in check order.
pub const CREATE_AUTHOR_FIELDS: &[&str] = &["firstName", "lastName", "userName"];

/// Fields required to add a comment.
pub const CREATE_COMMENT_FIELDS: &[&str] = &["content"];

/// Client-side request faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Missing `{0}` in request body")]
    MissingField(&'static str),

    #[error("Request path id ({path_id}) and request body id ({body_id}) must match")]
    IdMismatch { path_id: String, body_id: String },

    #[error("Malformed request body: {0}")]
    Malformed(String),
}

/// Check that `body` is an object holding every name in `fields`.
///
/// Fails on the first missing field. A field set to `null` counts as present.
pub fn require_fields<'a>(
    body: &'a Value,
    fields: &[&'static str],
) -> Result<&'a Map<String, Value>, ValidationError> {
    let object = body.as_object().ok_or(ValidationError::NotAnObject)?;

    match fields.iter().find(|field| !object.contains_key(**field)) {
        Some(missing) => Err(ValidationError::MissingField(missing)),
        None => Ok(object),
    }
}

pub fn validate_create(body: &Value) -> Result<(), ValidationError> {
    require_fields(body, CREATE_POST_FIELDS).map(|_| ())
}

/// Presence check plus an exact match between the path id and `body.id`.
///
/// No normalisation: ids are compared as given, and a non-string body id
/// never equals a path id.
pub fn validate_update(path_id: &str, body: &Value) -> Result<(), ValidationError> {
    let object = require_fields(body, UPDATE_POST_FIELDS)?;

    match object.get("id") {
        Some(Value::String(body_id)) if body_id == path_id => Ok(()),
        other => Err(ValidationError::IdMismatch {
            path_id: path_id.to_string(),
            body_id: other.map(render).unwrap_or_default(),
        }),
    }
}

pub fn validate_author(body: &Value) -> Result<(), ValidationError> {
    require_fields(body, CREATE_AUTHOR_FIELDS).map(|_| ())
}

pub fn validate_comment(body: &Value) -> Result<(), ValidationError> {
    require_fields(body, CREATE_COMMENT_FIELDS).map(|_| ())
}

/// Decode a validated body into its typed request shape.
pub fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ValidationError> {
    serde_json::from_value(body).map_err(|e| ValidationError::Malformed(e.to_string()))
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_accepts_complete_body() {
        let body = json!({"title": "T", "content": "C", "author": "A", "extra": 1});
        assert_eq!(validate_create(&body), Ok(()));
    }

    #[test]
    fn create_reports_first_missing_field_in_order() {
        let body = json!({"title": "T", "author": "A"});
        assert_eq!(
            validate_create(&body),
            Err(ValidationError::MissingField("content"))
        );

        let body = json!({});
        assert_eq!(
            validate_create(&body),
            Err(ValidationError::MissingField("title"))
        );
    }

    #[test]
    fn null_counts_as_present() {
        let body = json!({"title": null, "content": null, "author": null});
        assert_eq!(validate_create(&body), Ok(()));
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert_eq!(
            validate_create(&json!(["title"])),
            Err(ValidationError::NotAnObject)
        );
    }

    #[test]
    fn update_requires_id_field() {
        let body = json!({"title": "T", "content": "C", "author": "A"});
        assert_eq!(
            validate_update("abc", &body),
            Err(ValidationError::MissingField("id"))
        );
    }

    #[test]
    fn update_requires_matching_ids() {
        let body = json!({"id": "B", "title": "T", "content": "C", "author": "A"});
        let err = validate_update("A", &body).unwrap_err();
        assert_eq!(
            err,
            ValidationError::IdMismatch {
                path_id: "A".into(),
                body_id: "B".into()
            }
        );
        assert_eq!(
            err.to_string(),
            "Request path id (A) and request body id (B) must match"
        );
    }

    #[test]
    fn update_does_not_coerce_or_trim_ids() {
        let numeric = json!({"id": 5, "title": "T", "content": "C", "author": "A"});
        assert!(matches!(
            validate_update("5", &numeric),
            Err(ValidationError::IdMismatch { .. })
        ));

        let padded = json!({"id": " 5", "title": "T", "content": "C", "author": "A"});
        assert!(validate_update("5", &padded).is_err());

        let exact = json!({"id": "5", "title": "T", "content": "C", "author": "A"});
        assert_eq!(validate_update("5", &exact), Ok(()));
    }

    #[test]
    fn missing_field_message_names_the_field() {
        assert_eq!(
            ValidationError::MissingField("content").to_string(),
            "Missing `content` in request body"
        );
    }

    #[test]
    fn decode_reports_shape_errors() {
        #[derive(Debug, serde::Deserialize)]
        struct Body {
            #[allow(dead_code)]
            title: String,
        }

        let err = decode::<Body>(json!({"title": 7})).unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));
    }

    #[test]
    fn author_and_comment_fields() {
        assert_eq!(
            validate_author(&json!({"firstName": "A", "lastName": "B"})),
            Err(ValidationError::MissingField("userName"))
        );
        assert_eq!(validate_comment(&json!({"content": "hi"})), Ok(()));
    }
}
