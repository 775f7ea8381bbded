//! Data Transfer Objects - request bodies accepted by the API.
//!
//! Unknown fields are ignored, so only whitelisted fields ever reach a store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The `author` of a post as a client may send it.
///
/// An object carrying `firstName` or `lastName` is an embedded name, even when
/// it also has an `id`. Only an object with neither name key is a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, try_from = "RawAuthorInput")]
pub enum AuthorInput {
    /// Display string such as `"John Coltrane"`.
    Name(String),
    /// Reference to an existing author record: `{"id": "..."}`.
    Reference { id: Uuid },
    /// `{"firstName": "John", "lastName": "Coltrane"}`. Either half may be absent.
    #[serde(rename_all = "camelCase")]
    Structured { first_name: String, last_name: String },
}

/// Wire shape before the name-or-reference decision.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAuthorInput {
    Name(String),
    #[serde(rename_all = "camelCase")]
    Object {
        first_name: Option<String>,
        last_name: Option<String>,
        id: Option<String>,
    },
}

impl TryFrom<RawAuthorInput> for AuthorInput {
    type Error = String;

    fn try_from(raw: RawAuthorInput) -> Result<Self, Self::Error> {
        match raw {
            RawAuthorInput::Name(name) => Ok(AuthorInput::Name(name)),
            RawAuthorInput::Object {
                first_name: None,
                last_name: None,
                id: Some(id),
            } => Uuid::parse_str(&id)
                .map(|id| AuthorInput::Reference { id })
                .map_err(|e| format!("invalid author id `{id}`: {e}")),
            RawAuthorInput::Object {
                first_name: None,
                last_name: None,
                id: None,
            } => Err("author needs `firstName`, `lastName` or `id`".to_string()),
            RawAuthorInput::Object {
                first_name,
                last_name,
                ..
            } => Ok(AuthorInput::Structured {
                first_name: first_name.unwrap_or_default(),
                last_name: last_name.unwrap_or_default(),
            }),
        }
    }
}

/// Request to create a blog post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlogPostRequest {
    pub title: String,
    pub content: String,
    pub author: AuthorInput,
}

/// Request to update a blog post. The body `id` is checked by the validator
/// and never written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBlogPostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorInput>,
}

/// Request to create an author.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
}

/// Request to comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn author_input_accepts_all_forms() {
        let name: AuthorInput = serde_json::from_value(json!("John Coltrane")).unwrap();
        assert_eq!(name, AuthorInput::Name("John Coltrane".into()));

        let structured: AuthorInput =
            serde_json::from_value(json!({"firstName": "John", "lastName": "Coltrane"})).unwrap();
        assert_eq!(
            structured,
            AuthorInput::Structured {
                first_name: "John".into(),
                last_name: "Coltrane".into()
            }
        );

        let id = Uuid::new_v4();
        let reference: AuthorInput = serde_json::from_value(json!({ "id": id })).unwrap();
        assert_eq!(reference, AuthorInput::Reference { id });
    }

    #[test]
    fn either_name_half_is_enough() {
        let last_only: AuthorInput =
            serde_json::from_value(json!({"lastName": "Coltrane"})).unwrap();
        assert_eq!(
            last_only,
            AuthorInput::Structured {
                first_name: String::new(),
                last_name: "Coltrane".into()
            }
        );

        let first_only: AuthorInput = serde_json::from_value(json!({"firstName": "John"})).unwrap();
        assert_eq!(
            first_only,
            AuthorInput::Structured {
                first_name: "John".into(),
                last_name: String::new()
            }
        );
    }

    #[test]
    fn name_keys_win_over_id() {
        let input: AuthorInput = serde_json::from_value(json!({
            "firstName": "John",
            "lastName": "Coltrane",
            "id": Uuid::new_v4()
        }))
        .unwrap();
        assert_eq!(
            input,
            AuthorInput::Structured {
                first_name: "John".into(),
                last_name: "Coltrane".into()
            }
        );

        // A stray non-UUID id is ignored next to a name
        let input: AuthorInput =
            serde_json::from_value(json!({"firstName": "John", "id": "legacy-7"})).unwrap();
        assert!(matches!(input, AuthorInput::Structured { .. }));
    }

    #[test]
    fn empty_or_bad_author_objects_are_rejected() {
        assert!(serde_json::from_value::<AuthorInput>(json!({})).is_err());
        assert!(serde_json::from_value::<AuthorInput>(json!({"id": "nope"})).is_err());
        assert!(serde_json::from_value::<AuthorInput>(json!(42)).is_err());
    }

    #[test]
    fn create_request_ignores_forged_fields() {
        let req: CreateBlogPostRequest = serde_json::from_value(json!({
            "title": "T",
            "content": "C",
            "author": "A",
            "id": "forged",
            "created": "1970-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(req.title, "T");
        assert_eq!(req.author, AuthorInput::Name("A".into()));
    }

    #[test]
    fn update_request_fields_are_optional() {
        let req: UpdateBlogPostRequest =
            serde_json::from_value(json!({"id": "x", "title": "New"})).unwrap();
        assert_eq!(req.title.as_deref(), Some("New"));
        assert!(req.content.is_none());
        assert!(req.author.is_none());
    }
}
