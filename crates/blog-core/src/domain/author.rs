use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A structured author name, embedded in a post or held by an [`Author`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthorName {
    pub first_name: String,
    pub last_name: String,
}

impl AuthorName {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Split a display string at its first whitespace run.
    ///
    /// Text without whitespace becomes the first name, so that
    /// `from_display(s).display_name() == s.trim()` holds for any
    /// single-spaced `s`.
    pub fn from_display(text: &str) -> Self {
        let text = text.trim();
        match text.split_once(char::is_whitespace) {
            Some((first, rest)) => Self::new(first, rest.trim_start()),
            None => Self::new(text, ""),
        }
    }

    /// The public author string: first and last name joined by one space, trimmed.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Author entity - a separately owned author record referenced by posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all authors; enforced by the record store.
    pub user_name: String,
}

impl Author {
    pub fn name(&self) -> AuthorName {
        AuthorName::new(self.first_name.clone(), self.last_name.clone())
    }

    /// Public projection of an author record.
    pub fn serialize(&self) -> AuthorView {
        AuthorView {
            id: self.id,
            name: self.name().display_name(),
            user_name: self.user_name.clone(),
        }
    }
}

/// Fields accepted when creating an author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
}

/// Wire shape of an author.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    pub id: Uuid,
    pub name: String,
    pub user_name: String,
}
