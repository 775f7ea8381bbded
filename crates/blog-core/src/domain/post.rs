use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::author::{Author, AuthorName};
use crate::error::DomainError;

/// Who wrote a post, as stored or as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostAuthor {
    /// Name embedded in the post itself.
    Name(AuthorName),
    /// Reference to an [`Author`] record that has not been resolved.
    Ref(Uuid),
    /// Reference resolved by the store on a read.
    Populated(Author),
}

impl PostAuthor {
    /// The referenced author id, if this is not an embedded name.
    pub fn author_id(&self) -> Option<Uuid> {
        match self {
            PostAuthor::Name(_) => None,
            PostAuthor::Ref(id) => Some(*id),
            PostAuthor::Populated(author) => Some(author.id),
        }
    }
}

/// A single comment on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub content: String,
}

/// BlogPost entity - a post as held by the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: PostAuthor,
    pub created: DateTime<Utc>,
    pub comments: Vec<Comment>,
}

impl BlogPost {
    /// Build a freshly created post. Only record stores call this: they own
    /// `id` and `created`.
    pub fn create(id: Uuid, created: DateTime<Utc>, fields: NewBlogPost) -> Self {
        Self {
            id,
            title: fields.title,
            content: fields.content,
            author: fields.author,
            created,
            comments: Vec::new(),
        }
    }

    /// Apply a whitelist merge. `id`, `created` and `comments` are untouched.
    pub fn apply(&mut self, patch: BlogPostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
    }

    /// Project the post into its public wire shape.
    ///
    /// The author must already be an embedded name or a populated reference.
    pub fn serialize(&self) -> Result<BlogPostView, DomainError> {
        let author = match &self.author {
            PostAuthor::Name(name) => name.display_name(),
            PostAuthor::Populated(author) => author.name().display_name(),
            PostAuthor::Ref(author_id) => {
                return Err(DomainError::UnresolvedAuthor {
                    post_id: self.id,
                    author_id: *author_id,
                });
            }
        };

        Ok(BlogPostView {
            id: self.id,
            title: self.title.clone(),
            content: self.content.clone(),
            author,
            created: self.created,
            comments: self.comments.clone(),
        })
    }
}

/// The whitelisted fields a post is created from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlogPost {
    pub title: String,
    pub content: String,
    pub author: PostAuthor,
}

/// The whitelisted fields an update may overwrite. `None` leaves a field as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogPostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<PostAuthor>,
}

impl BlogPostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author.is_none()
    }
}

/// Wire shape of a blog post.
#[derive(Debug, Clone, Serialize)]
pub struct BlogPostView {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(author: PostAuthor) -> BlogPost {
        BlogPost::create(
            Uuid::new_v4(),
            Utc::now(),
            NewBlogPost {
                title: "T".into(),
                content: "C".into(),
                author,
            },
        )
    }

    #[test]
    fn serialize_embedded_author_to_display_string() {
        let post = sample(PostAuthor::Name(AuthorName::new("John", "Coltrane")));
        let view = post.serialize().unwrap();
        assert_eq!(view.author, "John Coltrane");
        assert_eq!(view.id, post.id);
        assert_eq!(view.created, post.created);
    }

    #[test]
    fn serialize_populated_reference() {
        let author = Author {
            id: Uuid::new_v4(),
            first_name: "Steve".into(),
            last_name: "Austin".into(),
            user_name: "saustin".into(),
        };
        let post = sample(PostAuthor::Populated(author));
        assert_eq!(post.serialize().unwrap().author, "Steve Austin");
    }

    #[test]
    fn serialize_rejects_unresolved_reference() {
        let author_id = Uuid::new_v4();
        let post = sample(PostAuthor::Ref(author_id));
        let err = post.serialize().unwrap_err();
        assert!(matches!(
            err,
            DomainError::UnresolvedAuthor { author_id: a, .. } if a == author_id
        ));
    }

    #[test]
    fn public_shape_has_no_storage_fields() {
        let mut post = sample(PostAuthor::Name(AuthorName::new("A", "")));
        let json = serde_json::to_value(post.serialize().unwrap()).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["author", "content", "created", "id", "title"]);

        post.comments.push(Comment {
            content: "first".into(),
        });
        let json = serde_json::to_value(post.serialize().unwrap()).unwrap();
        assert_eq!(json["comments"][0]["content"], "first");
    }

    #[test]
    fn apply_patch_keeps_identity_and_created() {
        let mut post = sample(PostAuthor::Name(AuthorName::new("A", "B")));
        let (id, created) = (post.id, post.created);

        post.apply(BlogPostPatch {
            title: Some("New".into()),
            ..Default::default()
        });

        assert_eq!(post.title, "New");
        assert_eq!(post.content, "C");
        assert_eq!(post.id, id);
        assert_eq!(post.created, created);
    }
}
