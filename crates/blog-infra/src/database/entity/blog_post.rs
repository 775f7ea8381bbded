//! Blog post entity for SeaORM.
//!
//! The author is stored either as embedded name columns or as `author_id`,
//! never both.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blog_core::domain::{AuthorName, BlogPost, Comment, PostAuthor};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
    pub author_id: Option<Uuid>,
    pub created: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Author,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Author column values: `(first_name, last_name, author_id)`.
pub type AuthorColumns = (Option<String>, Option<String>, Option<Uuid>);

pub fn author_columns(author: &PostAuthor) -> AuthorColumns {
    match author {
        PostAuthor::Name(name) => (
            Some(name.first_name.clone()),
            Some(name.last_name.clone()),
            None,
        ),
        PostAuthor::Ref(id) => (None, None, Some(*id)),
        PostAuthor::Populated(author) => (None, None, Some(author.id)),
    }
}

impl Model {
    /// Convert to a domain post with its author left unresolved.
    pub fn into_domain(self, comments: Vec<Comment>) -> BlogPost {
        let author = match self.author_id {
            Some(id) => PostAuthor::Ref(id),
            None => PostAuthor::Name(AuthorName::new(
                self.author_first_name.unwrap_or_default(),
                self.author_last_name.unwrap_or_default(),
            )),
        };

        BlogPost {
            id: self.id,
            title: self.title,
            content: self.content,
            author,
            created: self.created.into(),
            comments,
        }
    }
}

/// Conversion from Domain BlogPost to SeaORM ActiveModel. Comments live in
/// their own table.
impl From<&BlogPost> for ActiveModel {
    fn from(post: &BlogPost) -> Self {
        let (first_name, last_name, author_id) = author_columns(&post.author);
        Self {
            id: Set(post.id),
            title: Set(post.title.clone()),
            content: Set(post.content.clone()),
            author_first_name: Set(first_name),
            author_last_name: Set(last_name),
            author_id: Set(author_id),
            created: Set(post.created.into()),
        }
    }
}
