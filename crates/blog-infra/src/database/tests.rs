#[cfg(test)]
mod tests {
    use crate::database::entity::{author, blog_post, comment};
    use crate::database::postgres_repo::PostgresBlogPostRepository;
    use blog_core::domain::{AuthorName, BlogPostPatch, Comment, PostAuthor};
    use blog_core::error::RepoError;
    use blog_core::ports::{BlogPostRepository, ReadMode};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn post_model(id: uuid::Uuid, author_id: Option<uuid::Uuid>) -> blog_post::Model {
        let embedded = author_id.is_none();
        blog_post::Model {
            id,
            title: "Test Post".to_owned(),
            content: "Content".to_owned(),
            author_first_name: embedded.then(|| "John".to_owned()),
            author_last_name: embedded.then(|| "Coltrane".to_owned()),
            author_id,
            created: chrono::Utc::now().into(),
        }
    }

    fn comment_model(post_id: uuid::Uuid, content: &str) -> comment::Model {
        comment::Model {
            id: uuid::Uuid::new_v4(),
            post_id,
            content: content.to_owned(),
            created_at: chrono::Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id_with_embedded_author() {
        let post_id = uuid::Uuid::new_v4();

        // Post row, then its comments
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_model(post_id, None)]])
            .append_query_results([vec![
                comment_model(post_id, "first"),
                comment_model(post_id, "second"),
            ]])
            .into_connection();

        let repo = PostgresBlogPostRepository::new(db);
        let post = repo
            .find_by_id(post_id, ReadMode::Resolved)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(post.id, post_id);
        assert_eq!(
            post.author,
            PostAuthor::Name(AuthorName::new("John", "Coltrane"))
        );
        let contents: Vec<_> = post.comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, ["first", "second"]);
    }

    #[tokio::test]
    async fn test_find_post_by_id_resolves_reference() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_model(post_id, Some(author_id))]])
            .append_query_results([Vec::<comment::Model>::new()])
            .append_query_results([vec![author::Model {
                id: author_id,
                first_name: "Steve".to_owned(),
                last_name: "Austin".to_owned(),
                user_name: "saustin".to_owned(),
            }]])
            .into_connection();

        let repo = PostgresBlogPostRepository::new(db);
        let post = repo
            .find_by_id(post_id, ReadMode::Resolved)
            .await
            .unwrap()
            .unwrap();

        match &post.author {
            PostAuthor::Populated(author) => assert_eq!(author.user_name, "saustin"),
            other => panic!("expected populated author, got {other:?}"),
        }
        assert_eq!(post.serialize().unwrap().author, "Steve Austin");
    }

    #[tokio::test]
    async fn test_unresolved_read_skips_author_query() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();

        // No author rows queued: a third query would fail the test
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_model(post_id, Some(author_id))]])
            .append_query_results([Vec::<comment::Model>::new()])
            .into_connection();

        let repo = PostgresBlogPostRepository::new(db);
        let post = repo
            .find_by_id(post_id, ReadMode::Unresolved)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(post.author, PostAuthor::Ref(author_id));
    }

    #[tokio::test]
    async fn test_find_missing_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<blog_post::Model>::new()])
            .into_connection();

        let repo = PostgresBlogPostRepository::new(db);
        let result = repo
            .find_by_id(uuid::Uuid::new_v4(), ReadMode::Resolved)
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_reports_matched_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        let repo = PostgresBlogPostRepository::new(db);
        let patch = BlogPostPatch {
            title: Some("Renamed".to_owned()),
            ..Default::default()
        };

        assert!(
            repo.update_by_id(uuid::Uuid::new_v4(), patch.clone())
                .await
                .unwrap()
        );
        assert!(!repo.update_by_id(uuid::Uuid::new_v4(), patch).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_an_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresBlogPostRepository::new(db);
        let deleted = repo.delete_by_id(uuid::Uuid::new_v4()).await.unwrap();

        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_add_comment_is_a_single_insert() {
        // Only an exec result is queued: a prior lookup query would fail
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = PostgresBlogPostRepository::new(db);
        let added = repo
            .add_comment(
                uuid::Uuid::new_v4(),
                Comment {
                    content: "first".to_owned(),
                },
            )
            .await
            .unwrap();

        assert!(added);
    }

    #[tokio::test]
    async fn test_add_comment_surfaces_other_insert_failures() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors([DbErr::Custom("disk full".to_owned())])
            .into_connection();

        let repo = PostgresBlogPostRepository::new(db);
        let err = repo
            .add_comment(
                uuid::Uuid::new_v4(),
                Comment {
                    content: "lost".to_owned(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::Query(_)));
    }
}
