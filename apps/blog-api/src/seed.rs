//! Startup seeding for the in-memory store.

use blog_core::domain::{AuthorName, NewBlogPost, PostAuthor};
use blog_core::error::RepoError;
use blog_core::ports::BlogPostRepository;

/// The sample posts a fresh in-memory store starts with.
pub fn sample_posts() -> Vec<NewBlogPost> {
    vec![
        NewBlogPost {
            title: "Dolor duis pariatur".to_string(),
            content: "Anim Lorem eu sunt exercitation anim nostrud exercitation elit qui. \
                      Excepteur nulla incididunt labore magna commodo officia pariatur laboris \
                      labore. Deserunt laboris pariatur laborum nisi nisi sunt dolore \
                      consectetur ipsum Lorem."
                .to_string(),
            author: PostAuthor::Name(AuthorName::new("Steve", "Austin")),
        },
        NewBlogPost {
            title: "Exercitation reprehenderit ullamco.".to_string(),
            content: "Sunt enim laborum elit sint culpa duis ex ad sint minim eiusmod. Qui id \
                      aliquip ut ex veniam pariatur ad exercitation occaecat proident. Et duis \
                      veniam in dolor aliquip elit non. Ullamco consequat et non commodo nostrud \
                      pariatur enim dolor ad."
                .to_string(),
            author: PostAuthor::Name(AuthorName::new("Desmond", "Tutu")),
        },
    ]
}

/// Insert the sample posts. Run once at process start.
pub async fn seed_sample_posts(store: &dyn BlogPostRepository) -> Result<usize, RepoError> {
    let posts = sample_posts();
    let count = posts.len();

    for post in posts {
        store.create(post).await?;
    }

    Ok(count)
}
