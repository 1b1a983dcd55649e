//! Blog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::backend::BlogPost;
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Blog post display data.
#[derive(Clone)]
pub struct PostView {
    pub title: String,
    pub excerpt: String,
    pub image: Option<String>,
    pub date: String,
}

impl From<&BlogPost> for PostView {
    fn from(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            image: post.image.clone(),
            date: post.date.map(|d| d.to_string()).unwrap_or_default(),
        }
    }
}

/// Blog listing template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/index.html")]
pub struct BlogTemplate {
    pub posts: Vec<PostView>,
}

/// Display the blog post list.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<BlogTemplate> {
    let posts = state.backend().list_posts().await?;

    Ok(BlogTemplate {
        posts: posts.iter().map(PostView::from).collect(),
    })
}
