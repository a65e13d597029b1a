use crate::entities::{blog_category, comment, post};
use crate::error::{AppError, AppResult};
use crate::middleware::permission::{Actor, require_admin};
use crate::repositories::{
    BlogCategoryRepository, CommentRepository, Page, PostRepository, PostSort, PostWrite,
};
use crate::validation::looks_like_email;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

pub const FEATURED_POSTS: u64 = 3;
pub const POPULAR_POSTS: u64 = 5;
pub const RELATED_POSTS: u64 = 3;

pub struct BlogIndex {
    pub posts: Page<post::Model>,
    pub featured: Vec<post::Model>,
    pub categories: Vec<(blog_category::Model, i64)>,
    pub popular: Vec<post::Model>,
}

pub struct PostDetail {
    pub post: post::Model,
    pub comments: Vec<comment::Model>,
    pub related: Vec<post::Model>,
}

pub struct CommentInput {
    pub author_name: String,
    pub author_email: String,
    pub content: String,
}

/// Bulk admin operations on posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostBulkAction {
    Publish,
    Draft,
    Feature,
    Unfeature,
}

impl PostBulkAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "publish" => Some(PostBulkAction::Publish),
            "draft" => Some(PostBulkAction::Draft),
            "feature" => Some(PostBulkAction::Feature),
            "unfeature" => Some(PostBulkAction::Unfeature),
            _ => None,
        }
    }
}

pub struct BlogService<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BlogService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn index(
        &self,
        search: Option<&str>,
        category_slug: Option<&str>,
        sort: PostSort,
        page: Option<&str>,
    ) -> AppResult<BlogIndex> {
        let posts = PostRepository::with_connection(self.db);
        Ok(BlogIndex {
            posts: posts.list_published(search, category_slug, sort, page).await?,
            featured: posts.featured(FEATURED_POSTS).await?,
            categories: BlogCategoryRepository::with_connection(self.db)
                .with_published_counts()
                .await?,
            popular: posts.most_viewed(POPULAR_POSTS).await?,
        })
    }

    /// Counts a view on every call before loading the page data.
    pub async fn detail(&self, slug: &str) -> AppResult<PostDetail> {
        let posts = PostRepository::with_connection(self.db);
        let found = posts
            .find_published_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))?;
        posts.increment_views(found.id).await?;
        let post = posts
            .find_by_id(found.id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))?;

        let comments = CommentRepository::with_connection(self.db)
            .approved_for_post(post.id)
            .await?;
        let related = posts.related(&post, RELATED_POSTS).await?;
        Ok(PostDetail {
            post,
            comments,
            related,
        })
    }

    /// Comments are stored unapproved and appear after moderation.
    pub async fn add_comment(&self, slug: &str, input: CommentInput) -> AppResult<comment::Model> {
        let post = PostRepository::with_connection(self.db)
            .find_published_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))?;
        if !post.allow_comments {
            return Err(AppError::bad_request("Comments are closed for this post"));
        }

        let author_name = input.author_name.trim();
        let author_email = input.author_email.trim();
        let content = input.content.trim();
        if author_name.is_empty() || author_email.is_empty() || content.is_empty() {
            return Err(AppError::bad_request("Please fill in all fields"));
        }
        if !looks_like_email(author_email) {
            return Err(AppError::bad_request("Please enter a valid e-mail address"));
        }

        Ok(CommentRepository::with_connection(self.db)
            .create(
                post.id,
                author_name.to_string(),
                author_email.to_string(),
                content.to_string(),
            )
            .await?)
    }

    pub async fn category(
        &self,
        slug: &str,
        page: Option<&str>,
    ) -> AppResult<(blog_category::Model, Page<post::Model>)> {
        let category = BlogCategoryRepository::with_connection(self.db)
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found"))?;
        let posts = PostRepository::with_connection(self.db)
            .list_published_in_category(category.id, page)
            .await?;
        Ok((category, posts))
    }

    pub async fn all_posts(&self, actor: &Actor) -> AppResult<Vec<post::Model>> {
        require_admin(actor)?;
        Ok(PostRepository::with_connection(self.db).find_all().await?)
    }

    pub async fn create_post(&self, actor: &Actor, input: PostWrite) -> AppResult<post::Model> {
        require_admin(actor)?;
        if input.title.trim().is_empty() {
            return Err(AppError::bad_request("Title is required"));
        }
        let post = PostRepository::with_connection(self.db)
            .create(actor.user_id, input)
            .await?;
        tracing::info!("Post {} created with slug {}", post.id, post.slug);
        Ok(post)
    }

    pub async fn update_post(&self, actor: &Actor, id: Uuid, input: PostWrite) -> AppResult<post::Model> {
        require_admin(actor)?;
        if input.title.trim().is_empty() {
            return Err(AppError::bad_request("Title is required"));
        }
        PostRepository::with_connection(self.db)
            .update(id, input)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))
    }

    pub async fn bulk_posts(&self, actor: &Actor, ids: Vec<Uuid>, action: PostBulkAction) -> AppResult<u64> {
        require_admin(actor)?;
        let posts = PostRepository::with_connection(self.db);
        let count = match action {
            PostBulkAction::Publish => posts.publish(ids).await?,
            PostBulkAction::Draft => posts.make_draft(ids).await?,
            PostBulkAction::Feature => posts.set_featured(ids, true).await?,
            PostBulkAction::Unfeature => posts.set_featured(ids, false).await?,
        };
        Ok(count)
    }

    pub async fn all_comments(&self, actor: &Actor, approved: Option<bool>) -> AppResult<Vec<comment::Model>> {
        require_admin(actor)?;
        Ok(CommentRepository::with_connection(self.db)
            .find_all(approved)
            .await?)
    }

    pub async fn set_comments_approved(&self, actor: &Actor, ids: Vec<Uuid>, approved: bool) -> AppResult<u64> {
        require_admin(actor)?;
        Ok(CommentRepository::with_connection(self.db)
            .set_approved(ids, approved)
            .await?)
    }

    pub async fn create_category(
        &self,
        actor: &Actor,
        name: String,
        slug: Option<String>,
        description: String,
        icon: String,
    ) -> AppResult<blog_category::Model> {
        require_admin(actor)?;
        if name.trim().is_empty() {
            return Err(AppError::bad_request("Category name is required"));
        }
        Ok(BlogCategoryRepository::with_connection(self.db)
            .create(name.trim().to_string(), slug, description, icon)
            .await?)
    }
}
