use crate::entities::sea_orm_active_enums::PostStatus;
use crate::entities::{blog_category, comment, post};
use crate::repositories::{Page, PostWrite};
use crate::services::blog::PostDetail;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[serde(default)]
pub struct BlogListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(default)]
pub struct PageQuery {
    pub page: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryCount {
    pub category: blog_category::Model,
    pub post_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BlogIndexResponse {
    pub success: bool,
    pub posts: Page<post::Model>,
    pub featured: Vec<post::Model>,
    pub categories: Vec<CategoryCount>,
    pub popular: Vec<post::Model>,
    pub filters: BlogListQuery,
}

/// Comment without the author's e-mail address.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentView {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

impl From<comment::Model> for CommentView {
    fn from(comment: comment::Model) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            author_name: comment.author_name,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostDetailResponse {
    pub success: bool,
    pub post: post::Model,
    pub comments_count: usize,
    pub comments: Vec<CommentView>,
    pub related: Vec<post::Model>,
}

impl From<PostDetail> for PostDetailResponse {
    fn from(detail: PostDetail) -> Self {
        Self {
            success: true,
            post: detail.post,
            comments_count: detail.comments.len(),
            comments: detail.comments.into_iter().map(Into::into).collect(),
            related: detail.related,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryPostsResponse {
    pub success: bool,
    pub category: blog_category::Model,
    pub posts: Page<post::Model>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CommentRequest {
    pub author_name: String,
    pub author_email: String,
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub success: bool,
    pub message: String,
    pub comment: CommentView,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PostWriteRequest {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub cloud_url: Option<String>,
    #[serde(default)]
    pub status: Option<PostStatus>,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub allow_comments: bool,
}

impl From<PostWriteRequest> for PostWrite {
    fn from(req: PostWriteRequest) -> Self {
        PostWrite {
            title: req.title,
            slug: req.slug,
            category_id: req.category_id,
            excerpt: req.excerpt,
            content: req.content,
            cloud_url: req.cloud_url,
            status: req.status.unwrap_or(PostStatus::Draft),
            meta_description: req.meta_description,
            keywords: req.keywords,
            is_featured: req.is_featured,
            allow_comments: req.allow_comments,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostResponse {
    pub success: bool,
    pub message: String,
    pub post: post::Model,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostListResponse {
    pub success: bool,
    pub posts: Vec<post::Model>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PostBulkRequest {
    pub ids: Vec<Uuid>,
    #[schema(example = "publish")]
    pub action: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CommentListQuery {
    pub approved: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentListResponse {
    pub success: bool,
    pub comments: Vec<comment::Model>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BlogCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BlogCategoryResponse {
    pub success: bool,
    pub category: blog_category::Model,
}
