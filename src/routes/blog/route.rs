use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use super::dto::{
    BlogCategoryRequest, BlogCategoryResponse, BlogIndexResponse, BlogListQuery, CategoryCount,
    CategoryPostsResponse, CommentListQuery, CommentListResponse, CommentRequest, CommentResponse,
    PageQuery, PostBulkRequest, PostDetailResponse, PostListResponse, PostResponse,
    PostWriteRequest,
};
use crate::error::{AppError, AppResult};
use crate::extractor::AuthClaims;
use crate::repositories::PostSort;
use crate::routes::{BulkFlagRequest, BulkResponse};
use crate::services::blog::{BlogService, CommentInput, PostBulkAction};
use crate::static_service::get_database_connection;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/blog", get(blog_index))
        .route("/api/v1/blog/category/{slug}", get(category_posts))
        .route("/api/v1/blog/{slug}", get(post_detail))
        .route("/api/v1/blog/{slug}/comments", post(add_comment))
        .route("/api/v1/admin/blog/posts", get(admin_posts).post(create_post))
        .route("/api/v1/admin/blog/posts/bulk", post(bulk_posts))
        .route("/api/v1/admin/blog/posts/{id}", put(update_post))
        .route("/api/v1/admin/blog/comments", get(admin_comments))
        .route("/api/v1/admin/blog/comments/approve", post(approve_comments))
        .route("/api/v1/admin/blog/categories", post(create_category))
}

/// Published posts with featured, popular and category side lists
#[utoipa::path(
    get,
    path = "/api/v1/blog",
    params(BlogListQuery),
    responses((status = 200, description = "Blog index", body = BlogIndexResponse)),
    tag = "Blog"
)]
pub async fn blog_index(
    Query(query): Query<BlogListQuery>,
) -> AppResult<(StatusCode, Json<BlogIndexResponse>)> {
    let db = get_database_connection().await;
    let sort = PostSort::parse(query.sort.as_deref().unwrap_or_default());

    let index = BlogService::new(db)
        .index(
            query.search.as_deref(),
            query.category.as_deref(),
            sort,
            query.page.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(BlogIndexResponse {
            success: true,
            posts: index.posts,
            featured: index.featured,
            categories: index
                .categories
                .into_iter()
                .map(|(category, post_count)| CategoryCount { category, post_count })
                .collect(),
            popular: index.popular,
            filters: BlogListQuery {
                sort: Some(sort.as_str().to_string()),
                ..query
            },
        }),
    ))
}

/// A published post; every request counts one view
#[utoipa::path(
    get,
    path = "/api/v1/blog/{slug}",
    params(("slug" = String, Path, description = "Post slug, may be non-Latin")),
    responses(
        (status = 200, description = "Post detail", body = PostDetailResponse),
        (status = 404, description = "Post not found or not published")
    ),
    tag = "Blog"
)]
pub async fn post_detail(Path(slug): Path<String>) -> AppResult<(StatusCode, Json<PostDetailResponse>)> {
    let db = get_database_connection().await;
    let detail = BlogService::new(db).detail(&slug).await?;

    Ok((StatusCode::OK, Json(PostDetailResponse::from(detail))))
}

#[utoipa::path(
    post,
    path = "/api/v1/blog/{slug}/comments",
    params(("slug" = String, Path, description = "Post slug")),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment stored for moderation", body = CommentResponse),
        (status = 400, description = "Missing fields or comments closed"),
        (status = 404, description = "Post not found")
    ),
    tag = "Blog"
)]
pub async fn add_comment(
    Path(slug): Path<String>,
    Json(payload): Json<CommentRequest>,
) -> AppResult<(StatusCode, Json<CommentResponse>)> {
    let db = get_database_connection().await;
    let comment = BlogService::new(db)
        .add_comment(
            &slug,
            CommentInput {
                author_name: payload.author_name,
                author_email: payload.author_email,
                content: payload.content,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommentResponse {
            success: true,
            message: "Your comment has been submitted and will appear after approval".to_string(),
            comment: comment.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/blog/category/{slug}",
    params(("slug" = String, Path, description = "Category slug"), PageQuery),
    responses(
        (status = 200, description = "Published posts of the category", body = CategoryPostsResponse),
        (status = 404, description = "Category not found")
    ),
    tag = "Blog"
)]
pub async fn category_posts(
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> AppResult<(StatusCode, Json<CategoryPostsResponse>)> {
    let db = get_database_connection().await;
    let (category, posts) = BlogService::new(db)
        .category(&slug, query.page.as_deref())
        .await?;
    Ok((
        StatusCode::OK,
        Json(CategoryPostsResponse {
            success: true,
            category,
            posts,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/blog/posts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All posts, newest first", body = PostListResponse),
        (status = 403, description = "Admins only")
    ),
    tag = "Blog admin"
)]
pub async fn admin_posts(auth: AuthClaims) -> AppResult<(StatusCode, Json<PostListResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let posts = BlogService::new(db).all_posts(&actor).await?;
    Ok((StatusCode::OK, Json(PostListResponse { success: true, posts })))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/blog/posts",
    request_body = PostWriteRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Missing title"),
        (status = 403, description = "Admins only")
    ),
    tag = "Blog admin"
)]
pub async fn create_post(
    auth: AuthClaims,
    Json(payload): Json<PostWriteRequest>,
) -> AppResult<(StatusCode, Json<PostResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let post = BlogService::new(db).create_post(&actor, payload.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(PostResponse {
            success: true,
            message: "Post created".to_string(),
            post,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/blog/posts/{id}",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = PostWriteRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 403, description = "Admins only"),
        (status = 404, description = "Post not found")
    ),
    tag = "Blog admin"
)]
pub async fn update_post(
    auth: AuthClaims,
    Path(id): Path<Uuid>,
    Json(payload): Json<PostWriteRequest>,
) -> AppResult<(StatusCode, Json<PostResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let post = BlogService::new(db).update_post(&actor, id, payload.into()).await?;
    Ok((
        StatusCode::OK,
        Json(PostResponse {
            success: true,
            message: "Post updated".to_string(),
            post,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/blog/posts/bulk",
    request_body = PostBulkRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Posts updated", body = BulkResponse),
        (status = 400, description = "Unknown action"),
        (status = 403, description = "Admins only")
    ),
    tag = "Blog admin"
)]
pub async fn bulk_posts(
    auth: AuthClaims,
    Json(payload): Json<PostBulkRequest>,
) -> AppResult<(StatusCode, Json<BulkResponse>)> {
    let actor = auth.actor()?;
    let action = PostBulkAction::parse(payload.action.trim()).ok_or_else(|| {
        AppError::bad_request("Action must be publish, draft, feature or unfeature")
    })?;
    let db = get_database_connection().await;
    let affected = BlogService::new(db)
        .bulk_posts(&actor, payload.ids, action)
        .await?;
    Ok((StatusCode::OK, Json(BulkResponse::new(affected))))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/blog/comments",
    params(CommentListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Comments, newest first", body = CommentListResponse),
        (status = 403, description = "Admins only")
    ),
    tag = "Blog admin"
)]
pub async fn admin_comments(
    auth: AuthClaims,
    Query(query): Query<CommentListQuery>,
) -> AppResult<(StatusCode, Json<CommentListResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let comments = BlogService::new(db)
        .all_comments(&actor, query.approved)
        .await?;
    Ok((StatusCode::OK, Json(CommentListResponse { success: true, comments })))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/blog/comments/approve",
    request_body = BulkFlagRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Comments updated", body = BulkResponse),
        (status = 403, description = "Admins only")
    ),
    tag = "Blog admin"
)]
pub async fn approve_comments(
    auth: AuthClaims,
    Json(payload): Json<BulkFlagRequest>,
) -> AppResult<(StatusCode, Json<BulkResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let affected = BlogService::new(db)
        .set_comments_approved(&actor, payload.ids, payload.value)
        .await?;
    Ok((StatusCode::OK, Json(BulkResponse::new(affected))))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/blog/categories",
    request_body = BlogCategoryRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Category created", body = BlogCategoryResponse),
        (status = 400, description = "Missing name"),
        (status = 403, description = "Admins only")
    ),
    tag = "Blog admin"
)]
pub async fn create_category(
    auth: AuthClaims,
    Json(payload): Json<BlogCategoryRequest>,
) -> AppResult<(StatusCode, Json<BlogCategoryResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let category = BlogService::new(db)
        .create_category(&actor, payload.name, payload.slug, payload.description, payload.icon)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(BlogCategoryResponse {
            success: true,
            category,
        }),
    ))
}
