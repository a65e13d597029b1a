//! Blog publishing, comment moderation and trial bookings.

mod common;

use academy_service::entities::sea_orm_active_enums::{PostStatus, RoleEnum};
use academy_service::error::AppError;
use academy_service::repositories::{PostSort, PostWrite};
use academy_service::routes::blog::dto::PostDetailResponse;
use academy_service::services::blog::{BlogService, CommentInput, PostBulkAction};
use academy_service::services::bookings::BookingService;
use academy_service::validation::BookingInput;
use common::{actor_for, seed_user, test_db};

fn post(title: &str, status: PostStatus) -> PostWrite {
    PostWrite {
        title: title.to_string(),
        slug: None,
        category_id: None,
        excerpt: String::new(),
        content: "Reading every day builds a lasting habit".to_string(),
        cloud_url: None,
        status,
        meta_description: String::new(),
        keywords: String::new(),
        is_featured: false,
        allow_comments: true,
    }
}

#[tokio::test]
async fn duplicate_titles_get_numbered_slugs() {
    let db = test_db().await;
    let admin = actor_for(&seed_user(&db, "admin", RoleEnum::Admin).await);
    let blog = BlogService::new(&db);

    let first = blog
        .create_post(&admin, post("مرحبا", PostStatus::Published))
        .await
        .expect("first post");
    let second = blog
        .create_post(&admin, post("مرحبا", PostStatus::Published))
        .await
        .expect("second post");

    assert_eq!(first.slug, "مرحبا");
    assert_eq!(second.slug, "مرحبا-1");
    assert!(first.published_at.is_some());
    assert!(!first.excerpt.is_empty());
}

#[tokio::test]
async fn drafts_stay_private_and_views_are_counted() {
    let db = test_db().await;
    let admin = actor_for(&seed_user(&db, "admin", RoleEnum::Admin).await);
    let blog = BlogService::new(&db);
    let draft = blog
        .create_post(&admin, post("Draft notes", PostStatus::Draft))
        .await
        .expect("draft");
    let live = blog
        .create_post(&admin, post("Tajweed basics", PostStatus::Published))
        .await
        .expect("published");

    assert!(matches!(blog.detail(&draft.slug).await, Err(AppError::NotFound(_))));

    blog.detail(&live.slug).await.expect("first view");
    let detail = blog.detail(&live.slug).await.expect("second view");
    assert_eq!(detail.post.views_count, 2);

    let index = blog
        .index(None, None, PostSort::Latest, None)
        .await
        .expect("index");
    assert_eq!(index.posts.total_items, 1);

    let published = blog
        .bulk_posts(&admin, vec![draft.id], PostBulkAction::Publish)
        .await
        .expect("bulk publish");
    assert_eq!(published, 1);
    let index = blog
        .index(None, None, PostSort::Latest, None)
        .await
        .expect("index");
    assert_eq!(index.posts.total_items, 2);
}

#[tokio::test]
async fn comments_appear_after_approval() {
    let db = test_db().await;
    let admin = actor_for(&seed_user(&db, "admin", RoleEnum::Admin).await);
    let blog = BlogService::new(&db);
    let live = blog
        .create_post(&admin, post("Tajweed basics", PostStatus::Published))
        .await
        .expect("published");

    let comment = blog
        .add_comment(
            &live.slug,
            CommentInput {
                author_name: "Aisha".to_string(),
                author_email: "aisha@example.com".to_string(),
                content: "Very helpful, thank you".to_string(),
            },
        )
        .await
        .expect("comment stored");
    assert!(!comment.is_approved);
    assert!(blog.detail(&live.slug).await.expect("detail").comments.is_empty());

    blog.set_comments_approved(&admin, vec![comment.id], true)
        .await
        .expect("approved");
    let detail = blog.detail(&live.slug).await.expect("detail");
    assert_eq!(detail.comments.len(), 1);
    let body = serde_json::to_string(&PostDetailResponse::from(detail)).expect("json");
    assert!(body.contains("Aisha"));
    assert!(!body.contains("aisha@example.com"));

    let empty = blog
        .add_comment(
            &live.slug,
            CommentInput {
                author_name: "Aisha".to_string(),
                author_email: String::new(),
                content: "Missing e-mail".to_string(),
            },
        )
        .await;
    assert!(matches!(empty, Err(AppError::Validation { .. })));

    let malformed = blog
        .add_comment(
            &live.slug,
            CommentInput {
                author_name: "Aisha".to_string(),
                author_email: "aisha-at-example".to_string(),
                content: "Wrong e-mail shape".to_string(),
            },
        )
        .await;
    assert!(matches!(malformed, Err(AppError::Validation { .. })));
}

#[tokio::test]
async fn only_admins_write_posts() {
    let db = test_db().await;
    let supervisor = actor_for(&seed_user(&db, "sheikh", RoleEnum::Supervisor).await);

    let result = BlogService::new(&db)
        .create_post(&supervisor, post("Not allowed", PostStatus::Draft))
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn trial_bookings_are_listed_for_admins() {
    let db = test_db().await;
    let admin = actor_for(&seed_user(&db, "admin", RoleEnum::Admin).await);
    let bookings = BookingService::new(&db);

    let booking = bookings
        .book_trial(&BookingInput {
            name: "Yusuf".to_string(),
            country: "Jordan".to_string(),
            gender: "male".to_string(),
            phone: "+962790000000".to_string(),
            email: Some("  ".to_string()),
            notes: None,
        })
        .await
        .expect("booked");
    assert_eq!(booking.email, None);
    assert!(!booking.is_contacted);

    let invalid = bookings
        .book_trial(&BookingInput {
            gender: "other".to_string(),
            ..BookingInput::default()
        })
        .await;
    assert!(matches!(invalid, Err(AppError::Validation { .. })));

    assert_eq!(bookings.list(&admin, Some(false)).await.expect("list").len(), 1);
    bookings
        .set_contacted(&admin, vec![booking.id], true)
        .await
        .expect("marked contacted");
    assert!(bookings.list(&admin, Some(false)).await.expect("list").is_empty());
    assert_eq!(bookings.list(&admin, Some(true)).await.expect("list").len(), 1);
}
