use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::routes;

#[derive(OpenApi)]
#[openapi(
    info(title = "Academy Service API", description = "Tutoring academy: accounts, supervision, blog, Q&A and finance"),
    paths(
        routes::health::route::health,
        routes::auth::route::register,
        routes::auth::route::login,
        routes::auth::route::logout,
        routes::profile::route::get_profile,
        routes::messages::route::student_dashboard,
        routes::messages::route::send_message,
        routes::messages::route::unread_count,
        routes::messages::route::mark_read,
        routes::supervisor::route::dashboard,
        routes::supervisor::route::dashboard_action,
        routes::supervisor::route::mark_student_messages_read,
        routes::bookings::route::book_trial,
        routes::bookings::route::list_bookings,
        routes::bookings::route::set_contacted,
        routes::blog::route::blog_index,
        routes::blog::route::post_detail,
        routes::blog::route::add_comment,
        routes::blog::route::category_posts,
        routes::blog::route::admin_posts,
        routes::blog::route::create_post,
        routes::blog::route::update_post,
        routes::blog::route::bulk_posts,
        routes::blog::route::admin_comments,
        routes::blog::route::approve_comments,
        routes::blog::route::create_category,
        routes::qna::route::qna_index,
        routes::qna::route::ask_question,
        routes::qna::route::question_detail,
        routes::qna::route::add_community_answer,
        routes::qna::route::vote_official,
        routes::qna::route::vote_community,
        routes::qna::route::verify_community,
        routes::qna::route::delete_community,
        routes::qna::route::report_question,
        routes::qna::route::subscribe,
        routes::qna::route::list_categories,
        routes::qna::route::admin_questions,
        routes::qna::route::set_question_status,
        routes::qna::route::add_official_answer,
        routes::qna::route::admin_community_answers,
        routes::qna::route::bulk_verify,
        routes::qna::route::bulk_spam,
        routes::qna::route::admin_reports,
        routes::qna::route::resolve_reports,
        routes::qna::route::create_category,
        routes::finance::route::dashboard,
        routes::finance::route::list_teachers,
        routes::finance::route::create_teacher,
        routes::finance::route::delete_teacher,
        routes::finance::route::list_students,
        routes::finance::route::create_student,
        routes::finance::route::delete_student,
        routes::finance::route::list_expenses,
        routes::finance::route::create_expense,
        routes::finance::route::delete_expense,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health"),
        (name = "Authentication", description = "Registration, login and logout"),
        (name = "Profile"),
        (name = "Messages", description = "Student and supervisor messaging"),
        (name = "Supervisor", description = "Supervisor dashboard and attendance"),
        (name = "Bookings", description = "Free trial lesson requests"),
        (name = "Blog"),
        (name = "Blog admin"),
        (name = "Q&A", description = "Public questions and answers"),
        (name = "Q&A admin"),
        (name = "Finance", description = "Financial dashboard and records")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
