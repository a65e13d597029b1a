use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use super::dto::{
    AskResponse, CommunityAnswerListResponse, CommunityAnswerResponse, OfficialAnswerRequest,
    OfficialAnswerResponse, QnaIndexResponse, QnaListQuery, QuestionCategoryCount,
    QuestionCategoryListResponse, QuestionCategoryRequest, QuestionCategoryResponse,
    QuestionDetailResponse, QuestionListResponse, QuestionStatusQuery, QuestionStatusRequest,
    QuestionSummary, ReportListQuery, ReportListResponse, ReportRequest, SubscribeRequest,
    SubscribeResponse, VerifyResponse, VoteResponse,
};
use crate::config::APP_CONFIG;
use crate::error::AppResult;
use crate::extractor::{AuthClaims, ClientIp, MaybeAuthClaims, UserAgent};
use crate::repositories::{QuestionFilter, QuestionListQuery, QuestionSort, VoteOutcome};
use crate::routes::{BulkFlagRequest, BulkResponse, IdsRequest, MessageResponse};
use crate::services::mail::default_mailer;
use crate::services::qna::{QnaService, QnaSettings, ReportInput, Visitor};
use crate::static_service::get_database_connection;
use crate::validation::{AnswerInput, QuestionInput};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/qna", get(qna_index))
        .route("/api/v1/qna/ask", post(ask_question))
        .route("/api/v1/qna/categories", get(list_categories))
        .route("/api/v1/qna/question/{slug}", get(question_detail))
        .route("/api/v1/qna/question/{slug}/answers", post(add_community_answer))
        .route("/api/v1/qna/vote/{answer_id}", post(vote_official))
        .route("/api/v1/qna/vote-community/{answer_id}", post(vote_community))
        .route("/api/v1/qna/verify-community/{id}", post(verify_community))
        .route("/api/v1/qna/delete-community/{id}", post(delete_community))
        .route("/api/v1/qna/report/{slug}", post(report_question))
        .route("/api/v1/qna/subscribe/{slug}", post(subscribe))
        .route("/api/v1/admin/qna/questions", get(admin_questions))
        .route("/api/v1/admin/qna/questions/status", post(set_question_status))
        .route("/api/v1/admin/qna/questions/{id}/answer", post(add_official_answer))
        .route("/api/v1/admin/qna/community-answers", get(admin_community_answers))
        .route("/api/v1/admin/qna/community-answers/verify", post(bulk_verify))
        .route("/api/v1/admin/qna/community-answers/spam", post(bulk_spam))
        .route("/api/v1/admin/qna/reports", get(admin_reports))
        .route("/api/v1/admin/qna/reports/resolve", post(resolve_reports))
        .route("/api/v1/admin/qna/categories", post(create_category))
}

fn qna_service(db: &DatabaseConnection) -> QnaService<'_, DatabaseConnection> {
    QnaService::new(
        db,
        default_mailer(),
        QnaSettings {
            admin_emails: APP_CONFIG.admin_email_list(),
            site_url: APP_CONFIG.site_url.clone(),
        },
    )
}

/// Approved questions with answer flags and side statistics
#[utoipa::path(
    get,
    path = "/api/v1/qna",
    params(QnaListQuery),
    responses((status = 200, description = "Question list", body = QnaIndexResponse)),
    tag = "Q&A"
)]
pub async fn qna_index(Query(query): Query<QnaListQuery>) -> AppResult<(StatusCode, Json<QnaIndexResponse>)> {
    let db = get_database_connection().await;
    let filter = query.filter.as_deref().and_then(QuestionFilter::parse);
    let sort = QuestionSort::parse(query.sort.as_deref().unwrap_or_default());
    let list_query = QuestionListQuery {
        search: query.search.clone(),
        category_slug: query.category.clone(),
        filter,
        sort,
    };

    let index = qna_service(db).list(&list_query, query.page.as_deref()).await?;

    Ok((
        StatusCode::OK,
        Json(QnaIndexResponse {
            success: true,
            questions: index.questions.map(QuestionSummary::from),
            categories: index
                .categories
                .into_iter()
                .map(|(category, question_count)| QuestionCategoryCount {
                    category,
                    question_count,
                })
                .collect(),
            total_questions: index.total_questions,
            answered_count: index.answered_count,
            featured_count: index.featured_count,
            community_answers_count: index.community_answers_count,
            filters: QnaListQuery {
                filter: filter.map(|f| f.as_str().to_string()),
                sort: Some(sort.as_str().to_string()),
                ..query
            },
        }),
    ))
}

/// Visitor question; stored as pending until moderated or answered
#[utoipa::path(
    post,
    path = "/api/v1/qna/ask",
    request_body = QuestionInput,
    responses(
        (status = 201, description = "Question received", body = AskResponse),
        (status = 400, description = "Validation errors per field")
    ),
    tag = "Q&A"
)]
pub async fn ask_question(
    ClientIp(ip_address): ClientIp,
    UserAgent(user_agent): UserAgent,
    Json(payload): Json<QuestionInput>,
) -> AppResult<(StatusCode, Json<AskResponse>)> {
    let db = get_database_connection().await;
    let outcome = qna_service(db)
        .ask(&payload, Visitor { ip_address, user_agent })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AskResponse {
            success: true,
            message: outcome.messages.first().cloned().unwrap_or_default(),
            messages: outcome.messages,
            question: outcome.question.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/qna/question/{slug}",
    params(("slug" = String, Path, description = "Question slug")),
    responses(
        (status = 200, description = "Question with answers", body = QuestionDetailResponse),
        (status = 404, description = "Question not found or not approved")
    ),
    tag = "Q&A"
)]
pub async fn question_detail(
    auth: MaybeAuthClaims,
    Path(slug): Path<String>,
) -> AppResult<(StatusCode, Json<QuestionDetailResponse>)> {
    let actor = auth.actor();
    let db = get_database_connection().await;
    let detail = qna_service(db).detail(&slug, actor.as_ref()).await?;

    Ok((StatusCode::OK, Json(QuestionDetailResponse::from(detail))))
}

#[utoipa::path(
    post,
    path = "/api/v1/qna/question/{slug}/answers",
    params(("slug" = String, Path, description = "Question slug")),
    request_body = AnswerInput,
    responses(
        (status = 201, description = "Answer added", body = CommunityAnswerResponse),
        (status = 400, description = "Validation errors per field"),
        (status = 404, description = "Question not found")
    ),
    tag = "Q&A"
)]
pub async fn add_community_answer(
    auth: MaybeAuthClaims,
    ClientIp(ip_address): ClientIp,
    UserAgent(user_agent): UserAgent,
    Path(slug): Path<String>,
    Json(payload): Json<AnswerInput>,
) -> AppResult<(StatusCode, Json<CommunityAnswerResponse>)> {
    let actor = auth.actor();
    let db = get_database_connection().await;
    let answer = qna_service(db)
        .add_community_answer(&slug, actor.as_ref(), &payload, Visitor { ip_address, user_agent })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommunityAnswerResponse {
            success: true,
            message: "Your answer has been added. Thank you for contributing".to_string(),
            answer: answer.into(),
        }),
    ))
}

fn vote_response(outcome: VoteOutcome) -> VoteResponse {
    match outcome {
        VoteOutcome::Recorded(likes) => VoteResponse {
            success: true,
            message: "Thank you for your vote".to_string(),
            likes: Some(likes),
        },
        VoteOutcome::AlreadyVoted => VoteResponse {
            success: false,
            message: "You have already voted for this answer".to_string(),
            likes: None,
        },
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/qna/vote/{answer_id}",
    params(("answer_id" = Uuid, Path, description = "Official answer id")),
    responses(
        (status = 200, description = "Vote recorded, or success=false when already voted", body = VoteResponse),
        (status = 404, description = "Answer not found")
    ),
    tag = "Q&A"
)]
pub async fn vote_official(
    ClientIp(ip_address): ClientIp,
    Path(answer_id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<VoteResponse>)> {
    let db = get_database_connection().await;
    let outcome = qna_service(db).vote_official(answer_id, &ip_address).await?;
    Ok((StatusCode::OK, Json(vote_response(outcome))))
}

#[utoipa::path(
    post,
    path = "/api/v1/qna/vote-community/{answer_id}",
    params(("answer_id" = Uuid, Path, description = "Community answer id")),
    responses(
        (status = 200, description = "Vote recorded, or success=false when already voted", body = VoteResponse),
        (status = 404, description = "Answer not found or hidden")
    ),
    tag = "Q&A"
)]
pub async fn vote_community(
    ClientIp(ip_address): ClientIp,
    Path(answer_id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<VoteResponse>)> {
    let db = get_database_connection().await;
    let outcome = qna_service(db).vote_community(answer_id, &ip_address).await?;
    Ok((StatusCode::OK, Json(vote_response(outcome))))
}

#[utoipa::path(
    post,
    path = "/api/v1/qna/verify-community/{id}",
    params(("id" = Uuid, Path, description = "Community answer id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Verification toggled", body = VerifyResponse),
        (status = 403, description = "Supervisors and admins only"),
        (status = 404, description = "Answer not found")
    ),
    tag = "Q&A"
)]
pub async fn verify_community(
    auth: AuthClaims,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<VerifyResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let answer = qna_service(db).toggle_verified(&actor, id).await?;
    let message = if answer.is_verified {
        "Answer verified"
    } else {
        "Verification removed"
    };
    Ok((
        StatusCode::OK,
        Json(VerifyResponse {
            success: true,
            message: message.to_string(),
            is_verified: answer.is_verified,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/qna/delete-community/{id}",
    params(("id" = Uuid, Path, description = "Community answer id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Answer hidden as spam", body = MessageResponse),
        (status = 403, description = "Supervisors and admins only"),
        (status = 404, description = "Answer not found")
    ),
    tag = "Q&A"
)]
pub async fn delete_community(
    auth: AuthClaims,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    qna_service(db).hide_community_answer(&actor, id).await?;
    Ok((StatusCode::OK, Json(MessageResponse::ok("Answer deleted"))))
}

#[utoipa::path(
    post,
    path = "/api/v1/qna/report/{slug}",
    params(("slug" = String, Path, description = "Question slug")),
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Report stored", body = MessageResponse),
        (status = 400, description = "Missing report type or description"),
        (status = 404, description = "Question not found")
    ),
    tag = "Q&A"
)]
pub async fn report_question(
    ClientIp(ip_address): ClientIp,
    Path(slug): Path<String>,
    Json(payload): Json<ReportRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let db = get_database_connection().await;
    qna_service(db)
        .report(
            &slug,
            ReportInput {
                report_type: payload.report_type,
                description: payload.description,
                answer_id: payload.answer_id,
                reporter_email: payload.reporter_email,
            },
            &ip_address,
        )
        .await?;
    Ok((
        StatusCode::OK,
        Json(MessageResponse::ok(
            "Thank you, your report has been received and will be reviewed",
        )),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/qna/subscribe/{slug}",
    params(("slug" = String, Path, description = "Question slug")),
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Subscription toggled", body = SubscribeResponse),
        (status = 400, description = "Anonymous caller without e-mail"),
        (status = 404, description = "Question not found")
    ),
    tag = "Q&A"
)]
pub async fn subscribe(
    auth: MaybeAuthClaims,
    Path(slug): Path<String>,
    Json(payload): Json<SubscribeRequest>,
) -> AppResult<(StatusCode, Json<SubscribeResponse>)> {
    let actor = auth.actor();
    let db = get_database_connection().await;
    let is_subscribed = qna_service(db)
        .toggle_subscription(&slug, actor.as_ref(), payload.email.as_deref())
        .await?;
    let message = if is_subscribed {
        "You will be notified of new answers to this question"
    } else {
        "You have unsubscribed from this question"
    };
    Ok((
        StatusCode::OK,
        Json(SubscribeResponse {
            success: true,
            message: message.to_string(),
            is_subscribed,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/qna/categories",
    responses((status = 200, description = "Question categories", body = QuestionCategoryListResponse)),
    tag = "Q&A"
)]
pub async fn list_categories() -> AppResult<(StatusCode, Json<QuestionCategoryListResponse>)> {
    let db = get_database_connection().await;
    let categories = qna_service(db).categories().await?;
    Ok((
        StatusCode::OK,
        Json(QuestionCategoryListResponse {
            success: true,
            categories,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/qna/questions",
    params(QuestionStatusQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Questions in any status, newest first", body = QuestionListResponse),
        (status = 403, description = "Supervisors and admins only")
    ),
    tag = "Q&A admin"
)]
pub async fn admin_questions(
    auth: AuthClaims,
    Query(query): Query<QuestionStatusQuery>,
) -> AppResult<(StatusCode, Json<QuestionListResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let questions = qna_service(db).all_questions(&actor, query.status).await?;
    Ok((StatusCode::OK, Json(QuestionListResponse { success: true, questions })))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/qna/questions/status",
    request_body = QuestionStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Questions updated", body = BulkResponse),
        (status = 400, description = "Status must be approved, rejected or spam"),
        (status = 403, description = "Admins only")
    ),
    tag = "Q&A admin"
)]
pub async fn set_question_status(
    auth: AuthClaims,
    Json(payload): Json<QuestionStatusRequest>,
) -> AppResult<(StatusCode, Json<BulkResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let affected = qna_service(db)
        .set_question_status(&actor, payload.ids, payload.status)
        .await?;
    Ok((StatusCode::OK, Json(BulkResponse::new(affected))))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/qna/questions/{id}/answer",
    params(("id" = Uuid, Path, description = "Question id")),
    request_body = OfficialAnswerRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Official answer stored", body = OfficialAnswerResponse),
        (status = 400, description = "Answer too short"),
        (status = 403, description = "Supervisors and admins only"),
        (status = 404, description = "Question not found"),
        (status = 409, description = "Question already has an official answer")
    ),
    tag = "Q&A admin"
)]
pub async fn add_official_answer(
    auth: AuthClaims,
    Path(id): Path<Uuid>,
    Json(payload): Json<OfficialAnswerRequest>,
) -> AppResult<(StatusCode, Json<OfficialAnswerResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let answer = qna_service(db)
        .add_official_answer(&actor, id, &payload.answer_text, payload.is_featured)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(OfficialAnswerResponse {
            success: true,
            message: "Official answer published".to_string(),
            answer,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/qna/community-answers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All community answers, newest first", body = CommunityAnswerListResponse),
        (status = 403, description = "Admins only")
    ),
    tag = "Q&A admin"
)]
pub async fn admin_community_answers(
    auth: AuthClaims,
) -> AppResult<(StatusCode, Json<CommunityAnswerListResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let answers = qna_service(db).all_community_answers(&actor).await?;
    Ok((StatusCode::OK, Json(CommunityAnswerListResponse { success: true, answers })))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/qna/community-answers/verify",
    request_body = BulkFlagRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Answers updated", body = BulkResponse),
        (status = 403, description = "Admins only")
    ),
    tag = "Q&A admin"
)]
pub async fn bulk_verify(
    auth: AuthClaims,
    Json(payload): Json<BulkFlagRequest>,
) -> AppResult<(StatusCode, Json<BulkResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let affected = qna_service(db)
        .set_community_verified(&actor, payload.ids, payload.value)
        .await?;
    Ok((StatusCode::OK, Json(BulkResponse::new(affected))))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/qna/community-answers/spam",
    request_body = BulkFlagRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Answers updated", body = BulkResponse),
        (status = 403, description = "Admins only")
    ),
    tag = "Q&A admin"
)]
pub async fn bulk_spam(
    auth: AuthClaims,
    Json(payload): Json<BulkFlagRequest>,
) -> AppResult<(StatusCode, Json<BulkResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let affected = qna_service(db)
        .set_community_spam(&actor, payload.ids, payload.value)
        .await?;
    Ok((StatusCode::OK, Json(BulkResponse::new(affected))))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/qna/reports",
    params(ReportListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reports, newest first", body = ReportListResponse),
        (status = 403, description = "Admins only")
    ),
    tag = "Q&A admin"
)]
pub async fn admin_reports(
    auth: AuthClaims,
    Query(query): Query<ReportListQuery>,
) -> AppResult<(StatusCode, Json<ReportListResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let reports = qna_service(db).reports(&actor, query.resolved).await?;
    Ok((StatusCode::OK, Json(ReportListResponse { success: true, reports })))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/qna/reports/resolve",
    request_body = IdsRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reports resolved", body = BulkResponse),
        (status = 403, description = "Admins only")
    ),
    tag = "Q&A admin"
)]
pub async fn resolve_reports(
    auth: AuthClaims,
    Json(payload): Json<IdsRequest>,
) -> AppResult<(StatusCode, Json<BulkResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let affected = qna_service(db).resolve_reports(&actor, payload.ids).await?;
    Ok((StatusCode::OK, Json(BulkResponse::new(affected))))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/qna/categories",
    request_body = QuestionCategoryRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Category created", body = QuestionCategoryResponse),
        (status = 400, description = "Missing name"),
        (status = 403, description = "Admins only")
    ),
    tag = "Q&A admin"
)]
pub async fn create_category(
    auth: AuthClaims,
    Json(payload): Json<QuestionCategoryRequest>,
) -> AppResult<(StatusCode, Json<QuestionCategoryResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let category = qna_service(db)
        .create_category(
            &actor,
            payload.name,
            payload.slug,
            payload.icon,
            payload.description,
            payload.sort_order,
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(QuestionCategoryResponse {
            success: true,
            category,
        }),
    ))
}
