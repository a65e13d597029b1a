use crate::entities::sea_orm_active_enums::QuestionStatus;
use crate::entities::{
    community_answer, public_question, question_answer, question_category, question_report,
};
use crate::repositories::{Page, QuestionFlags};
use crate::services::qna::QuestionDetail;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Question as shown to visitors. Contact details, IP and user agent stay
/// in the admin listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionView {
    pub id: Uuid,
    pub visitor_name: String,
    pub title: String,
    pub question_text: String,
    pub category_id: Option<Uuid>,
    pub status: QuestionStatus,
    pub view_count: i32,
    pub is_frequent: bool,
    pub slug: String,
    pub meta_description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<public_question::Model> for QuestionView {
    fn from(question: public_question::Model) -> Self {
        Self {
            id: question.id,
            visitor_name: question.visitor_name,
            title: question.title,
            question_text: question.question_text,
            category_id: question.category_id,
            status: question.status,
            view_count: question.view_count,
            is_frequent: question.is_frequent,
            slug: question.slug,
            meta_description: question.meta_description,
            created_at: question.created_at,
            updated_at: question.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommunityAnswerView {
    pub id: Uuid,
    pub question_id: Uuid,
    pub answer_text: String,
    pub answered_by: Option<Uuid>,
    pub visitor_name: String,
    pub is_verified: bool,
    pub likes: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<community_answer::Model> for CommunityAnswerView {
    fn from(answer: community_answer::Model) -> Self {
        Self {
            id: answer.id,
            question_id: answer.question_id,
            answer_text: answer.answer_text,
            answered_by: answer.answered_by,
            visitor_name: answer.visitor_name,
            is_verified: answer.is_verified,
            likes: answer.likes,
            created_at: answer.created_at,
            updated_at: answer.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AskResponse {
    pub success: bool,
    pub message: String,
    pub messages: Vec<String>,
    pub question: QuestionView,
}

#[derive(Debug, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[serde(default)]
pub struct QnaListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    /// featured, unanswered, frequent or answered
    pub filter: Option<String>,
    /// newest, oldest or most_viewed
    pub sort: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionSummary {
    #[serde(flatten)]
    pub question: QuestionView,
    pub has_official: bool,
    pub has_featured: bool,
    pub has_community_answers: bool,
}

impl From<(public_question::Model, QuestionFlags)> for QuestionSummary {
    fn from((question, flags): (public_question::Model, QuestionFlags)) -> Self {
        Self {
            question: question.into(),
            has_official: flags.has_official,
            has_featured: flags.has_featured,
            has_community_answers: flags.has_community_answers,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionCategoryCount {
    pub category: question_category::Model,
    pub question_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QnaIndexResponse {
    pub success: bool,
    pub questions: Page<QuestionSummary>,
    pub categories: Vec<QuestionCategoryCount>,
    pub total_questions: u64,
    pub answered_count: u64,
    pub featured_count: u64,
    pub community_answers_count: u64,
    pub filters: QnaListQuery,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionDetailResponse {
    pub success: bool,
    pub question: QuestionView,
    pub official_answer: Option<question_answer::Model>,
    pub official_author: Option<String>,
    pub community_answers_count: usize,
    pub community_answers: Vec<CommunityAnswerView>,
    pub is_subscribed: bool,
    pub related: Vec<QuestionView>,
    /// schema.org QAPage JSON-LD
    pub schema_markup: String,
}

impl From<QuestionDetail> for QuestionDetailResponse {
    fn from(detail: QuestionDetail) -> Self {
        Self {
            success: true,
            question: detail.question.into(),
            official_answer: detail.official_answer,
            official_author: detail.official_author.map(|u| u.username),
            community_answers_count: detail.community_answers.len(),
            community_answers: detail.community_answers.into_iter().map(Into::into).collect(),
            is_subscribed: detail.is_subscribed,
            related: detail.related.into_iter().map(Into::into).collect(),
            schema_markup: detail.schema_markup,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OfficialAnswerRequest {
    #[serde(default)]
    pub answer_text: String,
    #[serde(default)]
    pub is_featured: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OfficialAnswerResponse {
    pub success: bool,
    pub message: String,
    pub answer: question_answer::Model,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommunityAnswerResponse {
    pub success: bool,
    pub message: String,
    pub answer: CommunityAnswerView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VoteResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub success: bool,
    pub message: String,
    pub is_verified: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ReportRequest {
    #[schema(example = "incorrect")]
    pub report_type: String,
    pub description: String,
    pub answer_id: Option<Uuid>,
    pub reporter_email: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SubscribeRequest {
    /// Required for anonymous callers
    pub email: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
    pub is_subscribed: bool,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct QuestionStatusQuery {
    pub status: Option<QuestionStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionListResponse {
    pub success: bool,
    pub questions: Vec<public_question::Model>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuestionStatusRequest {
    pub ids: Vec<Uuid>,
    pub status: QuestionStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommunityAnswerListResponse {
    pub success: bool,
    pub answers: Vec<community_answer::Model>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ReportListQuery {
    pub resolved: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportListResponse {
    pub success: bool,
    pub reports: Vec<question_report::Model>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionCategoryListResponse {
    pub success: bool,
    pub categories: Vec<question_category::Model>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuestionCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionCategoryResponse {
    pub success: bool,
    pub category: question_category::Model,
}
