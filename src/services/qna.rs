use crate::entities::sea_orm_active_enums::{QuestionStatus, ReportType};
use crate::entities::{
    community_answer, public_question, question_answer, question_category, question_report, user,
};
use crate::error::{AppError, AppResult, FieldErrors};
use crate::middleware::permission::{Actor, require_admin, require_staff};
use crate::repositories::question_repository::FREQUENT_THRESHOLD;
use crate::repositories::{
    AnswerRepository, NewCommunityAnswer, NewQuestion, NewReport, Page, QuestionCategoryRepository,
    QuestionFlags, QuestionListQuery, QuestionRepository, ReportRepository, Subscriber,
    SubscriptionRepository, UserRepository, VoteOutcome, VoteRepository,
};
use crate::services::mail::MailSender;
use crate::utils::slug::truncate_chars;
use crate::validation::{
    AnswerInput, QuestionInput, looks_like_email, validate_community_answer,
    validate_official_answer, validate_question,
};
use sea_orm::{ConnectionTrait, TransactionTrait};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

pub const NOTIFY_SUBJECT_CHARS: usize = 50;
pub const NOTIFY_ANSWER_CHARS: usize = 200;
pub const NOTIFY_QUESTION_CHARS: usize = 300;

/// Where moderation mail goes and how links in e-mails are built.
#[derive(Debug, Clone, Default)]
pub struct QnaSettings {
    pub admin_emails: Vec<String>,
    pub site_url: String,
}

impl QnaSettings {
    pub fn question_url(&self, slug: &str) -> String {
        format!("{}/qna/question/{}", self.site_url.trim_end_matches('/'), slug)
    }
}

/// Who is submitting and from where.
#[derive(Debug, Clone, Default)]
pub struct Visitor {
    pub ip_address: String,
    pub user_agent: String,
}

pub struct AskOutcome {
    pub question: public_question::Model,
    pub messages: Vec<String>,
}

pub struct QuestionIndex {
    pub questions: Page<(public_question::Model, QuestionFlags)>,
    pub categories: Vec<(question_category::Model, i64)>,
    pub total_questions: u64,
    pub answered_count: u64,
    pub featured_count: u64,
    pub community_answers_count: u64,
}

pub struct QuestionDetail {
    pub question: public_question::Model,
    pub official_answer: Option<question_answer::Model>,
    pub official_author: Option<user::Model>,
    pub community_answers: Vec<community_answer::Model>,
    pub is_subscribed: bool,
    pub related: Vec<public_question::Model>,
    pub schema_markup: String,
}

pub struct ReportInput {
    pub report_type: String,
    pub description: String,
    pub answer_id: Option<Uuid>,
    pub reporter_email: String,
}

fn html_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// schema.org `QAPage` JSON-LD for a question and its accepted answer.
pub fn schema_markup(
    question: &public_question::Model,
    answer: Option<&question_answer::Model>,
    answer_author: Option<&user::Model>,
) -> String {
    let mut entity = json!({
        "@type": "Question",
        "name": html_escape(&question.title),
        "text": html_escape(&question.question_text),
        "dateCreated": question.created_at.and_utc().to_rfc3339(),
        "author": { "@type": "Person", "name": html_escape(&question.visitor_name) },
        "answerCount": 0,
    });
    if let Some(answer) = answer {
        entity["answerCount"] = json!(1);
        entity["acceptedAnswer"] = json!({
            "@type": "Answer",
            "text": html_escape(&answer.answer_text),
            "dateCreated": answer.answered_at.and_utc().to_rfc3339(),
            "author": {
                "@type": "Person",
                "name": answer_author.map(|u| u.username.clone()).unwrap_or_default(),
            },
            "upvoteCount": answer.likes,
        });
    }
    let schema = json!({
        "@context": "https://schema.org",
        "@type": "QAPage",
        "mainEntity": entity,
    });
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

pub struct QnaService<'a, C> {
    db: &'a C,
    mailer: Arc<dyn MailSender>,
    settings: QnaSettings,
}

impl<'a, C: ConnectionTrait + TransactionTrait> QnaService<'a, C> {
    pub fn new(db: &'a C, mailer: Arc<dyn MailSender>, settings: QnaSettings) -> Self {
        Self {
            db,
            mailer,
            settings,
        }
    }

    /// Validates and stores a visitor question in `pending` state, then
    /// notifies the moderators.
    pub async fn ask(&self, input: &QuestionInput, visitor: Visitor) -> AppResult<AskOutcome> {
        let clean = validate_question(input)?;

        if let Some(category_id) = clean.category_id {
            let exists = QuestionCategoryRepository::with_connection(self.db)
                .find_by_id(category_id)
                .await?
                .is_some();
            if !exists {
                let mut errors = FieldErrors::new();
                errors.insert("category_id".to_string(), "Select a valid category".to_string());
                return Err(AppError::invalid_fields(errors));
            }
        }

        let questions = QuestionRepository::with_connection(self.db);
        let similar = questions
            .count_similar(&clean.title, &clean.question_text)
            .await?;

        let question = questions
            .create(NewQuestion {
                visitor_name: clean.visitor_name,
                visitor_email: clean.visitor_email,
                visitor_phone: clean.visitor_phone,
                title: clean.title,
                question_text: clean.question_text,
                category_id: clean.category_id,
                ip_address: Some(visitor.ip_address).filter(|ip| !ip.is_empty()),
                user_agent: visitor.user_agent,
                is_frequent: similar >= FREQUENT_THRESHOLD,
            })
            .await?;
        tracing::info!(
            "Question {} submitted (frequent: {})",
            question.id,
            question.is_frequent
        );

        self.notify_moderators(&question).await?;

        let mut messages = vec![
            "Your question has been received".to_string(),
            "It is now in the review queue and will be published within 24 hours once it meets the publishing terms".to_string(),
        ];
        if !question.visitor_email.is_empty() {
            messages.push(format!(
                "We will notify you at {} when your question is published and answered",
                question.visitor_email
            ));
        }
        Ok(AskOutcome { question, messages })
    }

    async fn notify_moderators(&self, question: &public_question::Model) -> AppResult<()> {
        if self.settings.admin_emails.is_empty() {
            return Ok(());
        }
        let category = match question.category_id {
            Some(id) => QuestionCategoryRepository::with_connection(self.db)
                .find_by_id(id)
                .await?
                .map(|c| c.name),
            None => None,
        };
        let or_missing = |value: &str| {
            if value.is_empty() { "not provided".to_string() } else { value.to_string() }
        };

        let subject = format!(
            "New question awaiting review: {}",
            truncate_chars(&question.title, NOTIFY_SUBJECT_CHARS)
        );
        let text = format!(
            "A new question needs review:\n\nTitle: {}\nFrom: {}\nE-mail: {}\nPhone: {}\nCategory: {}\n\nQuestion:\n{}...\n\nReview it at: {}/admin/qna/questions",
            question.title,
            question.visitor_name,
            or_missing(&question.visitor_email),
            or_missing(&question.visitor_phone),
            category.unwrap_or_else(|| "none".to_string()),
            truncate_chars(&question.question_text, NOTIFY_QUESTION_CHARS),
            self.settings.site_url.trim_end_matches('/'),
        );
        self.mailer
            .send_to_all(&self.settings.admin_emails, &subject, &text)
            .await;
        Ok(())
    }

    pub async fn list(&self, query: &QuestionListQuery, page: Option<&str>) -> AppResult<QuestionIndex> {
        let questions = QuestionRepository::with_connection(self.db);
        let listed = questions.list_approved(query, page).await?;
        let ids: Vec<Uuid> = listed.items.iter().map(|q| q.id).collect();
        let flags = questions.flags_for(&ids).await?;
        let listed = listed.map(|q| {
            let f = flags.get(&q.id).copied().unwrap_or_default();
            (q, f)
        });

        Ok(QuestionIndex {
            questions: listed,
            categories: QuestionCategoryRepository::with_connection(self.db)
                .with_approved_counts()
                .await?,
            total_questions: questions.count_approved().await?,
            answered_count: questions.count_answered().await?,
            featured_count: questions.count_featured().await?,
            community_answers_count: AnswerRepository::with_connection(self.db)
                .community_count()
                .await?,
        })
    }

    /// Approved questions only. Each call counts one view.
    pub async fn detail(&self, slug: &str, actor: Option<&Actor>) -> AppResult<QuestionDetail> {
        let questions = QuestionRepository::with_connection(self.db);
        let found = questions
            .find_approved_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Question not found"))?;
        questions.increment_views(found.id).await?;
        let question = questions
            .find_by_id(found.id)
            .await?
            .ok_or_else(|| AppError::not_found("Question not found"))?;

        let answers = AnswerRepository::with_connection(self.db);
        let official_answer = answers.find_official(question.id).await?;
        let official_author = match official_answer.as_ref().and_then(|a| a.answered_by) {
            Some(author_id) => UserRepository::with_connection(self.db)
                .find_by_id(author_id)
                .await?,
            None => None,
        };
        let community_answers = answers.community_for_question(question.id).await?;

        let is_subscribed = match actor {
            Some(actor) => {
                SubscriptionRepository::with_connection(self.db)
                    .is_subscribed(question.id, actor.user_id)
                    .await?
            }
            None => false,
        };
        let related = questions.related(&question).await?;
        let schema_markup = schema_markup(&question, official_answer.as_ref(), official_author.as_ref());

        Ok(QuestionDetail {
            question,
            official_answer,
            official_author,
            community_answers,
            is_subscribed,
            related,
            schema_markup,
        })
    }

    /// One official answer per question. A pending question becomes approved
    /// in the same transaction.
    pub async fn add_official_answer(
        &self,
        actor: &Actor,
        question_id: Uuid,
        answer_text: &str,
        is_featured: bool,
    ) -> AppResult<question_answer::Model> {
        require_staff(actor)?;
        let text = validate_official_answer(answer_text)?;

        let txn = self.db.begin().await?;
        QuestionRepository::with_connection(&txn)
            .find_by_id(question_id)
            .await?
            .ok_or_else(|| AppError::not_found("Question not found"))?;

        let answers = AnswerRepository::with_connection(&txn);
        if answers.find_official(question_id).await?.is_some() {
            return Err(AppError::Conflict(
                "This question already has an official answer".to_string(),
            ));
        }
        let answer = answers
            .create_official(question_id, text, actor.user_id, is_featured)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("This question already has an official answer".to_string())
            })?;
        QuestionRepository::with_connection(&txn)
            .approve_if_pending(question_id)
            .await?;
        txn.commit().await?;

        tracing::info!("Official answer {} added to question {}", answer.id, question_id);
        Ok(answer)
    }

    /// Stores a community answer and e-mails every active subscriber.
    /// Visitors and students answer approved questions only. Staff may also
    /// answer a pending question, which approves it in the same transaction.
    pub async fn add_community_answer(
        &self,
        slug: &str,
        actor: Option<&Actor>,
        input: &AnswerInput,
        visitor: Visitor,
    ) -> AppResult<community_answer::Model> {
        let questions = QuestionRepository::with_connection(self.db);
        let found = if actor.is_some_and(Actor::is_staff) {
            questions.find_by_slug(slug).await?.filter(|q| {
                matches!(q.status, QuestionStatus::Approved | QuestionStatus::Pending)
            })
        } else {
            questions.find_approved_by_slug(slug).await?
        };
        let question = found.ok_or_else(|| AppError::not_found("Question not found"))?;
        let clean = validate_community_answer(input, actor.is_some())?;

        let txn = self.db.begin().await?;
        let answer = AnswerRepository::with_connection(&txn)
            .create_community(NewCommunityAnswer {
                question_id: question.id,
                answer_text: clean.answer_text,
                answered_by: actor.map(|a| a.user_id),
                visitor_name: clean.visitor_name,
                visitor_email: clean.visitor_email,
                ip_address: Some(visitor.ip_address).filter(|ip| !ip.is_empty()),
                user_agent: visitor.user_agent,
            })
            .await?;
        QuestionRepository::with_connection(&txn)
            .approve_if_pending(question.id)
            .await?;
        txn.commit().await?;

        self.notify_subscribers(&question, &answer).await?;
        Ok(answer)
    }

    async fn notify_subscribers(
        &self,
        question: &public_question::Model,
        answer: &community_answer::Model,
    ) -> AppResult<()> {
        let recipients = SubscriptionRepository::with_connection(self.db)
            .active_emails(question.id)
            .await?;
        if recipients.is_empty() {
            return Ok(());
        }
        let subject = format!(
            "New answer: {}",
            truncate_chars(&question.title, NOTIFY_SUBJECT_CHARS)
        );
        let text = format!(
            "A new answer was posted on:\n\n{}\n\nAnswer:\n{}...\n\nRead the full answer: {}",
            question.title,
            truncate_chars(&answer.answer_text, NOTIFY_ANSWER_CHARS),
            self.settings.question_url(&question.slug),
        );
        self.mailer.send_to_all(&recipients, &subject, &text).await;
        tracing::debug!("Notified {} subscribers of question {}", recipients.len(), question.id);
        Ok(())
    }

    pub async fn vote_official(&self, answer_id: Uuid, ip_address: &str) -> AppResult<VoteOutcome> {
        AnswerRepository::with_connection(self.db)
            .find_official_by_id(answer_id)
            .await?
            .ok_or_else(|| AppError::not_found("Answer not found"))?;
        Ok(VoteRepository::with_connection(self.db)
            .vote_official(answer_id, ip_address)
            .await?)
    }

    pub async fn vote_community(&self, answer_id: Uuid, ip_address: &str) -> AppResult<VoteOutcome> {
        AnswerRepository::with_connection(self.db)
            .find_community_by_id(answer_id)
            .await?
            .filter(|a| !a.is_spam)
            .ok_or_else(|| AppError::not_found("Answer not found"))?;
        Ok(VoteRepository::with_connection(self.db)
            .vote_community(answer_id, ip_address)
            .await?)
    }

    pub async fn toggle_verified(&self, actor: &Actor, answer_id: Uuid) -> AppResult<community_answer::Model> {
        require_staff(actor)?;
        let answers = AnswerRepository::with_connection(self.db);
        let answer = answers
            .find_community_by_id(answer_id)
            .await?
            .ok_or_else(|| AppError::not_found("Answer not found"))?;
        Ok(answers.toggle_verified(answer).await?)
    }

    /// Community answers are never deleted, only hidden as spam.
    pub async fn hide_community_answer(&self, actor: &Actor, answer_id: Uuid) -> AppResult<community_answer::Model> {
        require_staff(actor)?;
        let answers = AnswerRepository::with_connection(self.db);
        let answer = answers
            .find_community_by_id(answer_id)
            .await?
            .ok_or_else(|| AppError::not_found("Answer not found"))?;
        Ok(answers.mark_spam(answer).await?)
    }

    pub async fn report(&self, slug: &str, input: ReportInput, ip_address: &str) -> AppResult<question_report::Model> {
        let question = QuestionRepository::with_connection(self.db)
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Question not found"))?;

        let description = input.description.trim();
        let report_type = ReportType::parse(input.report_type.trim());
        let (Some(report_type), false) = (report_type, description.is_empty()) else {
            return Err(AppError::bad_request("Please fill in all required fields"));
        };
        let reporter_email = input.reporter_email.trim();
        if !reporter_email.is_empty() && !looks_like_email(reporter_email) {
            return Err(AppError::bad_request("Please enter a valid e-mail address"));
        }

        if let Some(answer_id) = input.answer_id {
            let belongs = AnswerRepository::with_connection(self.db)
                .find_community_by_id(answer_id)
                .await?
                .is_some_and(|a| a.question_id == question.id);
            if !belongs {
                return Err(AppError::bad_request("The reported answer does not belong to this question"));
            }
        }

        let report = ReportRepository::with_connection(self.db)
            .create(NewReport {
                question_id: question.id,
                answer_id: input.answer_id,
                report_type,
                description: description.to_string(),
                reporter_ip: ip_address.to_string(),
                reporter_email: reporter_email.to_string(),
            })
            .await?;
        tracing::info!("Report {} filed against question {}", report.id, question.id);
        Ok(report)
    }

    /// Toggles the caller's subscription; anonymous callers subscribe by e-mail.
    pub async fn toggle_subscription(
        &self,
        slug: &str,
        actor: Option<&Actor>,
        email: Option<&str>,
    ) -> AppResult<bool> {
        let question = QuestionRepository::with_connection(self.db)
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Question not found"))?;

        let subscriber = match actor {
            Some(actor) => Subscriber::User(actor.user_id),
            None => {
                let email = email.map(str::trim).filter(|e| !e.is_empty()).ok_or_else(|| {
                    AppError::bad_request("Please enter your e-mail address")
                })?;
                if !looks_like_email(email) {
                    return Err(AppError::bad_request("Please enter a valid e-mail address"));
                }
                Subscriber::Email(email.to_string())
            }
        };
        Ok(SubscriptionRepository::with_connection(self.db)
            .toggle(question.id, subscriber)
            .await?)
    }

    pub async fn all_questions(
        &self,
        actor: &Actor,
        status: Option<QuestionStatus>,
    ) -> AppResult<Vec<public_question::Model>> {
        require_staff(actor)?;
        Ok(QuestionRepository::with_connection(self.db)
            .find_all(status)
            .await?)
    }

    pub async fn set_question_status(
        &self,
        actor: &Actor,
        ids: Vec<Uuid>,
        status: QuestionStatus,
    ) -> AppResult<u64> {
        require_admin(actor)?;
        if status == QuestionStatus::Pending {
            return Err(AppError::bad_request("Status must be approved, rejected or spam"));
        }
        Ok(QuestionRepository::with_connection(self.db)
            .set_status(ids, status)
            .await?)
    }

    pub async fn all_community_answers(&self, actor: &Actor) -> AppResult<Vec<community_answer::Model>> {
        require_admin(actor)?;
        Ok(AnswerRepository::with_connection(self.db)
            .find_all_community()
            .await?)
    }

    pub async fn set_community_verified(&self, actor: &Actor, ids: Vec<Uuid>, verified: bool) -> AppResult<u64> {
        require_admin(actor)?;
        Ok(AnswerRepository::with_connection(self.db)
            .set_community_verified(ids, verified)
            .await?)
    }

    pub async fn set_community_spam(&self, actor: &Actor, ids: Vec<Uuid>, spam: bool) -> AppResult<u64> {
        require_admin(actor)?;
        Ok(AnswerRepository::with_connection(self.db)
            .set_community_spam(ids, spam)
            .await?)
    }

    pub async fn reports(&self, actor: &Actor, resolved: Option<bool>) -> AppResult<Vec<question_report::Model>> {
        require_admin(actor)?;
        Ok(ReportRepository::with_connection(self.db)
            .find_all(resolved)
            .await?)
    }

    pub async fn resolve_reports(&self, actor: &Actor, ids: Vec<Uuid>) -> AppResult<u64> {
        require_admin(actor)?;
        Ok(ReportRepository::with_connection(self.db).resolve(ids).await?)
    }

    pub async fn categories(&self) -> AppResult<Vec<question_category::Model>> {
        Ok(QuestionCategoryRepository::with_connection(self.db)
            .find_all()
            .await?)
    }

    pub async fn create_category(
        &self,
        actor: &Actor,
        name: String,
        slug: Option<String>,
        icon: String,
        description: String,
        sort_order: i32,
    ) -> AppResult<question_category::Model> {
        require_admin(actor)?;
        if name.trim().is_empty() {
            return Err(AppError::bad_request("Category name is required"));
        }
        Ok(QuestionCategoryRepository::with_connection(self.db)
            .create(name.trim().to_string(), slug, icon, description, sort_order)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn question() -> public_question::Model {
        let created = NaiveDate::from_ymd_opt(2025, 1, 2)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .expect("valid date");
        public_question::Model {
            id: Uuid::new_v4(),
            visitor_name: "Umm <Ali>".to_string(),
            visitor_email: String::new(),
            visitor_phone: String::new(),
            title: "How do I start?".to_string(),
            question_text: "My child is five & curious".to_string(),
            category_id: None,
            ip_address: None,
            user_agent: String::new(),
            status: QuestionStatus::Approved,
            view_count: 0,
            is_frequent: false,
            slug: "How-do-I-start".to_string(),
            meta_description: String::new(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn markup_escapes_html_and_counts_answers() {
        let markup = schema_markup(&question(), None, None);
        let value: serde_json::Value = serde_json::from_str(&markup).expect("valid json");
        assert_eq!(value["@type"], "QAPage");
        assert_eq!(value["mainEntity"]["answerCount"], 0);
        assert_eq!(value["mainEntity"]["author"]["name"], "Umm &lt;Ali&gt;");
        assert_eq!(value["mainEntity"]["text"], "My child is five &amp; curious");
    }

    #[test]
    fn question_links_use_the_site_url() {
        let settings = QnaSettings {
            admin_emails: vec![],
            site_url: "https://academy.example/".to_string(),
        };
        assert_eq!(
            settings.question_url("abc"),
            "https://academy.example/qna/question/abc"
        );
    }
}
