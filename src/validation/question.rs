use super::{
    Checks, EMAIL_PATTERN, FAKE_NAMES, PHONE_PATTERN, TEXT_BLOCKED_WORDS, TITLE_BLOCKED_WORDS,
    URL_PATTERN, char_len, contains_blocked_word, has_char_run, is_all_uppercase,
    is_disposable_email, is_fake_name, looks_like_email,
};
use crate::error::{AppError, NON_FIELD_ERRORS};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

static NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\x{0600}-\x{06FF}a-zA-Z\s]+$").expect("valid name regex"));
static PHONE_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-()]").expect("valid regex"));
static PHONE_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("valid phone regex"));

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct QuestionInput {
    #[serde(default)]
    #[schema(example = "محمد أحمد علي")]
    pub visitor_name: String,
    #[serde(default)]
    pub visitor_email: String,
    #[serde(default)]
    pub visitor_phone: String,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    #[schema(example = "هل يمكن تعليم الصغار؟")]
    pub title: String,
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub agree_to_terms: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanQuestion {
    pub visitor_name: String,
    pub visitor_email: String,
    pub visitor_phone: String,
    pub category_id: Option<Uuid>,
    pub title: String,
    pub question_text: String,
}

pub(crate) fn check_visitor_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("Please enter your name");
    }
    if is_fake_name(name, FAKE_NAMES) {
        return Err("Please enter your real name");
    }
    let len = char_len(name);
    if len < 2 {
        return Err("Name must be at least 2 characters");
    }
    if len > 100 {
        return Err("Name is too long");
    }
    if !NAME_CHARS.is_match(name) {
        return Err("Name may only contain letters");
    }
    let mut distinct: Vec<char> = name.chars().filter(|c| *c != ' ').collect();
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.len() <= 2 {
        return Err("Please enter a real name");
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), &'static str> {
    if email.is_empty() {
        return Ok(());
    }
    if !looks_like_email(email) {
        return Err("Please enter a valid e-mail address");
    }
    if is_disposable_email(email) {
        return Err("Temporary e-mail addresses are not allowed");
    }
    Ok(())
}

fn check_phone(phone: &str) -> Result<(), &'static str> {
    if phone.is_empty() {
        return Ok(());
    }
    let digits = PHONE_NOISE.replace_all(phone, "");
    if !PHONE_DIGITS.is_match(&digits) {
        return Err("Phone number is invalid");
    }
    Ok(())
}

fn check_title(title: &str) -> Result<(), &'static str> {
    if title.is_empty() {
        return Err("Please enter the question title");
    }
    let len = char_len(title);
    if len < 10 {
        return Err("Title is too short (at least 10 characters)");
    }
    if len > 200 {
        return Err("Title is too long (at most 200 characters)");
    }
    if contains_blocked_word(title, TITLE_BLOCKED_WORDS) {
        return Err("Title contains inappropriate words");
    }
    if has_char_run(title, 5) {
        return Err("Title contains abnormally repeated characters");
    }
    if is_all_uppercase(title) && len > 20 {
        return Err("Please do not write in capital letters only");
    }
    Ok(())
}

fn check_text(text: &str) -> Result<(), &'static str> {
    if text.is_empty() {
        return Err("Please enter the question details");
    }
    let len = char_len(text);
    if len < 20 {
        return Err("Question is too short (at least 20 characters)");
    }
    if len > 5000 {
        return Err("Question is too long (at most 5000 characters)");
    }
    if URL_PATTERN.is_match(text) {
        return Err("Links are not allowed in the question");
    }
    if EMAIL_PATTERN.is_match(text) {
        return Err("E-mail addresses are not allowed in the question");
    }
    if PHONE_PATTERN.is_match(text) {
        return Err("Phone numbers are not allowed in the question");
    }
    if has_char_run(text, 7) {
        return Err("Text contains abnormally repeated characters");
    }
    if contains_blocked_word(text, TEXT_BLOCKED_WORDS) {
        return Err("Text contains inappropriate words");
    }
    Ok(())
}

pub fn validate_question(input: &QuestionInput) -> Result<CleanQuestion, AppError> {
    let clean = CleanQuestion {
        visitor_name: input.visitor_name.trim().to_string(),
        visitor_email: input.visitor_email.trim().to_string(),
        visitor_phone: input.visitor_phone.trim().to_string(),
        category_id: input.category_id,
        title: input.title.trim().to_string(),
        question_text: input.question_text.trim().to_string(),
    };

    let mut checks = Checks::new();
    checks.check("visitor_name", check_visitor_name(&clean.visitor_name));
    checks.check("visitor_email", check_email(&clean.visitor_email));
    checks.check("visitor_phone", check_phone(&clean.visitor_phone));
    checks.check("title", check_title(&clean.title));
    checks.check("question_text", check_text(&clean.question_text));
    if !input.agree_to_terms {
        checks.fail("agree_to_terms", "You must accept the publishing terms");
    }

    if !checks.has("title")
        && !checks.has("question_text")
        && clean.title.to_lowercase() == clean.question_text.to_lowercase()
    {
        checks.fail(NON_FIELD_ERRORS, "Title and details cannot be identical");
    }

    checks.finish()?;
    Ok(clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> QuestionInput {
        QuestionInput {
            visitor_name: "محمد أحمد".to_string(),
            visitor_email: "parent@example.com".to_string(),
            visitor_phone: "+20 123 456 7890".to_string(),
            category_id: None,
            title: "هل يمكن تعليم الصغار؟".to_string(),
            question_text: "ابني عمره ست سنوات ويحب القصص".to_string(),
            agree_to_terms: true,
        }
    }

    fn field_error(result: Result<CleanQuestion, AppError>, field: &str) -> Option<String> {
        match result {
            Err(AppError::Validation { errors, .. }) => errors.get(field).cloned(),
            _ => None,
        }
    }

    #[test]
    fn accepts_a_well_formed_question() {
        let clean = validate_question(&valid_input()).expect("valid question");
        assert_eq!(clean.title, "هل يمكن تعليم الصغار؟");
    }

    #[test]
    fn rejects_placeholder_names() {
        let mut input = valid_input();
        input.visitor_name = "  Visitor ".to_string();
        assert_eq!(
            field_error(validate_question(&input), "visitor_name").as_deref(),
            Some("Please enter your real name")
        );
    }

    #[test]
    fn names_need_three_distinct_letters() {
        let mut input = valid_input();
        input.visitor_name = "ab ab ba".to_string();
        assert_eq!(
            field_error(validate_question(&input), "visitor_name").as_deref(),
            Some("Please enter a real name")
        );
    }

    #[test]
    fn digits_are_not_letters() {
        let mut input = valid_input();
        input.visitor_name = "Ahmed 2".to_string();
        assert!(field_error(validate_question(&input), "visitor_name").is_some());
    }

    #[test]
    fn email_is_optional_but_must_be_well_formed() {
        let mut input = valid_input();
        input.visitor_email = "abc".to_string();
        assert_eq!(
            field_error(validate_question(&input), "visitor_email").as_deref(),
            Some("Please enter a valid e-mail address")
        );
        input.visitor_email = "kid@mailinator.com".to_string();
        assert_eq!(
            field_error(validate_question(&input), "visitor_email").as_deref(),
            Some("Temporary e-mail addresses are not allowed")
        );
        input.visitor_email = String::new();
        assert!(validate_question(&input).is_ok());
    }

    #[test]
    fn phone_must_have_enough_digits() {
        let mut input = valid_input();
        input.visitor_phone = "(012) 34".to_string();
        assert!(field_error(validate_question(&input), "visitor_phone").is_some());
    }

    #[test]
    fn title_rules_apply_in_order() {
        let mut input = valid_input();
        input.title = "short".to_string();
        assert_eq!(
            field_error(validate_question(&input), "title").as_deref(),
            Some("Title is too short (at least 10 characters)")
        );

        input.title = "THIS IS A VERY LOUD TITLE".to_string();
        assert_eq!(
            field_error(validate_question(&input), "title").as_deref(),
            Some("Please do not write in capital letters only")
        );

        input.title = "Why is this so baaaaad".to_string();
        assert_eq!(
            field_error(validate_question(&input), "title").as_deref(),
            Some("Title contains abnormally repeated characters")
        );
    }

    #[test]
    fn text_may_not_carry_contact_details() {
        let mut input = valid_input();
        input.question_text = "please contact me at someone@example.com soon".to_string();
        assert_eq!(
            field_error(validate_question(&input), "question_text").as_deref(),
            Some("E-mail addresses are not allowed in the question")
        );
    }

    #[test]
    fn every_field_is_reported_at_once() {
        let input = QuestionInput::default();
        let Err(AppError::Validation { errors, .. }) = validate_question(&input) else {
            panic!("expected validation error");
        };
        assert!(errors.contains_key("visitor_name"));
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("question_text"));
        assert!(errors.contains_key("agree_to_terms"));
        assert!(!errors.contains_key("visitor_phone"));
    }

    #[test]
    fn identical_title_and_text_are_rejected() {
        let mut input = valid_input();
        input.title = "How can I help my child memorize".to_string();
        input.question_text = "how can i help my child memorize".to_string();
        assert!(field_error(validate_question(&input), NON_FIELD_ERRORS).is_some());
    }
}
