use super::{
    ANSWER_FAKE_NAMES, Checks, EMAIL_PATTERN, PHONE_PATTERN, TEXT_BLOCKED_WORDS, URL_PATTERN,
    char_len, contains_blocked_word, is_fake_name, looks_like_email,
};
use crate::error::AppError;
use serde::Deserialize;
use utoipa::ToSchema;

pub const OFFICIAL_ANSWER_MIN_CHARS: usize = 20;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AnswerInput {
    #[serde(default)]
    pub visitor_name: String,
    #[serde(default)]
    pub visitor_email: String,
    #[serde(default)]
    pub answer_text: String,
    #[serde(default)]
    pub agree_to_terms: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanAnswer {
    pub visitor_name: String,
    pub visitor_email: String,
    pub answer_text: String,
}

fn check_answer_text(text: &str) -> Result<(), &'static str> {
    if text.is_empty() {
        return Err("Please enter the answer text");
    }
    let len = char_len(text);
    if len < 20 {
        return Err("Answer is too short (at least 20 characters)");
    }
    if len > 2000 {
        return Err("Answer is too long (at most 2000 characters)");
    }
    if URL_PATTERN.is_match(text) {
        return Err("Links are not allowed in the answer");
    }
    if EMAIL_PATTERN.is_match(text) {
        return Err("E-mail addresses are not allowed in the answer");
    }
    if PHONE_PATTERN.is_match(text) {
        return Err("Phone numbers are not allowed in the answer");
    }
    if contains_blocked_word(text, TEXT_BLOCKED_WORDS) {
        return Err("Text contains inappropriate words");
    }
    Ok(())
}

fn check_answer_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("Please enter your name");
    }
    if is_fake_name(name, ANSWER_FAKE_NAMES) {
        return Err("Please enter your real name");
    }
    let len = char_len(name);
    if len < 2 {
        return Err("Name must be at least 2 characters");
    }
    if len > 100 {
        return Err("Name is too long");
    }
    Ok(())
}

/// Logged-in authors are identified by their account, so their visitor
/// fields are cleared instead of validated.
pub fn validate_community_answer(
    input: &AnswerInput,
    authenticated: bool,
) -> Result<CleanAnswer, AppError> {
    let mut clean = CleanAnswer {
        visitor_name: input.visitor_name.trim().to_string(),
        visitor_email: input.visitor_email.trim().to_string(),
        answer_text: input.answer_text.trim().to_string(),
    };

    let mut checks = Checks::new();
    checks.check("answer_text", check_answer_text(&clean.answer_text));
    if authenticated {
        clean.visitor_name.clear();
        clean.visitor_email.clear();
    } else {
        checks.check("visitor_name", check_answer_name(&clean.visitor_name));
        if !clean.visitor_email.is_empty() && !looks_like_email(&clean.visitor_email) {
            checks.fail("visitor_email", "Please enter a valid e-mail address");
        }
    }
    if !input.agree_to_terms {
        checks.fail("agree_to_terms", "You must accept the publishing terms");
    }

    checks.finish()?;
    Ok(clean)
}

pub fn validate_official_answer(text: &str) -> Result<String, AppError> {
    let text = text.trim();
    let mut checks = Checks::new();
    if char_len(text) < OFFICIAL_ANSWER_MIN_CHARS {
        checks.fail("answer_text", "Answer is too short (at least 20 characters)");
    }
    checks.finish()?;
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, text: &str) -> AnswerInput {
        AnswerInput {
            visitor_name: name.to_string(),
            visitor_email: "helper@example.com".to_string(),
            answer_text: text.to_string(),
            agree_to_terms: true,
        }
    }

    const GOOD_TEXT: &str = "Read short surahs with him every evening";

    #[test]
    fn anonymous_answers_need_a_name() {
        let result = validate_community_answer(&input("", GOOD_TEXT), false);
        let Err(AppError::Validation { errors, .. }) = result else {
            panic!("expected validation error");
        };
        assert_eq!(
            errors.get("visitor_name").map(String::as_str),
            Some("Please enter your name")
        );
    }

    #[test]
    fn anonymous_email_must_be_well_formed() {
        let mut answer = input("Khaled", GOOD_TEXT);
        answer.visitor_email = "abc".to_string();
        let Err(AppError::Validation { errors, .. }) = validate_community_answer(&answer, false)
        else {
            panic!("expected validation error");
        };
        assert!(errors.contains_key("visitor_email"));

        answer.visitor_email = String::new();
        assert!(validate_community_answer(&answer, false).is_ok());
    }

    #[test]
    fn shorter_fake_name_list_allows_qwerty() {
        assert!(validate_community_answer(&input("qwerty", GOOD_TEXT), false).is_ok());
        assert!(validate_community_answer(&input("Visitor", GOOD_TEXT), false).is_err());
    }

    #[test]
    fn authenticated_answers_drop_visitor_fields() {
        let clean = validate_community_answer(&input("", GOOD_TEXT), true).expect("valid answer");
        assert!(clean.visitor_name.is_empty());
        assert!(clean.visitor_email.is_empty());
    }

    #[test]
    fn links_are_rejected() {
        let result =
            validate_community_answer(&input("Khaled", "see https://example.com for more"), false);
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn official_answers_have_a_minimum_length() {
        assert!(validate_official_answer("too short").is_err());
        assert_eq!(
            validate_official_answer("  A complete and helpful answer  ").ok().as_deref(),
            Some("A complete and helpful answer")
        );
    }
}
