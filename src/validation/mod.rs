//! Form validation for public submissions. Each validator checks every field,
//! keeps the first failing rule per field and returns the cleaned values.

pub mod answer;
pub mod booking;
pub mod question;
pub mod registration;

use crate::error::{AppError, FieldErrors};
use once_cell::sync::Lazy;
use regex::Regex;

pub use answer::{AnswerInput, CleanAnswer, validate_community_answer, validate_official_answer};
pub use booking::{BookingInput, validate_booking};
pub use question::{CleanQuestion, QuestionInput, validate_question};
pub use registration::{Registration, RegistrationInput, validate_registration};

/// Placeholder names rejected on question submissions.
pub const FAKE_NAMES: &[&str] = &[
    "مجهول",
    "غير معروف",
    "xxx",
    "test",
    "مستخدم",
    "user",
    "admin",
    "زائر",
    "visitor",
    "aaa",
    "zzz",
    "asdf",
    "qwerty",
    "anonymous",
];

/// Answer forms use a shorter list.
pub const ANSWER_FAKE_NAMES: &[&str] = &[
    "مجهول",
    "غير معروف",
    "xxx",
    "test",
    "مستخدم",
    "user",
    "admin",
    "زائر",
    "visitor",
    "aaa",
    "zzz",
];

pub const DISPOSABLE_EMAIL_DOMAINS: &[&str] = &[
    "tempmail.com",
    "guerrillamail.com",
    "10minutemail.com",
    "mailinator.com",
    "throwaway.email",
    "temp-mail.org",
];

pub const TITLE_BLOCKED_WORDS: &[&str] = &[
    "سخيف", "غبي", "تافه", "حقير", "قذر", "سيء", "stupid", "idiot", "bad", "spam",
];

pub const TEXT_BLOCKED_WORDS: &[&str] = &["سخيف", "غبي", "تافه", "حقير", "قذر", "stupid", "idiot", "spam"];

pub(crate) static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\\(\\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+")
        .expect("valid url regex")
});

pub(crate) static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b").expect("valid email regex")
});

pub(crate) static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3,4}[-.\s]?\d{4}")
        .expect("valid phone regex")
});

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email shape regex")
});

/// Collects per-field errors, keeping only the first one reported for a field.
#[derive(Debug, Default)]
pub struct Checks {
    errors: FieldErrors,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, field: &str, result: Result<(), &str>) {
        if let Err(message) = result {
            self.fail(field, message);
        }
    }

    pub fn fail(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::invalid_fields(self.errors))
        }
    }
}

pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// True when some character other than a line break repeats at least
/// `run` times in a row.
pub fn has_char_run(value: &str, run: usize) -> bool {
    let mut previous: Option<char> = None;
    let mut count = 0;
    for c in value.chars() {
        if c == '\n' {
            previous = None;
            count = 0;
            continue;
        }
        if previous == Some(c) {
            count += 1;
        } else {
            previous = Some(c);
            count = 1;
        }
        if count >= run {
            return true;
        }
    }
    false
}

/// At least one cased character and no lowercase ones.
pub fn is_all_uppercase(value: &str) -> bool {
    value.chars().any(char::is_uppercase) && !value.chars().any(char::is_lowercase)
}

pub fn contains_blocked_word(value: &str, words: &[&str]) -> bool {
    let lowered = value.to_lowercase();
    words.iter().any(|word| lowered.contains(word))
}

pub fn is_fake_name(name: &str, list: &[&str]) -> bool {
    let lowered = name.to_lowercase();
    list.contains(&lowered.as_str())
}

pub fn looks_like_email(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

pub fn is_disposable_email(email: &str) -> bool {
    let domain = email.rsplit('@').next().unwrap_or_default().to_lowercase();
    DISPOSABLE_EMAIL_DOMAINS.contains(&domain.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_runs_are_counted_per_line() {
        assert!(has_char_run("heyyyyy", 5));
        assert!(!has_char_run("heyyyy", 5));
        assert!(!has_char_run("aa\naaa", 5));
        assert!(has_char_run("ههههههه", 7));
    }

    #[test]
    fn uppercase_needs_a_cased_character() {
        assert!(is_all_uppercase("HELLO WORLD 123"));
        assert!(!is_all_uppercase("Hello"));
        assert!(!is_all_uppercase("مرحبا بكم"));
    }

    #[test]
    fn disposable_domains_match_case_insensitively() {
        assert!(is_disposable_email("someone@Mailinator.com"));
        assert!(!is_disposable_email("someone@gmail.com"));
    }

    #[test]
    fn first_error_per_field_wins() {
        let mut checks = Checks::new();
        checks.fail("title", "first");
        checks.fail("title", "second");
        let Err(AppError::Validation { errors, .. }) = checks.finish() else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get("title").map(String::as_str), Some("first"));
    }

    #[test]
    fn inline_contact_details_are_detected() {
        assert!(URL_PATTERN.is_match("visit http://example.com now"));
        assert!(EMAIL_PATTERN.is_match("write to me at a.b@example.org please"));
        assert!(PHONE_PATTERN.is_match("call +20 123 456 7890"));
        assert!(!PHONE_PATTERN.is_match("my son is 6 years old"));
    }
}
