use once_cell::sync::Lazy;
use regex::Regex;

pub const POST_EXCERPT_CHARS: usize = 250;
pub const QUESTION_META_CHARS: usize = 155;
pub const WORDS_PER_MINUTE: f64 = 200.0;

// Unicode `\w` includes combining marks; slugs drop them (Arabic harakat).
static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]|\p{M}").expect("valid slug regex"));
static SLUG_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").expect("valid regex"));
static NON_WORD_OR_HYPHEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\-]|\p{M}").expect("valid regex"));

/// Lowercases, keeps word characters of any script, folds whitespace and
/// hyphen runs into a single `-` and trims `-`/`_` from both ends.
pub fn slugify_unicode(value: &str) -> String {
    let lowered = value.to_lowercase();
    let cleaned = NON_SLUG_CHARS.replace_all(&lowered, "");
    SLUG_SEPARATORS
        .replace_all(&cleaned, "-")
        .trim_matches(|c| c == '-' || c == '_')
        .to_string()
}

/// Question slugs keep the title's case: spaces become `-` and anything
/// that is neither a word character nor a hyphen is dropped.
pub fn question_slug_base(title: &str) -> String {
    let dashed = title.trim().replace(' ', "-");
    let slug = NON_WORD_OR_HYPHEN.replace_all(&dashed, "").to_string();
    if slug.is_empty() {
        "question".to_string()
    } else {
        slug
    }
}

/// `base`, then `base-1`, `base-2`, ...
pub fn slug_candidate(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        base.to_string()
    } else {
        format!("{base}-{attempt}")
    }
}

pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

pub fn reading_time_minutes(content: &str) -> i32 {
    let words = content.split_whitespace().count() as f64;
    ((words / WORDS_PER_MINUTE).round_ties_even() as i32).max(1)
}

pub fn auto_excerpt(content: &str) -> String {
    format!("{}...", truncate_chars(content, POST_EXCERPT_CHARS))
}

pub fn question_meta_description(text: &str) -> String {
    format!("{}...", truncate_chars(text, QUESTION_META_CHARS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_keeps_arabic_letters() {
        assert_eq!(slugify_unicode("تعلم القرآن  الكريم"), "تعلم-القرآن-الكريم");
    }

    #[test]
    fn slugify_drops_punctuation_and_trims() {
        assert_eq!(slugify_unicode("  Hello, World! -- 2024 _"), "hello-world-2024");
    }

    #[test]
    fn question_slug_preserves_case_and_falls_back() {
        assert_eq!(question_slug_base(" How to Read? "), "How-to-Read");
        assert_eq!(question_slug_base("؟؟؟"), "question");
    }

    #[test]
    fn diacritics_are_dropped_from_slugs() {
        assert_eq!(slugify_unicode("مَرْحَبًا بِكُم"), "مرحبا-بكم");
        assert_eq!(question_slug_base("كَيْفَ أَبْدَأُ"), "كيف-أبدأ");
        assert_eq!(slugify_unicode("Café au lait"), "café-au-lait");
    }

    #[test]
    fn candidates_are_numbered_after_the_base() {
        assert_eq!(slug_candidate("abc", 0), "abc");
        assert_eq!(slug_candidate("abc", 2), "abc-2");
    }

    #[test]
    fn reading_time_rounds_half_to_even() {
        let words = |n: usize| vec!["w"; n].join(" ");
        assert_eq!(reading_time_minutes(""), 1);
        assert_eq!(reading_time_minutes(&words(299)), 1);
        // 2.5 rounds to 2, 3.5 rounds to 4
        assert_eq!(reading_time_minutes(&words(500)), 2);
        assert_eq!(reading_time_minutes(&words(700)), 4);
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        let content = "ب".repeat(300);
        let excerpt = auto_excerpt(&content);
        assert_eq!(excerpt.chars().count(), POST_EXCERPT_CHARS + 3);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn meta_description_is_155_chars_plus_ellipsis() {
        let meta = question_meta_description(&"a".repeat(200));
        assert_eq!(meta.chars().count(), 158);
    }
}
