use crate::error::AppError;
use crate::repositories::ProfileFields;
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

pub const ALLOWED_LESSON_COUNTS: &[i32] = &[4, 8, 12, 16];
pub const ALLOWED_SESSION_DURATIONS: &[i32] = &[30, 40, 60];

/// Accepts `"12"` as well as `12` so both form and JSON clients work.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RegistrationInput {
    #[serde(default)]
    #[schema(example = "omar2015")]
    pub username: String,
    #[serde(default)]
    #[schema(example = "parent@example.com")]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    #[schema(example = "Omar Khaled")]
    pub full_name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub parent_phone: String,
    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(value_type = String, example = "9")]
    pub age: String,
    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(value_type = String, example = "8")]
    pub lessons_count: String,
    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(value_type = String, example = "30")]
    pub session_duration: String,
    #[serde(default)]
    #[schema(example = "Quran memorization")]
    pub package_name: String,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub profile: ProfileFields,
}

pub fn validate_registration(input: &RegistrationInput) -> Result<Registration, AppError> {
    let required = [
        &input.username,
        &input.email,
        &input.password,
        &input.full_name,
        &input.country,
        &input.phone,
        &input.parent_phone,
        &input.age,
        &input.lessons_count,
        &input.session_duration,
        &input.package_name,
    ];
    if required.iter().any(|value| value.trim().is_empty()) {
        return Err(AppError::bad_request("Please fill in all required fields"));
    }

    let parse = |value: &str| value.trim().parse::<i32>();
    let (Ok(age), Ok(lessons_count), Ok(session_duration)) = (
        parse(&input.age),
        parse(&input.lessons_count),
        parse(&input.session_duration),
    ) else {
        return Err(AppError::bad_request("Age, lessons count and session duration must be whole numbers"));
    };

    if !ALLOWED_LESSON_COUNTS.contains(&lessons_count) {
        return Err(AppError::bad_request("Lessons count must be one of 4, 8, 12 or 16"));
    }
    if !ALLOWED_SESSION_DURATIONS.contains(&session_duration) {
        return Err(AppError::bad_request("Session duration must be 30, 40 or 60 minutes"));
    }

    Ok(Registration {
        username: input.username.trim().to_string(),
        email: input.email.trim().to_string(),
        password: input.password.trim().to_string(),
        profile: ProfileFields {
            full_name: input.full_name.trim().to_string(),
            age,
            country: input.country.trim().to_string(),
            phone: input.phone.trim().to_string(),
            parent_phone: input.parent_phone.trim().to_string(),
            package_name: input.package_name.trim().to_string(),
            lessons_count,
            session_duration,
            supervisor_id: None,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> RegistrationInput {
        serde_json::from_value(serde_json::json!({
            "username": "omar2015",
            "email": "parent@example.com",
            "password": "secret123",
            "full_name": "Omar Khaled",
            "country": "Egypt",
            "phone": "+201001234567",
            "parent_phone": "+201007654321",
            "age": 9,
            "lessons_count": "8",
            "session_duration": "30",
            "package_name": "Quran memorization"
        }))
        .expect("valid json")
    }

    fn message(result: Result<Registration, AppError>) -> String {
        match result {
            Err(err) => err.to_string(),
            Ok(_) => String::new(),
        }
    }

    #[test]
    fn complete_registration_parses_numbers() {
        let registration = validate_registration(&complete()).expect("valid registration");
        assert_eq!(registration.profile.age, 9);
        assert_eq!(registration.profile.lessons_count, 8);
        assert_eq!(registration.profile.session_duration, 30);
    }

    #[test]
    fn blank_fields_are_missing() {
        let mut input = complete();
        input.package_name = "   ".to_string();
        assert_eq!(message(validate_registration(&input)), "Please fill in all required fields");
    }

    #[test]
    fn non_numeric_age_is_rejected() {
        let mut input = complete();
        input.age = "nine".to_string();
        assert!(message(validate_registration(&input)).contains("whole numbers"));
    }

    #[test]
    fn package_values_are_restricted() {
        let mut input = complete();
        input.lessons_count = "6".to_string();
        assert!(validate_registration(&input).is_err());

        let mut input = complete();
        input.session_duration = "45".to_string();
        assert!(validate_registration(&input).is_err());
    }
}
