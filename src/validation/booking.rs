use super::{Checks, looks_like_email};
use crate::entities::sea_orm_active_enums::Gender;
use crate::error::AppError;
use crate::repositories::NewBooking;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BookingInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    #[schema(example = "male")]
    pub gender: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn validate_booking(input: &BookingInput) -> Result<NewBooking, AppError> {
    let mut checks = Checks::new();
    let required = [
        ("name", &input.name),
        ("country", &input.country),
        ("gender", &input.gender),
        ("phone", &input.phone),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            checks.fail(field, "This field is required");
        }
    }

    let gender = match input.gender.trim() {
        "male" => Some(Gender::Male),
        "female" => Some(Gender::Female),
        _ => None,
    };
    if gender.is_none() && !checks.has("gender") {
        checks.fail("gender", "Gender must be male or female");
    }

    let email = optional(&input.email);
    if email.as_deref().is_some_and(|email| !looks_like_email(email)) {
        checks.fail("email", "Enter a valid e-mail address");
    }

    checks.finish()?;
    let Some(gender) = gender else {
        return Err(AppError::bad_request("Gender must be male or female"));
    };

    Ok(NewBooking {
        name: input.name.trim().to_string(),
        country: input.country.trim().to_string(),
        gender,
        phone: input.phone.trim().to_string(),
        email,
        notes: optional(&input.notes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking() -> BookingInput {
        BookingInput {
            name: "Sara Ali".to_string(),
            country: "Egypt".to_string(),
            gender: "female".to_string(),
            phone: "+201001234567".to_string(),
            email: Some("  ".to_string()),
            notes: None,
        }
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let booking = validate_booking(&booking()).expect("valid booking");
        assert_eq!(booking.gender, Gender::Female);
        assert!(booking.email.is_none());
    }

    #[test]
    fn required_fields_are_reported_together() {
        let Err(AppError::Validation { errors, .. }) = validate_booking(&BookingInput::default())
        else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn email_shape_is_checked_when_given() {
        let mut input = booking();
        input.email = Some("not-an-email".to_string());
        assert!(validate_booking(&input).is_err());
    }
}
