use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::student_profile;
use crate::error::AppError;
use crate::utils::jwt::TokenClaims;

/// The authenticated caller as seen by services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub username: String,
    pub role: RoleEnum,
}

impl Actor {
    pub fn new(user_id: Uuid, username: impl Into<String>, role: RoleEnum) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
        }
    }

    pub fn from_claims(claims: &TokenClaims) -> Result<Self, AppError> {
        let user_id = Uuid::parse_str(&claims.user_id)
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))?;
        Ok(Self::new(user_id, claims.username.clone(), claims.role))
    }

    pub fn is_admin(&self) -> bool {
        self.role == RoleEnum::Admin
    }

    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}

pub fn require_student(actor: &Actor) -> Result<(), AppError> {
    if actor.role == RoleEnum::Student {
        Ok(())
    } else {
        Err(AppError::forbidden("This page is for students only"))
    }
}

pub fn require_staff(actor: &Actor) -> Result<(), AppError> {
    if actor.is_staff() {
        Ok(())
    } else {
        Err(AppError::forbidden("Supervisors only"))
    }
}

pub fn require_admin(actor: &Actor) -> Result<(), AppError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden("Administrators only"))
    }
}

/// Admins pass; a supervisor passes only for students assigned to them.
pub fn ensure_supervises(actor: &Actor, profile: &student_profile::Model) -> Result<(), AppError> {
    require_staff(actor)?;
    if actor.is_admin() || profile.supervisor_id == Some(actor.user_id) {
        Ok(())
    } else {
        Err(AppError::forbidden("This student is not assigned to you"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile(supervisor_id: Option<Uuid>) -> student_profile::Model {
        let now = Utc::now().naive_utc();
        student_profile::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            full_name: "Student".to_string(),
            age: 10,
            country: "EG".to_string(),
            phone: "0100".to_string(),
            parent_phone: "0101".to_string(),
            package_name: "basic".to_string(),
            lessons_count: 4,
            session_duration: 30,
            supervisor_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn supervisor_may_act_only_on_own_students() {
        let sup = Actor::new(Uuid::new_v4(), "sup", RoleEnum::Supervisor);
        assert!(ensure_supervises(&sup, &profile(Some(sup.user_id))).is_ok());
        assert!(matches!(
            ensure_supervises(&sup, &profile(Some(Uuid::new_v4()))),
            Err(AppError::Forbidden(_))
        ));
        assert!(ensure_supervises(&sup, &profile(None)).is_err());
    }

    #[test]
    fn admin_passes_supervision_check() {
        let admin = Actor::new(Uuid::new_v4(), "root", RoleEnum::Admin);
        assert!(ensure_supervises(&admin, &profile(None)).is_ok());
    }

    #[test]
    fn students_are_not_staff() {
        let student = Actor::new(Uuid::new_v4(), "kid", RoleEnum::Student);
        assert!(require_student(&student).is_ok());
        assert!(require_staff(&student).is_err());
        assert!(ensure_supervises(&student, &profile(Some(student.user_id))).is_err());
        assert!(require_admin(&student).is_err());
    }
}
