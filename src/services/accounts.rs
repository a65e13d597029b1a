use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{session, student_profile, user};
use crate::error::{AppError, AppResult};
use crate::middleware::permission::Actor;
use crate::repositories::{
    NewUser, ProfileFields, SessionRepository, StudentProfileRepository, UserRepository,
    is_unique_violation,
};
use crate::validation::Registration;
use sea_orm::{ConnectionTrait, DbErr, TransactionTrait};

pub const STUDENT_HOME: &str = "/dashboard";
pub const STAFF_HOME: &str = "/supervisor/dashboard";

pub fn redirect_for(role: RoleEnum) -> &'static str {
    if role.is_staff() { STAFF_HOME } else { STUDENT_HOME }
}

/// Inserts a user and, for students, get-or-creates the matching profile on
/// the same connection. Run it inside a transaction so both rows commit together.
pub async fn create_user_with_profile<C: ConnectionTrait>(
    db: &C,
    new_user: NewUser,
    profile: Option<ProfileFields>,
) -> anyhow::Result<(user::Model, Option<student_profile::Model>)> {
    let user = UserRepository::with_connection(db).create(new_user).await?;
    if user.role != RoleEnum::Student {
        return Ok((user, None));
    }

    let fields = profile.unwrap_or_else(|| ProfileFields::defaults_for(&user.username));
    let (profile, _) = StudentProfileRepository::with_connection(db)
        .get_or_create(user.id, fields)
        .await?;
    Ok((user, Some(profile)))
}

fn conflict_on_duplicate(err: anyhow::Error) -> AppError {
    match err.downcast_ref::<DbErr>() {
        Some(db_err) if is_unique_violation(db_err) => {
            AppError::Conflict("Username is already taken".to_string())
        }
        _ => AppError::Internal(err),
    }
}

pub struct AccountService<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> AccountService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Student self sign-up. The user row and its profile are written in one
    /// transaction; nothing is stored when any step fails.
    pub async fn register_student(
        &self,
        registration: Registration,
    ) -> AppResult<(user::Model, student_profile::Model)> {
        if UserRepository::with_connection(self.db)
            .username_exists(&registration.username)
            .await?
        {
            return Err(AppError::Conflict("Username is already taken".to_string()));
        }

        let password_hash = bcrypt::hash(&registration.password, bcrypt::DEFAULT_COST)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

        let txn = self.db.begin().await?;
        let (user, profile) = create_user_with_profile(
            &txn,
            NewUser {
                username: registration.username,
                email: registration.email,
                password_hash,
                role: RoleEnum::Student,
                phone: Some(registration.profile.phone.clone()),
                country: Some(registration.profile.country.clone()),
            },
            Some(registration.profile),
        )
        .await
        .map_err(conflict_on_duplicate)?;
        txn.commit().await?;

        let profile = profile
            .ok_or_else(|| anyhow::anyhow!("Student profile was not created"))?;
        tracing::info!("Registered student {} ({})", user.username, user.id);
        Ok((user, profile))
    }

    /// Checks username and password. Every failure looks the same to the caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<user::Model> {
        let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

        let user = UserRepository::with_connection(self.db)
            .find_by_username(username.trim())
            .await?
            .ok_or_else(invalid)?;

        let valid = bcrypt::verify(password, &user.password)
            .map_err(|e| anyhow::anyhow!("Password verification error: {}", e))?;
        if !valid {
            return Err(invalid());
        }
        Ok(user)
    }

    /// The caller's own profile with sessions, latest first.
    pub async fn own_profile(
        &self,
        actor: &Actor,
    ) -> AppResult<(student_profile::Model, Vec<session::Model>)> {
        let profile = StudentProfileRepository::with_connection(self.db)
            .find_by_user_id(actor.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found. Please register first"))?;
        let sessions = SessionRepository::with_connection(self.db)
            .find_by_profile(profile.id)
            .await?;
        Ok((profile, sessions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_land_on_the_supervisor_dashboard() {
        assert_eq!(redirect_for(RoleEnum::Student), "/dashboard");
        assert_eq!(redirect_for(RoleEnum::Supervisor), "/supervisor/dashboard");
        assert_eq!(redirect_for(RoleEnum::Admin), "/supervisor/dashboard");
    }
}
