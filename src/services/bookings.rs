use crate::entities::trial_booking;
use crate::error::AppResult;
use crate::middleware::permission::{Actor, require_admin};
use crate::repositories::TrialBookingRepository;
use crate::validation::{BookingInput, validate_booking};
use sea_orm::ConnectionTrait;
use uuid::Uuid;

pub struct BookingService<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BookingService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn book_trial(&self, input: &BookingInput) -> AppResult<trial_booking::Model> {
        let booking = validate_booking(input)?;
        let booking = TrialBookingRepository::with_connection(self.db)
            .create(booking)
            .await?;
        tracing::info!("Trial booking {} received from {}", booking.id, booking.country);
        Ok(booking)
    }

    pub async fn list(
        &self,
        actor: &Actor,
        contacted: Option<bool>,
    ) -> AppResult<Vec<trial_booking::Model>> {
        require_admin(actor)?;
        Ok(TrialBookingRepository::with_connection(self.db)
            .find_all(contacted)
            .await?)
    }

    pub async fn set_contacted(&self, actor: &Actor, ids: Vec<Uuid>, contacted: bool) -> AppResult<u64> {
        require_admin(actor)?;
        Ok(TrialBookingRepository::with_connection(self.db)
            .set_contacted(ids, contacted)
            .await?)
    }
}
