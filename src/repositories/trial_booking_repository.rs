use crate::entities::sea_orm_active_enums::Gender;
use crate::entities::trial_booking;
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct NewBooking {
    pub name: String,
    pub country: String,
    pub gender: Gender,
    pub phone: String,
    pub email: Option<String>,
    pub notes: Option<String>,
}

pub struct TrialBookingRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TrialBookingRepository<'a, C> {
    pub fn with_connection(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, booking: NewBooking) -> Result<trial_booking::Model> {
        let model = trial_booking::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(booking.name),
            country: Set(booking.country),
            gender: Set(booking.gender),
            phone: Set(booking.phone),
            email: Set(booking.email),
            notes: Set(booking.notes),
            is_contacted: Set(false),
            created_at: Set(chrono::Utc::now().naive_utc()),
        };
        Ok(model.insert(self.db).await?)
    }

    pub async fn find_all(&self, contacted: Option<bool>) -> Result<Vec<trial_booking::Model>> {
        let mut query = trial_booking::Entity::find();
        if let Some(flag) = contacted {
            query = query.filter(trial_booking::Column::IsContacted.eq(flag));
        }
        Ok(query
            .order_by_desc(trial_booking::Column::CreatedAt)
            .all(self.db)
            .await?)
    }

    pub async fn set_contacted(&self, ids: Vec<Uuid>, contacted: bool) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = trial_booking::Entity::update_many()
            .col_expr(trial_booking::Column::IsContacted, Expr::value(contacted))
            .filter(trial_booking::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
