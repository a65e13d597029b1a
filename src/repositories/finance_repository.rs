use crate::entities::sea_orm_active_enums::{JobTitle, PaymentType};
use crate::entities::{expense, finance_student, teacher};
use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::prelude::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

pub struct NewTeacher {
    pub name: String,
    pub job_title: JobTitle,
    pub salary: Decimal,
    pub working_hours: i32,
    pub bonus: Decimal,
    pub deduction: Decimal,
    pub notes: Option<String>,
    pub start_date: NaiveDate,
}

pub struct NewFinanceStudent {
    pub teacher_id: Option<Uuid>,
    pub name: String,
    pub session_duration: i32,
    pub lessons_count: i32,
    pub payment_type: PaymentType,
    pub paid_amount: Decimal,
    pub join_date: NaiveDate,
}

pub struct NewExpense {
    pub title: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

/// Inclusive date window; `None` means no restriction.
pub type DateWindow = Option<(NaiveDate, NaiveDate)>;

pub struct FinanceRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FinanceRepository<'a, C> {
    pub fn with_connection(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn teachers(&self) -> Result<Vec<teacher::Model>> {
        Ok(teacher::Entity::find()
            .order_by_asc(teacher::Column::Name)
            .all(self.db)
            .await?)
    }

    pub async fn find_teacher(&self, id: Uuid) -> Result<Option<teacher::Model>> {
        Ok(teacher::Entity::find_by_id(id).one(self.db).await?)
    }

    pub async fn create_teacher(&self, input: NewTeacher) -> Result<teacher::Model> {
        let model = teacher::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            job_title: Set(input.job_title),
            salary: Set(input.salary),
            working_hours: Set(input.working_hours),
            bonus: Set(input.bonus),
            deduction: Set(input.deduction),
            notes: Set(input.notes),
            start_date: Set(input.start_date),
        };
        Ok(model.insert(self.db).await?)
    }

    pub async fn delete_teacher(&self, id: Uuid) -> Result<bool> {
        match self.find_teacher(id).await? {
            Some(model) => {
                model.delete(self.db).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Students whose join date falls inside `window`, newest first.
    pub async fn students(&self, window: DateWindow) -> Result<Vec<finance_student::Model>> {
        let mut query = finance_student::Entity::find();
        if let Some((start, end)) = window {
            query = query
                .filter(finance_student::Column::JoinDate.gte(start))
                .filter(finance_student::Column::JoinDate.lte(end));
        }
        Ok(query
            .order_by_desc(finance_student::Column::JoinDate)
            .all(self.db)
            .await?)
    }

    pub async fn create_student(&self, input: NewFinanceStudent) -> Result<finance_student::Model> {
        let model = finance_student::ActiveModel {
            id: Set(Uuid::new_v4()),
            teacher_id: Set(input.teacher_id),
            name: Set(input.name),
            session_duration: Set(input.session_duration),
            lessons_count: Set(input.lessons_count),
            payment_type: Set(input.payment_type),
            paid_amount: Set(input.paid_amount),
            join_date: Set(input.join_date),
        };
        Ok(model.insert(self.db).await?)
    }

    pub async fn delete_student(&self, id: Uuid) -> Result<bool> {
        match finance_student::Entity::find_by_id(id).one(self.db).await? {
            Some(model) => {
                model.delete(self.db).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn expenses(&self, window: DateWindow) -> Result<Vec<expense::Model>> {
        let mut query = expense::Entity::find();
        if let Some((start, end)) = window {
            query = query
                .filter(expense::Column::Date.gte(start))
                .filter(expense::Column::Date.lte(end));
        }
        Ok(query
            .order_by_desc(expense::Column::Date)
            .all(self.db)
            .await?)
    }

    pub async fn create_expense(&self, input: NewExpense) -> Result<expense::Model> {
        let model = expense::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            amount: Set(input.amount),
            date: Set(input.date),
            notes: Set(input.notes),
        };
        Ok(model.insert(self.db).await?)
    }

    pub async fn delete_expense(&self, id: Uuid) -> Result<bool> {
        match expense::Entity::find_by_id(id).one(self.db).await? {
            Some(model) => {
                model.delete(self.db).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
