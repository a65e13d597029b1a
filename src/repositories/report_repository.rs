use crate::entities::question_report;
use crate::entities::sea_orm_active_enums::ReportType;
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct NewReport {
    pub question_id: Uuid,
    pub answer_id: Option<Uuid>,
    pub report_type: ReportType,
    pub description: String,
    pub reporter_ip: String,
    pub reporter_email: String,
}

pub struct ReportRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReportRepository<'a, C> {
    pub fn with_connection(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, report: NewReport) -> Result<question_report::Model> {
        let model = question_report::ActiveModel {
            id: Set(Uuid::new_v4()),
            question_id: Set(report.question_id),
            answer_id: Set(report.answer_id),
            report_type: Set(report.report_type),
            description: Set(report.description),
            reporter_ip: Set(report.reporter_ip),
            reporter_email: Set(report.reporter_email),
            is_resolved: Set(false),
            created_at: Set(chrono::Utc::now().naive_utc()),
        };
        Ok(model.insert(self.db).await?)
    }

    pub async fn find_all(&self, resolved: Option<bool>) -> Result<Vec<question_report::Model>> {
        let mut query = question_report::Entity::find();
        if let Some(flag) = resolved {
            query = query.filter(question_report::Column::IsResolved.eq(flag));
        }
        Ok(query
            .order_by_desc(question_report::Column::CreatedAt)
            .all(self.db)
            .await?)
    }

    pub async fn resolve(&self, ids: Vec<Uuid>) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = question_report::Entity::update_many()
            .col_expr(question_report::Column::IsResolved, Expr::value(true))
            .filter(question_report::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
