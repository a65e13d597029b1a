use sea_orm_migration::prelude::*;

use crate::m20251001_000001_create_accounts::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(QuestionCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuestionCategories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(QuestionCategories::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuestionCategories::Slug)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuestionCategories::Icon)
                            .string_len(50)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(QuestionCategories::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(QuestionCategories::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_question_categories_slug_unique")
                    .table(QuestionCategories::Table)
                    .col(QuestionCategories::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PublicQuestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PublicQuestions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PublicQuestions::VisitorName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PublicQuestions::VisitorEmail)
                            .string_len(254)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(PublicQuestions::VisitorPhone)
                            .string_len(20)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(PublicQuestions::Title).string_len(200).not_null())
                    .col(ColumnDef::new(PublicQuestions::QuestionText).text().not_null())
                    .col(ColumnDef::new(PublicQuestions::CategoryId).uuid().null())
                    .col(ColumnDef::new(PublicQuestions::IpAddress).string_len(45).null())
                    .col(
                        ColumnDef::new(PublicQuestions::UserAgent)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(PublicQuestions::Status)
                            .string_len(10)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(PublicQuestions::ViewCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PublicQuestions::IsFrequent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(PublicQuestions::Slug).string_len(250).not_null())
                    .col(
                        ColumnDef::new(PublicQuestions::MetaDescription)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(PublicQuestions::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(PublicQuestions::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_public_questions_category")
                            .from(PublicQuestions::Table, PublicQuestions::CategoryId)
                            .to(QuestionCategories::Table, QuestionCategories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_public_questions_slug_unique")
                    .table(PublicQuestions::Table)
                    .col(PublicQuestions::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_public_questions_status_created_at")
                    .table(PublicQuestions::Table)
                    .col(PublicQuestions::Status)
                    .col(PublicQuestions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QuestionAnswers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuestionAnswers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuestionAnswers::QuestionId).uuid().not_null())
                    .col(ColumnDef::new(QuestionAnswers::AnswerText).text().not_null())
                    .col(ColumnDef::new(QuestionAnswers::AnsweredBy).uuid().null())
                    .col(
                        ColumnDef::new(QuestionAnswers::IsFeatured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(QuestionAnswers::Likes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(QuestionAnswers::AnsweredAt).timestamp().not_null())
                    .col(ColumnDef::new(QuestionAnswers::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_question_answers_question")
                            .from(QuestionAnswers::Table, QuestionAnswers::QuestionId)
                            .to(PublicQuestions::Table, PublicQuestions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_question_answers_answered_by")
                            .from(QuestionAnswers::Table, QuestionAnswers::AnsweredBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one official answer per question
        manager
            .create_index(
                Index::create()
                    .name("idx_question_answers_question_unique")
                    .table(QuestionAnswers::Table)
                    .col(QuestionAnswers::QuestionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CommunityAnswers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommunityAnswers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CommunityAnswers::QuestionId).uuid().not_null())
                    .col(ColumnDef::new(CommunityAnswers::AnswerText).text().not_null())
                    .col(ColumnDef::new(CommunityAnswers::AnsweredBy).uuid().null())
                    .col(
                        ColumnDef::new(CommunityAnswers::VisitorName)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CommunityAnswers::VisitorEmail)
                            .string_len(254)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CommunityAnswers::IsVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CommunityAnswers::IsSpam)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CommunityAnswers::Likes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(CommunityAnswers::IpAddress).string_len(45).null())
                    .col(
                        ColumnDef::new(CommunityAnswers::UserAgent)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(CommunityAnswers::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(CommunityAnswers::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_answers_question")
                            .from(CommunityAnswers::Table, CommunityAnswers::QuestionId)
                            .to(PublicQuestions::Table, PublicQuestions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_answers_answered_by")
                            .from(CommunityAnswers::Table, CommunityAnswers::AnsweredBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_community_answers_question_created_at")
                    .table(CommunityAnswers::Table)
                    .col(CommunityAnswers::QuestionId)
                    .col(CommunityAnswers::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserVotes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserVotes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(UserVotes::AnswerId).uuid().not_null())
                    .col(ColumnDef::new(UserVotes::IpAddress).string_len(45).not_null())
                    .col(ColumnDef::new(UserVotes::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_votes_answer")
                            .from(UserVotes::Table, UserVotes::AnswerId)
                            .to(QuestionAnswers::Table, QuestionAnswers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_votes_answer_ip_unique")
                    .table(UserVotes::Table)
                    .col(UserVotes::AnswerId)
                    .col(UserVotes::IpAddress)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CommunityAnswerVotes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommunityAnswerVotes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CommunityAnswerVotes::AnswerId).uuid().not_null())
                    .col(
                        ColumnDef::new(CommunityAnswerVotes::IpAddress)
                            .string_len(45)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommunityAnswerVotes::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_answer_votes_answer")
                            .from(CommunityAnswerVotes::Table, CommunityAnswerVotes::AnswerId)
                            .to(CommunityAnswers::Table, CommunityAnswers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_community_answer_votes_answer_ip_unique")
                    .table(CommunityAnswerVotes::Table)
                    .col(CommunityAnswerVotes::AnswerId)
                    .col(CommunityAnswerVotes::IpAddress)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QuestionReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuestionReports::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuestionReports::QuestionId).uuid().not_null())
                    .col(ColumnDef::new(QuestionReports::AnswerId).uuid().null())
                    .col(
                        ColumnDef::new(QuestionReports::ReportType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(QuestionReports::Description).text().not_null())
                    .col(
                        ColumnDef::new(QuestionReports::ReporterIp)
                            .string_len(45)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuestionReports::ReporterEmail)
                            .string_len(254)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(QuestionReports::IsResolved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(QuestionReports::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_question_reports_question")
                            .from(QuestionReports::Table, QuestionReports::QuestionId)
                            .to(PublicQuestions::Table, PublicQuestions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_question_reports_answer")
                            .from(QuestionReports::Table, QuestionReports::AnswerId)
                            .to(CommunityAnswers::Table, CommunityAnswers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QuestionSubscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuestionSubscriptions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(QuestionSubscriptions::QuestionId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(QuestionSubscriptions::UserId).uuid().null())
                    .col(
                        ColumnDef::new(QuestionSubscriptions::Email)
                            .string_len(254)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(QuestionSubscriptions::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(QuestionSubscriptions::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_question_subscriptions_question")
                            .from(QuestionSubscriptions::Table, QuestionSubscriptions::QuestionId)
                            .to(PublicQuestions::Table, PublicQuestions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_question_subscriptions_user")
                            .from(QuestionSubscriptions::Table, QuestionSubscriptions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // NULL user_id / email never collide, so both pairs can be unique
        manager
            .create_index(
                Index::create()
                    .name("idx_question_subscriptions_question_user_unique")
                    .table(QuestionSubscriptions::Table)
                    .col(QuestionSubscriptions::QuestionId)
                    .col(QuestionSubscriptions::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_question_subscriptions_question_email_unique")
                    .table(QuestionSubscriptions::Table)
                    .col(QuestionSubscriptions::QuestionId)
                    .col(QuestionSubscriptions::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QuestionSubscriptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuestionReports::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CommunityAnswerVotes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserVotes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CommunityAnswers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuestionAnswers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PublicQuestions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuestionCategories::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum QuestionCategories {
    Table,
    Id,
    Name,
    Slug,
    Icon,
    Description,
    SortOrder,
}

#[derive(DeriveIden)]
enum PublicQuestions {
    Table,
    Id,
    VisitorName,
    VisitorEmail,
    VisitorPhone,
    Title,
    QuestionText,
    CategoryId,
    IpAddress,
    UserAgent,
    Status,
    ViewCount,
    IsFrequent,
    Slug,
    MetaDescription,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum QuestionAnswers {
    Table,
    Id,
    QuestionId,
    AnswerText,
    AnsweredBy,
    IsFeatured,
    Likes,
    AnsweredAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CommunityAnswers {
    Table,
    Id,
    QuestionId,
    AnswerText,
    AnsweredBy,
    VisitorName,
    VisitorEmail,
    IsVerified,
    IsSpam,
    Likes,
    IpAddress,
    UserAgent,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserVotes {
    Table,
    Id,
    AnswerId,
    IpAddress,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CommunityAnswerVotes {
    Table,
    Id,
    AnswerId,
    IpAddress,
    CreatedAt,
}

#[derive(DeriveIden)]
enum QuestionReports {
    Table,
    Id,
    QuestionId,
    AnswerId,
    ReportType,
    Description,
    ReporterIp,
    ReporterEmail,
    IsResolved,
    CreatedAt,
}

#[derive(DeriveIden)]
enum QuestionSubscriptions {
    Table,
    Id,
    QuestionId,
    UserId,
    Email,
    IsActive,
    CreatedAt,
}
