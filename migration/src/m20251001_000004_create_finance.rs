use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Teachers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Teachers::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Teachers::JobTitle)
                            .string_len(20)
                            .not_null()
                            .default("junior"),
                    )
                    .col(
                        ColumnDef::new(Teachers::Salary)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Teachers::WorkingHours)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Teachers::Bonus)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Teachers::Deduction)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Teachers::Notes).text().null())
                    .col(ColumnDef::new(Teachers::StartDate).date().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FinanceStudents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FinanceStudents::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FinanceStudents::TeacherId).uuid().null())
                    .col(ColumnDef::new(FinanceStudents::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(FinanceStudents::SessionDuration)
                            .integer()
                            .not_null()
                            .default(30),
                    )
                    .col(
                        ColumnDef::new(FinanceStudents::LessonsCount)
                            .integer()
                            .not_null()
                            .default(4),
                    )
                    .col(
                        ColumnDef::new(FinanceStudents::PaymentType)
                            .string_len(20)
                            .not_null()
                            .default("monthly"),
                    )
                    .col(
                        ColumnDef::new(FinanceStudents::PaidAmount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FinanceStudents::JoinDate).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_finance_students_teacher")
                            .from(FinanceStudents::Table, FinanceStudents::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_finance_students_join_date")
                    .table(FinanceStudents::Table)
                    .col(FinanceStudents::JoinDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Expenses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Expenses::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Expenses::Amount).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Expenses::Date).date().not_null())
                    .col(ColumnDef::new(Expenses::Notes).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_date")
                    .table(Expenses::Table)
                    .col(Expenses::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FinanceStudents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Teachers {
    Table,
    Id,
    Name,
    JobTitle,
    Salary,
    WorkingHours,
    Bonus,
    Deduction,
    Notes,
    StartDate,
}

#[derive(DeriveIden)]
enum FinanceStudents {
    Table,
    Id,
    TeacherId,
    Name,
    SessionDuration,
    LessonsCount,
    PaymentType,
    PaidAmount,
    JoinDate,
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    Title,
    Amount,
    Date,
    Notes,
}
