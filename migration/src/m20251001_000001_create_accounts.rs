use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Username).string_len(150).not_null())
                    .col(ColumnDef::new(Users::Email).string_len(254).not_null())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::Role).string_len(15).not_null())
                    .col(ColumnDef::new(Users::Phone).string_len(20).null())
                    .col(ColumnDef::new(Users::Country).string_len(50).null())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_username_unique")
                    .table(Users::Table)
                    .col(Users::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudentProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StudentProfiles::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(StudentProfiles::FullName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::Age)
                            .integer()
                            .not_null()
                            .default(10),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::Country)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentProfiles::Phone).string_len(15).not_null())
                    .col(
                        ColumnDef::new(StudentProfiles::ParentPhone)
                            .string_len(15)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::PackageName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::LessonsCount)
                            .integer()
                            .not_null()
                            .default(4),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::SessionDuration)
                            .integer()
                            .not_null()
                            .default(30),
                    )
                    .col(ColumnDef::new(StudentProfiles::SupervisorId).uuid().null())
                    .col(ColumnDef::new(StudentProfiles::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(StudentProfiles::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_profiles_user")
                            .from(StudentProfiles::Table, StudentProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_profiles_supervisor")
                            .from(StudentProfiles::Table, StudentProfiles::SupervisorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One profile per user
        manager
            .create_index(
                Index::create()
                    .name("idx_student_profiles_user_unique")
                    .table(StudentProfiles::Table)
                    .col(StudentProfiles::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_student_profiles_supervisor")
                    .table(StudentProfiles::Table)
                    .col(StudentProfiles::SupervisorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sessions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Sessions::StudentProfileId).uuid().not_null())
                    .col(ColumnDef::new(Sessions::Date).timestamp().not_null())
                    .col(
                        ColumnDef::new(Sessions::Status)
                            .string_len(10)
                            .not_null()
                            .default("unset"),
                    )
                    .col(ColumnDef::new(Sessions::Notes).text().null())
                    .col(ColumnDef::new(Sessions::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sessions_student_profile")
                            .from(Sessions::Table, Sessions::StudentProfileId)
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Messages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Messages::SenderId).uuid().not_null())
                    .col(ColumnDef::new(Messages::RecipientId).uuid().not_null())
                    .col(ColumnDef::new(Messages::Content).text().not_null())
                    .col(
                        ColumnDef::new(Messages::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Messages::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_messages_sender")
                            .from(Messages::Table, Messages::SenderId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_messages_recipient")
                            .from(Messages::Table, Messages::RecipientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unread counters
        manager
            .create_index(
                Index::create()
                    .name("idx_messages_recipient_is_read")
                    .table(Messages::Table)
                    .col(Messages::RecipientId)
                    .col(Messages::IsRead)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_messages_sender_recipient")
                    .table(Messages::Table)
                    .col(Messages::SenderId)
                    .col(Messages::RecipientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TrialBookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrialBookings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TrialBookings::Name).string_len(100).not_null())
                    .col(ColumnDef::new(TrialBookings::Country).string_len(100).not_null())
                    .col(ColumnDef::new(TrialBookings::Gender).string_len(10).not_null())
                    .col(ColumnDef::new(TrialBookings::Phone).string_len(20).not_null())
                    .col(ColumnDef::new(TrialBookings::Email).string_len(254).null())
                    .col(ColumnDef::new(TrialBookings::Notes).text().null())
                    .col(
                        ColumnDef::new(TrialBookings::IsContacted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(TrialBookings::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TrialBookings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Username,
    Email,
    Password,
    Role,
    Phone,
    Country,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentProfiles {
    Table,
    Id,
    UserId,
    FullName,
    Age,
    Country,
    Phone,
    ParentPhone,
    PackageName,
    LessonsCount,
    SessionDuration,
    SupervisorId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Sessions {
    Table,
    Id,
    StudentProfileId,
    Date,
    Status,
    Notes,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    Id,
    SenderId,
    RecipientId,
    Content,
    IsRead,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TrialBookings {
    Table,
    Id,
    Name,
    Country,
    Gender,
    Phone,
    Email,
    Notes,
    IsContacted,
    CreatedAt,
}
