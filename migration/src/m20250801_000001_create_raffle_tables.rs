use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Prizes {
    Table,
    Id,
    Name,
    RangeStart,
    RangeEnd,
    Drawn,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Participants {
    Table,
    Id,
    Name,
    Cedula,
    TicketNumber,
    Active,
    CreatedAt,
    UpdatedAt,
}

/// Winner rows snapshot the participant/prize display fields at draw time so
/// the history stays readable even after a prize is renamed or a participant
/// record changes.
#[derive(DeriveIden)]
enum Winners {
    Table,
    Id,
    PrizeId,
    ParticipantId,
    ParticipantName,
    TicketNumber,
    PrizeName,
    DrawDate,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Prizes
        manager
            .create_table(
                Table::create()
                    .table(Prizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prizes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prizes::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Prizes::RangeStart).integer().not_null())
                    .col(ColumnDef::new(Prizes::RangeEnd).integer().not_null())
                    .col(
                        ColumnDef::new(Prizes::Drawn)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Prizes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Prizes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // Participants
        manager
            .create_table(
                Table::create()
                    .table(Participants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Participants::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Participants::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participants::Cedula)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participants::TicketNumber)
                            .string_len(3)
                            .null(), // NULL = ticket not assigned yet
                    )
                    .col(
                        ColumnDef::new(Participants::Active)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Participants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Participants::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // Cedula identifies a person, one row each
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_participants_cedula_unique")
                    .table(Participants::Table)
                    .col(Participants::Cedula)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Ticket numbers are unique among assigned ones (NULLs don't collide)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_participants_ticket_number_unique")
                    .table(Participants::Table)
                    .col(Participants::TicketNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Winners
        manager
            .create_table(
                Table::create()
                    .table(Winners::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Winners::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Winners::PrizeId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Winners::ParticipantId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Winners::ParticipantName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Winners::TicketNumber)
                            .string_len(3)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Winners::PrizeName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Winners::DrawDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Winners::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // A prize is drawn at most once
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_winners_prize_unique")
                    .table(Winners::Table)
                    .col(Winners::PrizeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // A participant wins at most once
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_winners_participant_unique")
                    .table(Winners::Table)
                    .col(Winners::ParticipantId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Winners::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_winners_prize")
                            .from_tbl(Winners::Table)
                            .from_col(Winners::PrizeId)
                            .to_tbl(Prizes::Table)
                            .to_col(Prizes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Winners::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_winners_participant")
                            .from_tbl(Winners::Table)
                            .from_col(Winners::ParticipantId)
                            .to_tbl(Participants::Table)
                            .to_col(Participants::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop order: winners -> participants -> prizes
        manager
            .drop_table(Table::drop().if_exists().table(Winners::Table).to_owned())
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(Participants::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Prizes::Table).to_owned())
            .await?;

        Ok(())
    }
}
