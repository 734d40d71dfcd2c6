use sea_orm_migration::prelude::*;

/// 奖品表
#[derive(DeriveIden)]
enum Prizes {
    Table,
    Id,
    Name,
    Image,
    Stock,
    Probability,
    CreatedAt,
    UpdatedAt,
}

/// 中奖记录表 (prize_id 为弱引用, 奖品删除后记录仍保留)
#[derive(DeriveIden)]
enum DrawRecords {
    Table,
    Id,
    PrizeId,
    PrizeName,
    CreatedAt,
}

/// 键值配置表
#[derive(DeriveIden)]
enum Settings {
    Table,
    Key,
    Value,
}

/// 音效表
#[derive(DeriveIden)]
enum SoundEffects {
    Table,
    Id,
    Type,
    Name,
    Url,
    IsActive,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Prizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prizes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prizes::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Prizes::Image).string_len(1024).null())
                    .col(
                        ColumnDef::new(Prizes::Stock)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    // 权重, 不要求总和为 100
                    .col(
                        ColumnDef::new(Prizes::Probability)
                            .double()
                            .not_null()
                            .default(1.0),
                    )
                    .col(ColumnDef::new(Prizes::CreatedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Prizes::UpdatedAt).timestamp_with_time_zone().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DrawRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DrawRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DrawRecords::PrizeId).big_integer().not_null())
                    .col(
                        ColumnDef::new(DrawRecords::PrizeName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DrawRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draw_records_prize")
                    .table(DrawRecords::Table)
                    .col(DrawRecords::PrizeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Settings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Settings::Key)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Settings::Value).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SoundEffects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SoundEffects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SoundEffects::Type).string_len(16).not_null())
                    .col(ColumnDef::new(SoundEffects::Name).string_len(255).not_null())
                    .col(ColumnDef::new(SoundEffects::Url).string_len(1024).not_null())
                    .col(
                        ColumnDef::new(SoundEffects::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sound_effects_type")
                    .table(SoundEffects::Table)
                    .col(SoundEffects::Type)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(SoundEffects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Settings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(DrawRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Prizes::Table).to_owned())
            .await?;
        Ok(())
    }
}
