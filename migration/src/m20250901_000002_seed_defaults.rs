use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 默认金蛋配置与默认音效
/// 管理员密码不在此处写入: 启动时根据配置生成 bcrypt 哈希
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        let backend = manager.get_database_backend();

        let settings_sql = r#"
INSERT INTO settings ("key", "value")
VALUES
 ('egg_count', '6'),
 ('egg_image', '/images/egg.png'),
 ('egg_smashed_image', '/images/egg-smashed.png'),
 ('egg_smash_effect', 'fade')
ON CONFLICT ("key") DO NOTHING;
"#;
        conn.execute(Statement::from_string(backend, settings_sql.to_string()))
            .await?;

        let sounds_sql = r#"
INSERT INTO sound_effects ("type", "name", "url", "is_active")
VALUES
 ('hit', 'Default hit', '/audio/hit.mp3', TRUE),
 ('win', 'Default win', '/audio/win.mp3', TRUE);
"#;
        conn.execute(Statement::from_string(backend, sounds_sql.to_string()))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        let backend = manager.get_database_backend();
        for sql in ["DELETE FROM sound_effects", "DELETE FROM settings"] {
            conn.execute(Statement::from_string(backend, sql.to_string()))
                .await?;
        }
        Ok(())
    }
}
