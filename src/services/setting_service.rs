use crate::entities::setting_entity as settings;
use crate::error::{AppError, AppResult};
use crate::models::{
    DEFAULT_EGG_COUNT, DEFAULT_EGG_IMAGE, DEFAULT_EGG_SMASHED_IMAGE, EggConfigResponse,
    EggImageKind, MAX_EGG_COUNT, SmashEffect, UpdateEggConfigRequest,
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use std::collections::HashMap;

pub const EGG_COUNT_KEY: &str = "egg_count";
pub const EGG_IMAGE_KEY: &str = "egg_image";
pub const EGG_SMASHED_IMAGE_KEY: &str = "egg_smashed_image";
pub const EGG_SMASH_EFFECT_KEY: &str = "egg_smash_effect";
pub const ADMIN_PASSWORD_HASH_KEY: &str = "admin_password_hash";

/// 键值配置
#[derive(Clone)]
pub struct SettingService {
    pool: DatabaseConnection,
}

impl SettingService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let row = settings::Entity::find_by_id(key.to_string())
            .one(&self.pool)
            .await?;
        Ok(row.map(|m| m.value))
    }

    pub async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        Self::upsert(&self.pool, key, value).await?;
        Ok(())
    }

    /// 获取金蛋配置, 缺失或无法解析的值使用默认值
    pub async fn egg_config(&self) -> AppResult<EggConfigResponse> {
        let values: HashMap<String, String> = settings::Entity::find()
            .filter(settings::Column::Key.is_in([
                EGG_COUNT_KEY,
                EGG_IMAGE_KEY,
                EGG_SMASHED_IMAGE_KEY,
                EGG_SMASH_EFFECT_KEY,
            ]))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|m| (m.key, m.value))
            .collect();

        Ok(EggConfigResponse {
            egg_count: values
                .get(EGG_COUNT_KEY)
                .and_then(|v| v.trim().parse::<i64>().ok())
                .unwrap_or(DEFAULT_EGG_COUNT),
            egg_image: values
                .get(EGG_IMAGE_KEY)
                .cloned()
                .unwrap_or_else(|| DEFAULT_EGG_IMAGE.to_string()),
            egg_smashed_image: values
                .get(EGG_SMASHED_IMAGE_KEY)
                .cloned()
                .unwrap_or_else(|| DEFAULT_EGG_SMASHED_IMAGE.to_string()),
            egg_smash_effect: values
                .get(EGG_SMASH_EFFECT_KEY)
                .and_then(|v| SmashEffect::parse(v))
                .unwrap_or_default(),
        })
    }

    /// 更新金蛋配置; 先整体校验, 再在一个事务里写入提供的字段
    pub async fn update_egg_config(
        &self,
        request: UpdateEggConfigRequest,
    ) -> AppResult<EggConfigResponse> {
        let mut updates: Vec<(&str, String)> = Vec::new();

        if let Some(count) = request.egg_count {
            if !(1..=MAX_EGG_COUNT).contains(&count) {
                return Err(AppError::ValidationError(format!(
                    "eggCount must be between 1 and {MAX_EGG_COUNT}"
                )));
            }
            updates.push((EGG_COUNT_KEY, count.to_string()));
        }
        if let Some(image) = request.egg_image {
            updates.push((EGG_IMAGE_KEY, require_url(image)?));
        }
        if let Some(image) = request.egg_smashed_image {
            updates.push((EGG_SMASHED_IMAGE_KEY, require_url(image)?));
        }
        if let Some(effect) = request.egg_smash_effect {
            updates.push((EGG_SMASH_EFFECT_KEY, effect.as_str().to_string()));
        }

        if !updates.is_empty() {
            let txn = self.pool.begin().await?;
            for (key, value) in &updates {
                Self::upsert(&txn, key, value).await?;
            }
            txn.commit().await?;
        }

        self.egg_config().await
    }

    /// 保存金蛋图片地址, 返回保存后的地址
    pub async fn set_image_url(&self, kind: EggImageKind, url: Option<String>) -> AppResult<String> {
        let url = require_url(url.unwrap_or_default())?;
        let key = match kind {
            EggImageKind::Egg => EGG_IMAGE_KEY,
            EggImageKind::Smashed => EGG_SMASHED_IMAGE_KEY,
        };
        self.set(key, &url).await?;
        Ok(url)
    }

    async fn upsert<C: ConnectionTrait>(conn: &C, key: &str, value: &str) -> Result<(), DbErr> {
        settings::Entity::insert(settings::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
        })
        .on_conflict(
            OnConflict::column(settings::Column::Key)
                .update_column(settings::Column::Value)
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
        Ok(())
    }
}

fn require_url(url: String) -> AppResult<String> {
    let url = url.trim().to_string();
    if url.is_empty() {
        return Err(AppError::ValidationError("Image URL is required".into()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    #[tokio::test]
    async fn test_seeded_defaults() {
        let service = SettingService::new(test_pool().await);
        let config = service.egg_config().await.unwrap();
        assert_eq!(
            config,
            EggConfigResponse {
                egg_count: 6,
                egg_image: DEFAULT_EGG_IMAGE.into(),
                egg_smashed_image: DEFAULT_EGG_SMASHED_IMAGE.into(),
                egg_smash_effect: SmashEffect::Fade,
            }
        );
    }

    #[tokio::test]
    async fn test_unparsable_values_fall_back_to_defaults() {
        let service = SettingService::new(test_pool().await);
        service.set(EGG_COUNT_KEY, "lots").await.unwrap();
        service.set(EGG_SMASH_EFFECT_KEY, "explode").await.unwrap();

        let config = service.egg_config().await.unwrap();
        assert_eq!(config.egg_count, DEFAULT_EGG_COUNT);
        assert_eq!(config.egg_smash_effect, SmashEffect::Fade);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let service = SettingService::new(test_pool().await);
        let config = service
            .update_egg_config(UpdateEggConfigRequest {
                egg_count: Some(9),
                egg_smash_effect: Some(SmashEffect::Image),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(config.egg_count, 9);
        assert_eq!(config.egg_smash_effect, SmashEffect::Image);
        assert_eq!(config.egg_image, DEFAULT_EGG_IMAGE);
    }

    #[tokio::test]
    async fn test_invalid_update_writes_nothing() {
        let service = SettingService::new(test_pool().await);
        let result = service
            .update_egg_config(UpdateEggConfigRequest {
                egg_image: Some("/images/gold.png".into()),
                egg_count: Some(0),
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(service.egg_config().await.unwrap().egg_image, DEFAULT_EGG_IMAGE);
    }

    #[tokio::test]
    async fn test_set_image_url() {
        let service = SettingService::new(test_pool().await);
        let url = service
            .set_image_url(EggImageKind::Smashed, Some(" https://cdn/x.png ".into()))
            .await
            .unwrap();
        assert_eq!(url, "https://cdn/x.png");
        assert_eq!(
            service.egg_config().await.unwrap().egg_smashed_image,
            "https://cdn/x.png"
        );

        assert!(service.set_image_url(EggImageKind::Egg, None).await.is_err());
    }
}
