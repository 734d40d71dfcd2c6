use crate::entities::{SoundType, sound_effect_entity as sounds};
use crate::error::{AppError, AppResult};
use crate::models::{
    ActiveSound, ActiveSoundsResponse, CreateSoundRequest, SoundResponse, UpdateSoundRequest,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 音效管理
#[derive(Clone)]
pub struct SoundService {
    pool: DatabaseConnection,
}

impl SoundService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 当前生效的敲击 / 中奖音效, 没有则使用内置默认
    pub async fn active(&self) -> AppResult<ActiveSoundsResponse> {
        let active = sounds::Entity::find()
            .filter(sounds::Column::IsActive.eq(true))
            .order_by_desc(sounds::Column::Id)
            .all(&self.pool)
            .await?;

        let pick = |sound_type: SoundType| {
            active
                .iter()
                .find(|s| s.sound_type == sound_type)
                .cloned()
                .map(ActiveSound::from)
                .unwrap_or_else(|| ActiveSound::builtin(sound_type))
        };

        Ok(ActiveSoundsResponse {
            hit: pick(SoundType::Hit),
            win: pick(SoundType::Win),
        })
    }

    pub async fn list(&self) -> AppResult<Vec<SoundResponse>> {
        let list = sounds::Entity::find()
            .order_by_asc(sounds::Column::SoundType)
            .order_by_desc(sounds::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 新建音效（默认不激活）
    pub async fn create(&self, request: CreateSoundRequest) -> AppResult<SoundResponse> {
        let (name, url) = validate_fields(&request.name, &request.url)?;
        let model = sounds::ActiveModel {
            sound_type: Set(request.sound_type),
            name: Set(name),
            url: Set(url),
            is_active: Set(false),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(model.into())
    }

    pub async fn update(&self, id: i64, request: UpdateSoundRequest) -> AppResult<SoundResponse> {
        let (name, url) = validate_fields(&request.name, &request.url)?;
        let mut model = self.find(id).await?.into_active_model();
        model.name = Set(name);
        model.url = Set(url);
        Ok(model.update(&self.pool).await?.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sounds::Entity::delete_by_id(id).exec(&self.pool).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Sound effect not found".to_string()));
        }
        Ok(())
    }

    /// 激活音效: 同一事务内先停用同类型的全部音效, 再激活目标
    pub async fn activate(&self, id: i64) -> AppResult<SoundResponse> {
        let txn = self.pool.begin().await?;

        let target = sounds::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Sound effect not found".to_string()))?;

        sounds::Entity::update_many()
            .col_expr(sounds::Column::IsActive, Expr::value(false))
            .filter(sounds::Column::SoundType.eq(target.sound_type))
            .exec(&txn)
            .await?;

        let mut model = target.into_active_model();
        model.is_active = Set(true);
        let activated = model.update(&txn).await?;

        txn.commit().await?;
        log::info!(
            "Sound effect {} activated for {:?}",
            activated.id,
            activated.sound_type
        );
        Ok(activated.into())
    }

    async fn find(&self, id: i64) -> AppResult<sounds::Model> {
        sounds::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Sound effect not found".to_string()))
    }
}

fn validate_fields(name: &str, url: &str) -> AppResult<(String, String)> {
    let name = name.trim();
    let url = url.trim();
    if name.is_empty() || url.is_empty() {
        return Err(AppError::ValidationError(
            "Sound name and url are required".to_string(),
        ));
    }
    Ok((name.to_string(), url.to_string()))
}
