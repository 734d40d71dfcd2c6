use crate::entities::prize_entity as prizes;
use crate::error::{AppError, AppResult};
use crate::models::{PrizeRequest, PrizeResponse, PublicPrizeResponse};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};

/// 奖品管理
#[derive(Clone)]
pub struct PrizeService {
    pool: DatabaseConnection,
}

impl PrizeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    async fn all_by_weight(&self) -> AppResult<Vec<prizes::Model>> {
        let list = prizes::Entity::find()
            .order_by_desc(prizes::Column::Probability)
            .order_by_asc(prizes::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list)
    }

    /// 前台奖品池（不含权重）
    pub async fn list_public(&self) -> AppResult<Vec<PublicPrizeResponse>> {
        Ok(self
            .all_by_weight()
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub async fn list_all(&self) -> AppResult<Vec<PrizeResponse>> {
        Ok(self
            .all_by_weight()
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub async fn create(&self, request: PrizeRequest) -> AppResult<PrizeResponse> {
        let request = validate_request(request)?;
        let now = Utc::now();

        let model = prizes::ActiveModel {
            name: Set(request.name),
            image: Set(request.image),
            stock: Set(request.stock),
            probability: Set(request.probability),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Prize created: id={} name={}", model.id, model.name);
        Ok(model.into())
    }

    pub async fn update(&self, id: i64, request: PrizeRequest) -> AppResult<PrizeResponse> {
        let request = validate_request(request)?;

        let mut model = prizes::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Prize not found".to_string()))?
            .into_active_model();

        model.name = Set(request.name);
        model.image = Set(request.image);
        model.stock = Set(request.stock);
        model.probability = Set(request.probability);
        model.updated_at = Set(Some(Utc::now()));
        let updated = model.update(&self.pool).await?;

        Ok(updated.into())
    }

    /// 删除奖品; 中奖记录保留
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = prizes::Entity::delete_by_id(id).exec(&self.pool).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Prize not found".to_string()));
        }
        log::info!("Prize deleted: id={id}");
        Ok(())
    }
}

fn validate_request(mut request: PrizeRequest) -> AppResult<PrizeRequest> {
    request.name = request.name.trim().to_string();
    if request.name.is_empty() || request.name.chars().count() > 255 {
        return Err(AppError::ValidationError(
            "Prize name must be between 1 and 255 characters".to_string(),
        ));
    }
    if request.stock < 0 {
        return Err(AppError::ValidationError(
            "Stock must not be negative".to_string(),
        ));
    }
    if !request.probability.is_finite() || request.probability < 0.0 {
        return Err(AppError::ValidationError(
            "Probability must be a non-negative number".to_string(),
        ));
    }
    // 空字符串视为没有图片
    request.image = request
        .image
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    fn request(name: &str, stock: i64, probability: f64) -> PrizeRequest {
        PrizeRequest {
            name: name.to_string(),
            image: Some(String::new()),
            stock,
            probability,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_ordered_by_weight() {
        let service = PrizeService::new(test_pool().await);
        service.create(request("small", 5, 10.0)).await.unwrap();
        let big = service.create(request("big", 1, 80.0)).await.unwrap();
        assert_eq!(big.image, None);

        let list = service.list_public().await.unwrap();
        let names: Vec<_> = list.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["big", "small"]);
    }

    #[tokio::test]
    async fn test_validation() {
        let service = PrizeService::new(test_pool().await);
        for bad in [
            request("  ", 1, 1.0),
            request("neg-stock", -1, 1.0),
            request("neg-weight", 1, -0.5),
            request("nan-weight", 1, f64::NAN),
            request(&"奖".repeat(256), 1, 1.0),
        ] {
            assert!(matches!(
                service.create(bad).await,
                Err(AppError::ValidationError(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_name_limit_counts_characters() {
        let service = PrizeService::new(test_pool().await);
        let name = "一等奖".repeat(85);
        let created = service.create(request(&name, 1, 1.0)).await.unwrap();
        assert_eq!(created.name.chars().count(), 255);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let service = PrizeService::new(test_pool().await);
        let created = service.create(request("mug", 3, 20.0)).await.unwrap();

        let updated = service
            .update(created.id, request("cup", 4, 30.0))
            .await
            .unwrap();
        assert_eq!(updated.name, "cup");
        assert_eq!(updated.stock, 4);

        assert!(matches!(
            service.update(999, request("x", 1, 1.0)).await,
            Err(AppError::NotFound(_))
        ));

        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.delete(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
