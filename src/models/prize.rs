use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::prize_entity;

/// 前台展示的奖品信息（不暴露权重）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicPrizeResponse {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub stock: i64,
}

impl From<prize_entity::Model> for PublicPrizeResponse {
    fn from(m: prize_entity::Model) -> Self {
        PublicPrizeResponse {
            id: m.id,
            name: m.name,
            image: m.image,
            stock: m.stock,
        }
    }
}

/// 后台奖品信息
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeResponse {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub stock: i64,
    /// 权重 (非负, 不要求总和为 100)
    pub probability: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<prize_entity::Model> for PrizeResponse {
    fn from(m: prize_entity::Model) -> Self {
        PrizeResponse {
            id: m.id,
            name: m.name,
            image: m.image,
            stock: m.stock,
            probability: m.probability,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// 新增 / 修改奖品（修改为整体替换）
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PrizeRequest {
    #[schema(example = "Teddy bear")]
    pub name: String,
    #[schema(example = "/images/bear.png")]
    pub image: Option<String>,
    #[schema(example = 10)]
    pub stock: i64,
    #[schema(example = 25.0)]
    pub probability: f64,
}
