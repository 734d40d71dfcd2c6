use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::draw_record_entity;

use super::PaginatedResponse;

/// 中奖记录查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RecordQuery {
    /// 页码 (默认 1)
    pub page: Option<u32>,
    /// 每页数量 (默认 20, 最大 100)
    pub per_page: Option<u32>,
}

/// 中奖记录
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawRecordResponse {
    pub id: i64,
    pub prize_id: i64,
    /// 中奖时的奖品名称快照
    pub prize_name: String,
    /// 当前奖品图片; 奖品已删除时为空
    pub image: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl DrawRecordResponse {
    pub fn from_model(m: draw_record_entity::Model, image: Option<String>) -> Self {
        DrawRecordResponse {
            id: m.id,
            prize_id: m.prize_id,
            prize_name: m.prize_name,
            image,
            created_at: m.created_at,
        }
    }
}

pub type DrawRecordPageResponse = PaginatedResponse<DrawRecordResponse>;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeStock {
    pub id: i64,
    pub name: String,
    pub stock: i64,
}

/// 后台统计
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_draws: i64,
    pub total_stock: i64,
    pub prizes: Vec<PrizeStock>,
}
