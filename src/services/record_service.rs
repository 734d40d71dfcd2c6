use crate::entities::{draw_record_entity as records, prize_entity as prizes};
use crate::error::AppResult;
use crate::models::{
    DrawRecordPageResponse, DrawRecordResponse, PaginatedResponse, PaginationParams, PrizeStock,
    RecordQuery, StatsResponse,
};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use std::collections::HashMap;

/// 中奖记录与统计
#[derive(Clone)]
pub struct RecordService {
    pool: DatabaseConnection,
}

impl RecordService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 分页获取中奖记录（倒序）, 附带奖品当前图片
    pub async fn list(&self, query: &RecordQuery) -> AppResult<DrawRecordPageResponse> {
        let params = PaginationParams::new(query.page, query.per_page);

        let total = records::Entity::find().count(&self.pool).await? as i64;

        let page = records::Entity::find()
            .order_by_desc(records::Column::Id)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let mut prize_ids: Vec<i64> = page.iter().map(|r| r.prize_id).collect();
        prize_ids.sort_unstable();
        prize_ids.dedup();

        let images: HashMap<i64, Option<String>> = if prize_ids.is_empty() {
            HashMap::new()
        } else {
            prizes::Entity::find()
                .filter(prizes::Column::Id.is_in(prize_ids))
                .all(&self.pool)
                .await?
                .into_iter()
                .map(|p| (p.id, p.image))
                .collect()
        };

        let items = page
            .into_iter()
            .map(|r| {
                let image = images.get(&r.prize_id).cloned().flatten();
                DrawRecordResponse::from_model(r, image)
            })
            .collect();

        Ok(PaginatedResponse::new(items, &params, total))
    }

    pub async fn stats(&self) -> AppResult<StatsResponse> {
        let total_draws = records::Entity::find().count(&self.pool).await? as i64;
        let prize_list = prizes::Entity::find()
            .order_by_asc(prizes::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(StatsResponse {
            total_draws,
            total_stock: prize_list.iter().map(|p| p.stock).sum(),
            prizes: prize_list
                .into_iter()
                .map(|p| PrizeStock {
                    id: p.id,
                    name: p.name,
                    stock: p.stock,
                })
                .collect(),
        })
    }
}
