use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 中奖记录实体
/// 说明:
/// - 每次成功抽奖产生一条记录, 之后不再修改
/// - prize_id 不建外键, 奖品删除后记录保留
/// - prize_name 为中奖时刻的名称快照
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "draw_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub prize_id: i64,
    pub prize_name: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
