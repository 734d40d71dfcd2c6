use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 音效类型: 敲击 / 中奖
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "lowercase")]
pub enum SoundType {
    #[sea_orm(string_value = "hit")]
    Hit,
    #[sea_orm(string_value = "win")]
    Win,
}

impl SoundType {
    pub fn default_url(&self) -> &'static str {
        match self {
            SoundType::Hit => "/audio/hit.mp3",
            SoundType::Win => "/audio/win.mp3",
        }
    }

    pub fn default_name(&self) -> &'static str {
        match self {
            SoundType::Hit => "Default hit",
            SoundType::Win => "Default win",
        }
    }
}

/// 音效实体; 同一类型最多一条 is_active = true (由激活操作保证)
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sound_effects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "type")]
    pub sound_type: SoundType,
    pub name: String,
    pub url: String,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
