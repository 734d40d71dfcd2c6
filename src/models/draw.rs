use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::prize_entity;

pub const POOL_EXHAUSTED_CODE: &str = "POOL_EXHAUSTED";
pub const POOL_EXHAUSTED_MESSAGE: &str = "The prize pool has been exhausted";

/// 中奖奖品（仅返回前端展示所需字段）
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WonPrize {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
}

impl From<prize_entity::Model> for WonPrize {
    fn from(m: prize_entity::Model) -> Self {
        WonPrize {
            id: m.id,
            name: m.name,
            image: m.image,
        }
    }
}

/// 一次抽奖的结果; 奖池抽完是正常结果而不是错误
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOutcome {
    Won(WonPrize),
    Exhausted,
}

impl DrawOutcome {
    pub fn is_won(&self) -> bool {
        matches!(self, DrawOutcome::Won(_))
    }
}

/// 抽奖接口响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize: Option<WonPrize>,
    /// 未中奖时的机器可读原因
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<DrawOutcome> for DrawResponse {
    fn from(outcome: DrawOutcome) -> Self {
        match outcome {
            DrawOutcome::Won(prize) => DrawResponse {
                success: true,
                prize: Some(prize),
                code: None,
                message: None,
            },
            DrawOutcome::Exhausted => DrawResponse {
                success: false,
                prize: None,
                code: Some(POOL_EXHAUSTED_CODE.to_string()),
                message: Some(POOL_EXHAUSTED_MESSAGE.to_string()),
            },
        }
    }
}
