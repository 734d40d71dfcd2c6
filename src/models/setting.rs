use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_EGG_COUNT: i64 = 6;
pub const MAX_EGG_COUNT: i64 = 50;
pub const DEFAULT_EGG_IMAGE: &str = "/images/egg.png";
pub const DEFAULT_EGG_SMASHED_IMAGE: &str = "/images/egg-smashed.png";

/// 砸蛋效果: 淡出 / 切换为破碎图片
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SmashEffect {
    #[default]
    Fade,
    Image,
}

impl SmashEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SmashEffect::Fade => "fade",
            SmashEffect::Image => "image",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fade" => Some(SmashEffect::Fade),
            "image" => Some(SmashEffect::Image),
            _ => None,
        }
    }
}

/// 金蛋配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EggConfigResponse {
    pub egg_count: i64,
    pub egg_image: String,
    pub egg_smashed_image: String,
    pub egg_smash_effect: SmashEffect,
}

/// 更新金蛋配置（只更新提供的字段）
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEggConfigRequest {
    pub egg_count: Option<i64>,
    pub egg_image: Option<String>,
    pub egg_smashed_image: Option<String>,
    pub egg_smash_effect: Option<SmashEffect>,
}

/// 图片地址（替代文件上传）
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ImageUrlRequest {
    #[schema(example = "https://cdn.example.com/egg.png")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImageUrlResponse {
    pub url: String,
}

/// 可替换的金蛋图片
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EggImageKind {
    Egg,
    Smashed,
}
