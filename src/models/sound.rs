use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{SoundType, sound_effect_entity};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SoundResponse {
    pub id: i64,
    #[serde(rename = "type")]
    pub sound_type: SoundType,
    pub name: String,
    pub url: String,
    pub is_active: bool,
}

impl From<sound_effect_entity::Model> for SoundResponse {
    fn from(m: sound_effect_entity::Model) -> Self {
        SoundResponse {
            id: m.id,
            sound_type: m.sound_type,
            name: m.name,
            url: m.url,
            is_active: m.is_active,
        }
    }
}

/// 当前生效的音效
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ActiveSound {
    #[serde(rename = "type")]
    pub sound_type: SoundType,
    pub name: String,
    pub url: String,
}

impl ActiveSound {
    /// 没有激活音效时使用的内置默认值
    pub fn builtin(sound_type: SoundType) -> Self {
        ActiveSound {
            sound_type,
            name: sound_type.default_name().to_string(),
            url: sound_type.default_url().to_string(),
        }
    }
}

impl From<sound_effect_entity::Model> for ActiveSound {
    fn from(m: sound_effect_entity::Model) -> Self {
        ActiveSound {
            sound_type: m.sound_type,
            name: m.name,
            url: m.url,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActiveSoundsResponse {
    pub hit: ActiveSound,
    pub win: ActiveSound,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateSoundRequest {
    #[serde(rename = "type")]
    pub sound_type: SoundType,
    #[schema(example = "Glass crack")]
    pub name: String,
    #[schema(example = "/audio/crack.mp3")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdateSoundRequest {
    pub name: String,
    pub url: String,
}
