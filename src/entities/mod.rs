pub mod draw_records;
pub mod prizes;
pub mod settings;
pub mod sound_effects;

pub use draw_records as draw_record_entity;
pub use prizes as prize_entity;
pub use settings as setting_entity;
pub use sound_effects as sound_effect_entity;
pub use sound_effects::SoundType;
