pub mod auth_service;
pub mod draw_service;
pub mod prize_service;
pub mod record_service;
pub mod setting_service;
pub mod sound_service;

pub use auth_service::*;
pub use draw_service::*;
pub use prize_service::*;
pub use record_service::*;
pub use setting_service::*;
pub use sound_service::*;
