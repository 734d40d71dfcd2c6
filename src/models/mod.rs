pub mod admin;
pub mod common;
pub mod draw;
pub mod pagination;
pub mod prize;
pub mod record;
pub mod setting;
pub mod sound;

pub use admin::*;
pub use common::*;
pub use draw::*;
pub use pagination::*;
pub use prize::*;
pub use record::*;
pub use setting::*;
pub use sound::*;
