pub mod admin;
pub mod draw;

pub use admin::admin_config;
pub use draw::draw_config;
