pub mod jwt;
pub mod password;
pub mod weighted;

pub use jwt::*;
pub use password::*;
pub use weighted::{DEFAULT_WEIGHT_WINDOW, pick_index};
