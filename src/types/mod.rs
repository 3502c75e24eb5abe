pub mod constants;
pub mod error;
pub mod info;

pub use constants::*;
pub use error::RaycastError;
pub use info::GridInfo;
