mod loader;
pub mod types;
pub mod validator;

pub use types::*;
pub use validator::*;
