pub mod models;
pub mod parser;
pub mod validator;
pub mod services;
pub mod errors;

pub use models::*;
pub use validator::*;
pub use services::*;
pub use errors::*;
