pub mod errors;
pub mod models;
pub mod password;
pub mod storage;

pub use errors::{ProfileError, ProfileResult};
pub use models::*;
pub use storage::ProfileStorage;
