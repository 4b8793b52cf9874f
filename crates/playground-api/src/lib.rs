pub mod error;
pub mod http;
pub mod mock;
pub mod schema;

pub use error::ApiError;
pub use http::{HttpExecutor, DEFAULT_ENDPOINT};
pub use schema::RunPayload;
