//! Fleet API access: client, session context and error taxonomy.

pub mod client;
pub mod error;
pub mod session;

pub use client::ApiClient;
pub use error::ApiError;
pub use session::Session;
