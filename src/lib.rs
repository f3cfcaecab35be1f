/// Blog Service Library
///
/// HTTP/JSON API for a small blog platform: posts organized into groups,
/// comments on posts, and follow subscriptions between users. Reads are
/// public; writes are JWT-authenticated and bound to the author.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route wiring
/// - `models`: Data structures for users, groups, posts, comments, follows
/// - `db`: Database access layer and repositories
/// - `auth`: Token issuance/validation and password verification
/// - `middleware`: HTTP middleware for authentication and request timing
/// - `pagination`: Opt-in limit/offset envelope for list endpoints
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod pagination;

pub use config::Config;
pub use error::{AppError, Result};
