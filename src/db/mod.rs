/// Database access layer
///
/// Repository functions over the shared Postgres pool. Read queries join
/// the owning username wherever the API exposes one. Functions return raw
/// sqlx errors; handlers translate them into API errors.
pub mod comment_repo;
pub mod follow_repo;
pub mod group_repo;
pub mod post_repo;
pub mod user_repo;
