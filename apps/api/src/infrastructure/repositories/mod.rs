pub mod memory_account_repository;
pub mod memory_content_repository;
pub mod sqlx_account_repository;
pub mod sqlx_content_repository;
