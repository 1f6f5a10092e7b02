pub mod local_storage_service;
pub mod s3_storage_service;
pub mod traits;
