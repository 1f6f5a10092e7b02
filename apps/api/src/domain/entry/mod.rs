pub mod entity;
pub mod media;
pub mod repository;
pub mod value_objects;
