pub mod auth;
pub mod content;
pub mod gallery;
pub mod health;
pub mod media;
pub mod social;
pub mod uploads;
pub mod users;
