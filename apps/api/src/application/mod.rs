pub mod accounts;
pub mod comments;
pub mod content;
pub mod identity;
pub mod media;
pub mod reactions;
