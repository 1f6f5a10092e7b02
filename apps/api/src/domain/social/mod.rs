pub mod comment;
pub mod reaction;
