pub mod account;
pub mod entry;
pub mod identity;
pub mod shared;
pub mod social;
