pub mod media_validation;
pub mod passwords;
pub mod tokens;

pub use media_validation::{MediaLimits, MediaValidationError, ValidatedUpload};
pub use passwords::PasswordHasher;
pub use tokens::{Claims, TokenService};
