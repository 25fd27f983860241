mod error;
pub mod health;
pub mod payments;

pub use error::AppError;
