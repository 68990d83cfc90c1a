pub mod error;
pub mod logger;
pub mod session;

pub use error::{AppError, Result};
pub use session::Session;

#[cfg(test)]
mod tests;
