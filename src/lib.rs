pub mod config;
pub mod error;
pub mod handler;
pub mod history;
pub mod inference;

pub use error::{Error, Result};
