pub mod api;
pub mod config;
pub mod error;
pub mod exam;
pub mod export;
pub mod models;
pub mod poll;
pub mod session;
pub mod ui;
pub mod validate;

pub use error::{AppError, Result};
