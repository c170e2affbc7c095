pub mod analyzer;
pub mod changelog;
pub mod config;
pub mod conventional;
pub mod domain;
pub mod error;
pub mod git;
pub mod release;
pub mod resolver;
pub mod ui;
pub mod walker;

pub use error::{NextverError, Result};
