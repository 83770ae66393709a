pub mod boundary;
pub mod changes;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod git_ops;
pub mod store;
pub mod ui;

pub use error::{Result, SgitError};
