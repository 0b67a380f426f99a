//! tasklist - a single-user to-do list served over HTTP
//!
//! Tasks and categories live in memory and are mirrored to two JSON files,
//! rewritten in full after every change.
//!
//! - `task`, `task_store`: task records and their file-backed sequence
//! - `category_store`: the category list
//! - `view`: countdown text, ordering and filtering for display
//! - `board`: the state object request handlers mutate through
//! - `server`, `ui`: axum routes and the HTML page
//! - `config`, `cli`: settings from TOML, flags and environment

pub mod board;
pub mod category_store;
pub mod cli;
pub mod config;
pub mod error;
pub mod persist;
pub mod server;
pub mod task;
pub mod task_store;
pub mod ui;
pub mod view;

pub use error::{Error, Result};
