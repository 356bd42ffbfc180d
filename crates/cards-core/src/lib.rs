//! Core library for the `cards` command-line client.
//!
//! This crate provides:
//! - `api`: the Trello REST client and its error type
//! - `config`: the on-disk credentials store (`~/.cardsrc`)
//! - `models`: boards, lists and cards as returned by the service
//! - `utils`: text formatting for terminal output

pub mod api;
pub mod config;
pub mod models;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use config::{ConfigStore, Credentials};
pub use models::{Board, Card, List};
