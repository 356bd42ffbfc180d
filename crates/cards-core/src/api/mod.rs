//! REST API client module for the Trello service.
//!
//! This module provides the `ApiClient` for fetching boards, lists and
//! cards for a member.
//!
//! Requests are authenticated with the developer key and token passed as
//! `key` and `token` query parameters.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
