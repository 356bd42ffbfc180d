//! Data models for Trello entities.
//!
//! Boards, lists and cards are display-only projections of the service's
//! responses; nothing here is persisted.

pub mod board;

pub use board::{select_board, Board, Card, List};
