//! Utility functions for terminal output formatting.

pub mod format;

pub use format::{format_board_line, format_list_section, underline};
