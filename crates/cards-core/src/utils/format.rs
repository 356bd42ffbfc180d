use crate::models::{Board, Card, List};

/// A row of dashes as long as `text`, counted in characters
pub fn underline(text: &str) -> String {
    "-".repeat(text.chars().count())
}

/// Format a board as `<name> <id>`
pub fn format_board_line(board: &Board) -> String {
    format!("{} {}", board.name, board.id)
}

/// Format a list with its cards as one block:
/// the list name, its underline, one card per line, then a blank line.
pub fn format_list_section(list: &List, cards: &[Card]) -> String {
    let mut out = String::new();
    out.push_str(&list.name);
    out.push('\n');
    out.push_str(&underline(&list.name));
    out.push('\n');
    for card in cards {
        out.push_str(&card.name);
        out.push('\n');
    }
    out.push('\n');
    out
}
