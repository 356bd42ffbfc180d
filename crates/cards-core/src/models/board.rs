use serde::{Deserialize, Serialize};

/// A top-level board owned by (or shared with) a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    /// Archived boards are reported as closed
    #[serde(default)]
    pub closed: bool,
}

/// A named column within a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub closed: bool,
}

/// A named item within a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
}

impl Board {
    pub fn is_open(&self) -> bool {
        !self.closed
    }

    /// True when `query` contains this board's name, ignoring case.
    /// A short board name therefore matches a longer, more descriptive query.
    pub fn matches_query(&self, query: &str) -> bool {
        query.to_lowercase().contains(&self.name.to_lowercase())
    }
}

impl List {
    pub fn is_open(&self) -> bool {
        !self.closed
    }
}

/// Pick the first board (in service order) whose name is embedded in `query`.
/// Closed boards are candidates too.
pub fn select_board<'a>(boards: &'a [Board], query: &str) -> Option<&'a Board> {
    boards.iter().find(|b| b.matches_query(query))
}
