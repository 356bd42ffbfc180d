//! The actions behind each subcommand.
//!
//! Actions write their output to the given writer so they can be exercised
//! without a terminal.

use std::io::Write;

use anyhow::{anyhow, Result};
use tracing::debug;

use cards_core::models::select_board;
use cards_core::utils::{format_board_line, format_list_section};
use cards_core::{ApiClient, ConfigStore, Credentials};

/// Binary name used in user-facing hints
pub const PROGRAM_NAME: &str = "cards";

/// Load saved credentials, or print a hint and fall back to empty ones.
pub fn load_credentials(store: &ConfigStore, out: &mut impl Write) -> Result<Credentials> {
    match store.load()? {
        Some(credentials) => Ok(credentials),
        None => {
            writeln!(out, "{} does not exist, yet.", store.path().display())?;
            writeln!(out, "Please run `{} auth`, first.", PROGRAM_NAME)?;
            Ok(Credentials::default())
        }
    }
}

/// `auth [key] [token] [username]`
pub fn auth(store: &ConfigStore, credentials: &Credentials, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Writing authorisation token to {} ... ", store.path().display())?;
    store.save(credentials)?;
    writeln!(out, "Successfully wrote authorisation token to {}", store.path().display())?;
    Ok(())
}

/// `boards`: one `<name> <id>` line per open board
pub async fn boards(store: &ConfigStore, client: &ApiClient, out: &mut impl Write) -> Result<()> {
    let credentials = load_credentials(store, out)?;
    let client = client.with_credentials(&credentials);

    let boards = client.fetch_boards(&credentials.username).await?;
    debug!(count = boards.len(), "Fetched boards");

    for board in boards.iter().filter(|b| b.is_open()) {
        writeln!(out, "{}", format_board_line(board))?;
    }
    Ok(())
}

/// `board <name> show`: cards grouped by open list
pub async fn show_board(
    store: &ConfigStore,
    client: &ApiClient,
    query: &str,
    out: &mut impl Write,
) -> Result<()> {
    let credentials = load_credentials(store, out)?;
    let client = client.with_credentials(&credentials);

    let boards = client.fetch_boards(&credentials.username).await?;
    let board = select_board(&boards, query)
        .ok_or_else(|| anyhow!("no board matching '{}'", query))?;
    debug!(board = %board.name, id = %board.id, "Selected board");

    for (list, cards) in client.fetch_open_lists_with_cards(&board.id).await? {
        out.write_all(format_list_section(&list, &cards).as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cards_core::config::RC_FILE;
    use mockito::{Matcher, Server};
    use tempfile::tempdir;

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    fn saved_store(dir: &tempfile::TempDir) -> ConfigStore {
        let store = ConfigStore::new(dir.path().join(RC_FILE));
        store.save(&Credentials::new("k", "t", "alice")).unwrap();
        store
    }

    #[test]
    fn test_load_credentials_missing_prints_hint() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join(RC_FILE));
        let mut buf = Vec::new();

        let credentials = load_credentials(&store, &mut buf).unwrap();

        assert_eq!(credentials, Credentials::default());
        let text = output(buf);
        assert!(text.contains(&format!("{} does not exist, yet.", store.path().display())));
        assert!(text.contains("Please run `cards auth`, first."));
    }

    #[test]
    fn test_auth_then_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join(RC_FILE));
        let credentials = Credentials::new("key", "token", "alice");
        let mut buf = Vec::new();

        auth(&store, &credentials, &mut buf).unwrap();

        assert!(output(buf).contains("Successfully wrote authorisation token"));
        let mut quiet = Vec::new();
        assert_eq!(load_credentials(&store, &mut quiet).unwrap(), credentials);
        assert!(quiet.is_empty());
    }

    #[test]
    fn test_auth_write_failure_is_reported() {
        let dir = tempdir().unwrap();
        // A directory where the file should be makes the write fail
        let path = dir.path().join(RC_FILE);
        std::fs::create_dir(&path).unwrap();
        let store = ConfigStore::new(path);
        let mut buf = Vec::new();

        assert!(auth(&store, &Credentials::default(), &mut buf).is_err());
        assert!(!output(buf).contains("Successfully"));
    }

    #[tokio::test]
    async fn test_boards_prints_only_open_boards() {
        let dir = tempdir().unwrap();
        let store = saved_store(&dir);
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/1/members/alice/boards")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"[{"id":"b1","name":"Personal","closed":false},{"id":"b2","name":"Work","closed":true}]"#,
            )
            .create_async()
            .await;
        let client = ApiClient::with_base_url(&server.url()).unwrap();
        let mut buf = Vec::new();

        boards(&store, &client, &mut buf).await.unwrap();

        assert_eq!(output(buf), "Personal b1\n");
    }

    #[tokio::test]
    async fn test_show_board_prints_list_sections() {
        let dir = tempdir().unwrap();
        let store = saved_store(&dir);
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/1/members/alice/boards")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"id":"b1","name":"Personal","closed":false}]"#)
            .create_async()
            .await;
        server
            .mock("GET", "/1/boards/b1/lists")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"[{"id":"l1","name":"To Do","closed":false},{"id":"l2","name":"Old","closed":true}]"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/1/lists/l1/cards")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"id":"c1","name":"Buy milk"},{"id":"c2","name":"Call Bob"}]"#)
            .create_async()
            .await;
        let client = ApiClient::with_base_url(&server.url()).unwrap();
        let mut buf = Vec::new();

        show_board(&store, &client, "my personal board", &mut buf)
            .await
            .unwrap();

        assert_eq!(output(buf), "To Do\n-----\nBuy milk\nCall Bob\n\n");
    }

    #[tokio::test]
    async fn test_show_board_without_match_fails() {
        let dir = tempdir().unwrap();
        let store = saved_store(&dir);
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/1/members/alice/boards")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"id":"b1","name":"Personal","closed":false}]"#)
            .create_async()
            .await;
        let client = ApiClient::with_base_url(&server.url()).unwrap();
        let mut buf = Vec::new();

        let err = show_board(&store, &client, "groceries", &mut buf)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "no board matching 'groceries'");
        assert!(buf.is_empty());
    }
}
