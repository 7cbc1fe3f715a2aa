use super::*;
use clap::CommandFactory;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::mpsc::channel;

use typw_core::error::{FontError, Result as CoreResult};
use typw_core::preview::Spawner;

const CATALOG_JSON: &str = r#"{
    "familyMetadataList": [
        {"family": "Roboto"},
        {"family": "Roboto Mono"}
    ]
}"#;

const ROBOTO_SHEET: &str = concat!(
    "/* latin */\n",
    "@font-face {\n",
    "  font-style: normal;\n",
    "  font-weight: 400;\n",
    "  src: url(https://cdn.test/roboto-400.woff2);\n",
    "}\n",
);

struct MockSource {
    sheets: HashMap<String, String>,
}

impl MockSource {
    fn live() -> Self {
        Self {
            sheets: HashMap::from([("Roboto".to_string(), ROBOTO_SHEET.to_string())]),
        }
    }
}

impl RemoteSource for MockSource {
    fn catalog_json(&self) -> CoreResult<String> {
        Ok(CATALOG_JSON.to_string())
    }

    fn stylesheet(&self, family: &str) -> CoreResult<String> {
        self.sheets
            .get(family)
            .cloned()
            .ok_or_else(|| FontError::transport(family, "no such fixture"))
    }
}

struct InlineSpawner;

impl Spawner for InlineSpawner {
    fn spawn(&self, task: Box<dyn FnOnce() + Send + 'static>) {
        task();
    }
}

fn entries_of(names: &[&str]) -> Vec<FamilyEntry> {
    names
        .iter()
        .map(|n| FamilyEntry {
            family: n.to_string(),
        })
        .collect()
}

#[test]
fn parses_search_args_with_defaults() {
    let cli = Cli::try_parse_from(["typw", "search", "mono"]).expect("parse cli");

    let args = match cli.command {
        Command::Search(args) => args,
        other => panic!("unexpected command: {other:?}"),
    };

    assert_eq!(args.query, "mono");
    assert_eq!(args.limit, 15);
    assert!(!args.previews);
    assert!(!args.json);
    assert_eq!(args.color, ColorChoice::Auto);
}

#[test]
fn json_and_ndjson_conflict() {
    let parse = Cli::try_parse_from(["typw", "search", "--json", "--ndjson", "mono"]);
    assert!(parse.is_err());
}

#[test]
fn parses_preview_and_color_flags() {
    let cli = Cli::try_parse_from([
        "typw", "search", "-p", "-l", "5", "--color", "always", "mono",
    ])
    .expect("parse cli");

    let args = match cli.command {
        Command::Search(args) => args,
        other => panic!("unexpected command: {other:?}"),
    };

    assert!(args.previews);
    assert_eq!(args.limit, 5);
    assert_eq!(args.color, ColorChoice::Always);
}

#[test]
fn blank_queries_are_rejected_before_any_network() {
    assert!(ensure_query("").is_err());
    assert!(ensure_query("   ").is_err());
    assert_eq!(ensure_query("  Roboto ").expect("trimmed"), "Roboto");
}

#[test]
fn writes_plain_family_list() {
    let mut buf = Cursor::new(Vec::new());
    write_plain(&entries_of(&["Roboto", "Noto Sans"]), &mut buf, false).expect("write");

    let output = String::from_utf8(buf.into_inner()).expect("utf8");
    assert_eq!(output, "Roboto\nNoto Sans\n");
}

#[test]
fn color_choice_is_applied() {
    let mut buf = Cursor::new(Vec::new());
    write_plain(&entries_of(&["Roboto"]), &mut buf, true).expect("write");

    let output = String::from_utf8(buf.into_inner()).expect("utf8");
    assert!(output.contains("\u{1b}["));
}

#[test]
fn preview_columns_align_status_entries() {
    let session =
        FontSession::new(MockSource::live()).with_spawner(std::sync::Arc::new(InlineSpawner));
    let rows = entries_of(&["Roboto", "Roboto Mono"]);

    session.request_preview("Roboto");

    let mut buf = Cursor::new(Vec::new());
    write_preview_columns(&rows, &session, &mut buf, false).expect("write");

    let output = String::from_utf8(buf.into_inner()).expect("utf8");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("https://cdn.test/roboto-400.woff2"));
    assert!(lines[1].contains("(not requested)"));

    let url_pos = lines[0].find("https://").expect("url column");
    let status_pos = lines[1].find("(not requested)").expect("status column");
    assert_eq!(url_pos, status_pos);
}

#[test]
fn drain_returns_once_all_rows_are_terminal() {
    let (tx, rx) = channel();
    let session = FontSession::new(MockSource::live())
        .with_spawner(std::sync::Arc::new(InlineSpawner))
        .with_listener(std::sync::Arc::new(ChannelListener::new(tx)));
    let rows = entries_of(&["Roboto", "Roboto Mono"]);

    for row in &rows {
        session.request_preview(&row.family);
    }

    // Roboto resolves, Roboto Mono fails (no fixture); both are terminal,
    // so the drain must not sit out its full timeout.
    let started = Instant::now();
    drain_previews(&session, &rows, &rx, Duration::from_secs(30));
    assert!(started.elapsed() < Duration::from_secs(5));

    assert!(matches!(
        session.preview_state("Roboto"),
        Some(PreviewState::Resolved(_))
    ));
    assert_eq!(
        session.preview_state("Roboto Mono"),
        Some(PreviewState::Failed)
    );
}

#[test]
fn font_report_lists_faces_and_preview() {
    let session =
        FontSession::new(MockSource::live()).with_spawner(std::sync::Arc::new(InlineSpawner));
    let data = session.resolve_and_fetch("roboto").expect("resolve");

    let mut buf = Cursor::new(Vec::new());
    write_font_report(&data, &mut buf, false).expect("write");

    let output = String::from_utf8(buf.into_inner()).expect("utf8");
    assert!(output.starts_with("Roboto  (1 faces, 1 source urls)"));
    assert!(output.contains("400 normal woff2"));
    assert!(output.contains("preview: https://cdn.test/roboto-400.woff2"));
}

#[test]
fn help_output_includes_subcommands() {
    let mut root = Cli::command();
    let help = root.render_long_help().to_string();
    assert!(help.contains("search"));
    assert!(help.contains("apply"));
    assert!(help.contains("serve"));
}
