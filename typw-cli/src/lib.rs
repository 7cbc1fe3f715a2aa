//! typw CLI (made by FontLab https://www.fontlab.com/)

use std::io::{self, IsTerminal, Write};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use typw_core::catalog::FamilyEntry;
use typw_core::output::{write_json_pretty, write_ndjson};
use typw_core::preview::{PreviewListener, PreviewState};
use typw_core::remote::{HttpSource, RemoteSource};
use typw_core::session::FontSession;
use typw_core::stylesheet::{FaceFormat, FaceStyle, ResolvedFontData};

pub mod server;

/// CLI entrypoint for typw.
#[derive(Debug, Parser)]
#[command(
    name = "typw",
    about = "Web font search/resolve/preview (made by FontLab https://www.fontlab.com/)"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search the family catalog by substring
    Search(SearchArgs),
    /// Resolve a family name and print its font-face records
    Apply(ApplyArgs),
    /// Serve search/resolve over HTTP
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Substring to match against family names (case-insensitive)
    query: String,

    /// Maximum rows to display
    #[arg(short = 'l', long = "limit", default_value_t = 15)]
    limit: usize,

    /// Resolve preview URLs for the displayed rows
    #[arg(short = 'p', long = "previews", action = ArgAction::SetTrue)]
    previews: bool,

    /// Seconds to wait for preview resolution
    #[arg(long = "preview-timeout", default_value_t = 20)]
    preview_timeout: u64,

    /// Emit a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct ApplyArgs {
    /// Family name to resolve; partial or case-mismatched input is fine
    family: String,

    /// Emit the resolved data as prettified JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Address to bind, e.g. 127.0.0.1:8080
    #[arg(long = "bind", default_value = "127.0.0.1:8080")]
    bind: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Search(args) => run_search(args),
        Command::Apply(args) => run_apply(args),
        Command::Serve(args) => run_serve(args),
    }
}

fn run_search(args: SearchArgs) -> Result<()> {
    let query = ensure_query(&args.query)?;

    let (tx, rx) = channel();
    let session = FontSession::new(HttpSource::new()?)
        .with_listener(Arc::new(ChannelListener::new(tx)));

    let mut rows = session.search(query)?;
    rows.truncate(args.limit);

    if args.previews {
        for row in &rows {
            session.request_preview(&row.family);
        }
        drain_previews(
            &session,
            &rows,
            &rx,
            Duration::from_secs(args.preview_timeout),
        );
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let use_color = match args.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => handle.is_terminal(),
    };

    if args.ndjson {
        write_ndjson(&rows, &mut handle)?;
    } else if args.json {
        write_json_pretty(&rows, &mut handle)?;
        writeln!(handle)?;
    } else if args.previews {
        write_preview_columns(&rows, &session, &mut handle, use_color)?;
    } else {
        write_plain(&rows, &mut handle, use_color)?;
    }

    Ok(())
}

fn run_apply(args: ApplyArgs) -> Result<()> {
    let family = ensure_query(&args.family)?;
    let session = FontSession::new(HttpSource::new()?);
    let data = session.resolve_and_fetch(family)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let use_color = match args.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => handle.is_terminal(),
    };

    if args.json {
        write_json_pretty(&data, &mut handle)?;
        writeln!(handle)?;
    } else {
        write_font_report(&data, &mut handle, use_color)?;
    }

    Ok(())
}

fn run_serve(args: ServeArgs) -> Result<()> {
    let session = Arc::new(FontSession::new(HttpSource::new()?));
    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(server::serve(&args.bind, session))
}

/// Reject blank input before any network traffic happens.
fn ensure_query(raw: &str) -> Result<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("font name must not be blank"));
    }
    Ok(trimmed)
}

/// Forwards resolved-preview notifications into an mpsc channel so the
/// drain loop wakes as soon as a background task lands.
struct ChannelListener {
    tx: Mutex<Sender<(String, String)>>,
}

impl ChannelListener {
    fn new(tx: Sender<(String, String)>) -> Self {
        Self { tx: Mutex::new(tx) }
    }
}

impl PreviewListener for ChannelListener {
    fn preview_ready(&self, family: &str, url: &str) {
        if let Ok(tx) = self.tx.lock() {
            let _ = tx.send((family.to_string(), url.to_string()));
        }
    }
}

/// Wait until every requested row reached a terminal preview state or the
/// deadline passes. Tasks complete in any order; rows are keyed by family.
fn drain_previews<S: RemoteSource + 'static>(
    session: &FontSession<S>,
    rows: &[FamilyEntry],
    rx: &Receiver<(String, String)>,
    timeout: Duration,
) {
    let deadline = Instant::now() + timeout;

    while !all_terminal(session, rows) {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        let wait = (deadline - now).min(Duration::from_millis(100));
        match rx.recv_timeout(wait) {
            Ok(_) | Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

fn all_terminal<S: RemoteSource + 'static>(session: &FontSession<S>, rows: &[FamilyEntry]) -> bool {
    rows.iter().all(|row| {
        matches!(
            session.preview_state(&row.family),
            Some(PreviewState::Resolved(_) | PreviewState::Failed)
        )
    })
}

fn write_plain(rows: &[FamilyEntry], mut w: impl Write, color: bool) -> Result<()> {
    for row in rows {
        let rendered = apply_color(&row.family, color, AnsiColor::Cyan);
        writeln!(w, "{rendered}")?;
    }
    Ok(())
}

fn write_preview_columns<S: RemoteSource + 'static>(
    rows: &[FamilyEntry],
    session: &FontSession<S>,
    mut w: impl Write,
    color: bool,
) -> Result<()> {
    let rendered: Vec<(String, String)> = rows
        .iter()
        .map(|row| {
            let status = match session.preview_state(&row.family) {
                Some(PreviewState::Resolved(url)) => url,
                Some(PreviewState::Pending) => "(pending)".to_string(),
                Some(PreviewState::Failed) => "(failed)".to_string(),
                None => "(not requested)".to_string(),
            };
            (row.family.clone(), status)
        })
        .collect();

    let family_width = rendered
        .iter()
        .map(|r| r.0.len())
        .max()
        .unwrap_or(0)
        .clamp(0, 80);

    for (family, status) in rendered {
        let padded = format!("{:<family_width$}", family);
        writeln!(
            w,
            "{}  {}",
            apply_color(&padded, color, AnsiColor::Cyan),
            apply_color(&status, color, AnsiColor::Green),
        )?;
    }

    Ok(())
}

fn write_font_report(data: &ResolvedFontData, mut w: impl Write, color: bool) -> Result<()> {
    writeln!(
        w,
        "{}  ({} faces, {} source urls)",
        apply_color(&data.family, color, AnsiColor::Cyan),
        data.fonts.len(),
        data.all_urls.len(),
    )?;

    let subset_width = data
        .fonts
        .iter()
        .map(|f| f.subset.len())
        .max()
        .unwrap_or(0)
        .clamp(0, 40);

    for face in &data.fonts {
        let padded_subset = format!("{:<subset_width$}", face.subset);
        let variant = format!(
            "{:>3} {:<6} {:<5}",
            face.weight,
            style_label(face.style),
            format_label(face.format),
        );
        writeln!(
            w,
            "  {}  {}  {}",
            apply_color(&padded_subset, color, AnsiColor::Yellow),
            apply_color(&variant, color, AnsiColor::Green),
            face.url,
        )?;
    }

    if let Some(url) = data.preview_url() {
        writeln!(w, "  preview: {url}")?;
    }

    Ok(())
}

fn style_label(style: FaceStyle) -> &'static str {
    match style {
        FaceStyle::Normal => "normal",
        FaceStyle::Italic => "italic",
    }
}

fn format_label(format: FaceFormat) -> &'static str {
    match format {
        FaceFormat::Woff2 => "woff2",
        FaceFormat::Woff => "woff",
        FaceFormat::Ttf => "ttf",
    }
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Cyan,
    Yellow,
    Green,
}

fn apply_color(text: &str, color: bool, code: AnsiColor) -> String {
    if !color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Cyan => "36",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
    };

    format!("\u{1b}[{}m{}\u{1b}[0m", code_str, text)
}

#[cfg(test)]
mod tests;
