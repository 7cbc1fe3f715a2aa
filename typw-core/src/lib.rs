//! typw-core: The patient concierge of web font discovery
//!
//! Where its sibling typg rummages through the font folders you already own,
//! typw asks the wider web. Give it half a family name (wrong case, missing
//! words, whatever you half-remember) and it comes back with the canonical
//! family, every `@font-face` variant the stylesheet offers, and a preview
//! URL ready for your UI to render.
//!
//! ## Three Acts of Web Font Discovery
//!
//! **Resolution**: From a vague memory to a canonical name
//! - Fetches the family catalog fresh for every search (no stale snapshots)
//! - Matches exactly first, by substring second, never guessing beyond that
//!
//! **Extraction**: Reading the stylesheet so you don't have to
//! - Pairs every `/* subset */` comment with its `@font-face` block
//! - Records weight, style, source URL, and format for each variant
//! - Sweeps the whole body for every `src: url(...)` it can find
//!
//! **Previewing**: Remembering what it already looked up
//! - One session-scoped cache keyed by normalized family names
//! - At most one fetch in flight per key, however many rows scroll by
//! - Background tasks report back through a listener your shell provides
//!
//! ## A Sample Conversation
//!
//! ```rust,no_run
//! use typw_core::remote::HttpSource;
//! use typw_core::session::FontSession;
//!
//! let session = FontSession::new(HttpSource::new()?);
//!
//! // Who do we know that sounds like "mono"?
//! let hits = session.search("mono")?;
//! for entry in hits.iter().take(15) {
//!     println!("  {}", entry.family);
//! }
//!
//! // Commit to one: resolve it and fetch its face records.
//! let data = session.resolve_and_fetch("roboto")?;
//! println!(
//!     "{}: {} faces, {} source urls",
//!     data.family,
//!     data.fonts.len(),
//!     data.all_urls.len()
//! );
//! # Ok::<(), typw_core::error::FontError>(())
//! ```
//!
//! ## The Cast of Characters
//!
//! - [`session::FontSession`]: the front desk your shell talks to
//! - [`catalog::Catalog`]: one immutable snapshot of the family catalog
//! - [`stylesheet::ResolvedFontData`]: everything one stylesheet admitted to
//! - [`preview::PreviewCache`]: the session's memory of resolved previews
//! - [`remote::RemoteSource`]: the seam where HTTP (or a test fixture) lives
//!
//! ## Playground Rules
//!
//! The core is synchronous; the only suspension point is the network fetch
//! itself. Shells that need async (the typw HTTP server does) wrap calls in
//! their own blocking-task machinery. Errors are typed ([`error::FontError`])
//! and distinguish an unreachable network from a query that matched nothing.
//!
//! ---
//!
//! Crafted with care at FontLab https://www.fontlab.com/

pub mod catalog;
pub mod error;
pub mod listing;
pub mod output;
pub mod preview;
pub mod remote;
pub mod resolve;
pub mod session;
pub mod stylesheet;
