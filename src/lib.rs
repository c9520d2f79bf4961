//! # Brooklet
//!
//! A reactive RSS aggregator for the terminal.
//!
//! ## Architecture
//!
//! All session state lives in one [`state::Store`]. Actions and the poll
//! loop mutate it; views subscribe to the slices they draw:
//!
//! ```text
//! submit / select ─┐
//!                  ├─> Store ──(change notifier)──> View (TUI, console)
//! poll loop ───────┘
//!     │
//!     └─> ParallelFetcher → Fetcher → Normalizer
//! ```
//!
//! Everything runs on a single thread. Async work (fetches, timers) is
//! interleaved cooperatively on a tokio current-thread runtime inside a
//! `LocalSet`, so the store needs no locks.
//!
//! ## Quick Start
//!
//! ```bash
//! # Check that a URL serves a feed
//! brooklet check https://blog.rust-lang.org/feed.xml
//!
//! # Subscribe and print new posts every 30 seconds
//! brooklet --interval 30s watch https://blog.rust-lang.org/feed.xml
//!
//! # Launch the TUI
//! brooklet tui
//! ```

/// User actions: submitting a feed URL and selecting a post.
pub mod actions;

/// Application context and error handling.
///
/// The [`App`](app::App) struct wires together the store, fetcher,
/// normalizer and id sequence.
pub mod app;

/// Command-line interface using clap.
///
/// - `tui [URL...]` - Launch the TUI
/// - `watch <URL...> [--ticks N]` - Headless subscription and polling
/// - `check <URL>` - Fetch and parse a feed once
pub mod cli;

/// Configuration loaded from `~/.config/brooklet/config.toml`:
/// poll interval, fetch options, locale, colors and keybindings.
pub mod config;

/// Core domain models.
///
/// - [`Feed`](domain::Feed): subscribed channel metadata
/// - [`Post`](domain::Post): an entry, de-duplicated per feed by guid
/// - UI slices: form, loading, modal and viewed-set state
pub mod domain;

/// Fetching of raw feed documents.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for feed fetching
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation, optionally via a proxy
/// - [`ParallelFetcher`](fetcher::ParallelFetcher): Settle-all concurrent fetching with semaphore
pub mod fetcher;

/// Localized user-facing messages.
pub mod locale;

/// Feed parsing and normalization.
///
/// Converts RSS 0.9x/1.0/2.0, Atom 0.3/1.0 and JSON Feed 1.0 into
/// [`ParsedFeed`](normalizer::ParsedFeed) values.
pub mod normalizer;

/// Periodic refresh of all feeds with guid-based merging.
pub mod poller;

/// The state tree and its change notifier.
pub mod state;

/// Terminal user interface built with ratatui.
///
/// Input line, feeds pane, posts pane and a modal for the selected post.
pub mod tui;

/// Feed URL validation.
pub mod validate;

/// Render targets bound to store changes.
pub mod view;

#[cfg(test)]
pub(crate) mod testing;
