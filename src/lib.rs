//! # Feedloom
//!
//! Reads Atom 0.3/1.0, RSS 0.9x/2.0 and RDF documents into one canonical
//! feed model, and writes that model back out as JSON Feed 1.1.
//!
//! ## Architecture
//!
//! ```text
//! Loader → Detect → Tree → Normalizer (+ Namespaces) → Domain → JSON Feed
//! ```
//!
//! - [`tree`]: XML text to a generic node tree
//! - [`normalizer`]: Node tree to the canonical [`Feed`](domain::Feed)
//! - [`jsonfeed`]: Canonical model to JSON Feed output
//!
//! ## Quick Start
//!
//! ```bash
//! # Which dialect is this?
//! feedloom detect feed.xml
//!
//! # Canonical model as JSON
//! feedloom parse feed.xml
//!
//! # JSON Feed 1.1, without coercing scalars
//! feedloom --mode strict parse feed.xml --format jsonfeed
//!
//! # Many documents at once
//! feedloom batch feeds/*.xml
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all components:
/// config, loader, normalizer.
pub mod app;

/// Configuration management.
///
/// Loads from `~/.config/feedloom/config.toml`, supporting:
/// - Parse mode (strict or coerce)
/// - Output format and pretty-printing
/// - Batch worker count
pub mod config;

/// Command-line interface using clap.
///
/// Defines the CLI structure and subcommands:
/// - `detect <path>` - Print the document's dialect
/// - `parse <path> [--format]` - Print the normalized feed
/// - `batch <paths>...` - Normalize many documents concurrently
pub mod cli;

/// Format sniffing on raw document text.
pub mod detect;

/// Canonical feed model.
///
/// - [`Feed`](domain::Feed), [`Entry`](domain::Entry), [`Source`](domain::Source)
/// - [`Person`](domain::Person), [`Link`](domain::Link),
///   [`Category`](domain::Category), [`Generator`](domain::Generator)
pub mod domain;

/// JSON Feed 1.1 model, conversion from the canonical model, and output.
pub mod jsonfeed;

/// Document loading.
///
/// - [`Loader`](loader::Loader): Async trait for reading documents
/// - [`FileLoader`](loader::FileLoader): tokio filesystem implementation
/// - [`ParallelNormalizer`](loader::ParallelNormalizer): Concurrent normalization with semaphore
pub mod loader;

/// Namespace extensions: Dublin Core, Syndication, Slash.
pub mod namespaces;

/// Generic node accessors, scalar coercion and presence gating.
pub mod node;

/// Feed normalization.
///
/// Maps Atom and RSS/RDF node trees onto the canonical
/// [`Feed`](domain::Feed), including Atom elements embedded in RSS.
pub mod normalizer;

/// XML to node tree.
pub mod tree;
