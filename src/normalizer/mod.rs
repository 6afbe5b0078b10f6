//! Dialect normalizers.
//!
//! Every extractor has the shape `fn(&Value, &ParseOptions) -> Option<T>`:
//! it rejects anything that is not a mapping, reads its fields under the
//! effective tag prefix, resolves version fallback chains, and finally lets
//! the entity through only if it passes its presence [`Gate`].

pub mod atom;
pub mod rss;

use tracing::debug;

use crate::app::{FeedloomError, Result};
use crate::detect::{detect_format, Format};
use crate::domain::Feed;
use crate::node::{require_all, require_any, Fields, Mode};
use crate::tree;

/// Request-scoped extraction settings.
///
/// `prefix` is the namespace-mode switch: when set, tags are looked up under
/// that prefix, every gate relaxes to "any field present", and no namespace
/// payloads are attached. It is never set for a document's own root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub mode: Mode,
    pub prefix: Option<&'static str>,
}

impl ParseOptions {
    pub fn new(mode: Mode) -> Self {
        Self { mode, prefix: None }
    }

    /// Same strictness, extracting under a foreign tag prefix.
    pub fn as_namespace(self, prefix: &'static str) -> Self {
        Self {
            prefix: Some(prefix),
            ..self
        }
    }

    pub fn is_namespace(&self) -> bool {
        self.prefix.is_some()
    }

    /// Full tag name of `name` under the effective prefix.
    pub fn tag(&self, name: &str) -> String {
        format!("{}{}", self.prefix.unwrap_or_default(), name)
    }
}

/// Presence gate applied to a candidate entity in top-level mode.
#[derive(Debug, Clone, Copy)]
pub enum Gate {
    /// Every listed field must be present.
    All(&'static [&'static str]),
    /// At least one listed field must be present.
    Any(&'static [&'static str]),
}

/// Emit `candidate` only if it passes `gate`, or in namespace mode, if any of
/// its fields is present.
pub(crate) fn admit<T: Fields>(candidate: T, gate: Gate, options: &ParseOptions) -> Option<T> {
    let passes = match gate {
        _ if options.is_namespace() => require_any(&candidate, T::FIELDS),
        Gate::All(fields) => require_all(&candidate, fields),
        Gate::Any(fields) => require_any(&candidate, fields),
    };

    passes.then_some(candidate)
}

/// First tag of `chain` (in priority order) for which `read` yields a value.
pub(crate) fn first_match<T>(chain: &[&str], mut read: impl FnMut(&str) -> Option<T>) -> Option<T> {
    chain.iter().find_map(|&tag| read(tag))
}

/// [`first_match`] for text: an empty value falls through to the next tag.
pub(crate) fn first_text(
    chain: &[&str],
    mut read: impl FnMut(&str) -> Option<String>,
) -> Option<String> {
    first_match(chain, |tag| read(tag).filter(|text| !text.is_empty()))
}

/// Run a namespace extension unless the current call is itself in namespace
/// mode.
pub(crate) fn attach<T>(options: &ParseOptions, extract: impl FnOnce(Mode) -> Option<T>) -> Option<T> {
    if options.is_namespace() {
        None
    } else {
        extract(options.mode)
    }
}

/// Raw document bytes to canonical [`Feed`].
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: ParseOptions,
}

impl Normalizer {
    pub fn new(mode: Mode) -> Self {
        Self {
            options: ParseOptions::new(mode),
        }
    }

    pub fn mode(&self) -> Mode {
        self.options.mode
    }

    pub fn normalize(&self, body: &[u8]) -> Result<Feed> {
        let text = std::str::from_utf8(body)?;
        let format = detect_format(text)
            .ok_or_else(|| FeedloomError::UnknownFormat("no feed markup found".into()))?;

        self.normalize_as(text, format)
    }

    pub fn normalize_as(&self, text: &str, format: Format) -> Result<Feed> {
        debug!("Normalizing {} document", format);

        let feed = match format {
            Format::Atom => atom::retrieve_feed(&tree::parse(text)?, &self.options),
            Format::Rss | Format::Rdf => rss::retrieve_feed(&tree::parse(text)?, &self.options),
            Format::JsonFeed => {
                return Err(FeedloomError::FeedParse(
                    "JSON Feed documents cannot be normalized".into(),
                ))
            }
        };

        feed.ok_or_else(|| {
            debug!("Root {} element failed its presence gate", format);
            FeedloomError::FeedParse(format!("{format} document has no valid feed element"))
        })
    }
}
