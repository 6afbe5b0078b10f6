//! Namespace extension modules.
//!
//! Each module reads only its own prefixed tags and returns `None` when none
//! of them are present, so a host entity never carries an empty payload.
//! Modules know nothing about each other or about the dialect normalizers.

pub mod dublincore;
pub mod slash;
pub mod syndication;

pub use dublincore::DublinCore;
pub use slash::Slash;
pub use syndication::Syndication;
