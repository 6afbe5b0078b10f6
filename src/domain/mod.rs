pub mod elements;
pub mod feed;

pub use elements::{Category, Generator, Link, Person};
pub use feed::{Entry, Feed, Source};
