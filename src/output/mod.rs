//! Output module
//!
//! This module turns extracted articles into the final artifact:
//! - `book` assembles chapters, table of contents, and metadata
//! - `epub` packages a [`Book`] into an EPUB archive

mod book;
mod epub;

pub use book::{Book, BookChapter, BookMeta, ERROR_REPORT_TITLE, NO_ARTICLES_TITLE};
pub use epub::{write_epub, EpubError};
