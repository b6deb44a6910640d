//! tagmill-corpus - Document discovery and loading for the tagging pipeline.
//!
//! Reads a flat folder of `.txt`/`.md` files into normalized `Document`
//! records, filtering hidden, oversized and binary files. A missing or
//! empty folder is a configuration error; a single unreadable file is not.

mod error;
mod loader;

pub use error::CorpusError;
pub use loader::{CorpusOptions, is_binary, load_documents};
