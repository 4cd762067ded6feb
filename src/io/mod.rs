//! Input helpers.
//!
//! - source loading from URL or path (`source`)
//! - schema validation + row cleaning (`ingest`)

pub mod ingest;
pub mod source;

pub use ingest::*;
pub use source::*;
