//! Linkwarden backup to flat link list conversion.

mod error;
mod link;
pub mod model;
mod process;
mod resolve;

pub use error::ConvertError;
pub use link::convert;
pub use model::{Backup, Collection, CollectionPath, ConvertedLink, Link};
pub use process::process;
pub use resolve::{PathResolver, resolve_paths};
