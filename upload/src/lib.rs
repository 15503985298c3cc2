//! Bulk upload of converted links into Linksnapper.

mod client;
mod error;
mod process;

pub use client::{UploadSummary, Uploader};
pub use error::UploadError;
pub use process::process;
