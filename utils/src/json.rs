use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("failed to open {:?}", path))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {:?}", path))
}

/// Write `value` as two-space indented json, keeping non-ascii characters as is.
///
/// The document is fully serialized before the file is touched, so a
/// serialization failure never leaves a truncated file behind.
pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut content = serde_json::to_vec_pretty(value)
        .with_context(|| format!("failed to serialize {:?}", path))?;
    content.push(b'\n');

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.is_dir() {
            std::fs::create_dir_all(dir)?;
        }
    }
    std::fs::write(path, content).with_context(|| format!("failed to write {:?}", path))
}
