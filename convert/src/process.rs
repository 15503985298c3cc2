use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

use crate::link::convert;
use crate::model::Backup;
use crate::resolve::resolve_paths;
use utils::json::{read_json, write_json_pretty};

/// Convert the backup at `input` and write the flat link list to `output`.
///
/// Every collection is resolved and every link converted before `output` is
/// written, any error leaves `output` untouched.
pub fn process(input: &Path, output: &Path) -> Result<usize> {
    info!(input = ?input, output = ?output, "start convert");
    let backup: Backup = read_json(input)?;
    let empty = backup
        .collections
        .iter()
        .filter(|c| c.links.is_empty())
        .count();
    debug!(
        collections = backup.collections.len(),
        empty = empty,
        "loaded backup"
    );

    let paths = resolve_paths(&backup.collections)?;
    let links = convert(&backup.collections, &paths)?;
    write_json_pretty(output, &links)?;

    println!("Converted {} links", links.len());
    println!("Output written to {}", output.display());
    info!(total = links.len(), "finished convert");
    Ok(links.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use crate::model::ConvertedLink;
    use std::path::PathBuf;

    fn get_root() -> PathBuf {
        PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap())
            .parent()
            .unwrap()
            .to_path_buf()
    }

    #[test]
    fn test_process() {
        let input = get_root().join("tests/backup.json");
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output.json");

        let total = process(&input, &output).unwrap();
        assert_eq!(total, 6);

        let links: Vec<ConvertedLink> = read_json(&output).unwrap();
        println!("links: {:#?}", links);
        assert_eq!(links.len(), total);

        let first = &links[0];
        assert_eq!(first.url, "https://doc.rust-lang.org/book/");
        assert_eq!(first.path.to_vec(), vec!["Tech", "Rust"]);
        assert_eq!(first.description, "");

        let deep = links.iter().find(|l| l.name == "Tokio tutorial").unwrap();
        assert_eq!(deep.path.to_vec(), vec!["Tech", "Rust", "Async"]);
        assert_eq!(deep.description, "async runtime");

        let unicode = links.iter().find(|l| l.url == "https://zh.wikipedia.org/").unwrap();
        assert_eq!(unicode.path.to_vec(), vec!["Lesen", "Bücher 📚"]);

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.contains("Bücher 📚"));
        assert!(text.contains("维基百科"));
    }

    #[test]
    fn test_process_dangling_parent() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("backup.json");
        let output = dir.path().join("output.json");
        std::fs::write(
            &input,
            r#"{"collections": [
                {"id": 1, "name": "Tech", "parentId": null,
                 "links": [{"url": "https://a.test", "name": "A"}]},
                {"id": 2, "name": "Rust", "parentId": 99,
                 "links": [{"url": "https://b.test", "name": "B"}]}
            ]}"#,
        )
        .unwrap();

        let err = process(&input, &output).unwrap_err();
        println!("{:#}", err);
        assert_eq!(
            err.downcast_ref::<ConvertError>(),
            Some(&ConvertError::MissingCollection {
                id: 99,
                referenced_by: Some(2)
            })
        );
        assert!(!output.exists());
    }

    #[test]
    fn test_process_malformed_link() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("backup.json");
        let output = dir.path().join("output.json");
        std::fs::write(
            &input,
            r#"{"collections": [
                {"id": 3, "name": "Inbox", "parentId": null,
                 "links": [{"name": "no url"}]}
            ]}"#,
        )
        .unwrap();

        let err = process(&input, &output).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConvertError>(),
            Some(ConvertError::MalformedLink {
                collection: 3,
                field: "url",
                ..
            })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_process_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output.json");
        assert!(process(&dir.path().join("backup.json"), &output).is_err());
        assert!(!output.exists());
    }
}
