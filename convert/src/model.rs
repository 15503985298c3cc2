use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// Root-first collection names, shared by every link of the collection.
pub type CollectionPath = Arc<[String]>;

/// Top level of a Linkwarden backup, everything but the collections is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Backup {
    pub collections: Vec<Collection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// A link as found in the backup. Required fields are checked during
/// conversion so the error can name the owning collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Link {
    pub url: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// The Linksnapper link body, also the element of the converted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedLink {
    pub url: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub path: CollectionPath,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl std::fmt::Display for ConvertedLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) in {}", self.name, self.url, self.path.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_deserialize() {
        let backup: Backup = serde_json::from_str(
            r##"{
                "name": "ignored",
                "collections": [
                    {"id": 1, "name": "Tech", "parentId": null, "color": "#0ea5e9",
                     "links": [{"id": 9, "url": "https://x.test", "name": "X", "description": null}]},
                    {"id": 2, "name": "Rust", "parentId": 1}
                ]
            }"##,
        )
        .unwrap();
        assert_eq!(backup.collections.len(), 2);
        assert_eq!(backup.collections[0].parent_id, None);
        assert_eq!(backup.collections[1].parent_id, Some(1));
        assert!(backup.collections[1].links.is_empty());

        let link = &backup.collections[0].links[0];
        assert_eq!(link.url.as_deref(), Some("https://x.test"));
        assert_eq!(link.description, None);
    }

    #[test]
    fn test_converted_link_shape() {
        let link = ConvertedLink {
            url: "https://x.test".to_owned(),
            name: "X".to_owned(),
            description: String::new(),
            path: Arc::from(vec!["Tech".to_owned(), "Rust".to_owned()]),
        };
        let text = serde_json::to_string(&link).unwrap();
        assert_eq!(
            text,
            r#"{"url":"https://x.test","name":"X","description":"","path":["Tech","Rust"]}"#
        );
        println!("{}", link);
        assert_eq!(link.to_string(), "X (https://x.test) in Tech/Rust");

        let back: ConvertedLink =
            serde_json::from_str(r#"{"url":"https://x.test","name":"X","path":["Tech","Rust"]}"#)
                .unwrap();
        assert_eq!(back, link);

        let back: ConvertedLink = serde_json::from_str(
            r#"{"url":"https://x.test","name":"X","description":null,"path":["Tech","Rust"]}"#,
        )
        .unwrap();
        assert_eq!(back, link);
    }
}
