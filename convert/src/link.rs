use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::ConvertError;
use crate::model::{Collection, CollectionPath, ConvertedLink, Link};

/// Flatten the links of every collection, keeping collection order and link
/// order within each collection.
pub fn convert(
    collections: &[Collection],
    paths: &HashMap<i64, CollectionPath>,
) -> Result<Vec<ConvertedLink>, ConvertError> {
    let total = collections.iter().map(|c| c.links.len()).sum();
    let mut converted = Vec::with_capacity(total);

    for collection in collections {
        let path = paths
            .get(&collection.id)
            .ok_or(ConvertError::MissingCollection {
                id: collection.id,
                referenced_by: None,
            })?;
        for (index, link) in collection.links.iter().enumerate() {
            converted.push(convert_link(link, collection.id, index, path)?);
        }
        debug!(
            id = collection.id,
            links = collection.links.len(),
            path = ?path,
            "converted collection"
        );
    }
    Ok(converted)
}

fn convert_link(
    link: &Link,
    collection: i64,
    index: usize,
    path: &CollectionPath,
) -> Result<ConvertedLink, ConvertError> {
    let required = |value: &Option<String>, field: &'static str| {
        value.clone().ok_or(ConvertError::MalformedLink {
            collection,
            index,
            field,
        })
    };
    Ok(ConvertedLink {
        url: required(&link.url, "url")?,
        name: required(&link.name, "name")?,
        description: link.description.clone().unwrap_or_default(),
        path: Arc::clone(path),
    })
}
