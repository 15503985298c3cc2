use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

use crate::error::ConvertError;
use crate::model::{Collection, CollectionPath};

/// Resolves collection ids to their root-first name paths.
///
/// Paths are computed on demand and cached for the lifetime of the resolver;
/// every collection on a resolved chain is cached along the way, so each
/// path is built exactly once no matter the order ids are requested in.
#[derive(Debug)]
pub struct PathResolver<'a> {
    /// ids in input order, so `resolve_all` reports errors deterministically.
    order: Vec<i64>,
    collections: HashMap<i64, &'a Collection>,
    paths: HashMap<i64, CollectionPath>,
}

impl<'a> PathResolver<'a> {
    pub fn new(collections: &'a [Collection]) -> Result<Self, ConvertError> {
        let mut map = HashMap::with_capacity(collections.len());
        for collection in collections {
            if map.insert(collection.id, collection).is_some() {
                return Err(ConvertError::DuplicateCollection { id: collection.id });
            }
        }
        Ok(Self {
            order: collections.iter().map(|c| c.id).collect(),
            collections: map,
            paths: HashMap::with_capacity(collections.len()),
        })
    }

    pub fn resolve(&mut self, id: i64) -> Result<CollectionPath, ConvertError> {
        if let Some(path) = self.paths.get(&id) {
            return Ok(Arc::clone(path));
        }

        // climb towards the root until a cached ancestor or a root is found
        let mut pending: Vec<&'a Collection> = Vec::new();
        let mut on_chain: HashSet<i64> = HashSet::new();
        let mut base: Option<CollectionPath> = None;
        let mut referenced_by = None;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if let Some(path) = self.paths.get(&current) {
                base = Some(Arc::clone(path));
                break;
            }
            if !on_chain.insert(current) {
                let chain = pending
                    .iter()
                    .map(|c| c.id)
                    .skip_while(|c| *c != current)
                    .collect();
                return Err(ConvertError::Cycle { id: current, chain });
            }
            let collection = *self.collections.get(&current).ok_or(
                ConvertError::MissingCollection {
                    id: current,
                    referenced_by,
                },
            )?;
            pending.push(collection);
            referenced_by = Some(current);
            cursor = collection.parent_id;
        }

        // walk back down, caching every collection on the chain
        let mut names: Vec<String> = base.as_deref().map(<[String]>::to_vec).unwrap_or_default();
        let mut resolved = None;
        for collection in pending.into_iter().rev() {
            names.push(collection.name.clone());
            let path: CollectionPath = Arc::from(names.as_slice());
            debug!(id = collection.id, path = ?path, "resolved collection path");
            self.paths.insert(collection.id, Arc::clone(&path));
            resolved = Some(path);
        }
        resolved.ok_or(ConvertError::MissingCollection {
            id,
            referenced_by: None,
        })
    }

    /// Resolve every collection and hand over the cache.
    pub fn resolve_all(mut self) -> Result<HashMap<i64, CollectionPath>, ConvertError> {
        let order = std::mem::take(&mut self.order);
        for id in order {
            self.resolve(id)?;
        }
        Ok(self.paths)
    }
}

pub fn resolve_paths(
    collections: &[Collection],
) -> Result<HashMap<i64, CollectionPath>, ConvertError> {
    PathResolver::new(collections)?.resolve_all()
}
