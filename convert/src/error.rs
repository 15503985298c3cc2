use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("collection {id} not found{}", referenced_by_msg(.referenced_by))]
    MissingCollection {
        id: i64,
        /// the collection naming `id` as its parent.
        referenced_by: Option<i64>,
    },
    #[error("collection {id} is its own ancestor: {}", chain_msg(.chain))]
    Cycle { id: i64, chain: Vec<i64> },
    #[error("collection id {id} appears more than once")]
    DuplicateCollection { id: i64 },
    #[error("link #{index} in collection {collection} is missing required field `{field}`")]
    MalformedLink {
        collection: i64,
        index: usize,
        field: &'static str,
    },
}

fn referenced_by_msg(referenced_by: &Option<i64>) -> String {
    match referenced_by {
        Some(child) => format!(" (parent of collection {child})"),
        None => String::new(),
    }
}

fn chain_msg(chain: &[i64]) -> String {
    let mut parts: Vec<String> = chain.iter().map(i64::to_string).collect();
    if let Some(first) = chain.first() {
        parts.push(first.to_string());
    }
    parts.join(" -> ")
}
