//! Catalog item types.

use serde::{Deserialize, Serialize};

/// Opaque identifier of a file in the metadata catalog.
pub type ItemId = i64;

/// Mimetype the catalog stores for directory entries; directories are
/// never part of a search result.
pub const DIRECTORY_MIMETYPE: &str = "httpd/unix-directory";

/// One catalog row, as fetched for filtering and formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    pub name: String,
    pub path: String,
    pub size: i64,
    /// Modification time, epoch seconds.
    pub mtime: i64,
    pub mimetype: String,
    pub is_dir: bool,
}

impl ItemRecord {
    /// Only plain files are ever surfaced by a search.
    pub fn is_file(&self) -> bool {
        !self.is_dir && self.mimetype != DIRECTORY_MIMETYPE
    }
}
