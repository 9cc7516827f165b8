//! Search result types.
//!
//! Everything here is constructed fresh for one request and never mutated
//! after the envelope is assembled.

use serde::{Deserialize, Serialize};

use super::item::ItemId;

/// A tag as stored in the tag index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub id: i64,
    pub name: String,
    /// Whether end users may assign this tag themselves.
    pub assignable: bool,
    pub color: Option<String>,
}

impl TagRecord {
    /// Display color: an explicit color wins, otherwise assignable tags
    /// render blue and restricted tags red.
    pub fn color_hint(&self) -> String {
        match &self.color {
            Some(c) => c.clone(),
            None if self.assignable => "blue".to_string(),
            None => "red".to_string(),
        }
    }
}

/// Tag annotation attached to a result record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTag {
    pub id: i64,
    pub name: String,
    pub color: String,
}

impl From<&TagRecord> for ResultTag {
    fn from(tag: &TagRecord) -> Self {
        Self {
            id: tag.id,
            name: tag.name.clone(),
            color: tag.color_hint(),
        }
    }
}

/// One fully expanded search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: ItemId,
    pub name: String,
    pub path: String,
    pub size: i64,
    /// Modification time, epoch seconds.
    pub mtime: i64,
    pub mimetype: String,
    pub tags: Vec<ResultTag>,
    /// Relevance score, only when the full-text provider supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
    /// Content excerpt, only when the full-text provider supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

/// Which retrieval path actually served a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPath {
    /// The external full-text provider produced the candidates.
    Fulltext,
    /// An exact-match path served the request directly.
    Traditional,
    /// Full text was attempted and the request fell back to an exact path.
    TraditionalFallback,
}

impl SearchPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchPath::Fulltext => "fulltext",
            SearchPath::Traditional => "traditional",
            SearchPath::TraditionalFallback => "traditional_fallback",
        }
    }
}

/// The uniform result envelope every search produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub success: bool,
    /// Page items, in retrieval-path order after filtering.
    pub items: Vec<ResultRecord>,
    /// Count of matches after filtering, before pagination.
    pub total_count: usize,
    pub limit: usize,
    pub offset: usize,
    pub search_path: SearchPath,
    /// Whether the full-text provider reported itself usable for this
    /// request, independent of whether it was attempted.
    pub full_text_available: bool,
    /// Engine-side resolution time.
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hint_prefers_explicit_color() {
        let tag = TagRecord {
            id: 1,
            name: "work".into(),
            assignable: true,
            color: Some("#336699".into()),
        };
        assert_eq!(tag.color_hint(), "#336699");
    }

    #[test]
    fn color_hint_tracks_assignability() {
        let assignable = TagRecord {
            id: 1,
            name: "work".into(),
            assignable: true,
            color: None,
        };
        let restricted = TagRecord {
            assignable: false,
            ..assignable.clone()
        };
        assert_eq!(assignable.color_hint(), "blue");
        assert_eq!(restricted.color_hint(), "red");
    }

    #[test]
    fn search_path_wire_names() {
        assert_eq!(
            serde_json::to_string(&SearchPath::TraditionalFallback).unwrap(),
            "\"traditional_fallback\""
        );
        assert_eq!(SearchPath::Fulltext.as_str(), "fulltext");
    }
}
