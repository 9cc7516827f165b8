//! Query types and boundary normalization.
//!
//! Everything caller-supplied is normalized exactly once, here. Code past
//! this boundary never sees raw limits, untrimmed terms, or unknown
//! operator strings.

use serde::{Deserialize, Serialize};

/// Smallest page size a caller can request.
pub const MIN_LIMIT: usize = 1;
/// Largest page size a caller can request.
pub const MAX_LIMIT: usize = 500;
/// Page size used when the caller supplies none.
pub const DEFAULT_LIMIT: usize = 100;

/// Combination mode for multiple required tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TagOperator {
    /// Every required tag must be present (intersection).
    #[default]
    And,
    /// At least one required tag must be present (union).
    Or,
}

impl TagOperator {
    /// Parse a caller-supplied operator string. Anything that is not a
    /// recognizable "OR" normalizes to AND rather than erroring.
    pub fn parse_lenient(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("or") {
            TagOperator::Or
        } else {
            TagOperator::And
        }
    }
}

/// Coarse file-type category a search can be restricted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileTypeCategory {
    /// No type restriction.
    #[default]
    None,
    Image,
    Document,
    Video,
    Audio,
    Pdf,
}

impl FileTypeCategory {
    /// Parse a caller-supplied category string; unknown values mean
    /// "no filter" rather than an error.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "image" => FileTypeCategory::Image,
            "document" => FileTypeCategory::Document,
            "video" => FileTypeCategory::Video,
            "audio" => FileTypeCategory::Audio,
            "pdf" => FileTypeCategory::Pdf,
            _ => FileTypeCategory::None,
        }
    }

    /// Whether this category actually restricts anything.
    pub fn is_set(&self) -> bool {
        !matches!(self, FileTypeCategory::None)
    }

    /// SQL `LIKE` patterns for the metadata catalog, one per accepted
    /// mimetype family. The table is fixed; it must stay in sync with
    /// [`FileTypeCategory::matches`].
    pub fn mime_patterns(&self) -> &'static [&'static str] {
        match self {
            FileTypeCategory::None => &[],
            FileTypeCategory::Image => &["image/%"],
            FileTypeCategory::Document => &[
                "text/%",
                "application/msword%",
                "application/vnd.openxmlformats-officedocument.wordprocessingml%",
                "application/vnd.oasis.opendocument.text%",
            ],
            FileTypeCategory::Video => &["video/%"],
            FileTypeCategory::Audio => &["audio/%"],
            FileTypeCategory::Pdf => &["application/pdf"],
        }
    }

    /// In-process predicate used to re-apply the type constraint when a
    /// retrieval path could not enforce it natively.
    pub fn matches(&self, mimetype: &str) -> bool {
        match self {
            FileTypeCategory::None => true,
            FileTypeCategory::Image => mimetype.starts_with("image/"),
            FileTypeCategory::Document => {
                mimetype.starts_with("text/")
                    || mimetype.starts_with("application/msword")
                    || mimetype
                        .starts_with("application/vnd.openxmlformats-officedocument.wordprocessingml")
                    || mimetype.starts_with("application/vnd.oasis.opendocument.text")
            }
            FileTypeCategory::Video => mimetype.starts_with("video/"),
            FileTypeCategory::Audio => mimetype.starts_with("audio/"),
            FileTypeCategory::Pdf => mimetype == "application/pdf",
        }
    }
}

/// The shape of a query decides which retrieval path serves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryShape {
    /// Filename term and tags both present.
    NameAndTags,
    /// Filename term only.
    NameOnly,
    /// Tags only.
    TagsOnly,
    /// File-type category only.
    TypeOnly,
    /// No criteria at all.
    Empty,
}

/// A normalized search query.
///
/// Construct through [`SearchQuery::normalized`]; the raw constructor is
/// intentionally absent so clamping cannot be skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Trimmed filename term; may be empty.
    pub filename: String,
    /// Required tag names, deduplicated, empties dropped, caller order kept.
    pub tags: Vec<String>,
    pub tag_operator: TagOperator,
    pub file_type: FileTypeCategory,
    /// Page size, clamped to `[MIN_LIMIT, MAX_LIMIT]`.
    pub limit: usize,
    /// Page start, clamped to `>= 0`.
    pub offset: usize,
    /// Caller hint: attempt the full-text provider when a filename term exists.
    pub use_full_text: bool,
}

impl SearchQuery {
    /// Build a query from raw caller input, applying every normalization
    /// invariant: trim the term, drop empty and duplicate tags, clamp
    /// limit and offset.
    pub fn normalized(
        filename: &str,
        tags: Vec<String>,
        tag_operator: TagOperator,
        file_type: FileTypeCategory,
        limit: i64,
        offset: i64,
        use_full_text: bool,
    ) -> Self {
        let mut seen = std::collections::HashSet::new();
        let tags: Vec<String> = tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .filter(|t| seen.insert(t.clone()))
            .collect();

        Self {
            filename: filename.trim().to_string(),
            tags,
            tag_operator,
            file_type,
            limit: (limit.max(MIN_LIMIT as i64).min(MAX_LIMIT as i64)) as usize,
            offset: offset.max(0) as usize,
            use_full_text,
        }
    }

    /// An empty query with default paging, useful as a test base.
    pub fn empty() -> Self {
        Self::normalized(
            "",
            Vec::new(),
            TagOperator::And,
            FileTypeCategory::None,
            DEFAULT_LIMIT as i64,
            0,
            true,
        )
    }

    pub fn has_filename(&self) -> bool {
        !self.filename.is_empty()
    }

    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }

    /// Classify the query shape for path selection (first match wins).
    pub fn shape(&self) -> QueryShape {
        match (self.has_filename(), self.has_tags(), self.file_type.is_set()) {
            (true, true, _) => QueryShape::NameAndTags,
            (true, false, _) => QueryShape::NameOnly,
            (false, true, _) => QueryShape::TagsOnly,
            (false, false, true) => QueryShape::TypeOnly,
            (false, false, false) => QueryShape::Empty,
        }
    }
}

/// The user a request resolves against. Always passed explicitly; the
/// engine has no ambient current-user lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: String,
}

impl UserContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}
