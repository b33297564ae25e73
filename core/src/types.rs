//! Typed request payloads for the calls whose parameters carry structure.
//!
//! Most parameters are scalars or opaque JSON handed straight to the vendor.
//! The types here cover the ones with a documented shape.

use serde::{Deserialize, Serialize, Serializer};

use crate::params::{unset, unset_flag};

/// One entry of a `projectKeywordsRename` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRename {
    pub key_id: u64,
    pub keyword: String,
}

impl KeywordRename {
    pub fn new(key_id: u64, keyword: impl Into<String>) -> Self {
        Self {
            key_id,
            keyword: keyword.into(),
        }
    }
}

/// Whether a project domain is the user's own site or a competitor.
/// Sent as `1` or `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainType {
    Competitor,
    Own,
}

impl Serialize for DomainType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(match self {
            DomainType::Competitor => 0,
            DomainType::Own => 1,
        })
    }
}

/// Optional filters of a `statistic` call.
///
/// Every field is sent under its wire key; fields left as `None` are sent as
/// the unset sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatisticOptions {
    /// Search engine id, `0` for all.
    #[serde(with = "unset")]
    pub se: Option<u64>,
    /// Show only keywords with positions, or all keywords.
    #[serde(with = "unset")]
    pub show: Option<String>,
    /// Unix timestamp of the start of the interval.
    #[serde(with = "unset")]
    pub start_date: Option<i64>,
    /// Unix timestamp of the end of the interval.
    #[serde(with = "unset")]
    pub end_date: Option<i64>,
    /// Comma-separated schedule ids.
    #[serde(with = "unset")]
    pub schedules: Option<String>,
    /// Category id, `-1` for all.
    #[serde(with = "unset")]
    pub category: Option<i64>,
    #[serde(with = "unset")]
    pub search: Option<String>,
    /// Zero-based page number.
    #[serde(with = "unset")]
    pub page: Option<u32>,
    /// `"3"`, `"10"`, `"30"` or `"All"`.
    #[serde(with = "unset")]
    pub top: Option<String>,
    #[serde(with = "unset")]
    pub sort: Option<i64>,
    #[serde(with = "unset_flag")]
    pub withcat: Option<bool>,
    /// Schedules per page.
    #[serde(rename = "pageSize", with = "unset")]
    pub page_size: Option<u32>,
    /// Page for keyword pagination.
    #[serde(rename = "keyPage", with = "unset")]
    pub key_page: Option<u32>,
    #[serde(rename = "withLinks", with = "unset_flag")]
    pub with_links: Option<bool>,
    #[serde(rename = "withAnchors", with = "unset_flag")]
    pub with_anchors: Option<bool>,
    #[serde(rename = "withSnippets", with = "unset_flag")]
    pub with_snippets: Option<bool>,
}

impl StatisticOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_engine(mut self, se: u64) -> Self {
        self.se = Some(se);
        self
    }

    pub fn period(mut self, start_date: i64, end_date: i64) -> Self {
        self.start_date = Some(start_date);
        self.end_date = Some(end_date);
        self
    }

    pub fn category(mut self, category: i64) -> Self {
        self.category = Some(category);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn page(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    pub fn top(mut self, top: impl Into<String>) -> Self {
        self.top = Some(top.into());
        self
    }
}
