//
//  apim-client
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Search Result Envelope
//!
//! The publisher and devportal APIs wrap every listing in the same envelope:
//!
//! ```json
//! {"count": 1, "list": [ ... ], "pagination": {"offset": 0, "limit": 25, "total": 1,
//!  "previous": "", "next": ""}}
//! ```
//!
//! Older versions place `previous`/`next` at the top level instead of inside
//! `pagination`; both layouts deserialize into [`SearchResult`].
//!
//! # Exactly-one lookups
//!
//! Name-based lookups are used to resolve a human-assigned name to the opaque
//! remote identifier. Anything other than a single match is a failure, see
//! [`SearchResult::into_single`].

use serde::{Deserialize, Serialize};

use super::ApiError;

/// A page of results from a list or search endpoint.
///
/// # Type Parameters
///
/// - `T` - The summary type contained in `list`
///
/// # Example
///
/// ```rust
/// use apim_client::api::common::SearchResult;
///
/// let json = r#"{"count": 1, "list": [{"id": "abc"}], "next": ""}"#;
/// let page: SearchResult<serde_json::Value> = serde_json::from_str(json).unwrap();
/// assert_eq!(page.count, 1);
/// assert!(!page.has_next());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult<T> {
    /// Number of matches reported by the platform.
    #[serde(default)]
    pub count: u64,

    /// The summaries on this page.
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,

    /// Cursor for the previous page. Empty or absent on the first page.
    #[serde(default)]
    pub previous: Option<String>,

    /// Cursor for the next page. Empty or absent on the last page.
    #[serde(default)]
    pub next: Option<String>,

    /// Offset/limit block returned by newer platform versions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Offset based pagination block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub offset: u64,

    #[serde(default)]
    pub limit: u64,

    #[serde(default)]
    pub total: u64,

    #[serde(default)]
    pub previous: Option<String>,

    #[serde(default)]
    pub next: Option<String>,
}

impl<T> SearchResult<T> {
    /// Checks if a further page is available.
    ///
    /// Empty cursors count as absent.
    pub fn has_next(&self) -> bool {
        self.next_cursor().is_some()
    }

    /// Returns the cursor for the next page, from either layout.
    pub fn next_cursor(&self) -> Option<&str> {
        let top = self.next.as_deref().filter(|n| !n.is_empty());
        top.or_else(|| {
            self.pagination
                .as_ref()
                .and_then(|p| p.next.as_deref())
                .filter(|n| !n.is_empty())
        })
    }

    /// Consumes the page and returns its only entry.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotFound`] when `count` is zero
    /// - [`ApiError::Ambiguous`] when `count` is greater than one
    /// - [`ApiError::NotFound`] when the platform reports one match but the
    ///   list is empty
    pub fn into_single(self, context: &str, what: &str) -> Result<T, ApiError> {
        match self.count {
            0 => Err(ApiError::not_found(context, what)),
            1 => self
                .list
                .into_iter()
                .next()
                .ok_or_else(|| ApiError::not_found(context, what)),
            n => Err(ApiError::ambiguous(context, what, n)),
        }
    }
}
