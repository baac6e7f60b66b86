//! Page-based and cursor-based exhaustive fetching.
//!
//! Both strategies are written against a fetch closure that takes the query
//! for one page and returns its JSON, so they work the same over the real
//! gateway and over canned pages in tests.

use std::future::Future;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::envelope::Envelope;
use crate::domain::models::operation::Query;

/// Fetch every page of a page-numbered endpoint.
///
/// Pages start at 1 and are requested with `{...query, page, limit}`. A page
/// with fewer than `page_size` items ends the loop, as does a response that
/// is a single object (which is kept) or a scalar (which is not).
pub async fn fetch_all_pages<F, Fut>(
    base_query: &Query,
    page_size: u32,
    mut fetch: F,
) -> DomainResult<Vec<Value>>
where
    F: FnMut(Query) -> Fut,
    Fut: Future<Output = DomainResult<Value>>,
{
    let page_size = page_size.max(1);
    let mut results = Vec::new();
    let mut page: u32 = 1;

    loop {
        let mut query = base_query.clone();
        query.insert("page".to_string(), page.to_string());
        query.insert("limit".to_string(), page_size.to_string());

        let response = fetch(query).await?;
        let has_more = match Envelope::parse(&response) {
            Envelope::Bare(items) | Envelope::Keyed { items, .. } => {
                results.extend_from_slice(items);
                items.len() >= page_size as usize
            }
            Envelope::Single(obj) => {
                results.push(obj.clone());
                false
            }
            Envelope::Empty => false,
        };

        debug!(page, collected = results.len(), has_more, "fetched page");
        if !has_more {
            return Ok(results);
        }
        page += 1;
    }
}

/// Fetch every page of a cursor-paginated endpoint.
///
/// Each request carries `{...query, limit, cursor?}`. A bare array response
/// is taken as the whole result. Otherwise items under the collection key
/// are kept and `nextCursor` is followed until it is missing or empty. At
/// most `max_pages` requests are made.
pub async fn fetch_all_cursor<F, Fut>(
    base_query: &Query,
    page_size: u32,
    max_pages: u32,
    mut fetch: F,
) -> DomainResult<Vec<Value>>
where
    F: FnMut(Query) -> Fut,
    Fut: Future<Output = DomainResult<Value>>,
{
    let mut results = Vec::new();
    let mut cursor: Option<String> = None;

    for page in 1..=max_pages.max(1) {
        let mut query = base_query.clone();
        query.insert("limit".to_string(), page_size.max(1).to_string());
        if let Some(c) = cursor.take() {
            query.insert("cursor".to_string(), c);
        }

        let response = fetch(query).await?;
        match Envelope::parse(&response) {
            Envelope::Bare(items) => {
                results.extend_from_slice(items);
                return Ok(results);
            }
            Envelope::Keyed {
                items, next_cursor, ..
            } => {
                results.extend_from_slice(items);
                cursor = next_cursor.map(str::to_string);
            }
            Envelope::Single(obj) => {
                results.push(obj.clone());
                return Ok(results);
            }
            Envelope::Empty => return Ok(results),
        }

        debug!(page, collected = results.len(), has_cursor = cursor.is_some(), "fetched cursor page");
        if cursor.is_none() {
            return Ok(results);
        }
    }

    warn!(
        max_pages,
        collected = results.len(),
        "cursor pagination stopped at page limit"
    );
    Ok(results)
}
