// Pagination engine: page count, visible slice, and validation of page navigation input.
// Callers clamp before paginating; out-of-range pages produce an empty slice, never a panic.

use serde::{Deserialize, Serialize};

use crate::types::*;

/// A page of results borrowed from the filtered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub visible: &'a [T],
    /// `ceil(len / page_size)`. Zero when the filtered set is empty.
    pub total_pages: u32,
}

/// Number of pages needed for `len` items.
pub fn total_pages(len: usize, page_size: PageSize) -> u32 {
    let pages = len.div_ceil(page_size.as_usize());
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Slice out the current page. Does not clamp `current_page`.
pub fn paginate<T>(filtered: &[T], page: PageState) -> Page<'_, T> {
    let total_pages = total_pages(filtered.len(), page.page_size);
    let size = page.page_size.as_usize();

    let visible = match (page.current_page as usize).checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(size);
            if start >= filtered.len() {
                &filtered[0..0]
            } else {
                let end = start.saturating_add(size).min(filtered.len());
                &filtered[start..end]
            }
        }
        // Page 0 has no items.
        None => &filtered[0..0],
    };

    Page {
        visible,
        total_pages,
    }
}

/// Pull a page number into `[1, total_pages]`, or 1 when there are no pages.
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.min(total_pages).max(1)
}

/// Previous page, staying on page 1.
pub fn prev_page(current: u32) -> u32 {
    if current > 1 {
        current - 1
    } else {
        current
    }
}

/// Next page, staying on the last page.
pub fn next_page(current: u32, total_pages: u32) -> u32 {
    if current < total_pages {
        current + 1
    } else {
        current
    }
}

/// Raw "go to page" input as typed by the user.
///
/// `Other` catches `null`, booleans and structures so that junk input is
/// ignored by the reducer instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageEntry {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl PageEntry {
    /// The requested page if the input is a non-negative integer.
    pub fn requested_page(&self) -> Option<u32> {
        match self {
            PageEntry::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().and_then(integral_f64))
                .and_then(|p| u32::try_from(p).ok()),
            PageEntry::Text(text) => {
                let text = text.trim();
                text.parse::<u32>().ok().or_else(|| {
                    text.parse::<f64>()
                        .ok()
                        .and_then(integral_f64)
                        .and_then(|p| u32::try_from(p).ok())
                })
            }
            PageEntry::Other(_) => None,
        }
    }
}

impl Default for PageEntry {
    fn default() -> Self {
        PageEntry::Other(serde_json::Value::Null)
    }
}

impl From<u32> for PageEntry {
    fn from(page: u32) -> Self {
        PageEntry::Number(page.into())
    }
}

impl From<&str> for PageEntry {
    fn from(text: &str) -> Self {
        PageEntry::Text(text.to_string())
    }
}

fn integral_f64(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}

/// Apply a direct page entry. Anything but an integer in `[1, total_pages]` keeps `current`.
pub fn accept_page_entry(entry: &PageEntry, current: u32, total_pages: u32) -> u32 {
    match entry.requested_page() {
        Some(page) if (1..=total_pages).contains(&page) => page,
        _ => {
            tracing::debug!(?entry, current, total_pages, "Ignored page entry");
            current
        }
    }
}
