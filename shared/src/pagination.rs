use serde::{Serialize, Serializer};

/// One slot in a compact pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

impl PageItem {
    pub fn is_ellipsis(self) -> bool {
        matches!(self, Self::Ellipsis)
    }

    pub fn page(self) -> Option<u32> {
        match self {
            Self::Page(page) => Some(page),
            Self::Ellipsis => None,
        }
    }
}

/// Pages serialize as bare numbers, the marker as the string `"ellipsis"`.
impl Serialize for PageItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Page(page) => serializer.serialize_u32(*page),
            Self::Ellipsis => serializer.serialize_str("ellipsis"),
        }
    }
}

/// Page numbers (and gap markers) to render around `current_page`.
///
/// Page 1 and `total_pages` are always shown, plus the neighbours of the current page.
/// A leading ellipsis appears once `current_page > 3`; a trailing one while
/// `current_page < total_pages - 2`. With 4 pages the result is asymmetric: page 4 gets
/// a leading ellipsis that hides only page 2.
pub fn visible_pages(current_page: u32, total_pages: u32) -> Vec<PageItem> {
    if total_pages <= 1 {
        return vec![PageItem::Page(1)];
    }

    let mut pages = vec![PageItem::Page(1)];
    let show_ellipsis_start = current_page > 3;
    let show_ellipsis_end = current_page.saturating_add(2) < total_pages;

    if show_ellipsis_start {
        pages.push(PageItem::Ellipsis);
    }

    let window_start = current_page.saturating_sub(1).max(2);
    let window_end = (total_pages - 1).min(current_page.saturating_add(1));
    for page in window_start..=window_end {
        if !pages.contains(&PageItem::Page(page)) {
            pages.push(PageItem::Page(page));
        }
    }

    if show_ellipsis_end {
        pages.push(PageItem::Ellipsis);
    }

    if !pages.contains(&PageItem::Page(total_pages)) {
        pages.push(PageItem::Page(total_pages));
    }

    pages
}

/// Paging figures extracted from an upstream list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl PaginationMeta {
    /// `total_pages = ceil(total / page_size)`; zero when there is nothing to page
    /// (including a degenerate `page_size` of zero).
    pub fn from_response(current_page: u32, page_size: u32, total: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
        };
        Self {
            current_page,
            page_size,
            total,
            total_pages,
        }
    }

    pub fn has_multiple_pages(&self) -> bool {
        self.total_pages > 1
    }
}
