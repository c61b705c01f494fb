//! Pagination arithmetic shared by the catalog client and the controller.
//!
//! Pages are 1-based and offsets are 0-based. All functions saturate rather than
//! overflow, so absurd catalog totals still produce a usable page count.

/// Number of pages needed to show `total_items` at `page_size` items per page.
///
/// Uses ceiling division so a partial last page is counted. A zero page size
/// yields zero pages.
///
/// # Examples
///
/// ```
/// use bookshelf::domain::page::total_pages;
///
/// assert_eq!(total_pages(40, 6), 7);
/// assert_eq!(total_pages(36, 6), 6);
/// assert_eq!(total_pages(0, 6), 0);
/// ```
#[must_use]
pub fn total_pages(total_items: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_items.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Clamps a requested page number into `[1, total_pages]`.
///
/// When there are no pages at all the result is 1, so the caller can always
/// compute a non-negative offset.
///
/// # Examples
///
/// ```
/// use bookshelf::domain::page::clamp_page;
///
/// assert_eq!(clamp_page(9, 7), 7);
/// assert_eq!(clamp_page(-3, 7), 1);
/// assert_eq!(clamp_page(4, 0), 1);
/// ```
#[must_use]
pub fn clamp_page(requested: i64, total_pages: u32) -> u32 {
    let upper = i64::from(total_pages.max(1));
    let clamped = requested.clamp(1, upper);
    u32::try_from(clamped).unwrap_or(1)
}

/// Zero-based start offset of a 1-based page.
///
/// # Examples
///
/// ```
/// use bookshelf::domain::page::start_index;
///
/// assert_eq!(start_index(1, 6), 0);
/// assert_eq!(start_index(7, 6), 36);
/// ```
#[must_use]
pub fn start_index(page: u32, page_size: u32) -> u32 {
    page.saturating_sub(1).saturating_mul(page_size)
}

/// 1-based page that begins at `start_index`.
#[must_use]
pub fn page_for_offset(start_index: u32, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    start_index / page_size + 1
}
