use std::num::NonZeroUsize;
use std::ops::Range;

/// Number of pages needed for `count` items. An empty result still has one
/// (empty) page.
pub fn total_pages(count: usize, page_size: NonZeroUsize) -> NonZeroUsize {
    NonZeroUsize::new(count.div_ceil(page_size.get())).unwrap_or(NonZeroUsize::MIN)
}

/// Index range of `page` (1-based) within `count` items, truncated at the
/// end of the list. Pages past the end yield an empty range.
pub fn page_range(page: usize, page_size: NonZeroUsize, count: usize) -> Range<usize> {
    let start = page
        .saturating_sub(1)
        .saturating_mul(page_size.get())
        .min(count);
    let end = start.saturating_add(page_size.get()).min(count);
    start..end
}
