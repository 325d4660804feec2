/// One page of a list. Pages are numbered from 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Cuts page `page` out of `items`. Out-of-range pages are clamped to the
/// nearest valid one; an empty list yields a single empty page.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);
    Page {
        items: items[start..end].to_vec(),
        page,
        per_page,
        total_items,
        total_pages,
    }
}

/// Cursor of an infinite-scroll list.
///
/// The view renders [`InfiniteScroll::visible`] and reports when the last
/// rendered item scrolls into view; each report reveals one more page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfiniteScroll {
    page_size: usize,
    pages: usize,
}

impl InfiniteScroll {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            pages: 1,
        }
    }

    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = (self.pages * self.page_size).min(items.len());
        &items[..end]
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.pages * self.page_size < total
    }

    /// Called when the last rendered item becomes visible. Returns whether a
    /// new page was revealed.
    pub fn on_last_item_visible(&mut self, total: usize) -> bool {
        if self.has_more(total) {
            self.pages += 1;
            true
        } else {
            false
        }
    }

    /// Back to the first page, e.g. after the filter changed.
    pub fn reset(&mut self) {
        self.pages = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_clamps() {
        let items: Vec<u32> = (1..=25).collect();

        let first = paginate(&items, 1, 12);
        assert_eq!(first.items, (1..=12).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = paginate(&items, 99, 12);
        assert_eq!(last.page, 3);
        assert_eq!(last.items, vec![25]);

        let empty = paginate::<u32>(&[], 0, 12);
        assert_eq!(empty.page, 1);
        assert_eq!(empty.total_pages, 1);
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_infinite_scroll_reveals_pages() {
        let items: Vec<u32> = (1..=30).collect();
        let mut scroll = InfiniteScroll::new(12);
        assert_eq!(scroll.visible(&items).len(), 12);

        assert!(scroll.on_last_item_visible(items.len()));
        assert_eq!(scroll.visible(&items).len(), 24);
        assert!(scroll.on_last_item_visible(items.len()));
        assert_eq!(scroll.visible(&items).len(), 30);
        assert!(!scroll.on_last_item_visible(items.len()));

        scroll.reset();
        assert_eq!(scroll.visible(&items).len(), 12);
    }
}
