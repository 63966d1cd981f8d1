use std::ops::Range;

pub const PAGE_SIZE: usize = 3;

/// `ceil(total_items / PAGE_SIZE)`, never less than one so an empty history
/// still has a placeholder page.
pub fn page_count(total_items: usize) -> usize {
    total_items.div_ceil(PAGE_SIZE).max(1)
}

/// 分頁狀態，不會被保存，每次都從 `total_items` 重新推導
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Paginator {
    page_index: usize,
    total_items: usize,
}

impl Paginator {
    pub fn new(total_items: usize) -> Self {
        Self {
            page_index: 0,
            total_items,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn page_count(&self) -> usize {
        page_count(self.total_items)
    }

    fn last_page(&self) -> usize {
        self.page_count() - 1
    }

    /// Recomputes bounds for a new item count. The index is only ever clamped
    /// down; new items never move the view forward.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.page_index = self.page_index.min(self.last_page());
    }

    /// Out-of-range requests clamp to the last page.
    pub fn go_to(&mut self, page_index: usize) {
        self.page_index = page_index.min(self.last_page());
    }

    pub fn can_next(&self) -> bool {
        self.page_index < self.last_page()
    }

    pub fn can_prev(&self) -> bool {
        self.page_index > 0
    }

    pub fn next(&mut self) {
        if self.can_next() {
            self.page_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.can_prev() {
            self.page_index -= 1;
        }
    }

    /// Item range of the current page; empty for the placeholder page.
    pub fn page_bounds(&self) -> Range<usize> {
        let start = (self.page_index * PAGE_SIZE).min(self.total_items);
        let end = (start + PAGE_SIZE).min(self.total_items);
        start..end
    }

    pub fn page_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let bounds = self.page_bounds();
        let end = bounds.end.min(items.len());
        &items[bounds.start.min(end)..end]
    }
}
