use serde::{Deserialize, Serialize};

/// Fixed page size of every list view.
pub const PER_PAGE: u32 = 30;

/// One page of a list view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u32, total: u64) -> Self {
        let pages = total.div_ceil(PER_PAGE as u64) as u32;
        Page {
            items,
            page,
            per_page: PER_PAGE,
            total,
            pages,
            has_next: page < pages,
            has_prev: page > 1,
        }
    }

    /// Row offset of `page` (1-based; anything below 1 is treated as 1).
    pub fn offset(page: u32) -> u64 {
        (page.max(1) as u64 - 1) * PER_PAGE as u64
    }
}
