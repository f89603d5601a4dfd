use crate::shared::response::Paging;

/// Page window over a result set. Pages are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    pub const DEFAULT_SIZE: i64 = 10;
    pub const MAX_SIZE: i64 = 100;
    pub const MAX_PAGE: i64 = 1_000_000;

    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page: page.clamp(1, Self::MAX_PAGE),
            size: size.clamp(1, Self::MAX_SIZE),
        }
    }

    pub fn limit(&self) -> i64 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.size)
    }

    /// Build the paging block for a total row count.
    pub fn paging(&self, total: i64) -> Paging {
        let total_page = if total > 0 {
            (total + self.size - 1) / self.size
        } else {
            0
        };

        Paging {
            size: self.size,
            total_page,
            current_page: self.page,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_SIZE)
    }
}
