/// One page of query results, as returned by
/// [`EntityQuery::paginate`](crate::EntityQuery::paginate).
#[derive(Debug)]
pub struct Page<E> {
    pub items: Vec<E>,

    /// Page number, starting at 1
    pub page: u64,

    pub per_page: u64,

    /// Matching rows across all pages
    pub total: u64,
}

impl<E> Page<E> {
    pub fn last_page(&self) -> u64 {
        self.total.div_ceil(self.per_page).max(1)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.last_page()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}
