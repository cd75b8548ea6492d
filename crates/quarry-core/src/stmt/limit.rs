/// `LIMIT <from>[, <count>]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limit {
    pub offset: u64,

    /// `None` means every row after `offset`.
    pub count: Option<u64>,
}
