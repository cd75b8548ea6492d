mod column;
pub use column::Column;

mod diff;
pub use diff::{ColumnsDiff, ColumnsDiffItem};

mod table;
pub use table::Table;

mod ty;
pub use ty::Type;
