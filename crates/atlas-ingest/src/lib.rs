pub mod boundaries;
pub mod index;

pub use boundaries::{DISPUTED_EXCLUDED_ROW, load_boundaries, load_disputed};
pub use index::{IndexRow, IndexTable, load_index_table};
