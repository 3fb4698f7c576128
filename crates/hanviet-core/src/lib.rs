pub mod compose;
pub mod enrich;
pub mod resolver;
pub mod settings;
pub mod table;
pub mod unicode;

pub use compose::{compose, ResolvedPart, PLACEHOLDER};
pub use resolver::{
    resolve_multiple, resolve_parts, resolve_preserving_layout, resolve_whole, VocabRecord,
};
pub use table::{ReadingRow, ReadingTable, TableOptions, WildcardFallback};
