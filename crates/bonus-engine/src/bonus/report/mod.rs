mod export;
mod summary;
pub mod views;

pub use export::ExportError;
pub use summary::{DepartmentTotals, PayoutFlag, PayoutRow, SheetReport};
pub use views::pillar_overview;
