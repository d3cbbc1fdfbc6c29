//! Modal-scoped interactions with their own form state.
//!
//! A workflow only submits; refreshing the affected collection is the
//! caller's job once the workflow reports success.

mod part_edit;
mod stock_adjust;

pub use part_edit::{EditMode, EditState, PartEditWorkflow, SaveOutcome};
pub use stock_adjust::{apply_adjustment, AdjustState, AdjustmentOutcome, StockAdjustmentWorkflow};
