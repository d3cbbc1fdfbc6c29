use crate::error::WorkflowError;
use crate::models::{Ack, AdjustmentReason, Part, StockAdjustment};
use crate::stores::StockStore;
use serde::Serialize;
use tracing::{info, warn};

/// Quantity after applying `adjustment`, or `None` when it would go below
/// zero or past `i32::MAX`.
pub fn apply_adjustment(quantity: i32, adjustment: i32) -> Option<i32> {
    let resulting = i64::from(quantity) + i64::from(adjustment);
    if resulting < 0 {
        return None;
    }
    i32::try_from(resulting).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AdjustState {
    Open,
    Submitting,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustmentOutcome {
    pub part_id: i64,
    pub previous: i32,
    pub resulting: i32,
    pub ack: Ack,
}

#[derive(Debug, Clone)]
pub struct StockAdjustmentWorkflow {
    part_id: i64,
    part_name: String,
    quantity: i32,
    price: f64,
    adjustment: i32,
    reason: Option<AdjustmentReason>,
    state: AdjustState,
    error: Option<String>,
}

impl StockAdjustmentWorkflow {
    pub fn open(part: &Part) -> Self {
        StockAdjustmentWorkflow {
            part_id: part.id,
            part_name: part.name.clone(),
            quantity: part.quantity,
            price: part.price,
            adjustment: 0,
            reason: None,
            state: AdjustState::Open,
            error: None,
        }
    }

    pub fn part_id(&self) -> i64 {
        self.part_id
    }

    pub fn title(&self) -> String {
        format!("Adjust Stock: {}", self.part_name)
    }

    pub fn current_quantity(&self) -> i32 {
        self.quantity
    }

    pub fn adjustment(&self) -> i32 {
        self.adjustment
    }

    pub fn reason(&self) -> Option<AdjustmentReason> {
        self.reason
    }

    pub fn state(&self) -> AdjustState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn increment(&mut self) {
        self.adjustment = self.adjustment.saturating_add(1);
    }

    pub fn decrement(&mut self) {
        self.adjustment = self.adjustment.saturating_sub(1);
    }

    pub fn set_adjustment(&mut self, adjustment: i32) {
        self.adjustment = adjustment;
    }

    pub fn set_reason(&mut self, reason: AdjustmentReason) {
        self.reason = Some(reason);
    }

    /// Stock the part would have after this adjustment. May be negative.
    pub fn projected_quantity(&self) -> i64 {
        i64::from(self.quantity) + i64::from(self.adjustment)
    }

    pub fn cancel(&mut self) {
        self.reset();
        self.state = AdjustState::Closed;
    }

    fn reset(&mut self) {
        self.adjustment = 0;
        self.reason = None;
        self.error = None;
    }

    pub fn validate(&self) -> Result<StockAdjustment, WorkflowError> {
        let reason = self.reason.ok_or(WorkflowError::MissingReason)?;

        let resulting = self.projected_quantity();
        if resulting < 0 {
            return Err(WorkflowError::NegativeStock {
                name: self.part_name.clone(),
                resulting,
                adjustment: self.adjustment,
            });
        }
        if resulting > i64::from(i32::MAX) {
            return Err(WorkflowError::InvalidField(
                "Adjustment too large".to_string(),
            ));
        }

        Ok(StockAdjustment {
            part_id: self.part_id,
            adjustment: self.adjustment,
            price: self.price,
            reason,
        })
    }

    pub async fn submit<B>(&mut self, backend: &B) -> Result<AdjustmentOutcome, WorkflowError>
    where
        B: StockStore + ?Sized,
    {
        if self.state != AdjustState::Open {
            return Err(WorkflowError::InvalidState {
                action: "adjust stock",
                state: "closed",
            });
        }

        self.error = None;
        let request = match self.validate() {
            Ok(request) => request,
            Err(e) => {
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        self.state = AdjustState::Submitting;
        match backend.adjust_stock(&request).await {
            Ok(ack) => {
                let previous = self.quantity;
                // validate() already proved this fits
                let resulting = apply_adjustment(previous, request.adjustment).unwrap_or(previous);
                info!(
                    part_id = self.part_id,
                    reason = ?request.reason,
                    "Stock adjusted {} -> {}",
                    previous,
                    resulting
                );

                self.quantity = resulting;
                self.reset();
                self.state = AdjustState::Closed;

                Ok(AdjustmentOutcome {
                    part_id: self.part_id,
                    previous,
                    resulting,
                    ack,
                })
            }
            Err(e) => {
                warn!(part_id = self.part_id, "Failed to adjust stock: {}", e);
                self.error = Some(e.to_string());
                self.state = AdjustState::Open;
                Err(e.into())
            }
        }
    }
}
