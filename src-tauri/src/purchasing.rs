use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};
use crate::models::{
    PurchaseOrder, PurchaseOrderInput, PurchaseOrderItem, PurchaseOrderLineInput,
    PurchaseOrderStatus,
};
use crate::money::percentage;

impl PurchaseOrderStatus {
    pub fn can_receive(self) -> bool {
        matches!(
            self,
            PurchaseOrderStatus::Pending
                | PurchaseOrderStatus::Confirmed
                | PurchaseOrderStatus::PartiallyReceived
        )
    }

    pub fn can_edit(self) -> bool {
        !matches!(
            self,
            PurchaseOrderStatus::Received | PurchaseOrderStatus::Cancelled
        )
    }

    pub fn can_delete(self) -> bool {
        self != PurchaseOrderStatus::Received
    }
}

/// Received share of a line, in percent.
pub fn line_progress(item: &PurchaseOrderItem) -> Decimal {
    percentage(
        Decimal::from(item.quantity_received),
        Decimal::from(item.quantity_ordered),
    )
}

/// Received share of the whole order, in percent.
pub fn order_progress(order: &PurchaseOrder) -> Decimal {
    let (received, ordered) = order.items.iter().fold((0i64, 0i64), |(r, o), item| {
        (
            r + i64::from(item.quantity_received),
            o + i64::from(item.quantity_ordered),
        )
    });
    percentage(Decimal::from(received), Decimal::from(ordered))
}

pub fn line_total(line: &PurchaseOrderLineInput) -> Decimal {
    line.unit_price * Decimal::from(line.quantity_ordered)
}

pub fn draft_total(draft: &PurchaseOrderInput) -> Decimal {
    draft.items.iter().map(line_total).sum()
}

/// Field checks run before a draft order is sent for create or update.
pub fn validate_draft(draft: &PurchaseOrderInput) -> AppResult<()> {
    if draft.reference.trim().is_empty() {
        return Err(AppError::validation("Reference is required"));
    }
    if draft.supplier_id.is_none() {
        return Err(AppError::validation("Supplier is required"));
    }
    if draft.items.is_empty() {
        return Err(AppError::validation("Add at least one product to the order"));
    }
    for (index, line) in draft.items.iter().enumerate() {
        if line.quantity_ordered < 1 {
            return Err(AppError::validation(format!(
                "Line {}: quantity must be at least 1",
                index + 1
            )));
        }
        if line.unit_price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Line {}: unit price cannot be negative",
                index + 1
            )));
        }
    }
    Ok(())
}
