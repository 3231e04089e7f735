//! Purchase-order receiving
//!
//! A `ReceiveSession` is the transient selection of lines and quantities for one
//! receiving transaction. It never touches order status or received totals: the
//! backend recomputes both and the caller reloads the order after a successful submit.

use chrono::NaiveDate;
use serde::Serialize;

use crate::api::OrderService;
use crate::error::{AppError, AppResult};
use crate::models::{PurchaseOrder, PurchaseOrderItem, ReceiveItemData, ReceivePurchaseOrderRequest};

/// Quantity still expected on a line, or `None` when nothing is left to receive.
pub fn remaining(line: &PurchaseOrderItem) -> Option<i32> {
    let remaining = line.remaining();
    (remaining > 0).then_some(remaining)
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReceiveLine {
    pub item_id: i64,
    pub product_name: String,
    pub quantity_ordered: i32,
    pub quantity_received: i32,
    pub remaining: i32,
    pub quantity_to_receive: i32,
    pub selected: bool,
}

impl ReceiveLine {
    fn is_valid(&self) -> bool {
        (1..=self.remaining).contains(&self.quantity_to_receive)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", content = "order", rename_all = "snake_case")]
pub enum ReceiveOutcome {
    Received(PurchaseOrder),
    Cancelled,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReceiveSession {
    order_id: i64,
    reference: String,
    lines: Vec<ReceiveLine>,
    actual_delivery_date: NaiveDate,
}

impl ReceiveSession {
    /// Start a session over the open lines of `order`.
    ///
    /// Every open line starts selected with its full remaining quantity.
    pub fn open(order: &PurchaseOrder, delivery_date: NaiveDate) -> AppResult<Self> {
        if !order.status.can_receive() {
            return Err(AppError::validation(format!(
                "Purchase order {} cannot be received in its current status",
                order.reference
            )));
        }

        let lines = order
            .items
            .iter()
            .filter_map(|item| {
                remaining(item).map(|remaining| ReceiveLine {
                    item_id: item.id,
                    product_name: item.product_name().to_string(),
                    quantity_ordered: item.quantity_ordered,
                    quantity_received: item.quantity_received,
                    remaining,
                    quantity_to_receive: remaining,
                    selected: true,
                })
            })
            .collect();

        Ok(Self {
            order_id: order.id,
            reference: order.reference.clone(),
            lines,
            actual_delivery_date: delivery_date,
        })
    }

    pub fn order_id(&self) -> i64 {
        self.order_id
    }

    pub fn lines(&self) -> &[ReceiveLine] {
        &self.lines
    }

    pub fn actual_delivery_date(&self) -> NaiveDate {
        self.actual_delivery_date
    }

    pub fn set_delivery_date(&mut self, date: NaiveDate) {
        self.actual_delivery_date = date;
    }

    pub fn select_all(&mut self) {
        for line in &mut self.lines {
            line.selected = true;
        }
    }

    pub fn unselect_all(&mut self) {
        for line in &mut self.lines {
            line.selected = false;
        }
    }

    pub fn receive_all_remaining(&mut self) {
        for line in &mut self.lines {
            line.selected = true;
            line.quantity_to_receive = line.remaining;
        }
    }

    pub fn set_selected(&mut self, item_id: i64, selected: bool) -> AppResult<()> {
        self.line_mut(item_id)?.selected = selected;
        Ok(())
    }

    /// Out-of-range quantities are accepted here and rejected by `validate`.
    pub fn set_quantity(&mut self, item_id: i64, quantity: i32) -> AppResult<()> {
        self.line_mut(item_id)?.quantity_to_receive = quantity;
        Ok(())
    }

    pub fn has_selection(&self) -> bool {
        self.lines.iter().any(|line| line.selected)
    }

    /// Build the request for the selected lines.
    pub fn validate(&self) -> AppResult<ReceivePurchaseOrderRequest> {
        if !self.has_selection() {
            return Err(AppError::validation(
                "Select at least one item to receive",
            ));
        }

        let mut items = Vec::new();
        for line in self.lines.iter().filter(|line| line.selected) {
            if !line.is_valid() {
                return Err(AppError::validation(format!(
                    "Quantity for {} must be between 1 and {}",
                    line.product_name, line.remaining
                )));
            }
            items.push(ReceiveItemData {
                item_id: line.item_id,
                quantity_received: line.quantity_to_receive,
            });
        }

        Ok(ReceivePurchaseOrderRequest {
            items,
            actual_delivery_date: self.actual_delivery_date,
        })
    }

    /// Send the selection. On failure the session is left as it was.
    pub async fn submit<S>(&self, service: &S) -> AppResult<PurchaseOrder>
    where
        S: OrderService + ?Sized,
    {
        let request = self.validate()?;
        tracing::info!(
            order = %self.reference,
            lines = request.items.len(),
            "Submitting purchase order reception"
        );
        let order = service.receive(self.order_id, &request).await?;
        Ok(order)
    }

    fn line_mut(&mut self, item_id: i64) -> AppResult<&mut ReceiveLine> {
        self.lines
            .iter_mut()
            .find(|line| line.item_id == item_id)
            .ok_or_else(|| AppError::validation(format!("Item {} has nothing left to receive", item_id)))
    }
}
