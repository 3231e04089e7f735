use async_trait::async_trait;

use super::client::into_data;
use super::{ApiClient, OrderService};
use crate::error::ApiResult;
use crate::models::{
    Envelope, Page, PurchaseOrder, PurchaseOrderFilter, PurchaseOrderInput,
    ReceivePurchaseOrderRequest,
};

impl ApiClient {
    pub async fn list_purchase_orders(
        &self,
        filter: &PurchaseOrderFilter,
    ) -> ApiResult<Page<PurchaseOrder>> {
        let envelope: Envelope<Vec<PurchaseOrder>> =
            self.get_query("purchase-orders", filter).await?;
        let total = envelope.total;
        let items = into_data(envelope)?;
        Ok(Page {
            total: total.unwrap_or(items.len() as i64),
            items,
        })
    }

    pub async fn create_purchase_order(&self, order: &PurchaseOrderInput) -> ApiResult<PurchaseOrder> {
        into_data(self.post("purchase-orders", order).await?)
    }

    pub async fn update_purchase_order(
        &self,
        id: i64,
        order: &PurchaseOrderInput,
    ) -> ApiResult<PurchaseOrder> {
        into_data(self.put(&format!("purchase-orders/{}", id), order).await?)
    }

    pub async fn delete_purchase_order(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("purchase-orders/{}", id)).await
    }
}

#[async_trait]
impl OrderService for ApiClient {
    async fn purchase_order(&self, id: i64) -> ApiResult<PurchaseOrder> {
        into_data(self.get(&format!("purchase-orders/{}", id)).await?)
    }

    async fn receive(
        &self,
        order_id: i64,
        request: &ReceivePurchaseOrderRequest,
    ) -> ApiResult<PurchaseOrder> {
        into_data(
            self.post(&format!("purchase-orders/{}/receive", order_id), request)
                .await?,
        )
    }
}
