use async_trait::async_trait;

use super::client::into_data;
use super::{ApiClient, SaleService};
use crate::error::ApiResult;
use crate::models::{CreateSale, Envelope, Page, Period, Sale, SaleFilter, SaleStatistics};

#[derive(serde::Serialize)]
struct PeriodQuery {
    period: Period,
}

impl ApiClient {
    pub async fn list_sales(&self, filter: &SaleFilter) -> ApiResult<Page<Sale>> {
        let envelope: Envelope<Vec<Sale>> = self.get_query("sales", filter).await?;
        let total = envelope.total;
        let items = into_data(envelope)?;
        Ok(Page {
            total: total.unwrap_or(items.len() as i64),
            items,
        })
    }

    pub async fn sale(&self, id: i64) -> ApiResult<Sale> {
        into_data(self.get(&format!("sales/{}", id)).await?)
    }

    pub async fn cancel_sale(&self, id: i64) -> ApiResult<Sale> {
        into_data(
            self.post(&format!("sales/{}/cancel", id), &serde_json::json!({}))
                .await?,
        )
    }

    pub async fn sale_statistics(&self, period: Period) -> ApiResult<SaleStatistics> {
        into_data(
            self.get_query("sales/statistics", &PeriodQuery { period })
                .await?,
        )
    }
}

#[async_trait]
impl SaleService for ApiClient {
    async fn create_sale(&self, request: &CreateSale) -> ApiResult<Sale> {
        into_data(self.post("sales", request).await?)
    }
}
