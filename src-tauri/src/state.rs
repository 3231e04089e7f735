//! Session state shared by the desktop commands
//!
//! Holds the backend client plus the two transient workflows: the checkout in
//! progress and the open receive session. Neither is ever persisted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::instrument;

use crate::api::{ApiClient, CatalogService, OrderService};
use crate::cart::{sale_summary, CartItem, Checkout, CheckoutTotals, SaleForm, SaleSummary};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::inventory::{self, validate_movement, StockSummary};
use crate::models::{
    CreateStockMovement, MovementFilter, Period, Product, ProductFilter, ProductStatus,
    PurchaseOrder, PurchaseOrderInput, Sale, SaleStatistics, SaleStatus, StockMovement,
};
use crate::money::format_amount;
use crate::purchasing::{draft_total, line_progress, order_progress, validate_draft};
use crate::receiving::{ReceiveOutcome, ReceiveSession};

const CHECKOUT: &str = "checkout";
const RECEIVE_SESSION: &str = "receive session";

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutView {
    pub items: Vec<CartItem>,
    pub form: SaleForm,
    pub totals: CheckoutTotals,
}

impl From<&Checkout> for CheckoutView {
    fn from(checkout: &Checkout) -> Self {
        Self {
            items: checkout.cart().items().to_vec(),
            form: checkout.form().clone(),
            totals: checkout.totals(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SaleDetail {
    pub sale: Sale,
    pub summary: SaleSummary,
}

impl From<Sale> for SaleDetail {
    fn from(sale: Sale) -> Self {
        let summary = sale_summary(&sale);
        Self { sale, summary }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_products: i64,
    pub stock: StockSummary,
    pub recent_movements: i64,
    pub sales: SaleStatistics,
}

/// A purchase order with the figures and actions the order screen needs.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOrderDetail {
    pub order: PurchaseOrder,
    pub progress: Decimal,
    pub lines: Vec<LineProgress>,
    pub can_receive: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineProgress {
    pub item_id: i64,
    pub progress: Decimal,
}

impl From<PurchaseOrder> for PurchaseOrderDetail {
    fn from(order: PurchaseOrder) -> Self {
        Self {
            progress: order_progress(&order),
            lines: order
                .items
                .iter()
                .map(|item| LineProgress {
                    item_id: item.id,
                    progress: line_progress(item),
                })
                .collect(),
            can_receive: order.status.can_receive(),
            can_edit: order.status.can_edit(),
            can_delete: order.status.can_delete(),
            order,
        }
    }
}

struct ActiveCheckout {
    checkout: Checkout,
    /// Sellable products as loaded when the checkout started
    products: Vec<Product>,
}

pub struct AppState {
    pub api: ApiClient,
    pub config: AppConfig,
    checkout: Mutex<Option<ActiveCheckout>>,
    receive: Mutex<Option<ReceiveSession>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let api = ApiClient::new(&config)?;
        tracing::info!(api = api.base_url(), "Backend client ready");
        Ok(Self {
            api,
            config,
            checkout: Mutex::new(None),
            receive: Mutex::new(None),
        })
    }

    // ============ Checkout ============

    /// Load sellable products and start an empty cart, replacing any abandoned one.
    #[instrument(skip(self))]
    pub async fn start_checkout(&self) -> AppResult<CheckoutView> {
        let filter = ProductFilter {
            limit: Some(self.config.product_page_limit),
            status: Some(ProductStatus::Active),
            ..Default::default()
        };
        let page = self.api.list_products(&filter).await?;
        let products = inventory::sellable(page.items);
        tracing::info!(products = products.len(), "Checkout started");

        let checkout = Checkout::new();
        let view = CheckoutView::from(&checkout);
        *self.checkout.lock().await = Some(ActiveCheckout { checkout, products });
        Ok(view)
    }

    pub async fn search_products(&self, query: &str) -> AppResult<Vec<Product>> {
        let guard = self.checkout.lock().await;
        let active = guard.as_ref().ok_or(AppError::NoActiveSession(CHECKOUT))?;
        Ok(inventory::search(&active.products, query)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn checkout_view(&self) -> AppResult<CheckoutView> {
        self.with_checkout(|_| Ok(())).await
    }

    pub async fn cart_add(&self, product_id: i64) -> AppResult<CheckoutView> {
        let mut guard = self.checkout.lock().await;
        let active = guard.as_mut().ok_or(AppError::NoActiveSession(CHECKOUT))?;
        let product = active
            .products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| AppError::validation(format!("Product {} is not available", product_id)))?;
        active.checkout.add_product(product)?;
        Ok(CheckoutView::from(&active.checkout))
    }

    pub async fn cart_update_quantity(&self, product_id: i64, quantity: i32) -> AppResult<CheckoutView> {
        self.with_checkout(|checkout| checkout.update_quantity(product_id, quantity))
            .await
    }

    pub async fn cart_remove(&self, product_id: i64) -> AppResult<CheckoutView> {
        self.with_checkout(|checkout| {
            checkout.remove(product_id);
            Ok(())
        })
        .await
    }

    pub async fn set_sale_form(&self, form: SaleForm) -> AppResult<CheckoutView> {
        self.with_checkout(|checkout| {
            checkout.set_form(form);
            Ok(())
        })
        .await
    }

    /// Create the sale. Success ends the checkout; failure keeps it for a retry.
    #[instrument(skip(self))]
    pub async fn submit_sale(&self) -> AppResult<SaleDetail> {
        let mut guard = self.checkout.lock().await;
        let active = guard.as_mut().ok_or(AppError::NoActiveSession(CHECKOUT))?;
        let sale = match active.checkout.submit(&self.api).await {
            Ok(sale) => sale,
            Err(e) => {
                tracing::warn!("Sale not created: {}", e);
                return Err(e);
            }
        };
        *guard = None;
        tracing::info!(
            sale = %sale.sale_number,
            total = %format_amount(sale.total_amount),
            "Sale created"
        );
        Ok(SaleDetail::from(sale))
    }

    pub async fn abandon_checkout(&self) {
        if self.checkout.lock().await.take().is_some() {
            tracing::info!("Checkout abandoned");
        }
    }

    async fn with_checkout<F>(&self, f: F) -> AppResult<CheckoutView>
    where
        F: FnOnce(&mut Checkout) -> AppResult<()>,
    {
        let mut guard = self.checkout.lock().await;
        let active = guard.as_mut().ok_or(AppError::NoActiveSession(CHECKOUT))?;
        f(&mut active.checkout)?;
        Ok(CheckoutView::from(&active.checkout))
    }

    // ============ Sales ============

    pub async fn sale_detail(&self, id: i64) -> AppResult<SaleDetail> {
        Ok(SaleDetail::from(self.api.sale(id).await?))
    }

    /// Cancel a completed sale and return it as reloaded from the backend.
    #[instrument(skip(self))]
    pub async fn cancel_sale(&self, id: i64) -> AppResult<SaleDetail> {
        let sale = self.api.sale(id).await?;
        if sale.status != SaleStatus::Completed {
            return Err(AppError::validation(format!(
                "Sale {} is already cancelled",
                sale.sale_number
            )));
        }
        self.api.cancel_sale(id).await?;
        self.sale_detail(id).await
    }

    // ============ Receiving ============

    /// Fetch the order and open a receive session over its open lines.
    #[instrument(skip(self))]
    pub async fn start_receive(&self, order_id: i64, delivery_date: NaiveDate) -> AppResult<ReceiveSession> {
        let order = self.api.purchase_order(order_id).await?;
        let session = ReceiveSession::open(&order, delivery_date)?;
        *self.receive.lock().await = Some(session.clone());
        Ok(session)
    }

    pub async fn receive_session(&self) -> AppResult<ReceiveSession> {
        self.with_receive(|_| Ok(())).await
    }

    pub async fn receive_select_all(&self) -> AppResult<ReceiveSession> {
        self.with_receive(|s| {
            s.select_all();
            Ok(())
        })
        .await
    }

    pub async fn receive_unselect_all(&self) -> AppResult<ReceiveSession> {
        self.with_receive(|s| {
            s.unselect_all();
            Ok(())
        })
        .await
    }

    pub async fn receive_all_remaining(&self) -> AppResult<ReceiveSession> {
        self.with_receive(|s| {
            s.receive_all_remaining();
            Ok(())
        })
        .await
    }

    pub async fn receive_set_selected(&self, item_id: i64, selected: bool) -> AppResult<ReceiveSession> {
        self.with_receive(|s| s.set_selected(item_id, selected)).await
    }

    pub async fn receive_set_quantity(&self, item_id: i64, quantity: i32) -> AppResult<ReceiveSession> {
        self.with_receive(|s| s.set_quantity(item_id, quantity)).await
    }

    pub async fn receive_set_date(&self, date: NaiveDate) -> AppResult<ReceiveSession> {
        self.with_receive(|s| {
            s.set_delivery_date(date);
            Ok(())
        })
        .await
    }

    /// Submit the selection, then reload the order so status and received
    /// quantities come from the backend. If the reload fails the order returned
    /// by the receive call is used instead.
    #[instrument(skip(self))]
    pub async fn submit_receive(&self) -> AppResult<ReceiveOutcome> {
        let mut guard = self.receive.lock().await;
        let session = guard.as_ref().ok_or(AppError::NoActiveSession(RECEIVE_SESSION))?;
        let order_id = session.order_id();
        let posted = match session.submit(&self.api).await {
            Ok(order) => order,
            Err(e) => {
                tracing::warn!(order_id, "Reception not recorded: {}", e);
                return Err(e);
            }
        };
        *guard = None;
        drop(guard);

        let order = match self.api.purchase_order(order_id).await {
            Ok(order) => order,
            Err(e) => {
                tracing::warn!(order_id, "Reception recorded but reload failed: {}", e);
                posted
            }
        };
        tracing::info!(order = %order.reference, status = ?order.status, "Reception recorded");
        Ok(ReceiveOutcome::Received(order))
    }

    pub async fn cancel_receive(&self) -> ReceiveOutcome {
        self.receive.lock().await.take();
        ReceiveOutcome::Cancelled
    }

    async fn with_receive<F>(&self, f: F) -> AppResult<ReceiveSession>
    where
        F: FnOnce(&mut ReceiveSession) -> AppResult<()>,
    {
        let mut guard = self.receive.lock().await;
        let session = guard
            .as_mut()
            .ok_or(AppError::NoActiveSession(RECEIVE_SESSION))?;
        f(session)?;
        Ok(session.clone())
    }

    // ============ Purchase orders ============

    pub async fn purchase_order_detail(&self, id: i64) -> AppResult<PurchaseOrderDetail> {
        Ok(PurchaseOrderDetail::from(self.api.purchase_order(id).await?))
    }

    pub async fn create_purchase_order(&self, draft: &PurchaseOrderInput) -> AppResult<PurchaseOrder> {
        validate_draft(draft)?;
        tracing::info!(
            reference = %draft.reference,
            total = %format_amount(draft_total(draft)),
            "Creating purchase order"
        );
        Ok(self.api.create_purchase_order(draft).await?)
    }

    pub async fn update_purchase_order(&self, id: i64, draft: &PurchaseOrderInput) -> AppResult<PurchaseOrder> {
        let current = self.api.purchase_order(id).await?;
        if !current.status.can_edit() {
            return Err(AppError::validation(format!(
                "Purchase order {} can no longer be edited",
                current.reference
            )));
        }
        validate_draft(draft)?;
        Ok(self.api.update_purchase_order(id, draft).await?)
    }

    /// Delete an order that has not been received yet.
    #[instrument(skip(self))]
    pub async fn delete_purchase_order(&self, id: i64) -> AppResult<()> {
        let current = self.api.purchase_order(id).await?;
        if !current.status.can_delete() {
            return Err(AppError::validation(format!(
                "Purchase order {} has been received and cannot be deleted",
                current.reference
            )));
        }
        self.api.delete_purchase_order(id).await?;
        tracing::info!(order = %current.reference, "Purchase order deleted");
        Ok(())
    }

    // ============ Stock ============

    /// Record a movement after checking it against the product's current stock.
    pub async fn create_movement(&self, movement: &CreateStockMovement) -> AppResult<StockMovement> {
        let product = self.api.product(movement.product_id).await?;
        validate_movement(movement, Some(product.quantity)).map_err(|e| match e {
            AppError::InsufficientStock { available, .. } => AppError::InsufficientStock {
                product: product.name.clone(),
                available,
            },
            other => other,
        })?;
        Ok(self.api.create_movement(movement).await?)
    }

    /// Stock and sales overview, fetched one call after another.
    pub async fn dashboard(&self, period: Period) -> AppResult<DashboardSummary> {
        let products = self
            .api
            .list_products(&ProductFilter {
                limit: Some(self.config.product_page_limit),
                ..Default::default()
            })
            .await?;
        let movements = self.api.list_movements(&MovementFilter::default()).await?;
        let sales = self.api.sale_statistics(period).await?;
        Ok(DashboardSummary {
            total_products: products.total,
            stock: StockSummary::from_products(&products.items),
            recent_movements: movements.total,
            sales,
        })
    }
}

#[cfg(feature = "desktop")]
use tauri::{AppHandle, Manager};

#[cfg(feature = "desktop")]
pub trait StateExt {
    fn app_state(&self) -> &AppState;
}

#[cfg(feature = "desktop")]
impl StateExt for AppHandle {
    fn app_state(&self) -> &AppState {
        self.state::<AppState>().inner()
    }
}
