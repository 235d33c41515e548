//! Invoice Repository

use chrono::Duration;

use super::{BaseRepository, RepoError, RepoResult, order, patch_with_timestamp, required};
use crate::db::DbService;
use shared::models::{Invoice, InvoiceCreate, InvoiceUpdate};
use shared::util::{new_id, now};

pub const TABLE: &str = "invoice";
const ID_FIELD: &str = "invoice_id";

/// Days between invoicing and payment due date
const PAYMENT_TERM_DAYS: i64 = 1;

#[derive(Clone)]
pub struct InvoiceRepository {
    base: BaseRepository,
}

impl InvoiceRepository {
    pub fn new(db: &DbService) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all invoices
    pub async fn find_all(&self) -> RepoResult<Vec<Invoice>> {
        self.base.find_all(TABLE).await
    }

    /// Find invoice by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Invoice>> {
        self.base.find_one(TABLE, ID_FIELD, id).await
    }

    /// Create an invoice; the order must exist
    pub async fn create(&self, data: InvoiceCreate) -> RepoResult<Invoice> {
        let order_id = required(data.order_id, "order_id")?;
        if !self
            .base
            .exists(order::TABLE, order::ID_FIELD, &order_id)
            .await?
        {
            return Err(RepoError::NotFound(format!("Order {order_id} not found")));
        }

        let now = now();
        let invoice = Invoice {
            invoice_id: new_id(),
            order_id,
            payment_method: data.payment_method,
            payment_status: data.payment_status.unwrap_or_default(),
            payment_due_date: now + Duration::days(PAYMENT_TERM_DAYS),
            created_at: now,
            updated_at: now,
        };

        self.base.insert(TABLE, invoice).await
    }

    /// Update an invoice
    pub async fn update(&self, id: &str, data: InvoiceUpdate) -> RepoResult<Invoice> {
        let patch = patch_with_timestamp(&data)?;
        self.base
            .merge(TABLE, ID_FIELD, id, patch)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Invoice {id} not found")))
    }
}
