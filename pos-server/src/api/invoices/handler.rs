//! Invoice API Handlers

use axum::{Json, extract::Path};
use shared::models::{Invoice, InvoiceCreate, InvoiceUpdate, InvoiceView, OrderItemReport};
use shared::{AppError, AppResult};

use crate::db::repository::InvoiceRepository;
use crate::reports::{StoreReportSource, order_item_report};
use crate::utils::{RequestDb, ValidJson};

/// GET /invoices - 获取所有发票
pub async fn list(RequestDb(db): RequestDb) -> AppResult<Json<Vec<Invoice>>> {
    let repo = InvoiceRepository::new(&db);
    let invoices = repo.find_all().await?;
    Ok(Json(invoices))
}

/// GET /invoices/{invoice_id} - 发票详情 (含订单明细汇总)
pub async fn get_by_id(
    RequestDb(db): RequestDb,
    Path(invoice_id): Path<String>,
) -> AppResult<Json<InvoiceView>> {
    let repo = InvoiceRepository::new(&db);
    let invoice = repo
        .find_by_id(&invoice_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Invoice {} not found", invoice_id)))?;

    let source = StoreReportSource::new(&db);
    let report = order_item_report(&source, &invoice.order_id)
        .await?
        .into_iter()
        .next();

    Ok(Json(invoice_view(invoice, report)))
}

/// Join an invoice with the first report row of its order
fn invoice_view(invoice: Invoice, report: Option<OrderItemReport>) -> InvoiceView {
    let (payment_due, table_number, order_details) = match report {
        Some(r) => (r.total_amount, r.table_number, r.order_items),
        None => (0.0, None, Vec::new()),
    };

    InvoiceView {
        invoice_id: invoice.invoice_id,
        order_id: invoice.order_id,
        payment_method: invoice.payment_method,
        payment_status: invoice.payment_status,
        payment_due,
        table_number,
        payment_due_date: invoice.payment_due_date,
        order_details,
    }
}

/// POST /invoices - 创建发票 (订单必须存在)
pub async fn create(
    RequestDb(db): RequestDb,
    ValidJson(payload): ValidJson<InvoiceCreate>,
) -> AppResult<Json<Invoice>> {
    let repo = InvoiceRepository::new(&db);
    let invoice = repo.create(payload).await?;
    Ok(Json(invoice))
}

/// PATCH /invoices/{invoice_id} - 更新发票
pub async fn update(
    RequestDb(db): RequestDb,
    Path(invoice_id): Path<String>,
    ValidJson(payload): ValidJson<InvoiceUpdate>,
) -> AppResult<Json<Invoice>> {
    let repo = InvoiceRepository::new(&db);
    let invoice = repo.update(&invoice_id, payload).await?;
    Ok(Json(invoice))
}
