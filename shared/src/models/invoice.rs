//! Invoice Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::report::ReportLine;

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Card,
    Cash,
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

/// Invoice entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: String,
    pub order_id: String,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: PaymentStatus,
    pub payment_due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create invoice payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InvoiceCreate {
    #[validate(required, length(min = 1))]
    pub order_id: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    /// Defaults to PENDING
    pub payment_status: Option<PaymentStatus>,
}

/// Update invoice payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct InvoiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

/// Invoice joined with its order report (`GET /invoices/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceView {
    pub invoice_id: String,
    pub order_id: String,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: PaymentStatus,
    pub payment_due: f64,
    pub table_number: Option<i32>,
    pub payment_due_date: DateTime<Utc>,
    pub order_details: Vec<ReportLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_tokens() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Card).unwrap(), "\"CARD\"");
        assert_eq!(serde_json::to_string(&PaymentStatus::Paid).unwrap(), "\"PAID\"");
        let status: PaymentStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(status, PaymentStatus::Pending);
        assert!(serde_json::from_str::<PaymentMethod>("\"CHEQUE\"").is_err());
    }

    #[test]
    fn test_create_defaults() {
        let payload: InvoiceCreate = serde_json::from_str(r#"{"order_id": "o1"}"#).unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.payment_method, None);
        assert_eq!(payload.payment_status.unwrap_or_default(), PaymentStatus::Pending);
    }
}
