// 🧾 Receipt - "¡Pago exitoso!" screen
// Snapshot of the completed payment plus a fixed transaction number.
// Download/share are simulations; download produces a JSON comprobante.

use anyhow::Result;
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::model::PaymentData;
use crate::screens::water_payment::DEBT_BREAKDOWN;

/// Fixed transaction number; there is no backend issuing real ones.
pub const TRANSACTION_NUMBER: &str = "2025102312345678";

pub const DOWNLOAD_NOTICE: &str = "El comprobante se descargará en formato PDF";
pub const SHARE_NOTICE: &str = "Compartir comprobante por email o WhatsApp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub concept: String,
    pub amount: f64,
}

/// The finished receipt, built when the confirm screen's simulated
/// charge completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub transaction_number: String,
    pub transaction_date: String,
    pub company: String,
    pub client_name: String,
    pub account_number: String,
    pub period: String,
    pub amount: f64,
    pub breakdown: Vec<ReceiptLine>,
}

impl Receipt {
    /// Build a receipt for a completed payment, stamped with the current
    /// local time.
    pub fn for_payment(payment: &PaymentData) -> Self {
        Self::with_date(payment, Local::now().format("%d/%m/%Y %H:%M").to_string())
    }

    pub fn with_date(payment: &PaymentData, transaction_date: String) -> Self {
        Receipt {
            transaction_number: TRANSACTION_NUMBER.to_string(),
            transaction_date,
            company: payment.company.clone(),
            client_name: payment.client_name.clone(),
            account_number: payment.account_number.clone(),
            period: payment.period.clone(),
            amount: payment.amount,
            breakdown: DEBT_BREAKDOWN
                .iter()
                .map(|(concept, amount)| ReceiptLine {
                    concept: concept.to_string(),
                    amount: *amount,
                })
                .collect(),
        }
    }

    /// Exported comprobante, the payload behind the simulated download.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payment() -> PaymentData {
        PaymentData {
            account_number: "123456".to_string(),
            client_name: "Juan Carlos Pérez Mendoza".to_string(),
            address: "Av. 6 de Diciembre N34-150 y Bosmediano, Quito".to_string(),
            amount: 28.50,
            period: "Octubre 2025".to_string(),
            company: "EPMAPS - Quito".to_string(),
        }
    }

    #[test]
    fn test_receipt_snapshots_payment() {
        let receipt = Receipt::with_date(&sample_payment(), "23/10/2025 14:30".to_string());
        assert_eq!(receipt.transaction_number, TRANSACTION_NUMBER);
        assert_eq!(receipt.amount, 28.50);
        assert_eq!(receipt.period, "Octubre 2025");
        assert_eq!(receipt.account_number, "123456");
        assert_eq!(receipt.breakdown.len(), 3);

        let total: f64 = receipt.breakdown.iter().map(|l| l.amount).sum();
        assert!((total - receipt.amount).abs() < 1e-9);
    }

    #[test]
    fn test_receipt_json_round_trip() {
        let receipt = Receipt::with_date(&sample_payment(), "23/10/2025 14:30".to_string());
        let json = receipt.to_json().unwrap();
        assert!(json.contains("2025102312345678"));

        let parsed: Receipt = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, receipt);
    }
}
