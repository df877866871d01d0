// 💳 Core data model - Payment and card records
// Everything here is fabricated client-side; nothing survives the process.

use serde::{Deserialize, Serialize};

use crate::card;

// ============================================================================
// CARD TYPE
// ============================================================================

/// Card network, derived from the number prefix (see `card::detect_card_type`).
///
/// Always re-derived from the live number, never cached, so it cannot go
/// stale while the user is still typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Visa,
    Mastercard,
    Amex,
    Discover,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Visa => "visa",
            CardType::Mastercard => "mastercard",
            CardType::Amex => "amex",
            CardType::Discover => "discover",
        }
    }

    /// Display name as shown on the payment-method list ("Tarjeta VISA").
    pub fn display_name(&self) -> &'static str {
        match self {
            CardType::Visa => "VISA",
            CardType::Mastercard => "MASTERCARD",
            CardType::Amex => "AMEX",
            CardType::Discover => "DISCOVER",
        }
    }

    /// Expected CVV length: 4 digits for Amex, 3 for everyone else.
    pub fn cvv_len(&self) -> usize {
        match self {
            CardType::Amex => 4,
            _ => 3,
        }
    }
}

// ============================================================================
// PAYMENT DATA
// ============================================================================

/// One water-bill payment, assembled when the account lookup completes.
///
/// Immutable after creation; consumed by the consent, confirmation and
/// receipt screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentData {
    /// Account or contract number as entered by the user
    pub account_number: String,

    /// Account holder (fabricated)
    pub client_name: String,

    /// Service address (fabricated)
    pub address: String,

    /// Total to pay
    pub amount: f64,

    /// Billing period label, e.g. "Octubre 2025"
    pub period: String,

    /// Utility company, e.g. "EPMAPS - Quito"
    pub company: String,
}

// ============================================================================
// CREDIT CARD DATA
// ============================================================================

/// A card that passed form validation and was added during the session.
///
/// The card collection only grows; cards are never edited or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCardData {
    /// Unique id (UUID v4)
    pub id: String,

    /// Card number, digits only (no spaces)
    pub card_number: String,

    /// Holder name, trimmed and uppercased
    pub card_holder: String,

    /// Two-digit month, e.g. "09"
    pub expiry_month: String,

    /// Four-digit year, e.g. "2027"
    pub expiry_year: String,

    /// 3 or 4 digit security code
    pub cvv: String,

    /// Network derived from the number prefix
    pub card_type: CardType,

    /// Last 4 digits, for display
    pub last_four: String,
}

impl CreditCardData {
    /// Build a card record from already-validated form fields.
    ///
    /// `card_number` may still contain display spaces; it is cleaned here.
    /// Type and last-four are derived from the cleaned number.
    pub fn new(
        card_number: &str,
        card_holder: &str,
        expiry_month: String,
        expiry_year: String,
        cvv: String,
    ) -> Self {
        let clean = card::clean_number(card_number);
        let card_type = card::detect_card_type(&clean);
        let last_four = card::last_four(&clean);

        CreditCardData {
            id: uuid::Uuid::new_v4().to_string(),
            card_number: clean,
            card_holder: card_holder.trim().to_string(),
            expiry_month,
            expiry_year,
            cvv,
            card_type,
            last_four,
        }
    }
}

// ============================================================================
// PAYMENT METHODS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// Pre-defined funding account
    Account,
    /// Card added during this session
    Credit,
    /// Trailing "add new card" action, navigates to the card form
    AddCard,
}

/// One entry on the confirm screen's payment-method list.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    pub detail: String,
    pub balance: String,
    pub kind: MethodKind,
}

impl PaymentMethod {
    /// The two fixed funding sources every session starts with.
    pub fn default_methods() -> Vec<PaymentMethod> {
        vec![
            PaymentMethod {
                id: "savings".to_string(),
                name: "Cuenta de Ahorros".to_string(),
                detail: "***1234".to_string(),
                balance: "$2,450.75".to_string(),
                kind: MethodKind::Account,
            },
            PaymentMethod {
                id: "checking".to_string(),
                name: "Cuenta Corriente".to_string(),
                detail: "***5678".to_string(),
                balance: "$5,820.30".to_string(),
                kind: MethodKind::Account,
            },
        ]
    }

    /// List entry for a card added during the session.
    pub fn from_card(card: &CreditCardData) -> PaymentMethod {
        PaymentMethod {
            id: card.id.clone(),
            name: format!("Tarjeta {}", card.card_type.display_name()),
            detail: format!("***{}", card.last_four),
            balance: "Disponible".to_string(),
            kind: MethodKind::Credit,
        }
    }

    /// Trailing "add card" entry.
    pub fn add_card_entry() -> PaymentMethod {
        PaymentMethod {
            id: "add-card".to_string(),
            name: "Agregar nueva tarjeta".to_string(),
            detail: "Visa, Mastercard, Amex".to_string(),
            balance: String::new(),
            kind: MethodKind::AddCard,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_type_cvv_len() {
        assert_eq!(CardType::Amex.cvv_len(), 4);
        assert_eq!(CardType::Visa.cvv_len(), 3);
        assert_eq!(CardType::Mastercard.cvv_len(), 3);
        assert_eq!(CardType::Discover.cvv_len(), 3);
    }

    #[test]
    fn test_credit_card_data_derives_fields() {
        let card = CreditCardData::new(
            "4111 1111 1111 1111",
            "  JUAN CARLOS PEREZ  ",
            "09".to_string(),
            "2027".to_string(),
            "123".to_string(),
        );

        assert!(!card.id.is_empty());
        assert_eq!(card.card_number, "4111111111111111");
        assert_eq!(card.card_holder, "JUAN CARLOS PEREZ");
        assert_eq!(card.card_type, CardType::Visa);
        assert_eq!(card.last_four, "1111");
    }

    #[test]
    fn test_credit_card_ids_are_unique() {
        let a = CreditCardData::new("4111111111111111", "A B C", "01".into(), "2030".into(), "123".into());
        let b = CreditCardData::new("4111111111111111", "A B C", "01".into(), "2030".into(), "123".into());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_default_methods_fixed_accounts() {
        let methods = PaymentMethod::default_methods();
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].id, "savings");
        assert_eq!(methods[0].detail, "***1234");
        assert_eq!(methods[1].id, "checking");
        assert_eq!(methods[1].balance, "$5,820.30");
        assert!(methods.iter().all(|m| m.kind == MethodKind::Account));
    }

    #[test]
    fn test_method_from_card() {
        let card = CreditCardData::new("371449635398431", "ANA MARIA", "05".into(), "2028".into(), "1234".into());
        let method = PaymentMethod::from_card(&card);
        assert_eq!(method.id, card.id);
        assert_eq!(method.name, "Tarjeta AMEX");
        assert_eq!(method.detail, "***8431");
        assert_eq!(method.kind, MethodKind::Credit);
    }
}
