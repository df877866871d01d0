// 🧭 Screen router - single source of truth for the navigation flow
// Screens that render payment data carry it in their variant, so a
// confirm/receipt state without data is unrepresentable.

use serde::{Deserialize, Serialize};

use crate::model::{CreditCardData, PaymentData};

// ============================================================================
// SCREEN IDENTIFIERS
// ============================================================================

/// Navigation target, the identifier a view hands back to the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenId {
    Home,
    Services,
    WaterPayment,
    PrivacyConsent,
    Confirm,
    CreditCardForm,
    Receipt,
}

impl ScreenId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenId::Home => "home",
            ScreenId::Services => "services",
            ScreenId::WaterPayment => "water-payment",
            ScreenId::PrivacyConsent => "privacy-consent",
            ScreenId::Confirm => "confirm",
            ScreenId::CreditCardForm => "credit-card-form",
            ScreenId::Receipt => "receipt",
        }
    }
}

// ============================================================================
// SCREEN STATES
// ============================================================================

/// The currently visible view.
///
/// States that present payment details carry the `PaymentData` snapshot
/// they were entered with; the remaining states carry nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Home,
    Services,
    WaterPayment,
    PrivacyConsent { payment: PaymentData },
    Confirm { payment: PaymentData },
    CreditCardForm,
    Receipt { payment: PaymentData },
}

impl Screen {
    pub fn id(&self) -> ScreenId {
        match self {
            Screen::Home => ScreenId::Home,
            Screen::Services => ScreenId::Services,
            Screen::WaterPayment => ScreenId::WaterPayment,
            Screen::PrivacyConsent { .. } => ScreenId::PrivacyConsent,
            Screen::Confirm { .. } => ScreenId::Confirm,
            Screen::CreditCardForm => ScreenId::CreditCardForm,
            Screen::Receipt { .. } => ScreenId::Receipt,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "Banca Móvil",
            Screen::Services => "Pago de Servicios",
            Screen::WaterPayment => "Pago de Agua Potable",
            Screen::PrivacyConsent { .. } => "Protección de Datos",
            Screen::Confirm { .. } => "Confirmar Pago",
            Screen::CreditCardForm => "Agregar Tarjeta",
            Screen::Receipt { .. } => "Comprobante",
        }
    }
}

// ============================================================================
// FLOW EVENTS AND ERRORS
// ============================================================================

/// The four callback shapes a view can emit back to the router.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    /// Request a screen change
    Navigate(ScreenId),
    /// Account lookup completed; replaces payment data wholesale
    PaymentPrepared(PaymentData),
    /// Privacy-consent decision (true routes to confirm, false back to
    /// the payment form)
    ConsentDecision(bool),
    /// Card form validated and "processed" a new card
    CardAdded(CreditCardData),
}

/// Navigation refusal. The original prototype silently rendered nothing
/// when a data-carrying screen was requested without payment data; the
/// router reports that instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    MissingPaymentData { requested: ScreenId },
}

impl std::fmt::Display for FlowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowError::MissingPaymentData { requested } => write!(
                f,
                "screen '{}' requires payment data, but no account lookup has completed",
                requested.as_str()
            ),
        }
    }
}

impl std::error::Error for FlowError {}

// ============================================================================
// FLOW (ROUTER)
// ============================================================================

/// Holds the current screen, the accumulated payment data, the consent
/// flag and the ordered card collection. All state is in-memory and
/// transient; every transition is driven by a single `FlowEvent`.
pub struct Flow {
    screen: Screen,
    payment: Option<PaymentData>,
    has_consent: bool,
    cards: Vec<CreditCardData>,
}

impl Flow {
    pub fn new() -> Self {
        Flow {
            screen: Screen::Home,
            payment: None,
            has_consent: false,
            cards: Vec::new(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn payment(&self) -> Option<&PaymentData> {
        self.payment.as_ref()
    }

    pub fn has_consent(&self) -> bool {
        self.has_consent
    }

    pub fn cards(&self) -> &[CreditCardData] {
        &self.cards
    }

    /// Apply a view event. This is the only entry point the rendering
    /// layer needs.
    pub fn apply(&mut self, event: FlowEvent) -> Result<(), FlowError> {
        match event {
            FlowEvent::Navigate(id) => self.navigate(id),
            FlowEvent::PaymentPrepared(data) => {
                self.set_payment_data(data);
                Ok(())
            }
            FlowEvent::ConsentDecision(granted) => self.set_consent(granted),
            FlowEvent::CardAdded(card) => {
                self.add_card(card);
                Ok(())
            }
        }
    }

    /// Replace the current screen. Screens that present payment details
    /// require a completed account lookup; everything else is total.
    pub fn navigate(&mut self, id: ScreenId) -> Result<(), FlowError> {
        let next = match id {
            ScreenId::Home => Screen::Home,
            ScreenId::Services => Screen::Services,
            ScreenId::WaterPayment => Screen::WaterPayment,
            ScreenId::CreditCardForm => Screen::CreditCardForm,
            ScreenId::PrivacyConsent => Screen::PrivacyConsent {
                payment: self.require_payment(id)?,
            },
            ScreenId::Confirm => Screen::Confirm {
                payment: self.require_payment(id)?,
            },
            ScreenId::Receipt => Screen::Receipt {
                payment: self.require_payment(id)?,
            },
        };
        self.screen = next;
        Ok(())
    }

    /// Replace payment data wholesale.
    pub fn set_payment_data(&mut self, data: PaymentData) {
        self.payment = Some(data);
    }

    /// Record the consent decision. Granted routes to the confirm screen,
    /// denied returns to the water-payment form.
    pub fn set_consent(&mut self, granted: bool) -> Result<(), FlowError> {
        self.has_consent = granted;
        if granted {
            self.navigate(ScreenId::Confirm)
        } else {
            self.navigate(ScreenId::WaterPayment)
        }
    }

    /// Append a validated card. No dedup, no limit; the collection only
    /// grows within a session.
    pub fn add_card(&mut self, card: CreditCardData) {
        self.cards.push(card);
    }

    fn require_payment(&self, requested: ScreenId) -> Result<PaymentData, FlowError> {
        self.payment
            .clone()
            .ok_or(FlowError::MissingPaymentData { requested })
    }
}

impl Default for Flow {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
