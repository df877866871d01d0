// Banca Móvil - Water-Payment Prototype Core
// Exposes the flow, screen-state and validation modules for the TUI and tests

pub mod card;
pub mod flow;
pub mod model;
pub mod screens;
pub mod timer;

// Re-export commonly used types
pub use card::{clean_number, detect_card_type, format_card_number, last_four};
pub use flow::{Flow, FlowError, FlowEvent, Screen, ScreenId};
pub use model::{CardType, CreditCardData, MethodKind, PaymentData, PaymentMethod};
pub use screens::{
    CardForm, ConfirmScreen, ConsentOutcome, DebtRecord, ErrorKind, Field, FieldError,
    PrivacyConsentScreen, Receipt, SelectOutcome, WaterPaymentScreen,
};
pub use timer::{ProcessError, ProcessResult, SimulatedDelay};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
