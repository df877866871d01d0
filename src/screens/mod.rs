// 📱 Screen state - one module per interactive view
// Pure state machines; rendering lives behind the `tui` feature.

pub mod card_form;
pub mod confirm;
pub mod home;
pub mod privacy_consent;
pub mod receipt;
pub mod services;
pub mod water_payment;

pub use card_form::{CardForm, ErrorKind, Field, FieldError};
pub use confirm::{ConfirmScreen, SelectOutcome};
pub use privacy_consent::{ConsentOutcome, PrivacyConsentScreen};
pub use receipt::Receipt;
pub use water_payment::{DebtRecord, WaterPaymentScreen};
