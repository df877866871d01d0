// 💳 Card intake & validation - "Agregar Tarjeta" step
// All rules are evaluated in one pass on submit; each field's error
// clears the moment that field changes.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{Datelike, Local};

use crate::card;
use crate::model::{CardType, CreditCardData};
use crate::timer::SimulatedDelay;

/// Simulated card-validation latency.
pub const CARD_VALIDATION_LATENCY: Duration = Duration::from_millis(2000);

pub const MIN_CARD_DIGITS: usize = 13;
pub const MAX_CARD_DIGITS: usize = 19;
pub const MIN_HOLDER_LEN: usize = 3;
pub const MAX_HOLDER_LEN: usize = 30;

// ============================================================================
// FIELDS AND ERRORS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CardNumber,
    CardHolder,
    ExpiryMonth,
    ExpiryYear,
    Cvv,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::CardNumber => "card_number",
            Field::CardHolder => "card_holder",
            Field::ExpiryMonth => "expiry_month",
            Field::ExpiryYear => "expiry_year",
            Field::Cvv => "cvv",
        }
    }

    pub const ALL: [Field; 5] = [
        Field::CardNumber,
        Field::CardHolder,
        Field::ExpiryMonth,
        Field::ExpiryYear,
        Field::Cvv,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required field is empty
    Required,
    /// Numeric value outside its allowed range
    OutOfRange,
    /// Wrong length for the field
    LengthMismatch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: Field,
    pub kind: ErrorKind,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.as_str(), self.message)
    }
}

impl std::error::Error for FieldError {}

fn field_error(field: Field, kind: ErrorKind, message: &str) -> FieldError {
    FieldError {
        field,
        kind,
        message: message.to_string(),
    }
}

// ============================================================================
// CARD FORM
// ============================================================================

/// Card-intake form state. The number field holds the formatted display
/// value; validation always re-cleans it.
pub struct CardForm {
    card_number: String,
    card_holder: String,
    expiry_month: String,
    expiry_year: String,
    cvv: String,
    show_cvv: bool,
    errors: HashMap<Field, FieldError>,
    submitting: Option<SimulatedDelay<CreditCardData>>,
}

impl CardForm {
    pub fn new() -> Self {
        CardForm {
            card_number: String::new(),
            card_holder: String::new(),
            expiry_month: String::new(),
            expiry_year: String::new(),
            cvv: String::new(),
            show_cvv: false,
            errors: HashMap::new(),
            submitting: None,
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::CardNumber => &self.card_number,
            Field::CardHolder => &self.card_holder,
            Field::ExpiryMonth => &self.expiry_month,
            Field::ExpiryYear => &self.expiry_year,
            Field::Cvv => &self.cvv,
        }
    }

    /// Replace a field value, applying per-field input shaping, and clear
    /// that field's error. Ignored while a submission is in flight.
    pub fn set_field(&mut self, field: Field, value: &str) {
        if self.is_submitting() {
            return;
        }
        let shaped = match field {
            // Re-formatted from the full digit string on every change
            Field::CardNumber => card::format_card_number(value),
            Field::CardHolder => value.to_uppercase().chars().take(MAX_HOLDER_LEN).collect(),
            Field::ExpiryMonth => digits_capped(value, 2),
            Field::ExpiryYear => digits_capped(value, 4),
            Field::Cvv => digits_capped(value, 4),
        };
        match field {
            Field::CardNumber => self.card_number = shaped,
            Field::CardHolder => self.card_holder = shaped,
            Field::ExpiryMonth => self.expiry_month = shaped,
            Field::ExpiryYear => self.expiry_year = shaped,
            Field::Cvv => self.cvv = shaped,
        }
        self.errors.remove(&field);
    }

    /// Append one typed character to a field (TUI input path).
    pub fn push_char(&mut self, field: Field, c: char) {
        let mut value = self.value(field).to_string();
        value.push(c);
        self.set_field(field, &value);
    }

    /// Delete the last character of a field (TUI input path).
    pub fn pop_char(&mut self, field: Field) {
        let mut value: Vec<char> = self.value(field).chars().collect();
        value.pop();
        let value: String = value.into_iter().collect();
        // Card numbers re-format from the remaining digits, so popping a
        // trailing space removes the digit before it as well
        self.set_field(field, &value);
    }

    pub fn show_cvv(&self) -> bool {
        self.show_cvv
    }

    pub fn toggle_show_cvv(&mut self) {
        self.show_cvv = !self.show_cvv;
    }

    /// Card network derived from the live number field.
    pub fn detected_type(&self) -> CardType {
        card::detect_card_type(&self.card_number)
    }

    /// Help line under the CVV field, tracking the live detected type.
    pub fn cvv_hint(&self) -> String {
        let card_type = self.detected_type();
        let (len, side) = if card_type == CardType::Amex {
            (4, "frente")
        } else {
            (3, "reverso")
        };
        format!("El CVV son los {} dígitos en el {} de tu tarjeta", len, side)
    }

    pub fn error(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn errors(&self) -> &HashMap<Field, FieldError> {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_some()
    }

    /// Evaluate every rule against `current_year`, accumulating all
    /// violations instead of stopping at the first.
    pub fn collect_errors(&self, current_year: i32) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let clean = card::clean_number(&self.card_number);
        if clean.is_empty() {
            errors.push(field_error(
                Field::CardNumber,
                ErrorKind::Required,
                "El número de tarjeta es requerido",
            ));
        } else if clean.len() < MIN_CARD_DIGITS || clean.len() > MAX_CARD_DIGITS {
            errors.push(field_error(
                Field::CardNumber,
                ErrorKind::LengthMismatch,
                "Número de tarjeta inválido",
            ));
        }

        let holder = self.card_holder.trim();
        if holder.is_empty() {
            errors.push(field_error(
                Field::CardHolder,
                ErrorKind::Required,
                "El nombre del titular es requerido",
            ));
        } else if holder.chars().count() < MIN_HOLDER_LEN {
            errors.push(field_error(
                Field::CardHolder,
                ErrorKind::LengthMismatch,
                "Nombre muy corto",
            ));
        }

        if self.expiry_month.is_empty() {
            errors.push(field_error(
                Field::ExpiryMonth,
                ErrorKind::Required,
                "Mes requerido",
            ));
        } else {
            match self.expiry_month.parse::<u32>() {
                Ok(m) if (1..=12).contains(&m) => {}
                _ => errors.push(field_error(
                    Field::ExpiryMonth,
                    ErrorKind::OutOfRange,
                    "Mes inválido",
                )),
            }
        }

        if self.expiry_year.is_empty() {
            errors.push(field_error(
                Field::ExpiryYear,
                ErrorKind::Required,
                "Año requerido",
            ));
        } else {
            match self.expiry_year.parse::<i32>() {
                Ok(y) if y >= current_year => {}
                Ok(_) => errors.push(field_error(
                    Field::ExpiryYear,
                    ErrorKind::OutOfRange,
                    "Tarjeta expirada",
                )),
                Err(_) => errors.push(field_error(
                    Field::ExpiryYear,
                    ErrorKind::OutOfRange,
                    "Año inválido",
                )),
            }
        }

        // CVV length tracks the type re-derived from the current number
        let expected_cvv = card::detect_card_type(&clean).cvv_len();
        if self.cvv.is_empty() {
            errors.push(field_error(Field::Cvv, ErrorKind::Required, "CVV requerido"));
        } else if self.cvv.chars().count() != expected_cvv {
            errors.push(FieldError {
                field: Field::Cvv,
                kind: ErrorKind::LengthMismatch,
                message: format!("CVV debe tener {} dígitos", expected_cvv),
            });
        }

        errors
    }

    /// Validate against the current year, storing the errors per field.
    /// Returns true when the form is clean.
    pub fn validate(&mut self) -> bool {
        self.validate_with_year(Local::now().year())
    }

    pub fn validate_with_year(&mut self, current_year: i32) -> bool {
        let errors = self.collect_errors(current_year);
        self.errors = errors.into_iter().map(|e| (e.field, e)).collect();
        self.errors.is_empty()
    }

    /// Submit the form: validate, and on success start the simulated
    /// card-validation delay carrying the finished record. Returns false
    /// (with errors populated) when validation fails or a submission is
    /// already in flight.
    pub fn submit(&mut self) -> bool {
        self.submit_with(Local::now().year(), CARD_VALIDATION_LATENCY)
    }

    pub fn submit_with(&mut self, current_year: i32, latency: Duration) -> bool {
        if self.is_submitting() {
            return false;
        }
        if !self.validate_with_year(current_year) {
            return false;
        }
        let card = CreditCardData::new(
            &self.card_number,
            &self.card_holder,
            self.expiry_month.clone(),
            self.expiry_year.clone(),
            self.cvv.clone(),
        );
        self.submitting = Some(SimulatedDelay::start(latency, Ok(card)));
        true
    }

    /// Drive a pending submission forward. Yields the validated card
    /// exactly once, when the simulated delay elapses; the caller reports
    /// it to the router and navigates back to confirm.
    pub fn pump(&mut self) -> Option<CreditCardData> {
        let delay = self.submitting.as_mut()?;
        let outcome = delay.poll()?;
        self.submitting = None;
        outcome.ok()
    }
}

impl Default for CardForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Month options for the expiry selector: "01" through "12".
pub fn month_options() -> Vec<String> {
    (1..=12).map(|m| format!("{:02}", m)).collect()
}

/// Year options for the expiry selector: the current year plus 14 more.
pub fn year_options(current_year: i32) -> Vec<String> {
    (0..15).map(|i| (current_year + i).to_string()).collect()
}

fn digits_capped(value: &str, cap: usize) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).take(cap).collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2025;

    fn filled_form() -> CardForm {
        let mut form = CardForm::new();
        form.set_field(Field::CardNumber, "4111111111111111");
        form.set_field(Field::CardHolder, "Juan Carlos Perez");
        form.set_field(Field::ExpiryMonth, "09");
        form.set_field(Field::ExpiryYear, "2027");
        form.set_field(Field::Cvv, "123");
        form
    }

    #[test]
    fn test_valid_form_passes() {
        let mut form = filled_form();
        assert!(form.validate_with_year(YEAR));
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_number_field_is_formatted() {
        let form = filled_form();
        assert_eq!(form.value(Field::CardNumber), "4111 1111 1111 1111");
    }

    #[test]
    fn test_holder_uppercased_and_capped() {
        let mut form = CardForm::new();
        form.set_field(Field::CardHolder, "juan carlos perez mendoza de la torre");
        let holder = form.value(Field::CardHolder);
        assert!(holder.starts_with("JUAN CARLOS"));
        assert_eq!(holder.chars().count(), MAX_HOLDER_LEN);
    }

    #[test]
    fn test_cvv_keeps_digits_only() {
        let mut form = CardForm::new();
        form.set_field(Field::Cvv, "1a2b3c4d5");
        assert_eq!(form.value(Field::Cvv), "1234");
    }

    #[test]
    fn test_errors_accumulate_in_one_pass() {
        let mut form = CardForm::new();
        form.set_field(Field::ExpiryMonth, "09");
        form.set_field(Field::ExpiryYear, "2027");
        assert!(!form.validate_with_year(YEAR));

        // Empty number + empty holder + empty cvv: three distinct errors
        assert_eq!(form.errors().len(), 3);
        assert_eq!(form.error(Field::CardNumber).unwrap().kind, ErrorKind::Required);
        assert_eq!(form.error(Field::CardHolder).unwrap().kind, ErrorKind::Required);
        assert_eq!(form.error(Field::Cvv).unwrap().kind, ErrorKind::Required);
    }

    #[test]
    fn test_number_length_bounds() {
        let mut form = filled_form();

        form.set_field(Field::CardNumber, "4111111111111"); // 13 digits
        assert!(form.validate_with_year(YEAR));

        form.set_field(Field::CardNumber, "411111111111"); // 12 digits
        assert!(!form.validate_with_year(YEAR));
        assert_eq!(form.error(Field::CardNumber).unwrap().kind, ErrorKind::LengthMismatch);
    }

    #[test]
    fn test_nineteen_digits_pass_via_collect_errors() {
        // The display caps at 16 digits, but the rule itself accepts 19
        let mut form = filled_form();
        form.card_number = "4111111111111111111".to_string(); // 19 digits, raw
        assert!(form.collect_errors(YEAR).is_empty());
    }

    #[test]
    fn test_twenty_digits_truncated_before_submit() {
        let mut form = filled_form();
        form.set_field(Field::CardNumber, "44444444444444444444"); // 20 digits
        // Formatting already clamped the field to 16 digits
        assert_eq!(card::clean_number(form.value(Field::CardNumber)).len(), 16);
        assert!(form.validate_with_year(YEAR));
    }

    #[test]
    fn test_holder_min_length() {
        let mut form = filled_form();
        form.set_field(Field::CardHolder, "AB");
        assert!(!form.validate_with_year(YEAR));
        assert_eq!(form.error(Field::CardHolder).unwrap().kind, ErrorKind::LengthMismatch);
    }

    #[test]
    fn test_month_range() {
        let mut form = filled_form();

        form.set_field(Field::ExpiryMonth, "00");
        assert!(!form.validate_with_year(YEAR));
        assert_eq!(form.error(Field::ExpiryMonth).unwrap().kind, ErrorKind::OutOfRange);

        form.set_field(Field::ExpiryMonth, "13");
        assert!(!form.validate_with_year(YEAR));

        form.set_field(Field::ExpiryMonth, "12");
        assert!(form.validate_with_year(YEAR));
    }

    #[test]
    fn test_year_must_not_be_past() {
        let mut form = filled_form();

        form.set_field(Field::ExpiryYear, "2024");
        assert!(!form.validate_with_year(YEAR));
        let err = form.error(Field::ExpiryYear).unwrap();
        assert_eq!(err.kind, ErrorKind::OutOfRange);
        assert_eq!(err.message, "Tarjeta expirada");

        // Current year passes; no month/year combined check exists
        form.set_field(Field::ExpiryYear, "2025");
        assert!(form.validate_with_year(YEAR));
    }

    #[test]
    fn test_cvv_length_tracks_live_detected_type() {
        let mut form = filled_form();

        // Amex number: 3-digit CVV must fail, 4-digit must pass
        form.set_field(Field::CardNumber, "371449635398431");
        form.set_field(Field::Cvv, "123");
        assert!(!form.validate_with_year(YEAR));
        let err = form.error(Field::Cvv).unwrap();
        assert_eq!(err.kind, ErrorKind::LengthMismatch);
        assert_eq!(err.message, "CVV debe tener 4 dígitos");

        form.set_field(Field::Cvv, "1234");
        assert!(form.validate_with_year(YEAR));

        // Back to visa: 4 digits now fail
        form.set_field(Field::CardNumber, "4111111111111111");
        assert!(!form.validate_with_year(YEAR));
        assert_eq!(
            form.error(Field::Cvv).unwrap().message,
            "CVV debe tener 3 dígitos"
        );
    }

    #[test]
    fn test_field_error_clears_on_change_only_for_that_field() {
        let mut form = CardForm::new();
        assert!(!form.validate_with_year(YEAR));
        assert_eq!(form.errors().len(), 5);

        form.set_field(Field::CardHolder, "J");
        assert!(form.error(Field::CardHolder).is_none());
        assert_eq!(form.errors().len(), 4);
        assert!(form.error(Field::CardNumber).is_some());
    }

    #[test]
    fn test_submit_rejects_invalid_form() {
        let mut form = CardForm::new();
        assert!(!form.submit_with(YEAR, Duration::ZERO));
        assert!(!form.is_submitting());
        assert!(!form.errors().is_empty());
    }

    #[test]
    fn test_submit_produces_card_after_delay() {
        let mut form = filled_form();
        assert!(form.submit_with(YEAR, Duration::ZERO));
        assert!(form.is_submitting());

        let card = form.pump().expect("card delivered");
        assert!(!form.is_submitting());
        assert_eq!(card.card_number, "4111111111111111");
        assert_eq!(card.card_holder, "JUAN CARLOS PEREZ");
        assert_eq!(card.card_type, CardType::Visa);
        assert_eq!(card.last_four, "1111");
        assert!(!card.id.is_empty());
    }

    #[test]
    fn test_inputs_frozen_while_submitting() {
        let mut form = filled_form();
        form.submit_with(YEAR, Duration::from_secs(60));
        form.set_field(Field::CardHolder, "OTRA PERSONA");
        assert_eq!(form.value(Field::CardHolder), "JUAN CARLOS PEREZ");
        assert!(!form.submit_with(YEAR, Duration::ZERO));
    }

    #[test]
    fn test_pop_char_reformats_number() {
        let mut form = CardForm::new();
        form.set_field(Field::CardNumber, "41111");
        assert_eq!(form.value(Field::CardNumber), "4111 1");
        form.pop_char(Field::CardNumber);
        assert_eq!(form.value(Field::CardNumber), "4111");
    }

    #[test]
    fn test_cvv_hint_tracks_type() {
        let mut form = CardForm::new();
        assert!(form.cvv_hint().contains("3 dígitos"));
        form.set_field(Field::CardNumber, "3714");
        assert!(form.cvv_hint().contains("4 dígitos"));
        assert!(form.cvv_hint().contains("frente"));
    }

    #[test]
    fn test_expiry_options() {
        let months = month_options();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0], "01");
        assert_eq!(months[11], "12");

        let years = year_options(2025);
        assert_eq!(years.len(), 15);
        assert_eq!(years[0], "2025");
        assert_eq!(years[14], "2039");
    }
}
