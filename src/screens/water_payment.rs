// 💧 Account lookup - "Pago de Agua Potable" step
// The entered identifier is never checked against anything: any account
// of 6+ characters reveals the same fabricated debt record.

use std::time::Duration;

use crate::model::PaymentData;
use crate::timer::SimulatedDelay;

/// Minimum identifier length before "Consultar deuda" is enabled.
pub const MIN_ACCOUNT_LEN: usize = 6;
/// Input cap on the account field.
pub const MAX_ACCOUNT_LEN: usize = 15;
/// Simulated consult latency.
pub const CONSULT_LATENCY: Duration = Duration::from_millis(1500);

pub const COMPANY: &str = "EPMAPS - Quito";
pub const CLIENT_NAME: &str = "Juan Carlos Pérez Mendoza";
pub const CLIENT_ADDRESS: &str = "Av. 6 de Diciembre N34-150 y Bosmediano, Quito";
pub const DEBT_AMOUNT: f64 = 28.50;
pub const DEBT_PERIOD: &str = "Octubre 2025";

/// Consumption breakdown shown under the total. Sums to `DEBT_AMOUNT`.
pub const DEBT_BREAKDOWN: [(&str, f64); 3] = [
    ("Consumo de agua", 20.00),
    ("Alcantarillado", 6.50),
    ("Recolección de basura", 2.00),
];

/// The fabricated debt record a consult "finds".
#[derive(Debug, Clone, PartialEq)]
pub struct DebtRecord {
    pub client_name: String,
    pub address: String,
    pub amount: f64,
    pub period: String,
    pub company: String,
}

impl DebtRecord {
    fn fabricate() -> Self {
        DebtRecord {
            client_name: CLIENT_NAME.to_string(),
            address: CLIENT_ADDRESS.to_string(),
            amount: DEBT_AMOUNT,
            period: DEBT_PERIOD.to_string(),
            company: COMPANY.to_string(),
        }
    }
}

/// Water-payment screen state: the account field, an optional in-flight
/// consult, and the revealed debt.
pub struct WaterPaymentScreen {
    account_number: String,
    pending: Option<SimulatedDelay<DebtRecord>>,
    debt: Option<DebtRecord>,
}

impl WaterPaymentScreen {
    pub fn new() -> Self {
        WaterPaymentScreen {
            account_number: String::new(),
            pending: None,
            debt: None,
        }
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    /// Replace the account field. Editing hides a previously revealed
    /// debt, but does not cancel an in-flight consult: once scheduled,
    /// the timer always fires.
    ///
    /// Length limits are in characters; the identifier is free text and
    /// may contain multibyte input.
    pub fn set_account_number(&mut self, value: &str) {
        self.account_number = value.chars().take(MAX_ACCOUNT_LEN).collect();
        self.debt = None;
    }

    pub fn push_char(&mut self, c: char) {
        if self.account_number.chars().count() < MAX_ACCOUNT_LEN {
            self.account_number.push(c);
            self.debt = None;
        }
    }

    pub fn pop_char(&mut self) {
        self.account_number.pop();
        self.debt = None;
    }

    /// Clear the field and any revealed debt.
    pub fn clear(&mut self) {
        self.account_number.clear();
        self.debt = None;
    }

    pub fn can_consult(&self) -> bool {
        self.account_number.chars().count() >= MIN_ACCOUNT_LEN && !self.is_loading()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Start the simulated debt consult. Returns false when the account
    /// is too short or a consult is already in flight.
    pub fn consult(&mut self) -> bool {
        self.consult_with_latency(CONSULT_LATENCY)
    }

    pub fn consult_with_latency(&mut self, latency: Duration) -> bool {
        if !self.can_consult() {
            return false;
        }
        self.pending = Some(SimulatedDelay::start(latency, Ok(DebtRecord::fabricate())));
        true
    }

    /// Drive the pending consult forward. Call once per event-loop tick.
    pub fn pump(&mut self) {
        if let Some(delay) = self.pending.as_mut() {
            if let Some(outcome) = delay.poll() {
                self.pending = None;
                // The simulated consult cannot fail today; the Err arm
                // exists for a future real backend.
                if let Ok(record) = outcome {
                    self.debt = Some(record);
                }
            }
        }
    }

    pub fn debt(&self) -> Option<&DebtRecord> {
        self.debt.as_ref()
    }

    /// Package the entered account plus the fabricated record into a
    /// `PaymentData`. Only available once a consult has revealed the debt.
    pub fn continue_payment(&self) -> Option<PaymentData> {
        let debt = self.debt.as_ref()?;
        Some(PaymentData {
            account_number: self.account_number.clone(),
            client_name: debt.client_name.clone(),
            address: debt.address.clone(),
            amount: debt.amount,
            period: debt.period.clone(),
            company: debt.company.clone(),
        })
    }
}

impl Default for WaterPaymentScreen {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consult_disabled_below_min_length() {
        let mut screen = WaterPaymentScreen::new();
        screen.set_account_number("12345");
        assert!(!screen.can_consult());
        assert!(!screen.consult_with_latency(Duration::ZERO));

        screen.set_account_number("123456");
        assert!(screen.can_consult());
    }

    #[test]
    fn test_account_field_caps_at_15_chars() {
        let mut screen = WaterPaymentScreen::new();
        screen.set_account_number("12345678901234567890");
        assert_eq!(screen.account_number().chars().count(), MAX_ACCOUNT_LEN);

        for _ in 0..5 {
            screen.push_char('9');
        }
        assert_eq!(screen.account_number().chars().count(), MAX_ACCOUNT_LEN);
    }

    // The identifier is free text; limits count characters, not bytes.
    #[test]
    fn test_account_field_handles_multibyte_input() {
        let mut screen = WaterPaymentScreen::new();
        // Byte 15 falls inside the 'ñ'; truncation must not split it
        screen.set_account_number("12345678901234ñx");
        assert_eq!(screen.account_number(), "12345678901234ñ");
        assert_eq!(screen.account_number().chars().count(), MAX_ACCOUNT_LEN);

        let mut screen = WaterPaymentScreen::new();
        screen.set_account_number("ññññññññññññññ"); // 14 chars, 28 bytes
        screen.push_char('ñ');
        assert_eq!(screen.account_number().chars().count(), MAX_ACCOUNT_LEN);
        screen.push_char('ñ');
        assert_eq!(screen.account_number().chars().count(), MAX_ACCOUNT_LEN);
    }

    #[test]
    fn test_consult_minimum_counts_chars_not_bytes() {
        let mut screen = WaterPaymentScreen::new();
        screen.set_account_number("ñññ"); // 3 chars, 6 bytes
        assert!(!screen.can_consult());

        screen.set_account_number("ññññññ"); // 6 chars
        assert!(screen.can_consult());
    }

    #[test]
    fn test_consult_reveals_fixed_debt_regardless_of_account() {
        for account in ["123456", "999999999", "ABCDEF"] {
            let mut screen = WaterPaymentScreen::new();
            screen.set_account_number(account);
            assert!(screen.consult_with_latency(Duration::ZERO));
            assert!(screen.is_loading());
            screen.pump();
            assert!(!screen.is_loading());

            let debt = screen.debt().expect("debt revealed");
            assert_eq!(debt.amount, DEBT_AMOUNT);
            assert_eq!(debt.period, DEBT_PERIOD);
            assert_eq!(debt.client_name, CLIENT_NAME);
        }
    }

    #[test]
    fn test_no_second_consult_while_loading() {
        let mut screen = WaterPaymentScreen::new();
        screen.set_account_number("123456");
        assert!(screen.consult_with_latency(Duration::from_secs(60)));
        assert!(!screen.consult_with_latency(Duration::ZERO));
    }

    #[test]
    fn test_editing_hides_debt_but_timer_still_fires() {
        let mut screen = WaterPaymentScreen::new();
        screen.set_account_number("123456");
        screen.consult_with_latency(Duration::ZERO);
        screen.pump();
        assert!(screen.debt().is_some());

        screen.push_char('7');
        assert!(screen.debt().is_none());

        // A consult in flight survives edits and still reveals the debt
        screen.consult_with_latency(Duration::ZERO);
        screen.push_char('8');
        screen.pump();
        assert!(screen.debt().is_some());
    }

    #[test]
    fn test_continue_requires_revealed_debt() {
        let mut screen = WaterPaymentScreen::new();
        screen.set_account_number("123456");
        assert!(screen.continue_payment().is_none());

        screen.consult_with_latency(Duration::ZERO);
        screen.pump();
        let data = screen.continue_payment().expect("continue enabled");
        assert_eq!(data.account_number, "123456");
        assert_eq!(data.amount, DEBT_AMOUNT);
        assert_eq!(data.company, COMPANY);
    }

    #[test]
    fn test_breakdown_sums_to_total() {
        let sum: f64 = DEBT_BREAKDOWN.iter().map(|(_, v)| v).sum();
        assert!((sum - DEBT_AMOUNT).abs() < 1e-9);
    }

    #[test]
    fn test_clear_resets_field_and_debt() {
        let mut screen = WaterPaymentScreen::new();
        screen.set_account_number("123456");
        screen.consult_with_latency(Duration::ZERO);
        screen.pump();
        screen.clear();
        assert!(screen.account_number().is_empty());
        assert!(screen.debt().is_none());
    }
}
