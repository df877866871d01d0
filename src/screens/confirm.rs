// ✅ Payment confirmation - method selection and the simulated charge
// Single-select over fixed accounts + session cards + a trailing
// "agregar tarjeta" action. Confirm cannot fail.

use std::time::Duration;

use crate::model::{CreditCardData, MethodKind, PaymentMethod};
use crate::timer::SimulatedDelay;

/// Simulated processing latency for "Confirmar y pagar".
pub const PAYMENT_LATENCY: Duration = Duration::from_millis(2000);

/// Result of activating the entry under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// A funding source became the selected method
    Selected,
    /// The add-card entry was activated; navigate to the card form
    AddCard,
}

/// Confirm-screen state. Rebuilt on entry so newly added cards appear
/// and the selection resets to the first fixed account.
pub struct ConfirmScreen {
    methods: Vec<PaymentMethod>,
    selected_id: String,
    cursor: usize,
    processing: Option<SimulatedDelay<()>>,
}

impl ConfirmScreen {
    pub fn new(cards: &[CreditCardData]) -> Self {
        let mut methods = PaymentMethod::default_methods();
        methods.extend(cards.iter().map(PaymentMethod::from_card));
        methods.push(PaymentMethod::add_card_entry());

        // Default preselection: the first fixed funding source
        let selected_id = methods[0].id.clone();

        ConfirmScreen {
            methods,
            selected_id,
            cursor: 0,
            processing: None,
        }
    }

    pub fn methods(&self) -> &[PaymentMethod] {
        &self.methods
    }

    pub fn selected_id(&self) -> &str {
        &self.selected_id
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_processing(&self) -> bool {
        self.processing.is_some()
    }

    /// Move the cursor down, wrapping. Ignored while processing.
    pub fn cursor_next(&mut self) {
        if self.is_processing() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.methods.len();
    }

    /// Move the cursor up, wrapping. Ignored while processing.
    pub fn cursor_previous(&mut self) {
        if self.is_processing() {
            return;
        }
        self.cursor = if self.cursor == 0 {
            self.methods.len() - 1
        } else {
            self.cursor - 1
        };
    }

    /// Activate the entry under the cursor: selecting a funding source
    /// marks it, activating "agregar tarjeta" requests the card form
    /// without touching the current selection.
    pub fn activate(&mut self) -> Option<SelectOutcome> {
        if self.is_processing() {
            return None;
        }
        let method = &self.methods[self.cursor];
        match method.kind {
            MethodKind::AddCard => Some(SelectOutcome::AddCard),
            _ => {
                self.selected_id = method.id.clone();
                Some(SelectOutcome::Selected)
            }
        }
    }

    /// Select a funding source by id. The add-card entry is an action,
    /// not a selectable method.
    pub fn select_id(&mut self, id: &str) -> Option<SelectOutcome> {
        if self.is_processing() {
            return None;
        }
        let method = self.methods.iter().find(|m| m.id == id)?;
        match method.kind {
            MethodKind::AddCard => Some(SelectOutcome::AddCard),
            _ => {
                self.selected_id = method.id.clone();
                Some(SelectOutcome::Selected)
            }
        }
    }

    /// "Confirmar y pagar": enter the processing state. Returns false if
    /// already processing. The charge unconditionally succeeds once the
    /// simulated delay elapses.
    pub fn confirm(&mut self) -> bool {
        self.confirm_with_latency(PAYMENT_LATENCY)
    }

    pub fn confirm_with_latency(&mut self, latency: Duration) -> bool {
        if self.is_processing() {
            return false;
        }
        self.processing = Some(SimulatedDelay::start(latency, Ok(())));
        true
    }

    /// Drive a pending charge forward. Returns true exactly once, when
    /// the simulated processing completes; the caller then navigates to
    /// the receipt.
    pub fn pump(&mut self) -> bool {
        if let Some(delay) = self.processing.as_mut() {
            if let Some(outcome) = delay.poll() {
                self.processing = None;
                return outcome.is_ok();
            }
        }
        false
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_card() -> CreditCardData {
        CreditCardData::new("4111111111111111", "JUAN PEREZ", "09".into(), "2030".into(), "123".into())
    }

    #[test]
    fn test_method_list_order() {
        let card = sample_card();
        let screen = ConfirmScreen::new(std::slice::from_ref(&card));
        let methods = screen.methods();

        assert_eq!(methods.len(), 4);
        assert_eq!(methods[0].id, "savings");
        assert_eq!(methods[1].id, "checking");
        assert_eq!(methods[2].id, card.id);
        assert_eq!(methods[3].kind, MethodKind::AddCard);
    }

    #[test]
    fn test_default_selection_is_first_account() {
        let screen = ConfirmScreen::new(&[]);
        assert_eq!(screen.selected_id(), "savings");
    }

    #[test]
    fn test_select_by_id() {
        let mut screen = ConfirmScreen::new(&[]);
        assert_eq!(screen.select_id("checking"), Some(SelectOutcome::Selected));
        assert_eq!(screen.selected_id(), "checking");
        assert_eq!(screen.select_id("unknown"), None);
        assert_eq!(screen.selected_id(), "checking");
    }

    #[test]
    fn test_add_card_does_not_alter_selection() {
        let mut screen = ConfirmScreen::new(&[]);
        screen.select_id("checking");
        assert_eq!(screen.select_id("add-card"), Some(SelectOutcome::AddCard));
        assert_eq!(screen.selected_id(), "checking");
    }

    #[test]
    fn test_activate_add_card_via_cursor() {
        let mut screen = ConfirmScreen::new(&[]);
        screen.cursor_next();
        screen.cursor_next(); // add-card entry
        assert_eq!(screen.activate(), Some(SelectOutcome::AddCard));
        assert_eq!(screen.selected_id(), "savings");
    }

    #[test]
    fn test_cursor_wraps() {
        let mut screen = ConfirmScreen::new(&[]);
        screen.cursor_previous();
        assert_eq!(screen.cursor(), 2);
        screen.cursor_next();
        assert_eq!(screen.cursor(), 0);
    }

    #[test]
    fn test_processing_disables_interaction() {
        let mut screen = ConfirmScreen::new(&[]);
        assert!(screen.confirm_with_latency(Duration::from_secs(60)));
        assert!(screen.is_processing());

        assert!(!screen.confirm_with_latency(Duration::ZERO));
        assert_eq!(screen.activate(), None);
        assert_eq!(screen.select_id("checking"), None);
        screen.cursor_next();
        assert_eq!(screen.cursor(), 0);
    }

    #[test]
    fn test_payment_always_succeeds() {
        let mut screen = ConfirmScreen::new(&[]);
        screen.confirm_with_latency(Duration::ZERO);
        assert!(screen.pump());
        assert!(!screen.is_processing());
        // pump reports completion exactly once
        assert!(!screen.pump());
    }
}
