// 🛡️ Privacy consent - "Protección de Datos" step
// Both toggles must be set before accept is enabled; decline is always
// enabled and always reports consent=false.

/// Expandable policy detail shown on demand.
pub const POLICY_RESPONSIBLE: &str = "Empresa Municipal de Agua Potable";
pub const POLICY_CONTACT: &str = "privacidad@aguapotable.gob.ec";
pub const POLICY_RETENTION: &str = "7 años según normativa fiscal";

/// Terminal action taken on the consent screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentOutcome {
    /// The user made a decision; the router records it
    Decided(bool),
    /// Back to the payment form without a decision
    Back,
}

pub struct PrivacyConsentScreen {
    has_read_policy: bool,
    accepts_consent: bool,
    show_policy_detail: bool,
}

impl PrivacyConsentScreen {
    pub fn new() -> Self {
        PrivacyConsentScreen {
            has_read_policy: false,
            accepts_consent: false,
            show_policy_detail: false,
        }
    }

    pub fn has_read_policy(&self) -> bool {
        self.has_read_policy
    }

    pub fn accepts_consent(&self) -> bool {
        self.accepts_consent
    }

    pub fn show_policy_detail(&self) -> bool {
        self.show_policy_detail
    }

    pub fn set_read_policy(&mut self, value: bool) {
        self.has_read_policy = value;
    }

    pub fn set_accept_consent(&mut self, value: bool) {
        self.accepts_consent = value;
    }

    pub fn toggle_read_policy(&mut self) {
        self.has_read_policy = !self.has_read_policy;
    }

    pub fn toggle_accept_consent(&mut self) {
        self.accepts_consent = !self.accepts_consent;
    }

    pub fn toggle_policy_detail(&mut self) {
        self.show_policy_detail = !self.show_policy_detail;
    }

    /// "Acepto y Continuar" is enabled only with both toggles set.
    pub fn can_proceed(&self) -> bool {
        self.has_read_policy && self.accepts_consent
    }

    /// Warning shown when exactly one of the two toggles is set.
    pub fn shows_warning(&self) -> bool {
        self.has_read_policy != self.accepts_consent
    }

    /// Accept and continue. `None` while the toggles are incomplete.
    pub fn accept(&self) -> Option<ConsentOutcome> {
        if self.can_proceed() {
            Some(ConsentOutcome::Decided(true))
        } else {
            None
        }
    }

    /// "No Acepto - Volver": always enabled, regardless of toggle state.
    pub fn decline(&self) -> ConsentOutcome {
        ConsentOutcome::Decided(false)
    }

    /// Back to the summary without emitting a consent decision.
    pub fn back(&self) -> ConsentOutcome {
        ConsentOutcome::Back
    }
}

impl Default for PrivacyConsentScreen {
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
    fn test_proceed_requires_both_toggles() {
        let mut screen = PrivacyConsentScreen::new();
        assert!(!screen.can_proceed());
        assert!(screen.accept().is_none());

        screen.set_read_policy(true);
        assert!(!screen.can_proceed());
        assert!(screen.accept().is_none());

        screen.set_accept_consent(true);
        assert!(screen.can_proceed());
        assert_eq!(screen.accept(), Some(ConsentOutcome::Decided(true)));
    }

    #[test]
    fn test_decline_always_enabled_and_always_false() {
        let mut screen = PrivacyConsentScreen::new();
        assert_eq!(screen.decline(), ConsentOutcome::Decided(false));

        screen.set_read_policy(true);
        screen.set_accept_consent(true);
        assert_eq!(screen.decline(), ConsentOutcome::Decided(false));
    }

    #[test]
    fn test_back_emits_no_decision() {
        let screen = PrivacyConsentScreen::new();
        assert_eq!(screen.back(), ConsentOutcome::Back);
    }

    #[test]
    fn test_warning_on_exactly_one_toggle() {
        let mut screen = PrivacyConsentScreen::new();
        assert!(!screen.shows_warning());

        screen.set_read_policy(true);
        assert!(screen.shows_warning());

        screen.set_accept_consent(true);
        assert!(!screen.shows_warning());

        screen.set_read_policy(false);
        assert!(screen.shows_warning());
    }

    #[test]
    fn test_toggles_flip() {
        let mut screen = PrivacyConsentScreen::new();
        screen.toggle_read_policy();
        screen.toggle_accept_consent();
        screen.toggle_policy_detail();
        assert!(screen.has_read_policy());
        assert!(screen.accepts_consent());
        assert!(screen.show_policy_detail());

        screen.toggle_read_policy();
        assert!(!screen.has_read_policy());
    }
}
