use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use banca_movil::screens::{home, privacy_consent, receipt, services, water_payment};
use banca_movil::{
    CardForm, ConfirmScreen, Field, Flow, FlowEvent, MethodKind, PrivacyConsentScreen, Receipt,
    Screen, ScreenId, SelectOutcome, WaterPaymentScreen,
};

/// Field order on the card form, for Tab focus cycling.
const FORM_FIELDS: [Field; 5] = Field::ALL;

pub struct App {
    pub flow: Flow,
    pub water: WaterPaymentScreen,
    pub consent: PrivacyConsentScreen,
    pub confirm: Option<ConfirmScreen>,
    pub card_form: CardForm,
    pub receipt: Option<Receipt>,
    pub home_cursor: usize,
    pub services_cursor: usize,
    pub form_focus: usize,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            flow: Flow::new(),
            water: WaterPaymentScreen::new(),
            consent: PrivacyConsentScreen::new(),
            confirm: None,
            card_form: CardForm::new(),
            receipt: None,
            home_cursor: 0,
            services_cursor: 0,
            form_focus: 0,
            status: None,
            should_quit: false,
        }
    }

    fn apply(&mut self, event: FlowEvent) {
        if let Err(err) = self.flow.apply(event) {
            self.status = Some(err.to_string());
        }
    }

    /// Drive pending simulated delays forward. Called once per loop tick,
    /// input or not, so timers complete while the user just waits.
    fn tick(&mut self) {
        match self.flow.screen().id() {
            ScreenId::WaterPayment => self.water.pump(),
            ScreenId::Confirm => {
                let paid = self.confirm.as_mut().map(|c| c.pump()).unwrap_or(false);
                if paid {
                    if let Screen::Confirm { payment } = self.flow.screen() {
                        self.receipt = Some(Receipt::for_payment(payment));
                    }
                    self.apply(FlowEvent::Navigate(ScreenId::Receipt));
                }
            }
            ScreenId::CreditCardForm => {
                if let Some(card) = self.card_form.pump() {
                    self.apply(FlowEvent::CardAdded(card));
                    self.apply(FlowEvent::Navigate(ScreenId::Confirm));
                    self.enter_confirm();
                }
            }
            _ => {}
        }
    }

    /// Confirm screen is rebuilt on entry: new cards appear, selection
    /// resets to the first fixed account.
    fn enter_confirm(&mut self) {
        self.confirm = Some(ConfirmScreen::new(self.flow.cards()));
    }

    fn enter_water_payment(&mut self) {
        self.water = WaterPaymentScreen::new();
        self.apply(FlowEvent::Navigate(ScreenId::WaterPayment));
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        self.status = None;

        match self.flow.screen().id() {
            ScreenId::Home => self.handle_home_key(code),
            ScreenId::Services => self.handle_services_key(code),
            ScreenId::WaterPayment => self.handle_water_key(code),
            ScreenId::PrivacyConsent => self.handle_consent_key(code),
            ScreenId::Confirm => self.handle_confirm_key(code),
            ScreenId::CreditCardForm => self.handle_card_form_key(code),
            ScreenId::Receipt => self.handle_receipt_key(code),
        }
    }

    fn handle_home_key(&mut self, code: KeyCode) {
        let tiles = home::service_tiles();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => {
                self.home_cursor = (self.home_cursor + 1) % tiles.len();
            }
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => {
                self.home_cursor = if self.home_cursor == 0 {
                    tiles.len() - 1
                } else {
                    self.home_cursor - 1
                };
            }
            KeyCode::Enter => {
                if tiles[self.home_cursor].navigates {
                    self.services_cursor = 0;
                    self.apply(FlowEvent::Navigate(ScreenId::Services));
                }
            }
            _ => {}
        }
    }

    fn handle_services_key(&mut self, code: KeyCode) {
        let companies = services::water_companies();
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.apply(FlowEvent::Navigate(ScreenId::Home)),
            KeyCode::Down | KeyCode::Char('j') => {
                self.services_cursor = (self.services_cursor + 1) % companies.len();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.services_cursor = if self.services_cursor == 0 {
                    companies.len() - 1
                } else {
                    self.services_cursor - 1
                };
            }
            // Any company, and the recent-payment shortcut, lead to the
            // same payment form
            KeyCode::Enter | KeyCode::Char('r') => self.enter_water_payment(),
            _ => {}
        }
    }

    fn handle_water_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.apply(FlowEvent::Navigate(ScreenId::Services)),
            KeyCode::Backspace => self.water.pop_char(),
            KeyCode::Delete => self.water.clear(),
            KeyCode::Enter => {
                if let Some(data) = self.water.continue_payment() {
                    self.consent = PrivacyConsentScreen::new();
                    self.apply(FlowEvent::PaymentPrepared(data));
                    self.apply(FlowEvent::Navigate(ScreenId::PrivacyConsent));
                } else {
                    self.water.consult();
                }
            }
            KeyCode::Char(c) => self.water.push_char(c),
            _ => {}
        }
    }

    fn handle_consent_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.consent.toggle_read_policy(),
            KeyCode::Char('2') => self.consent.toggle_accept_consent(),
            KeyCode::Char('p') => self.consent.toggle_policy_detail(),
            KeyCode::Enter | KeyCode::Char('a') => {
                if self.consent.accept().is_some() {
                    self.apply(FlowEvent::ConsentDecision(true));
                    self.enter_confirm();
                }
            }
            KeyCode::Char('d') => {
                // Decline is always enabled and routes back to the form
                self.apply(FlowEvent::ConsentDecision(false));
                self.water = WaterPaymentScreen::new();
            }
            KeyCode::Esc => {
                // Back without a consent decision
                self.apply(FlowEvent::Navigate(ScreenId::WaterPayment));
            }
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, code: KeyCode) {
        let Some(confirm) = self.confirm.as_mut() else {
            return;
        };
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => confirm.cursor_next(),
            KeyCode::Up | KeyCode::Char('k') => confirm.cursor_previous(),
            KeyCode::Enter => {
                if let Some(SelectOutcome::AddCard) = confirm.activate() {
                    self.card_form = CardForm::new();
                    self.form_focus = 0;
                    self.apply(FlowEvent::Navigate(ScreenId::CreditCardForm));
                }
            }
            KeyCode::Char('p') => {
                confirm.confirm();
            }
            KeyCode::Esc => {
                if !confirm.is_processing() {
                    self.enter_water_payment();
                }
            }
            _ => {}
        }
    }

    fn handle_card_form_key(&mut self, code: KeyCode) {
        let field = FORM_FIELDS[self.form_focus];
        match code {
            KeyCode::Esc => {
                if !self.card_form.is_submitting() {
                    self.apply(FlowEvent::Navigate(ScreenId::Confirm));
                    self.enter_confirm();
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                self.form_focus = (self.form_focus + 1) % FORM_FIELDS.len();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form_focus = if self.form_focus == 0 {
                    FORM_FIELDS.len() - 1
                } else {
                    self.form_focus - 1
                };
            }
            KeyCode::F(2) => self.card_form.toggle_show_cvv(),
            KeyCode::Enter => {
                self.card_form.submit();
            }
            KeyCode::Backspace => self.card_form.pop_char(field),
            KeyCode::Char(c) => self.card_form.push_char(field, c),
            _ => {}
        }
    }

    fn handle_receipt_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('d') => {
                // Simulated download: the comprobante exists only as JSON
                let exported = self
                    .receipt
                    .as_ref()
                    .and_then(|r| r.to_json().ok())
                    .is_some();
                if exported {
                    self.status = Some(receipt::DOWNLOAD_NOTICE.to_string());
                }
            }
            KeyCode::Char('s') => self.status = Some(receipt::SHARE_NOTICE.to_string()),
            KeyCode::Enter | KeyCode::Esc => {
                self.apply(FlowEvent::Navigate(ScreenId::Home));
            }
            _ => {}
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        // Short poll so simulated delays complete without keyboard input
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key.code, key.modifiers);
            }
        }
        app.tick();

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Screen content
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.flow.screen() {
        Screen::Home => render_home(f, chunks[1], app),
        Screen::Services => render_services(f, chunks[1], app),
        Screen::WaterPayment => render_water_payment(f, chunks[1], app),
        Screen::PrivacyConsent { .. } => render_privacy_consent(f, chunks[1], app),
        Screen::Confirm { .. } => render_confirm(f, chunks[1], app),
        Screen::CreditCardForm => render_card_form(f, chunks[1], app),
        Screen::Receipt { .. } => render_receipt(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let screen = app.flow.screen();
    let mut spans = vec![
        Span::styled(
            screen.title(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(screen.id().as_str(), Style::default().fg(Color::DarkGray)),
    ];

    // Step indicator for the three payment steps
    let step = match screen.id() {
        ScreenId::WaterPayment => Some(1),
        ScreenId::PrivacyConsent | ScreenId::Confirm | ScreenId::CreditCardForm => Some(2),
        ScreenId::Receipt => Some(3),
        _ => None,
    };
    if let Some(step) = step {
        spans.push(Span::raw("  |  "));
        for (i, label) in ["Datos", "Confirmar", "Pagar"].iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" → "));
            }
            let style = if i + 1 == step {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if i + 1 < step {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(*label, style));
        }
    }

    let header = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

fn cursor_marker(active: bool) -> Span<'static> {
    if active {
        Span::styled("→ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::raw("  ")
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn render_home(f: &mut Frame, area: Rect, app: &App) {
    let mut content = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  Bienvenido, "),
            Span::styled(home::WELCOME_NAME, Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Saldo disponible: ", Style::default().fg(Color::Cyan)),
            Span::styled(home::BALANCE_LABEL, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(home::BALANCE_ACCOUNT, Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  ¿Qué deseas hacer hoy?",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (i, tile) in home::service_tiles().iter().enumerate() {
        let style = if tile.navigates {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        content.push(Line::from(vec![
            Span::raw("  "),
            cursor_marker(i == app.home_cursor),
            Span::styled(tile.label, style),
        ]));
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "  Actividad reciente",
        Style::default().fg(Color::Cyan),
    )));
    for (name, date, amount) in home::recent_activity() {
        content.push(Line::from(vec![
            Span::raw(format!("    {} ({})  ", name, date)),
            Span::styled(amount, Style::default().fg(Color::Red)),
        ]));
    }

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Banca Móvil "),
    );
    f.render_widget(paragraph, area);
}

fn render_services(f: &mut Frame, area: Rect, app: &App) {
    let (company, account, date) = services::recent_payment();
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled("  Pagos recientes", Style::default().fg(Color::Cyan))),
        Line::from(vec![
            Span::raw(format!("    {} Cuenta: {} ({})  ", company, account, date)),
            Span::styled("[r] Pagar nuevamente", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Todas las empresas de agua",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (i, company) in services::water_companies().iter().enumerate() {
        let mut spans = vec![
            Span::raw("  "),
            cursor_marker(i == app.services_cursor),
            Span::styled(company.name, Style::default().add_modifier(Modifier::BOLD)),
        ];
        if company.is_favorite {
            spans.push(Span::styled(" ★", Style::default().fg(Color::Yellow)));
        }
        content.push(Line::from(spans));
        content.push(Line::from(Span::styled(
            format!("      {}", company.description),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Pago de Servicios "),
    );
    f.render_widget(paragraph, area);
}

fn render_water_payment(f: &mut Frame, area: Rect, app: &App) {
    let mut content = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(water_payment::COMPANY, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::styled("  Empresa Pública Metropolitana", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from("  Número de cuenta o contrato *"),
        Line::from(vec![
            Span::raw("  ▌ "),
            Span::styled(
                if app.water.account_number().is_empty() {
                    "Ej: 123456789".to_string()
                } else {
                    app.water.account_number().to_string()
                },
                if app.water.account_number().is_empty() {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                },
            ),
        ]),
        Line::from(""),
    ];

    if app.water.is_loading() {
        content.push(Line::from(Span::styled(
            "  Consultando...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        )));
    } else if app.water.debt().is_none() {
        let hint = if app.water.can_consult() {
            Span::styled("  [Enter] Consultar deuda", Style::default().fg(Color::Yellow))
        } else {
            Span::styled(
                format!("  Ingresa al menos {} caracteres para consultar", water_payment::MIN_ACCOUNT_LEN),
                Style::default().fg(Color::DarkGray),
            )
        };
        content.push(Line::from(hint));
    }

    if let Some(debt) = app.water.debt() {
        content.push(Line::from(Span::styled(
            "  ✓ Cuenta encontrada",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
        content.push(Line::from(""));
        content.push(Line::from(format!("  Titular:   {}", debt.client_name)));
        content.push(Line::from(format!("  Cuenta:    {}", app.water.account_number())));
        content.push(Line::from(format!("  Dirección: {}", debt.address)));
        content.push(Line::from(""));
        content.push(Line::from(vec![
            Span::raw("  Total a pagar: "),
            Span::styled(
                format!("${:.2}", debt.amount),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  Periodo: {}", debt.period), Style::default().fg(Color::DarkGray)),
        ]));
        content.push(Line::from(""));
        content.push(Line::from(Span::styled("  Detalle del consumo", Style::default().fg(Color::Cyan))));
        for (concept, amount) in water_payment::DEBT_BREAKDOWN {
            content.push(Line::from(format!("    {:<24} ${:.2}", concept, amount)));
        }
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            "  [Enter] Continuar con el pago",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Pago de Agua Potable "),
    );
    f.render_widget(paragraph, area);
}

fn render_privacy_consent(f: &mut Frame, area: Rect, app: &App) {
    let payment = match app.flow.screen() {
        Screen::PrivacyConsent { payment } => payment,
        _ => return,
    };

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Antes de procesar su pago, necesitamos su consentimiento",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Procesando pago de: "),
            Span::styled(
                payment.client_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  Monto: ${:.2}", payment.amount), Style::default().fg(Color::Green)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(checkbox(app.consent.has_read_policy()), Style::default().fg(Color::Yellow)),
            Span::raw(" [1] He leído la información sobre el tratamiento de mis datos"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(checkbox(app.consent.accepts_consent()), Style::default().fg(Color::Yellow)),
            Span::raw(" [2] Doy mi consentimiento explícito para procesar esta transacción"),
        ]),
        Line::from(""),
    ];

    if app.consent.shows_warning() {
        content.push(Line::from(Span::styled(
            "  ⚠ Debe aceptar ambas condiciones para continuar.",
            Style::default().fg(Color::Red),
        )));
        content.push(Line::from(""));
    }

    content.push(Line::from(Span::styled(
        "  [p] Leer política de privacidad completa",
        Style::default().fg(Color::Blue),
    )));
    if app.consent.show_policy_detail() {
        content.push(Line::from(format!("    Responsable: {}", privacy_consent::POLICY_RESPONSIBLE)));
        content.push(Line::from(format!("    Contacto: {}", privacy_consent::POLICY_CONTACT)));
        content.push(Line::from(format!(
            "    Tiempo de conservación: {}",
            privacy_consent::POLICY_RETENTION
        )));
    }

    content.push(Line::from(""));
    let accept_style = if app.consent.can_proceed() {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    content.push(Line::from(Span::styled("  [Enter] Acepto y Continuar", accept_style)));
    content.push(Line::from(Span::styled(
        "  [d] No Acepto - Volver",
        Style::default().fg(Color::Blue),
    )));
    content.push(Line::from(Span::styled(
        "  [Esc] Volver al resumen",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Protección de Datos "),
    );
    f.render_widget(paragraph, area);
}

fn render_confirm(f: &mut Frame, area: Rect, app: &App) {
    let payment = match app.flow.screen() {
        Screen::Confirm { payment } => payment,
        _ => return,
    };
    let Some(confirm) = app.confirm.as_ref() else {
        return;
    };

    let mut content = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  Vas a pagar: "),
            Span::styled(
                format!("${:.2}", payment.amount),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", payment.period), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(format!("  Servicio:     {}", payment.company)),
        Line::from(format!("  Beneficiario: {}", payment.client_name)),
        Line::from(format!("  Cuenta:       {}", payment.account_number)),
        Line::from(format!("  Dirección:    {}", payment.address)),
        Line::from(""),
        Line::from(Span::styled(
            "  Selecciona el método de pago",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (i, method) in confirm.methods().iter().enumerate() {
        let selected = method.id == confirm.selected_id() && method.kind != MethodKind::AddCard;
        let name_style = match method.kind {
            MethodKind::AddCard => Style::default().fg(Color::Magenta),
            _ if selected => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            _ => Style::default(),
        };
        let mut spans = vec![
            Span::raw("  "),
            cursor_marker(i == confirm.cursor()),
            Span::styled(if selected { "(•) " } else { "( ) " }, name_style),
            Span::styled(method.name.clone(), name_style),
            Span::styled(format!("  {}", method.detail), Style::default().fg(Color::DarkGray)),
        ];
        if !method.balance.is_empty() {
            spans.push(Span::styled(
                format!("  {}", method.balance),
                Style::default().fg(Color::Green),
            ));
        }
        content.push(Line::from(spans));
    }

    content.push(Line::from(""));
    if confirm.is_processing() {
        content.push(Line::from(Span::styled(
            "  Procesando pago...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        )));
    } else {
        content.push(Line::from(Span::styled(
            "  [p] Confirmar y pagar",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Confirmar Pago "),
    );
    f.render_widget(paragraph, area);
}

fn render_card_form(f: &mut Frame, area: Rect, app: &App) {
    let labels = [
        "Número de tarjeta *",
        "Nombre del titular *",
        "Mes (MM) *",
        "Año (AAAA) *",
        "CVV *",
    ];

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  🛡 Información segura: tus datos no se almacenan en servidores.",
            Style::default().fg(Color::Blue),
        )),
        Line::from(""),
    ];

    for (i, field) in FORM_FIELDS.iter().enumerate() {
        let focused = i == app.form_focus;
        let raw_value = app.card_form.value(*field);
        let display = if *field == Field::Cvv && !app.card_form.show_cvv() {
            "•".repeat(raw_value.chars().count())
        } else {
            raw_value.to_string()
        };

        content.push(Line::from(vec![
            Span::raw("  "),
            cursor_marker(focused),
            Span::styled(
                format!("{:<22}", labels[i]),
                if focused {
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                },
            ),
            Span::styled(display, Style::default().add_modifier(Modifier::BOLD)),
        ]));

        if let Some(err) = app.card_form.error(*field) {
            content.push(Line::from(Span::styled(
                format!("      ⚠ {}", err.message),
                Style::default().fg(Color::Red),
            )));
        }
    }

    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("  Tipo detectado: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.card_form.detected_type().display_name(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ]));
    content.push(Line::from(Span::styled(
        format!("  🔒 {}", app.card_form.cvv_hint()),
        Style::default().fg(Color::DarkGray),
    )));
    content.push(Line::from(""));

    if app.card_form.is_submitting() {
        content.push(Line::from(Span::styled(
            "  Validando tarjeta...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        )));
    } else {
        content.push(Line::from(Span::styled(
            "  [Enter] Agregar tarjeta    [Esc] Cancelar    [F2] Mostrar/ocultar CVV",
            Style::default().fg(Color::Yellow),
        )));
    }

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" Agregar Tarjeta "),
    );
    f.render_widget(paragraph, area);
}

fn render_receipt(f: &mut Frame, area: Rect, app: &App) {
    let Some(receipt) = app.receipt.as_ref() else {
        return;
    };

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  ✓ ¡Pago exitoso!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  Tu pago se ha procesado correctamente",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Monto pagado: "),
            Span::styled(
                format!("${:.2}", receipt.amount),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(format!("  Servicio:    {}", receipt.company)),
        Line::from(format!("  Cuenta:      {}", receipt.account_number)),
        Line::from(format!("  Periodo:     {}", receipt.period)),
        Line::from(format!("  Fecha y hora: {}", receipt.transaction_date)),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Número de transacción: "),
            Span::styled(
                receipt.transaction_number.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            "  Guarda este número para cualquier reclamo",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled("  Desglose del pago", Style::default().fg(Color::Cyan))),
    ];

    for line in &receipt.breakdown {
        content.push(Line::from(format!("    {:<24} ${:.2}", line.concept, line.amount)));
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "  [d] Descargar    [s] Compartir    [Enter] Volver al inicio",
        Style::default().fg(Color::Yellow),
    )));

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Comprobante "),
    );
    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Green),
        ));
        spans.push(Span::raw("| "));
    }

    let hints: &[(&str, &str)] = match app.flow.screen().id() {
        ScreenId::Home => &[("↑/↓", "Nav"), ("Enter", "Abrir"), ("q", "Salir")],
        ScreenId::Services => &[("↑/↓", "Nav"), ("Enter", "Elegir"), ("Esc", "Volver")],
        ScreenId::WaterPayment => &[("Enter", "Consultar/Continuar"), ("Del", "Limpiar"), ("Esc", "Volver")],
        ScreenId::PrivacyConsent => &[("1/2", "Marcar"), ("Enter", "Aceptar"), ("d", "No acepto")],
        ScreenId::Confirm => &[("↑/↓", "Método"), ("Enter", "Seleccionar"), ("p", "Pagar"), ("Esc", "Cancelar")],
        ScreenId::CreditCardForm => &[("Tab", "Campo"), ("Enter", "Agregar"), ("Esc", "Cancelar")],
        ScreenId::Receipt => &[("d", "Descargar"), ("s", "Compartir"), ("Enter", "Inicio")],
    };

    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(" {}", action)));
    }

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );
    f.render_widget(status_bar, area);
}
