// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Enums pour state machines : un seul écran actif à la fois
//
// PATTERN : "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// - L'authentification, elle, vit dans le SessionStore (worker thread)
// ============================================================================

use chrono::NaiveDate;

use crate::analytics::CashFlowSummary;
use crate::models::{
    BankResponse, CreditDebitRequest, PasswordChange, ProfileUpdate, StatementRequest, Transaction,
    TransferRequest, UserProfile, UserRegistration,
};
use crate::validation::{FieldError, ValidationErrors};

// ============================================================================
// Enum : Screen
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Dashboard,
    /// Formulaire crédit / débit / virement
    Transaction(TransactionKind),
    Statement,
    Analytics,
    Profile(ProfileMode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Credit,
    Debit,
    Transfer,
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Credit => "Credit",
            TransactionKind::Debit => "Debit",
            TransactionKind::Transfer => "Transfer",
        }
    }
}

/// Sous-vues de l'écran profil
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileMode {
    View,
    Edit,
    ChangePassword,
    Picture,
}

// ============================================================================
// Formulaires
// ============================================================================
// CONCEPT : Formulaire générique
// - Une liste de champs + un index de focus
// - Les clés sont les noms de champs de l'API ("accountNumber", ...) :
//   les ValidationErrors se rattachent directement au bon champ
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
    /// Affiché masqué (mots de passe)
    pub secret: bool,
}

impl FormField {
    fn text(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            value: String::new(),
            secret: false,
        }
    }

    fn secret(key: &'static str, label: &'static str) -> Self {
        Self {
            secret: true,
            ..Self::text(key, label)
        }
    }

    fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Valeur affichable (masquée si secrète)
    pub fn display_value(&self) -> String {
        if self.secret {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub focus: usize,
    pub errors: Option<ValidationErrors>,
}

impl Form {
    fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            focus: 0,
            errors: None,
        }
    }

    pub fn login() -> Self {
        Self::new(vec![
            FormField::text("email", "Email"),
            FormField::secret("password", "Password"),
        ])
    }

    pub fn register() -> Self {
        Self::new(vec![
            FormField::text("firstName", "First name"),
            FormField::text("lastName", "Last name"),
            FormField::text("gender", "Gender"),
            FormField::text("address", "Address"),
            FormField::text("state", "State"),
            FormField::text("email", "Email"),
            FormField::text("phoneNumber", "Phone number"),
            FormField::secret("password", "Password"),
        ])
    }

    /// Crédit/débit : compte pré-rempli ; virement : source pré-remplie
    pub fn transaction(kind: TransactionKind, account_number: &str) -> Self {
        match kind {
            TransactionKind::Credit | TransactionKind::Debit => Self::new(vec![
                FormField::text("accountNumber", "Account number").with_value(account_number),
                FormField::text("amount", "Amount"),
            ]),
            TransactionKind::Transfer => Self::new(vec![
                FormField::text("sourceAccountNumber", "From account").with_value(account_number),
                FormField::text("destinationAccountNumber", "To account"),
                FormField::text("amount", "Amount"),
            ]),
        }
    }

    /// Période par défaut : les `days` derniers jours
    pub fn statement(account_number: &str, today: NaiveDate, days: u32) -> Self {
        let default = StatementRequest::last_days(account_number, today, days);
        Self::new(vec![
            FormField::text("accountNumber", "Account number").with_value(account_number),
            FormField::text("startDate", "Start date (YYYY-MM-DD)")
                .with_value(default.start_date.format("%Y-%m-%d").to_string()),
            FormField::text("endDate", "End date (YYYY-MM-DD)")
                .with_value(default.end_date.format("%Y-%m-%d").to_string()),
        ])
    }

    pub fn profile_edit(profile: &UserProfile) -> Self {
        Self::new(vec![
            FormField::text("fullName", "Full name").with_value(profile.full_name()),
            FormField::text("email", "Email").with_value(profile.email.clone()),
            FormField::text("phoneNumber", "Phone number").with_value(profile.phone_number.clone()),
            FormField::text("notificationPreferences", "Notifications (email,sms,push)")
                .with_value(profile.notifications().to_csv()),
            FormField::text("darkMode", "Dark mode (yes/no)")
                .with_value(if profile.dark_mode.unwrap_or(false) { "yes" } else { "no" }),
        ])
    }

    pub fn password() -> Self {
        Self::new(vec![
            FormField::secret("oldPassword", "Current password"),
            FormField::secret("newPassword", "New password"),
            FormField::secret("confirmPassword", "Confirm new password"),
        ])
    }

    pub fn picture() -> Self {
        Self::new(vec![FormField::text("path", "Image file path")])
    }

    // ------------------------------------------------------------------------
    // Saisie
    // ------------------------------------------------------------------------

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_previous(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    /// Valeur d'un champ (chaîne vide si absent)
    pub fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    pub fn error_for(&self, key: &str) -> Option<&str> {
        self.errors.as_ref().and_then(|e| e.for_field(key))
    }

    // ------------------------------------------------------------------------
    // Conversion en requêtes typées
    // ------------------------------------------------------------------------
    // CONCEPT : Un montant illisible devient NaN, que la validation rejette
    // avec le même message qu'un montant négatif.

    fn amount(&self) -> f64 {
        self.value("amount").trim().parse().unwrap_or(f64::NAN)
    }

    pub fn to_registration(&self) -> UserRegistration {
        UserRegistration {
            first_name: self.value("firstName").trim().to_string(),
            last_name: self.value("lastName").trim().to_string(),
            gender: self.value("gender").trim().to_string(),
            address: self.value("address").trim().to_string(),
            state: self.value("state").trim().to_string(),
            email: self.value("email").trim().to_string(),
            password: self.value("password").to_string(),
            phone_number: self.value("phoneNumber").trim().to_string(),
            status: UserRegistration::ACTIVE.to_string(),
        }
    }

    pub fn to_credit_debit(&self) -> CreditDebitRequest {
        CreditDebitRequest {
            account_number: self.value("accountNumber").trim().to_string(),
            amount: self.amount(),
        }
    }

    pub fn to_transfer(&self) -> TransferRequest {
        TransferRequest {
            source_account_number: self.value("sourceAccountNumber").trim().to_string(),
            destination_account_number: self.value("destinationAccountNumber").trim().to_string(),
            amount: self.amount(),
        }
    }

    /// Les dates illisibles sont signalées comme erreurs de champ
    pub fn to_statement(&self) -> Result<StatementRequest, ValidationErrors> {
        let parse = |key: &'static str| {
            NaiveDate::parse_from_str(self.value(key).trim(), "%Y-%m-%d")
                .map_err(|_| FieldError::new(key, "Use the YYYY-MM-DD format"))
        };

        match (parse("startDate"), parse("endDate")) {
            (Ok(start), Ok(end)) => Ok(StatementRequest::new(self.value("accountNumber"), start, end)),
            (start, end) => Err(ValidationErrors::from(
                [start.err(), end.err()].into_iter().flatten().collect::<Vec<_>>(),
            )),
        }
    }

    /// Seuls les champs modifiés par rapport au profil partent sur le réseau
    pub fn to_profile_update(&self, current: &UserProfile) -> ProfileUpdate {
        let mut update = ProfileUpdate::default();

        let full_name = self.value("fullName").trim();
        if full_name != current.full_name() {
            update = update.with_full_name(full_name);
        }

        let email = self.value("email").trim();
        if email != current.email {
            update.email = Some(email.to_string());
        }

        let phone = self.value("phoneNumber").trim();
        if phone != current.phone_number {
            update.phone_number = Some(phone.to_string());
        }

        let notifications = crate::models::NotificationPreferences::parse(self.value("notificationPreferences"));
        if notifications != current.notifications() {
            update.notification_preferences = Some(notifications.to_csv());
        }

        let dark_mode = matches!(self.value("darkMode").trim().to_ascii_lowercase().as_str(), "yes" | "y" | "true" | "on");
        if dark_mode != current.dark_mode.unwrap_or(false) {
            update.dark_mode = Some(dark_mode);
        }

        update
    }

    pub fn to_password_change(&self) -> PasswordChange {
        PasswordChange {
            old_password: self.value("oldPassword").to_string(),
            new_password: self.value("newPassword").to_string(),
            confirm_password: self.value("confirmPassword").to_string(),
        }
    }
}

// ============================================================================
// Message de statut
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

// ============================================================================
// App
// ============================================================================

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Two-step quit : première pression de 'q' = demande, seconde = quit
    pub confirm_quit: bool,

    /// Une requête est en cours dans le worker
    pub is_loading: bool,
    pub loading_message: Option<String>,

    pub status: Option<StatusMessage>,

    /// Formulaire de l'écran courant (vide sur les écrans sans saisie)
    pub form: Form,

    // Données du dashboard
    pub account_number: Option<String>,
    pub account_name: Option<String>,
    pub balance: Option<f64>,
    pub recent_transactions: Vec<Transaction>,

    /// Le solde est masqué par défaut ('b' pour l'afficher)
    pub show_balance: bool,
    /// Le numéro de compte est masqué par défaut ('n' pour l'afficher)
    pub show_account_number: bool,

    /// Dernière réponse d'opération (crédit, débit, virement)
    pub last_operation: Option<BankResponse>,

    pub statement: Vec<Transaction>,
    pub statement_offset: usize,

    pub cash_flow: Option<CashFlowSummary>,

    pub profile: Option<UserProfile>,
    pub has_profile_picture: bool,

    /// Fenêtre "récent" du dashboard, en jours
    pub recent_days: u32,
}

impl App {
    /// Démarre sur l'écran de connexion
    pub fn new(recent_days: u32) -> Self {
        Self {
            running: true,
            current_screen: Screen::Login,
            confirm_quit: false,
            is_loading: false,
            loading_message: None,
            status: None,
            form: Form::login(),
            account_number: None,
            account_name: None,
            balance: None,
            recent_transactions: Vec::new(),
            show_balance: false,
            show_account_number: false,
            last_operation: None,
            statement: Vec::new(),
            statement_offset: 0,
            cash_flow: None,
            profile: None,
            has_profile_picture: false,
            recent_days,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    pub fn start_loading(&mut self, message: impl Into<String>) {
        self.is_loading = true;
        self.loading_message = Some(message.into());
    }

    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.loading_message = None;
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    /// Affiche les erreurs de validation sous les champs concernés
    pub fn set_form_errors(&mut self, errors: ValidationErrors) {
        self.set_error(errors.to_string());
        self.form.errors = Some(errors);
    }

    /// Vrai si l'écran courant capture les caractères tapés
    pub fn has_text_input(&self) -> bool {
        matches!(
            self.current_screen,
            Screen::Login | Screen::Register | Screen::Transaction(_) | Screen::Statement
        ) || matches!(
            self.current_screen,
            Screen::Profile(ProfileMode::Edit | ProfileMode::ChangePassword | ProfileMode::Picture)
        )
    }

    // ========================================================================
    // Transitions d'écran
    // ========================================================================

    fn go_to(&mut self, screen: Screen, form: Form) {
        self.current_screen = screen;
        self.form = form;
        self.confirm_quit = false;
    }

    pub fn show_login(&mut self) {
        self.go_to(Screen::Login, Form::login());
    }

    pub fn show_register(&mut self) {
        self.go_to(Screen::Register, Form::register());
    }

    pub fn show_dashboard(&mut self) {
        self.go_to(Screen::Dashboard, Form::default());
    }

    pub fn show_transaction(&mut self, kind: TransactionKind) {
        let account = self.account_number.clone().unwrap_or_default();
        self.last_operation = None;
        self.go_to(Screen::Transaction(kind), Form::transaction(kind, &account));
    }

    pub fn show_statement(&mut self, today: NaiveDate) {
        let account = self.account_number.clone().unwrap_or_default();
        self.statement.clear();
        self.statement_offset = 0;
        self.go_to(Screen::Statement, Form::statement(&account, today, self.recent_days));
    }

    pub fn show_analytics(&mut self) {
        self.cash_flow = None;
        self.go_to(Screen::Analytics, Form::default());
    }

    pub fn show_profile(&mut self) {
        self.go_to(Screen::Profile(ProfileMode::View), Form::default());
    }

    /// Ouvre l'édition ; sans profil chargé, reste sur la vue
    pub fn edit_profile(&mut self) {
        if let Some(profile) = &self.profile {
            let form = Form::profile_edit(profile);
            self.go_to(Screen::Profile(ProfileMode::Edit), form);
        }
    }

    pub fn show_password_form(&mut self) {
        self.go_to(Screen::Profile(ProfileMode::ChangePassword), Form::password());
    }

    pub fn show_picture_form(&mut self) {
        self.go_to(Screen::Profile(ProfileMode::Picture), Form::picture());
    }

    /// Écran précédent (Esc)
    pub fn back(&mut self) {
        match self.current_screen {
            Screen::Register => self.show_login(),
            Screen::Profile(ProfileMode::Edit | ProfileMode::ChangePassword | ProfileMode::Picture) => {
                self.show_profile()
            }
            Screen::Transaction(_) | Screen::Statement | Screen::Analytics | Screen::Profile(ProfileMode::View) => {
                self.show_dashboard()
            }
            Screen::Login | Screen::Dashboard => {}
        }
    }

    // ========================================================================
    // Session
    // ========================================================================

    pub fn on_logged_in(&mut self, account_number: Option<String>) {
        self.account_number = account_number;
        self.show_dashboard();
        self.set_info("Login successful");
    }

    /// Efface toutes les données du compte (logout ou session expirée)
    pub fn clear_account(&mut self) {
        self.account_number = None;
        self.account_name = None;
        self.balance = None;
        self.recent_transactions.clear();
        self.statement.clear();
        self.cash_flow = None;
        self.profile = None;
        self.has_profile_picture = false;
        self.last_operation = None;
        self.show_balance = false;
        self.show_account_number = false;
        self.stop_loading();
    }

    pub fn on_logged_out(&mut self) {
        self.clear_account();
        self.show_login();
        self.set_info("Logged out");
    }

    /// Retour au login après un 401
    pub fn on_session_expired(&mut self) {
        self.clear_account();
        self.show_login();
        self.set_error("Session expired. Please log in again.");
    }

    // ========================================================================
    // Dashboard
    // ========================================================================

    pub fn toggle_balance(&mut self) {
        self.show_balance = !self.show_balance;
    }

    pub fn toggle_account_number(&mut self) {
        self.show_account_number = !self.show_account_number;
    }

    /// Numéro de compte tel qu'affiché (masqué sauf les 4 derniers chiffres)
    pub fn displayed_account_number(&self) -> String {
        match &self.account_number {
            Some(number) if self.show_account_number => number.clone(),
            Some(number) => mask_account_number(number),
            None => "-".to_string(),
        }
    }

    pub fn displayed_balance(&self) -> String {
        match (self.show_balance, self.balance) {
            (false, _) => "••••••".to_string(),
            (true, Some(balance)) => format!("{:.2}", balance),
            (true, None) => "unavailable".to_string(),
        }
    }

    // ========================================================================
    // Relevé
    // ========================================================================

    pub fn scroll_statement_down(&mut self) {
        let max = self.statement.len().saturating_sub(1);
        self.statement_offset = (self.statement_offset + 1).min(max);
    }

    pub fn scroll_statement_up(&mut self) {
        self.statement_offset = self.statement_offset.saturating_sub(1);
    }
}

/// "••••••0001" : seuls les 4 derniers caractères restent visibles
pub fn mask_account_number(number: &str) -> String {
    let chars: Vec<char> = number.chars().collect();
    if chars.len() <= 4 {
        return number.to_string();
    }
    let hidden = chars.len() - 4;
    let visible: String = chars[hidden..].iter().collect();
    format!("{}{}", "•".repeat(hidden), visible)
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn type_into(form: &mut Form, text: &str) {
        for c in text.chars() {
            form.push_char(c);
        }
    }

    #[test]
    fn test_app_starts_on_login() {
        let app = App::new(30);
        assert!(app.is_running());
        assert_eq!(app.current_screen, Screen::Login);
        assert!(app.has_text_input());
        assert!(!app.show_balance);
    }

    #[test]
    fn test_two_step_quit() {
        let mut app = App::new(30);
        app.show_dashboard();
        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        app.cancel_quit();
        assert!(!app.is_awaiting_quit_confirmation());
        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_form_focus_wraps() {
        let mut form = Form::login();
        assert_eq!(form.focus, 0);
        form.focus_next();
        assert_eq!(form.focus, 1);
        form.focus_next();
        assert_eq!(form.focus, 0);
        form.focus_previous();
        assert_eq!(form.focus, 1);
    }

    #[test]
    fn test_form_typing_and_secret_display() {
        let mut form = Form::login();
        type_into(&mut form, "a@b.com");
        form.focus_next();
        type_into(&mut form, "secrett");
        form.backspace();

        assert_eq!(form.value("email"), "a@b.com");
        assert_eq!(form.value("password"), "secret");
        assert_eq!(form.fields[1].display_value(), "••••••");
    }

    #[test]
    fn test_transaction_form_amount_parsing() {
        let mut form = Form::transaction(TransactionKind::Credit, "2024000001");
        form.focus_next();
        type_into(&mut form, "abc");

        let request = form.to_credit_debit();
        assert_eq!(request.account_number, "2024000001");
        assert!(request.amount.is_nan());
        assert!(request.validate().is_err());

        let mut transfer = Form::transaction(TransactionKind::Transfer, "2024000001");
        transfer.focus_next();
        type_into(&mut transfer, "2024000002");
        transfer.focus_next();
        type_into(&mut transfer, "150.5");
        let request = transfer.to_transfer();
        assert_eq!(request.destination_account_number, "2024000002");
        assert_eq!(request.amount, 150.5);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_statement_form_defaults_and_bad_dates() {
        let form = Form::statement("2024000001", day(2024, 3, 31), 30);
        let request = form.to_statement().unwrap();
        assert_eq!(request.start_date, day(2024, 3, 1));
        assert_eq!(request.end_date, day(2024, 3, 31));

        let mut broken = form.clone();
        broken.focus = 1;
        type_into(&mut broken, "x");
        let errors = broken.to_statement().unwrap_err();
        assert!(errors.for_field("startDate").is_some());
        assert!(errors.for_field("endDate").is_none());
    }

    #[test]
    fn test_profile_update_only_sends_changes() {
        let profile = UserProfile {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "0123456789".to_string(),
            notification_preferences: Some("email".to_string()),
            dark_mode: Some(false),
            ..Default::default()
        };

        let form = Form::profile_edit(&profile);
        assert_eq!(form.to_profile_update(&profile), ProfileUpdate::default());

        let mut edited = form.clone();
        edited.focus = 4;
        edited.backspace();
        edited.backspace();
        type_into(&mut edited, "yes");
        let update = edited.to_profile_update(&profile);
        assert_eq!(update.dark_mode, Some(true));
        assert!(update.email.is_none());
    }

    #[test]
    fn test_registration_from_form() {
        let mut form = Form::register();
        for value in ["Ada", "Lovelace", "F", "12 Analytical St", "London", "ada@example.com", "0123456789", "engine1"] {
            type_into(&mut form, value);
            form.focus_next();
        }
        let registration = form.to_registration();
        assert_eq!(registration.status, "ACTIVE");
        assert!(registration.validate().is_ok());
    }

    #[test]
    fn test_back_navigation() {
        let mut app = App::new(30);
        app.show_register();
        app.back();
        assert_eq!(app.current_screen, Screen::Login);

        app.show_password_form();
        app.back();
        assert_eq!(app.current_screen, Screen::Profile(ProfileMode::View));
        app.back();
        assert_eq!(app.current_screen, Screen::Dashboard);
        assert!(!app.has_text_input());
    }

    #[test]
    fn test_edit_profile_requires_loaded_profile() {
        let mut app = App::new(30);
        app.show_profile();
        app.edit_profile();
        assert_eq!(app.current_screen, Screen::Profile(ProfileMode::View));

        app.profile = Some(UserProfile::default());
        app.edit_profile();
        assert_eq!(app.current_screen, Screen::Profile(ProfileMode::Edit));
    }

    #[test]
    fn test_session_expired_clears_account() {
        let mut app = App::new(30);
        app.on_logged_in(Some("2024000001".to_string()));
        app.balance = Some(100.0);
        assert_eq!(app.current_screen, Screen::Dashboard);

        app.on_session_expired();
        assert_eq!(app.current_screen, Screen::Login);
        assert!(app.account_number.is_none());
        assert!(app.balance.is_none());
        assert!(app.status.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_masking_and_toggles() {
        assert_eq!(mask_account_number("2024000001"), "••••••0001");
        assert_eq!(mask_account_number("123"), "123");

        let mut app = App::new(30);
        app.account_number = Some("2024000001".to_string());
        app.balance = Some(1500.0);
        assert_eq!(app.displayed_account_number(), "••••••0001");
        assert_eq!(app.displayed_balance(), "••••••");

        app.toggle_account_number();
        app.toggle_balance();
        assert_eq!(app.displayed_account_number(), "2024000001");
        assert_eq!(app.displayed_balance(), "1500.00");

        app.balance = None;
        assert_eq!(app.displayed_balance(), "unavailable");
    }

    #[test]
    fn test_statement_scrolling() {
        let mut app = App::new(30);
        app.scroll_statement_down();
        assert_eq!(app.statement_offset, 0);
        app.scroll_statement_up();
        assert_eq!(app.statement_offset, 0);
    }
}
