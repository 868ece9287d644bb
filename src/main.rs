// ============================================================================
// LazyBank - Front-end bancaire en terminal
// ============================================================================
// Programme TUI : connexion, dashboard, opérations, relevé, budget, profil.
// Tous les appels réseau passent par un worker thread.
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle infinie qui gère événements et rendering
// 3. Async dans sync : un runtime tokio dans le worker thread
// 4. Channels mpsc : commandes vers le worker, résultats vers l'UI
// ============================================================================

use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use lazybank::analytics::CashFlowSummary;
use lazybank::api::{BankClient, UnauthorizedHook};
use lazybank::app::{App, ProfileMode, Screen, TransactionKind};
use lazybank::config::{Config, RECENT_LIMIT};
use lazybank::error::ApiError;
use lazybank::models::{
    recent_transactions, AccountBalanceResult, BankResponse, CreditDebitRequest, EnquiryRequest,
    PasswordChange, ProfileUpdate, StatementRequest, Transaction, TransferRequest, UserProfile,
    UserRegistration,
};
use lazybank::session::SessionStore;
use lazybank::storage::{self, LocalStorage, PROFILE_PIC_KEY};
use lazybank::ui::{events::EventHandler, render};
use lazybank::validation::{Validate, ValidationErrors};

// ============================================================================
// AppCommand / AppResult : messages entre l'UI et le worker
// ============================================================================

/// Commandes envoyées au worker thread
enum AppCommand {
    Login { email: String, password: String },
    Register(UserRegistration),
    /// Solde, nom du titulaire, transactions récentes
    LoadDashboard,
    Credit(CreditDebitRequest),
    Debit(CreditDebitRequest),
    Transfer(TransferRequest),
    Statement(StatementRequest),
    LoadAnalytics,
    LoadProfile,
    UpdateProfile(ProfileUpdate),
    ChangePassword(PasswordChange),
    SetProfilePicture(PathBuf),
    Logout,
}

impl AppCommand {
    /// Nom pour les logs (sans mot de passe ni montant)
    fn name(&self) -> &'static str {
        match self {
            AppCommand::Login { .. } => "login",
            AppCommand::Register(_) => "register",
            AppCommand::LoadDashboard => "load_dashboard",
            AppCommand::Credit(_) => "credit",
            AppCommand::Debit(_) => "debit",
            AppCommand::Transfer(_) => "transfer",
            AppCommand::Statement(_) => "statement",
            AppCommand::LoadAnalytics => "load_analytics",
            AppCommand::LoadProfile => "load_profile",
            AppCommand::UpdateProfile(_) => "update_profile",
            AppCommand::ChangePassword(_) => "change_password",
            AppCommand::SetProfilePicture(_) => "set_profile_picture",
            AppCommand::Logout => "logout",
        }
    }
}

/// Résultats renvoyés par le worker thread
enum AppResult {
    LoggedIn { account_number: Option<String> },
    Registered(BankResponse),
    DashboardLoaded {
        account_number: String,
        account_name: String,
        balance: AccountBalanceResult,
        recent: Vec<Transaction>,
    },
    OperationDone(BankResponse),
    StatementLoaded(Vec<Transaction>),
    AnalyticsLoaded(Vec<Transaction>),
    ProfileLoaded { profile: UserProfile, has_picture: bool },
    ProfileUpdated(UserProfile),
    PasswordChanged(BankResponse),
    PictureSaved,
    LoggedOut,
    /// HTTP 401 : retour au login (envoyé par le hook du client)
    SessionExpired,
    Invalid(ValidationErrors),
    Failed(String),
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place, avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// # Utilisation
/// ```bash
/// tail -f ~/.local/share/lazybank/logs/lazybank.log.*
/// RUST_LOG=lazybank=trace cargo run
/// ```
fn init_logging(config: &Config) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(&config.log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "lazybank.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazybank=debug,info".into()),
        )
        .init();

    info!(log_dir = %config.log_dir.display(), "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let config = Config::load().context("Configuration invalide")?;

    init_logging(&config).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });
    info!("LazyBank starting up");
    config.log_summary();

    // Stockage local + client + session : construits une seule fois
    let local_storage = Arc::new(
        LocalStorage::open(config.storage_path()).context("Impossible d'ouvrir le stockage local")?,
    );

    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    // CONCEPT RUST : Closure move + Sender cloné
    // - Le hook vit dans le client (worker thread), il garde son propre Sender
    let expired_tx = Mutex::new(result_tx.clone());
    let hook: UnauthorizedHook = Arc::new(move || {
        let tx = expired_tx.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = tx.send(AppResult::SessionExpired);
    });

    let client = BankClient::connect(&config, local_storage)
        .context("Impossible de créer le client HTTP")?
        .with_unauthorized_hook(hook);
    let session = Arc::new(SessionStore::new(Arc::new(client)));

    let mut app = App::new(config.recent_days);
    if session.restore() {
        app.on_logged_in(session.account_number());
        app.set_info("Session restored");
        app.start_loading("Loading account...");
        command_tx.send(AppCommand::LoadDashboard).ok();
    }
    let app = Arc::new(Mutex::new(app));

    info!("Spawning background worker thread");
    spawn_background_worker(command_rx, result_tx, session, config.recent_days);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();
    info!("Starting event loop");
    let result = run(&mut terminal, app, &events, command_tx, result_rx);

    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }
    result
}

/// CONCEPT RUST : PoisonError::into_inner
/// - Si un thread a paniqué en tenant le lock, on récupère quand même l'état
fn lock_app(app: &Mutex<App>) -> MutexGuard<'_, App> {
    app.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Background Worker Thread
// ============================================================================
// CONCEPT RUST : Background async worker avec channels
// - Thread séparé qui possède un runtime tokio
// - Une commande à la fois : au plus une requête en vol par formulaire
// ============================================================================

fn spawn_background_worker(
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
    session: Arc<SessionStore>,
    recent_days: u32,
) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(error = %e, "Failed to create tokio runtime, worker disabled");
                let _ = result_tx.send(AppResult::Failed("Internal error: worker unavailable".to_string()));
                return;
            }
        };

        // Boucle de traitement : se termine quand l'UI ferme le channel
        while let Ok(command) = command_rx.recv() {
            info!(command = command.name(), "Worker received command");
            let result = runtime.block_on(execute(&session, command, recent_days));
            if let Some(result) = result {
                if result_tx.send(result).is_err() {
                    break;
                }
            }
        }
        info!("Worker thread exiting (channel closed)");
    });
}

/// Exécute une commande ; None quand l'UI est déjà prévenue (401 via hook)
async fn execute(session: &SessionStore, command: AppCommand, recent_days: u32) -> Option<AppResult> {
    let client = session.client();

    let outcome: Result<AppResult, ApiError> = match command {
        AppCommand::Login { email, password } => session
            .login(&email, &password)
            .await
            .map(|_| AppResult::LoggedIn {
                account_number: session.account_number(),
            }),

        AppCommand::Register(registration) => client.create_account(&registration).await.map(AppResult::Registered),

        AppCommand::LoadDashboard => load_dashboard(session, recent_days).await,

        AppCommand::Credit(request) => client.credit_account(&request).await.map(AppResult::OperationDone),
        AppCommand::Debit(request) => client.debit_account(&request).await.map(AppResult::OperationDone),
        AppCommand::Transfer(request) => client.transfer(&request).await.map(AppResult::OperationDone),

        AppCommand::Statement(request) => client.get_bank_statement(&request).await.map(AppResult::StatementLoaded),

        AppCommand::LoadAnalytics => client.get_transactions().await.map(AppResult::AnalyticsLoaded),

        AppCommand::LoadProfile => client.get_profile().await.map(|profile| AppResult::ProfileLoaded {
            profile,
            has_picture: client.storage().get(PROFILE_PIC_KEY).is_some(),
        }),

        AppCommand::UpdateProfile(update) => client.update_profile(&update).await.map(AppResult::ProfileUpdated),

        AppCommand::ChangePassword(change) => client.change_password(&change).await.map(AppResult::PasswordChanged),

        AppCommand::SetProfilePicture(path) => storage::data_uri_from_file(&path)
            .and_then(|uri| client.storage().set(PROFILE_PIC_KEY, &uri))
            .map(|_| AppResult::PictureSaved)
            .map_err(ApiError::from),

        AppCommand::Logout => session.logout().map(|_| AppResult::LoggedOut),
    };

    match outcome {
        Ok(result) => Some(result),
        Err(ApiError::Unauthorized) => {
            session.invalidate();
            None
        }
        Err(ApiError::Validation(errors)) => Some(AppResult::Invalid(errors)),
        Err(e) => {
            warn!(error = %e, "Command failed");
            Some(AppResult::Failed(e.user_message()))
        }
    }
}

/// Solde, nom et transactions des `recent_days` derniers jours
async fn load_dashboard(session: &SessionStore, recent_days: u32) -> Result<AppResult, ApiError> {
    let Some(account_number) = session.account_number() else {
        return Ok(AppResult::Failed("No account number on file. Please log in again.".to_string()));
    };
    let client = session.client();
    let enquiry = EnquiryRequest::new(account_number.as_str());

    let balance = client.balance_enquiry(&enquiry).await?;
    let account_name = client.name_enquiry(&enquiry).await?;

    let period = StatementRequest::last_days(account_number.as_str(), Local::now().date_naive(), recent_days);
    let statement = client.get_bank_statement(&period).await?;

    Ok(AppResult::DashboardLoaded {
        account_number,
        account_name,
        balance,
        recent: recent_transactions(&statement, RECENT_LIMIT),
    })
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   0. traiter les résultats du worker
//   1. dessiner l'interface
//   2. traiter les événements clavier
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
    events: &EventHandler,
    command_tx: mpsc::Sender<AppCommand>,
    result_rx: mpsc::Receiver<AppResult>,
) -> Result<()> {
    loop {
        if !lock_app(&app).is_running() {
            break;
        }

        // 0. RÉSULTATS (try_recv : ne bloque pas)
        loop {
            match result_rx.try_recv() {
                Ok(result) => apply_result(&mut lock_app(&app), result, &command_tx),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    error!("Worker thread disconnected!");
                    break;
                }
            }
        }

        // 1. RENDER
        terminal.draw(|frame| {
            let app_lock = lock_app(&app);
            render(frame, &app_lock);
        })?;

        // 2. INPUT
        match events.next() {
            Ok(event) => handle_event(&mut lock_app(&app), event, &command_tx),
            Err(e) => warn!(error = %e, "Failed to read terminal event"),
        }
    }

    Ok(())
}

/// Met à jour l'état de l'UI avec un résultat du worker
///
/// Un login ou une opération réussie relance le chargement du dashboard.
fn apply_result(app: &mut App, result: AppResult, command_tx: &mpsc::Sender<AppCommand>) {
    app.stop_loading();

    match result {
        AppResult::LoggedIn { account_number } => {
            info!("Login completed");
            app.on_logged_in(account_number);
            send(app, command_tx, AppCommand::LoadDashboard, "Loading account...");
        }
        AppResult::Registered(response) => {
            if response.is_success() || response.account_number().is_some() {
                info!(account = ?response.account_number(), "Account created");
                app.show_login();
                app.set_info(match response.account_number() {
                    Some(number) => format!("Account {} created. You can now log in.", number),
                    None => "Account created. You can now log in.".to_string(),
                });
            } else {
                app.set_error(response.response_message);
            }
        }
        AppResult::DashboardLoaded {
            account_number,
            account_name,
            balance,
            recent,
        } => {
            app.account_number = Some(account_number);
            app.account_name = Some(account_name).filter(|n| !n.is_empty());
            app.balance = balance.balance();
            app.recent_transactions = recent;
        }
        AppResult::OperationDone(response) => {
            if response.is_success() {
                app.set_info(response.response_message.clone());
                // Solde et transactions récentes ont changé
                send(app, command_tx, AppCommand::LoadDashboard, "Refreshing account...");
            } else {
                app.set_error(response.response_message.clone());
            }
            app.last_operation = Some(response);
        }
        AppResult::StatementLoaded(mut transactions) => {
            lazybank::models::sort_by_recent(&mut transactions);
            app.set_info(format!("{} transactions", transactions.len()));
            app.statement = transactions;
            app.statement_offset = 0;
        }
        AppResult::AnalyticsLoaded(transactions) => {
            app.cash_flow = Some(CashFlowSummary::from_transactions(&transactions));
        }
        AppResult::ProfileLoaded { profile, has_picture } => {
            app.profile = Some(profile);
            app.has_profile_picture = has_picture;
        }
        AppResult::ProfileUpdated(profile) => {
            app.profile = Some(profile);
            app.show_profile();
            app.set_info("Profile updated");
        }
        AppResult::PasswordChanged(response) => match response.into_result() {
            Ok(response) => {
                app.show_profile();
                app.set_info(response.response_message);
            }
            Err(e) => app.set_error(e.user_message()),
        },
        AppResult::PictureSaved => {
            app.has_profile_picture = true;
            app.show_profile();
            app.set_info("Profile picture saved");
        }
        AppResult::LoggedOut => app.on_logged_out(),
        AppResult::SessionExpired => {
            warn!("Session expired, returning to login");
            app.on_session_expired();
        }
        AppResult::Invalid(errors) => app.set_form_errors(errors),
        AppResult::Failed(message) => app.set_error(message),
    }
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Valide la requête côté UI avant de l'envoyer au worker
///
/// Les erreurs s'affichent sous les champs, rien ne part sur le réseau.
fn submit<R: Validate>(
    app: &mut App,
    command_tx: &mpsc::Sender<AppCommand>,
    request: R,
    loading: &str,
    command: impl FnOnce(R) -> AppCommand,
) {
    if let Err(errors) = request.validate() {
        debug!(%errors, "Form rejected by validation");
        app.set_form_errors(errors);
        return;
    }
    app.form.errors = None;
    send(app, command_tx, command(request), loading);
}

fn send(app: &mut App, command_tx: &mpsc::Sender<AppCommand>, command: AppCommand, loading: &str) {
    // Au plus une requête en vol
    if app.is_loading {
        debug!(command = command.name(), "Request already in flight, ignoring");
        return;
    }
    app.start_loading(loading);
    if command_tx.send(command).is_err() {
        error!("Worker channel closed");
        app.stop_loading();
        app.set_error("Internal error: worker unavailable");
    }
}

/// Traite un événement et met à jour l'état de l'application
///
/// CONCEPT RUST : Pattern matching avec guards
/// - Les écrans de saisie capturent les caractères
/// - Les autres écrans utilisent des raccourcis d'une lettre
fn handle_event(app: &mut App, event: lazybank::ui::events::Event, command_tx: &mpsc::Sender<AppCommand>) {
    use lazybank::ui::events::{
        get_char_from_event, is_backspace_event, is_enter_event, is_escape_event, is_force_quit_event,
        is_next_field_event, is_previous_field_event, is_quit_event, is_register_event,
        is_scroll_down_event, is_scroll_up_event, is_shortcut, is_text_char_event, Event,
    };

    if let Event::Tick = event {
        return;
    }

    if is_force_quit_event(&event) {
        info!("User forced quit");
        app.quit();
        return;
    }

    // ========================================
    // Écrans de saisie
    // ========================================
    if app.has_text_input() {
        if is_escape_event(&event) {
            app.back();
        } else if is_register_event(&event) && app.current_screen == Screen::Login {
            app.show_register();
        } else if is_next_field_event(&event) {
            app.form.focus_next();
        } else if is_previous_field_event(&event) {
            app.form.focus_previous();
        } else if is_scroll_down_event(&event) && app.current_screen == Screen::Statement {
            app.scroll_statement_down();
        } else if is_scroll_up_event(&event) && app.current_screen == Screen::Statement {
            app.scroll_statement_up();
        } else if is_backspace_event(&event) {
            app.form.backspace();
        } else if is_enter_event(&event) {
            submit_form(app, command_tx);
        } else if is_text_char_event(&event) {
            if let Some(c) = get_char_from_event(&event) {
                app.form.push_char(c);
            }
        }
        return;
    }

    // ========================================
    // Écrans de consultation
    // ========================================
    if is_quit_event(&event) {
        if app.is_awaiting_quit_confirmation() {
            info!("User confirmed quit");
            app.quit();
        } else {
            info!("User requested quit (awaiting confirmation)");
            app.request_quit();
        }
        return;
    }
    app.cancel_quit();

    if is_escape_event(&event) {
        app.back();
        return;
    }

    match app.current_screen {
        Screen::Dashboard => {
            if is_shortcut(&event, 'c') {
                app.show_transaction(TransactionKind::Credit);
            } else if is_shortcut(&event, 'd') {
                app.show_transaction(TransactionKind::Debit);
            } else if is_shortcut(&event, 't') {
                app.show_transaction(TransactionKind::Transfer);
            } else if is_shortcut(&event, 's') {
                app.show_statement(Local::now().date_naive());
            } else if is_shortcut(&event, 'a') {
                app.show_analytics();
                send(app, command_tx, AppCommand::LoadAnalytics, "Loading transactions...");
            } else if is_shortcut(&event, 'p') {
                app.show_profile();
                send(app, command_tx, AppCommand::LoadProfile, "Loading profile...");
            } else if is_shortcut(&event, 'b') {
                app.toggle_balance();
            } else if is_shortcut(&event, 'n') {
                app.toggle_account_number();
            } else if is_shortcut(&event, 'r') {
                send(app, command_tx, AppCommand::LoadDashboard, "Loading account...");
            } else if is_shortcut(&event, 'l') {
                info!("User requested logout");
                send(app, command_tx, AppCommand::Logout, "Logging out...");
            }
        }
        Screen::Analytics if is_shortcut(&event, 'r') => {
            send(app, command_tx, AppCommand::LoadAnalytics, "Loading transactions...");
        }
        Screen::Profile(ProfileMode::View) => {
            if is_shortcut(&event, 'e') {
                app.edit_profile();
            } else if is_shortcut(&event, 'w') {
                app.show_password_form();
            } else if is_shortcut(&event, 'i') {
                app.show_picture_form();
            } else if is_shortcut(&event, 'r') {
                send(app, command_tx, AppCommand::LoadProfile, "Loading profile...");
            }
        }
        _ => {}
    }
}

/// Enter sur un formulaire : construit la requête typée de l'écran
fn submit_form(app: &mut App, command_tx: &mpsc::Sender<AppCommand>) {
    match app.current_screen {
        Screen::Login => {
            let email = app.form.value("email").trim().to_string();
            let password = app.form.value("password").to_string();
            let request = lazybank::models::LoginRequest::new(email, password);
            submit(app, command_tx, request, "Logging in...", |r| AppCommand::Login {
                email: r.email,
                password: r.password,
            });
        }
        Screen::Register => {
            let registration = app.form.to_registration();
            submit(app, command_tx, registration, "Creating account...", AppCommand::Register);
        }
        Screen::Transaction(TransactionKind::Credit) => {
            let request = app.form.to_credit_debit();
            submit(app, command_tx, request, "Crediting account...", AppCommand::Credit);
        }
        Screen::Transaction(TransactionKind::Debit) => {
            let request = app.form.to_credit_debit();
            submit(app, command_tx, request, "Debiting account...", AppCommand::Debit);
        }
        Screen::Transaction(TransactionKind::Transfer) => {
            let request = app.form.to_transfer();
            submit(app, command_tx, request, "Transferring...", AppCommand::Transfer);
        }
        Screen::Statement => match app.form.to_statement() {
            Ok(request) => submit(app, command_tx, request, "Loading statement...", AppCommand::Statement),
            Err(errors) => app.set_form_errors(errors),
        },
        Screen::Profile(ProfileMode::Edit) => {
            let Some(profile) = app.profile.clone() else {
                return;
            };
            let update = app.form.to_profile_update(&profile);
            if update == ProfileUpdate::default() {
                app.show_profile();
                app.set_info("Nothing to update");
                return;
            }
            submit(app, command_tx, update, "Saving profile...", AppCommand::UpdateProfile);
        }
        Screen::Profile(ProfileMode::ChangePassword) => {
            let change = app.form.to_password_change();
            submit(app, command_tx, change, "Changing password...", AppCommand::ChangePassword);
        }
        Screen::Profile(ProfileMode::Picture) => {
            let path = app.form.value("path").trim().to_string();
            if path.is_empty() {
                app.set_error("Enter the path of an image file");
                return;
            }
            send(app, command_tx, AppCommand::SetProfilePicture(PathBuf::from(path)), "Saving picture...");
        }
        Screen::Dashboard | Screen::Analytics | Screen::Profile(ProfileMode::View) => {}
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal (appelé même en cas d'erreur)
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
