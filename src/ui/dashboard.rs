// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine le cadre commun (header, contenu, footer) et route le contenu
// vers le module de l'écran actif.
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Widgets : composants UI (Block, Paragraph, Table, etc.)
// 3. Layout : découpage de l'espace en zones
// 4. Style : couleurs et attributs de texte
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Table},
    Frame,
};

use crate::app::{App, ProfileMode, Screen};
use crate::ui::{analytics, forms, profile, statement};

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Le compilateur garantit que chaque écran est géré
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);

    let area = chunks[1];
    match app.current_screen {
        Screen::Login => forms::render_form(frame, area, " Login ", &app.form),
        Screen::Register => forms::render_form(frame, area, " Create account ", &app.form),
        Screen::Dashboard => render_dashboard(frame, app, area),
        Screen::Transaction(kind) => forms::render_transaction(frame, app, kind, area),
        Screen::Statement => statement::render_statement(frame, app, area),
        Screen::Analytics => analytics::render_analytics(frame, app, area),
        Screen::Profile(ProfileMode::View) => profile::render_profile(frame, app, area),
        Screen::Profile(ProfileMode::Edit) => forms::render_form(frame, area, " Edit profile ", &app.form),
        Screen::Profile(ProfileMode::ChangePassword) => {
            forms::render_form(frame, area, " Change password ", &app.form)
        }
        Screen::Profile(ProfileMode::Picture) => {
            forms::render_form(frame, area, " Profile picture ", &app.form)
        }
    }

    render_footer(frame, app, chunks[2]);
}

/// Header (3 lignes), contenu, footer (4 lignes : statut + raccourcis)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(4)])
        .split(area)
        .to_vec()
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" LazyBank ")
        .title_alignment(Alignment::Center);

    let line = match (&app.loading_message, app.is_loading) {
        (Some(message), true) => Line::from(Span::styled(
            format!("⏳ {}", message),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        _ => Line::from(Span::styled(
            screen_title(app.current_screen),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
    };

    frame.render_widget(Paragraph::new(line).block(block).alignment(Alignment::Center), area);
}

fn screen_title(screen: Screen) -> &'static str {
    match screen {
        Screen::Login => "Welcome back",
        Screen::Register => "Open a new account",
        Screen::Dashboard => "Dashboard",
        Screen::Transaction(kind) => kind.label(),
        Screen::Statement => "Bank statement",
        Screen::Analytics => "Budgeting",
        Screen::Profile(_) => "Profile",
    }
}

// ============================================================================
// Dashboard : compte + transactions récentes
// ============================================================================

fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    render_account_panel(frame, app, chunks[0]);
    render_recent_transactions(frame, app, chunks[1]);
}

fn render_account_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Account ");

    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(vec![
            Span::styled("Holder   ", label),
            Span::styled(app.account_name.clone().unwrap_or_else(|| "-".to_string()), value),
        ]),
        Line::from(vec![
            Span::styled("Account  ", label),
            Span::styled(app.displayed_account_number(), value),
        ]),
        Line::from(vec![
            Span::styled("Balance  ", label),
            Span::styled(app.displayed_balance(), value.fg(Color::Green)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_recent_transactions(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Recent Transactions (last {} days) ", app.recent_days));

    if app.recent_transactions.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "No recent transactions",
            Style::default().fg(Color::Gray),
        )))
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let rows = app.recent_transactions.iter().map(statement::transaction_row);
    let table = Table::new(rows, statement::COLUMN_WIDTHS)
        .header(statement::header_row())
        .block(block);
    frame.render_widget(table, area);
}

// ============================================================================
// Footer : statut + raccourcis
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let status = match &app.status {
        Some(status) if status.is_error => Line::from(Span::styled(
            status.text.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Some(status) => Line::from(Span::styled(status.text.clone(), Style::default().fg(Color::Green))),
        None => Line::from(""),
    };

    let shortcuts = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled("⚠  Press ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " again to quit, any other key to cancel ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        shortcut_line(shortcuts_for(app.current_screen))
    };

    let paragraph = Paragraph::new(vec![status, shortcuts])
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn shortcuts_for(screen: Screen) -> &'static [(&'static str, &'static str)] {
    match screen {
        Screen::Login => &[("[Tab]", "Next field"), ("[Enter]", "Log in"), ("[F2]", "Register"), ("[Ctrl+C]", "Quit")],
        Screen::Register => &[("[Tab]", "Next field"), ("[Enter]", "Create"), ("[Esc]", "Back")],
        Screen::Dashboard => &[
            ("[c]", "Credit"),
            ("[d]", "Debit"),
            ("[t]", "Transfer"),
            ("[s]", "Statement"),
            ("[a]", "Budget"),
            ("[p]", "Profile"),
            ("[b]", "Balance"),
            ("[n]", "Number"),
            ("[r]", "Refresh"),
            ("[l]", "Logout"),
            ("[q]", "Quit"),
        ],
        Screen::Transaction(_) => &[("[Tab]", "Next field"), ("[Enter]", "Submit"), ("[Esc]", "Back")],
        Screen::Statement => &[
            ("[Tab]", "Next field"),
            ("[Enter]", "Load"),
            ("[PgUp/PgDn]", "Scroll"),
            ("[Esc]", "Back"),
        ],
        Screen::Analytics => &[("[r]", "Reload"), ("[Esc]", "Back"), ("[q]", "Quit")],
        Screen::Profile(ProfileMode::View) => &[
            ("[e]", "Edit"),
            ("[w]", "Password"),
            ("[i]", "Picture"),
            ("[r]", "Reload"),
            ("[Esc]", "Back"),
        ],
        Screen::Profile(_) => &[("[Tab]", "Next field"), ("[Enter]", "Save"), ("[Esc]", "Cancel")],
    }
}

fn shortcut_line(shortcuts: &[(&'static str, &'static str)]) -> Line<'static> {
    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let spans = shortcuts
        .iter()
        .flat_map(|(key, action)| [Span::styled(*key, key_style), Span::raw(format!(" {}  ", action))])
        .collect::<Vec<_>>();
    Line::from(spans)
}
