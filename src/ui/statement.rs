// ============================================================================
// Relevé bancaire
// ============================================================================
// Formulaire de période en haut, tableau des transactions en dessous.
// Les lignes sont partagées avec le tableau "récent" du dashboard.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::models::{Transaction, TransactionType};
use crate::ui::forms;

/// Date, type, montant, statut, identifiant
pub const COLUMN_WIDTHS: [Constraint; 5] = [
    Constraint::Length(20),
    Constraint::Length(8),
    Constraint::Length(14),
    Constraint::Length(10),
    Constraint::Min(6),
];

pub fn header_row() -> Row<'static> {
    Row::new(["Date", "Type", "Amount", "Status", "Id"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
}

pub fn transaction_row(transaction: &Transaction) -> Row<'static> {
    let color = match transaction.transaction_type {
        TransactionType::Credit => Color::Green,
        TransactionType::Debit => Color::Red,
        TransactionType::Unknown => Color::Gray,
    };
    let date = transaction
        .timestamp()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .or_else(|| transaction.created_at.clone())
        .unwrap_or_else(|| "-".to_string());

    let row = Row::new(vec![
        Cell::from(date),
        Cell::from(transaction.transaction_type.label()),
        Cell::from(format!("{:>12}", transaction.display_amount())).style(Style::default().fg(color)),
        Cell::from(transaction.status.clone()),
        Cell::from(transaction.id.clone()),
    ]);

    if transaction.is_failed() {
        row.style(Style::default().add_modifier(Modifier::DIM))
    } else {
        row
    }
}

pub fn render_statement(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(forms::form_height(&app.form)),
            Constraint::Min(0),
        ])
        .split(area);

    forms::render_form(frame, chunks[0], " Period ", &app.form);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Transactions ({}) ", app.statement.len()));

    if app.statement.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "No transactions for this period",
            Style::default().fg(Color::Gray),
        )))
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, chunks[1]);
        return;
    }

    let rows = app
        .statement
        .iter()
        .skip(app.statement_offset)
        .map(transaction_row);
    let table = Table::new(rows, COLUMN_WIDTHS).header(header_row()).block(block);
    frame.render_widget(table, chunks[1]);
}
