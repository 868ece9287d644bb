// ============================================================================
// Budgeting : crédits vs débits
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::App;

pub fn render_analytics(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Credit vs Debit ");

    let summary = match &app.cash_flow {
        Some(summary) if !summary.is_empty() => summary,
        Some(_) => return render_message(frame, area, block, "No transactions yet"),
        None => return render_message(frame, area, block, "Loading transactions..."),
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(inner);

    let credit = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Credits "))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(summary.credit_share().round().clamp(0.0, 100.0) as u16)
        .label(format!("{:.2} ({:.1}%)", summary.credit_total, summary.credit_share()));
    frame.render_widget(credit, chunks[0]);

    let debit = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Debits "))
        .gauge_style(Style::default().fg(Color::Red))
        .percent(summary.debit_share().round().clamp(0.0, 100.0) as u16)
        .label(format!("{:.2} ({:.1}%)", summary.debit_total, summary.debit_share()));
    frame.render_widget(debit, chunks[1]);

    let net_color = if summary.net() >= 0.0 { Color::Green } else { Color::Red };
    let totals = vec![
        Line::from(format!(
            "{} credits, {} debits",
            summary.credit_count, summary.debit_count
        )),
        Line::from(vec![
            Span::raw("Net: "),
            Span::styled(
                format!("{:+.2}", summary.net()),
                Style::default().fg(net_color).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(totals).alignment(Alignment::Center), chunks[2]);
}

fn render_message(frame: &mut Frame, area: Rect, block: Block, message: &str) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::Gray),
    )))
    .block(block)
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
