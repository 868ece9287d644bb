// ============================================================================
// Formulaires
// ============================================================================
// Un seul rendu pour tous les formulaires : label, valeur (masquée pour les
// mots de passe), curseur sur le champ actif, erreur sous le champ fautif.
// ============================================================================

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Form, TransactionKind};

/// Hauteur nécessaire : une ligne par champ, une par erreur, plus les bordures
pub fn form_height(form: &Form) -> u16 {
    let errors = form.fields.iter().filter(|f| form.error_for(f.key).is_some()).count();
    (form.fields.len() + errors + 2) as u16
}

pub fn render_form(frame: &mut Frame, area: Rect, title: &str, form: &Form) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title.to_string());

    let label_width = form.fields.iter().map(|f| f.label.len()).max().unwrap_or(0);

    let mut lines = Vec::new();
    for (index, field) in form.fields.iter().enumerate() {
        let focused = index == form.focus;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut spans = vec![
            Span::styled(if focused { "▶ " } else { "  " }, label_style),
            Span::styled(format!("{:<width$}  ", field.label, width = label_width), label_style),
            Span::styled(field.display_value(), Style::default().fg(Color::White)),
        ];
        if focused {
            spans.push(Span::styled(
                "█",
                Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        lines.push(Line::from(spans));

        if let Some(error) = form.error_for(field.key) {
            lines.push(Line::from(Span::styled(
                format!("    {:<width$}{}", "", error, width = label_width),
                Style::default().fg(Color::Red),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Formulaire d'opération + résultat de la dernière soumission
pub fn render_transaction(frame: &mut Frame, app: &App, kind: TransactionKind, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(form_height(&app.form)), Constraint::Min(0)])
        .split(area);

    render_form(frame, chunks[0], &format!(" {} ", kind.label()), &app.form);

    let Some(response) = &app.last_operation else {
        return;
    };

    let (color, headline) = if response.is_success() {
        (Color::Green, "✓ Operation successful")
    } else {
        (Color::Red, "✗ Operation refused")
    };

    let mut lines = vec![
        Line::from(Span::styled(headline, Style::default().fg(color).add_modifier(Modifier::BOLD))),
        Line::from(format!("Code: {}", response.response_code)),
        Line::from(response.response_message.clone()),
    ];
    if let Some(balance) = response.account_info.as_ref().and_then(|i| i.account_balance) {
        lines.push(Line::from(format!("New balance: {:.2}", balance)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(" Result ");
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), chunks[1]);
}
