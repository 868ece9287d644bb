// ============================================================================
// Profil utilisateur (lecture)
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

pub fn render_profile(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Profile ");

    let Some(profile) = &app.profile else {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "Loading profile...",
            Style::default().fg(Color::Gray),
        )))
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    };

    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let row = |name: &'static str, text: String| {
        Line::from(vec![Span::styled(format!("{:<15}", name), label), Span::styled(text, value)])
    };

    let notifications = profile.notifications();
    let enabled = |on: bool| if on { "on" } else { "off" };

    let lines = vec![
        row("Name", profile.full_name()),
        row("Email", profile.email.clone()),
        row("Phone", profile.phone_number.clone()),
        row("Gender", profile.gender.clone()),
        row("Address", format!("{}, {}", profile.address, profile.state)),
        row("Status", profile.status.clone()),
        Line::from(""),
        row(
            "Notifications",
            format!(
                "email {} · sms {} · push {}",
                enabled(notifications.email),
                enabled(notifications.sms),
                enabled(notifications.push)
            ),
        ),
        row("Dark mode", enabled(profile.dark_mode.unwrap_or(false)).to_string()),
        row(
            "Picture",
            if app.has_profile_picture { "set" } else { "none" }.to_string(),
        ),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
