// ============================================================================
// Gestion des événements
// ============================================================================
// Gère les événements clavier et les ticks de l'application
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Pattern matching avec guards : matches!(code, KeyCode::Char(c) if ...)
// 3. Error handling avec Result
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier : permet de traiter les résultats du worker
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
        }
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - poll(timeout) attend au plus tick_rate
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Sur certains OS, on reçoit Press ET Release : on garde Press
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : Convertir KeyEvent en action
// ============================================================================

fn key_of(event: &Event) -> Option<&KeyEvent> {
    match event {
        Event::Key(key) => Some(key),
        Event::Tick => None,
    }
}

/// 'q' (quitter, en deux temps) : uniquement hors saisie de texte
pub fn is_quit_event(event: &Event) -> bool {
    is_shortcut(event, 'q')
}

/// Ctrl+C : quitte immédiatement, même dans un formulaire
pub fn is_force_quit_event(event: &Event) -> bool {
    key_of(event).is_some_and(|key| {
        key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
    })
}

/// Raccourci d'une lettre (insensible à la casse, sans Ctrl/Alt)
pub fn is_shortcut(event: &Event, letter: char) -> bool {
    key_of(event).is_some_and(|key| {
        !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            && matches!(key.code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&letter))
    })
}

pub fn is_escape_event(event: &Event) -> bool {
    key_of(event).is_some_and(|key| matches!(key.code, KeyCode::Esc))
}

pub fn is_enter_event(event: &Event) -> bool {
    key_of(event).is_some_and(|key| matches!(key.code, KeyCode::Enter))
}

/// Champ suivant : Tab ou flèche bas
pub fn is_next_field_event(event: &Event) -> bool {
    key_of(event).is_some_and(|key| matches!(key.code, KeyCode::Tab | KeyCode::Down))
}

/// Champ précédent : Shift+Tab ou flèche haut
pub fn is_previous_field_event(event: &Event) -> bool {
    key_of(event).is_some_and(|key| matches!(key.code, KeyCode::BackTab | KeyCode::Up))
}

/// Défilement du relevé : PageUp / PageDown
pub fn is_scroll_up_event(event: &Event) -> bool {
    key_of(event).is_some_and(|key| matches!(key.code, KeyCode::PageUp))
}

pub fn is_scroll_down_event(event: &Event) -> bool {
    key_of(event).is_some_and(|key| matches!(key.code, KeyCode::PageDown))
}

/// F2 : depuis le login, ouvre l'inscription
pub fn is_register_event(event: &Event) -> bool {
    key_of(event).is_some_and(|key| matches!(key.code, KeyCode::F(2)))
}

pub fn is_backspace_event(event: &Event) -> bool {
    key_of(event).is_some_and(|key| matches!(key.code, KeyCode::Backspace))
}

/// Caractère imprimable tapé dans un champ (Shift autorisé, pas Ctrl/Alt)
pub fn is_text_char_event(event: &Event) -> bool {
    key_of(event).is_some_and(|key| {
        !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            && matches!(key.code, KeyCode::Char(c) if !c.is_control())
    })
}

/// Extrait le caractère d'un événement clavier si c'est un caractère
pub fn get_char_from_event(event: &Event) -> Option<char> {
    match key_of(event)?.code {
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}
