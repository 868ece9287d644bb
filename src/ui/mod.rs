// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod analytics; // Budgeting : crédits vs débits
pub mod dashboard; // Cadre commun + dashboard
pub mod events;    // Gestion des événements clavier
pub mod forms;     // Rendu générique des formulaires
pub mod profile;   // Vue du profil
pub mod statement; // Relevé bancaire

// Re-exports pour simplifier les imports
pub use dashboard::render;
pub use events::{Event, EventHandler};
