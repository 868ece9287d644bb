// ============================================================================
// LazyBank - Library
// ============================================================================
// Expose le coeur du front-end bancaire :
// - session : état d'authentification (jeton, utilisateur)
// - api     : passerelle HTTP + normalisation des réponses
// Le binaire (main.rs) ajoute l'interface terminal par-dessus.
// ============================================================================

pub mod analytics;  // Crédits vs débits
pub mod api;        // Client de l'API bancaire
pub mod app;        // État de l'application (écrans, formulaires)
pub mod config;     // Variables d'environnement
pub mod error;      // ApiError
pub mod models;     // Structures de données
pub mod session;    // Session Store
pub mod storage;    // Stockage local persistant
pub mod ui;         // Interface utilisateur
pub mod validation; // Règles des formulaires

pub use api::BankClient;
pub use config::Config;
pub use error::{ApiError, Result};
pub use session::{Session, SessionStore};
pub use storage::LocalStorage;
