// ============================================================================
// Module : api
// ============================================================================
// Passerelle vers le backend bancaire :
// - transport : envoi HTTP (reqwest) derrière un trait
// - normalize : formes de réponse hétérogènes -> types canoniques
// - client    : opérations métier, jeton Bearer, gestion du 401
// ============================================================================

pub mod client;    // BankClient : toutes les opérations
mod normalize;     // Interne : formes de réponse connues
pub mod transport; // Trait Transport + HttpTransport

// Re-export des types principaux
pub use client::{BankClient, UnauthorizedHook};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
