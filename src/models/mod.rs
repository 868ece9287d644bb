// ============================================================================
// Module : models
// ============================================================================
// Structures de données échangées avec l'API bancaire
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module public
// - "pub use" : ré-exporte pour raccourcir les imports
// ============================================================================

pub mod account;     // Réponses génériques, solde normalisé
pub mod profile;     // Profil utilisateur
pub mod requests;    // Requêtes typées + validation
pub mod transaction; // Lignes de relevé

// Au lieu de : use lazybank::models::account::BankResponse;
// On peut faire : use lazybank::models::BankResponse;
pub use account::{
    AccountBalanceResult, AccountInfo, AuthenticatedUser, BalanceInfo, BankResponse,
    BALANCE_UNAVAILABLE_CODE, BALANCE_UNAVAILABLE_MESSAGE, SUCCESS_CODE,
};
pub use profile::{NotificationPreferences, UserProfile};
pub use requests::{
    CreditDebitRequest, EnquiryRequest, LoginRequest, PasswordChange, ProfileUpdate,
    StatementRequest, TransferRequest, UserRegistration,
};
pub use transaction::{recent_transactions, sort_by_recent, Transaction, TransactionType};

use serde::{Deserialize, Deserializer};

/// Désérialise `null` comme la valeur par défaut du type
///
/// CONCEPT RUST : #[serde(default)] ne couvre que les champs absents ;
/// un `null` explicite (Jackson l'écrit par défaut) passe par ici.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
