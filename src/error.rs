// ============================================================================
// Erreurs : ApiError
// ============================================================================
// Taxonomie des échecs côté client :
// - Validation    : formulaire invalide, rien n'est envoyé sur le réseau
// - Unauthorized  : HTTP 401, la session est invalidée
// - Rejected      : l'API répond mais refuse l'opération (code != "00")
// - Transport / Status / Decode / MissingToken / Storage : problèmes techniques
//
// CONCEPT RUST : thiserror
// - #[derive(Error)] génère Display et std::error::Error
// - #[from] génère la conversion automatique utilisée par l'opérateur ?
// ============================================================================

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Erreur renvoyée par le client de l'API bancaire et le magasin de session
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    /// Jeton absent, expiré ou refusé par le serveur
    #[error("session expired, please log in again")]
    Unauthorized,

    /// Refus métier (solde insuffisant, compte inconnu, ...)
    #[error("{message} (code {code})")]
    Rejected { code: String, message: String },

    /// Statut HTTP en erreur autre que 401
    #[error("server returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("unexpected response from {endpoint}: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },

    #[error("login response carried no token")]
    MissingToken,

    #[error("local storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ApiError {
    /// Vrai si l'erreur doit renvoyer l'utilisateur vers l'écran de connexion
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Message court destiné à l'utilisateur (barre de statut)
    ///
    /// Les erreurs techniques sont résumées : le détail part dans les logs.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(errors) => errors.to_string(),
            ApiError::Unauthorized => "Session expired. Please log in again.".to_string(),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Status { status, .. } => format!("Server error (HTTP {})", status),
            ApiError::Transport(_) => "Unable to reach the bank server".to_string(),
            ApiError::Decode { .. } | ApiError::MissingToken => {
                "Unexpected response from the bank server".to_string()
            }
            ApiError::Storage(_) => "Unable to save local data".to_string(),
        }
    }
}

/// Alias pratique pour les résultats de la bibliothèque
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldError;

    #[test]
    fn test_user_message_hides_transport_details() {
        let err = ApiError::Transport(Box::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused (os error 111)",
        )));
        assert_eq!(err.user_message(), "Unable to reach the bank server");
        assert!(err.to_string().contains("os error 111"));
    }

    #[test]
    fn test_rejected_message_is_surfaced() {
        let err = ApiError::Rejected {
            code: "007".to_string(),
            message: "Insufficient balance".to_string(),
        };
        assert_eq!(err.user_message(), "Insufficient balance");
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_validation_converts_with_from() {
        let errors = ValidationErrors::from(vec![FieldError::new("amount", "Amount must be positive")]);
        let err: ApiError = errors.into();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.user_message(), "amount: Amount must be positive");
    }
}
