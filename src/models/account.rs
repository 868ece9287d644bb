// ============================================================================
// Structures : BankResponse, AccountInfo, AccountBalanceResult
// ============================================================================
// Réponses génériques de l'API bancaire
//
// CONCEPTS RUST :
// 1. #[serde(rename_all = "camelCase")] : l'API parle camelCase, Rust snake_case
// 2. #[serde(default)] : un champ absent devient la valeur par défaut
// 3. skip_serializing_if : n'écrit pas les Option à None
// ============================================================================

use serde::{Deserialize, Serialize};

use super::null_as_default;
use crate::error::ApiError;

/// Code renvoyé par l'API quand une opération réussit
pub const SUCCESS_CODE: &str = "00";

/// Code local d'un solde introuvable (jamais émis par l'API)
pub const BALANCE_UNAVAILABLE_CODE: &str = "BALANCE_UNAVAILABLE";
pub const BALANCE_UNAVAILABLE_MESSAGE: &str = "Balance unavailable";

/// Informations de compte (toutes optionnelles selon l'endpoint)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_balance: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
}

/// Réponse standard de l'API (création, crédit, débit, virement, login)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub response_code: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub response_message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_info: Option<AccountInfo>,
}

/// Utilisateur authentifié : la réponse normalisée du login
pub type AuthenticatedUser = BankResponse;

impl BankResponse {
    /// Vrai si le code de réponse vaut "00"
    pub fn is_success(&self) -> bool {
        self.response_code == SUCCESS_CODE
    }

    /// Numéro de compte porté par la réponse, s'il existe
    ///
    /// CONCEPT RUST : Option chaining
    /// - as_ref() : &Option<T> -> Option<&T>
    /// - and_then() : enchaîne sans imbriquer les if let
    pub fn account_number(&self) -> Option<&str> {
        self.account_info
            .as_ref()
            .and_then(|info| info.account_number.as_deref())
            .filter(|n| !n.is_empty())
    }

    /// Convertit un refus métier en erreur
    ///
    /// Utilisé par les écrans qui traitent "code != 00" comme un échec
    /// affiché à l'utilisateur, sans autre effet.
    pub fn into_result(self) -> Result<BankResponse, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Rejected {
                code: self.response_code,
                message: self.response_message,
            })
        }
    }
}

/// Solde du compte après normalisation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceInfo {
    /// None : "solde inconnu" (aucune valeur numérique trouvée)
    pub account_balance: Option<f64>,
    pub account_number: Option<String>,
}

/// Résultat normalisé d'une demande de solde
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalanceResult {
    pub response_code: String,
    pub response_message: String,
    pub account_info: BalanceInfo,
}

impl AccountBalanceResult {
    /// Résultat "solde inconnu" pour un compte donné
    pub fn unknown(account_number: &str) -> Self {
        Self {
            response_code: BALANCE_UNAVAILABLE_CODE.to_string(),
            response_message: BALANCE_UNAVAILABLE_MESSAGE.to_string(),
            account_info: BalanceInfo {
                account_balance: None,
                account_number: Some(account_number.to_string()),
            },
        }
    }

    pub fn balance(&self) -> Option<f64> {
        self.account_info.account_balance
    }

    /// Vrai si un solde numérique a été trouvé
    pub fn is_known(&self) -> bool {
        self.account_info.account_balance.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_response_from_partial_json() {
        let json = r#"{"responseCode":"002","responseMessage":"Account credited"}"#;
        let response: BankResponse = serde_json::from_str(json).unwrap();
        assert!(!response.is_success());
        assert!(response.account_info.is_none());
        assert!(response.token.is_none());
    }

    #[test]
    fn test_bank_response_with_null_message() {
        let json = r#"{"responseCode":"00","responseMessage":null,"accountInfo":null}"#;
        let response: BankResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_success());
        assert_eq!(response.response_message, "");
        assert!(response.account_info.is_none());
    }

    #[test]
    fn test_into_result() {
        let ok = BankResponse {
            response_code: "00".to_string(),
            response_message: "Transfer successful".to_string(),
            ..Default::default()
        };
        assert!(ok.into_result().is_ok());

        let refused = BankResponse {
            response_code: "008".to_string(),
            response_message: "Insufficient balance".to_string(),
            ..Default::default()
        };
        match refused.into_result() {
            Err(ApiError::Rejected { code, message }) => {
                assert_eq!(code, "008");
                assert_eq!(message, "Insufficient balance");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_balance_has_its_own_code() {
        let unknown = AccountBalanceResult::unknown("2024000001");
        assert_eq!(unknown.response_code, BALANCE_UNAVAILABLE_CODE);
        assert_ne!(unknown.response_code, SUCCESS_CODE);
        assert!(!unknown.is_known());
        assert_eq!(unknown.account_info.account_number.as_deref(), Some("2024000001"));
    }

    #[test]
    fn test_account_number_ignores_empty() {
        let response = BankResponse {
            account_info: Some(AccountInfo {
                account_number: Some(String::new()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(response.account_number(), None);
    }
}
