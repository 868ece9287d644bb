// ============================================================================
// Normalisation des réponses de l'API
// ============================================================================
// Selon la révision du backend, un même endpoint renvoie des formes
// différentes. Chaque endpoint a ici :
// 1. un enum qui énumère les formes connues (+ Unrecognized)
// 2. une fonction classify_* qui reconnaît la forme
// 3. une fonction qui produit la forme canonique, avec un défaut documenté
//
// Ajouter une variante uniquement quand le backend la produit réellement.
//
// CONCEPT RUST : Enums avec données empruntées
// - BalanceShape<'a> référence le JSON sans le copier
// - Le lifetime 'a garantit que la forme ne survit pas au payload
// ============================================================================

use serde_json::{Map, Value};
use tracing::warn;

use crate::models::account::{
    AccountBalanceResult, AccountInfo, BalanceInfo, BALANCE_UNAVAILABLE_CODE, BALANCE_UNAVAILABLE_MESSAGE,
    SUCCESS_CODE,
};
use crate::models::transaction::{number_from_value, Transaction};

/// Code de succès du login renvoyé par l'ancien backend
pub(crate) const LEGACY_LOGIN_SUCCESS: &str = "Login Success";

/// Corps de réponse décodé
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Payload {
    /// JSON valide
    Json(Value),
    /// Texte brut non JSON (ex: jeton nu)
    Text(String),
    /// Corps vide
    Empty,
}

impl Payload {
    pub(crate) fn parse(body: &str) -> Self {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Payload::Empty;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(trimmed.to_string()),
        }
    }

    /// Chaîne nue : texte brut ou chaîne JSON
    fn as_bare_str(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s.as_str()),
            Payload::Json(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Payload::Json(Value::Object(map)) => Some(map),
            _ => None,
        }
    }
}

fn str_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Message d'erreur lisible depuis un corps de réponse en erreur
pub(crate) fn error_message(body: &str) -> String {
    match Payload::parse(body) {
        Payload::Json(Value::Object(map)) => ["responseMessage", "message", "error"]
            .iter()
            .find_map(|key| str_field(&map, key))
            .map(str::to_string)
            .unwrap_or_else(|| "request failed".to_string()),
        Payload::Json(Value::String(s)) | Payload::Text(s) => s,
        _ => "request failed".to_string(),
    }
}

// ============================================================================
// Login
// ============================================================================

/// Formes connues de la réponse du login
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LoginShape {
    /// Jeton nu : "eyJhbGciOi..."
    BareToken(String),
    /// { "token": "...", "accountInfo": {...} }
    Structured {
        token: String,
        account_info: Option<AccountInfo>,
    },
    /// { "responseCode": "Login Success", "responseMessage": "<jeton>" }
    LegacyMessageToken {
        token: String,
        account_info: Option<AccountInfo>,
    },
    /// Objet portant un code d'échec et aucun jeton
    Rejected { code: String, message: String },
    Unrecognized,
}

pub(crate) fn classify_login(payload: &Payload) -> LoginShape {
    if let Some(token) = payload.as_bare_str() {
        let token = token.trim();
        if !token.is_empty() {
            return LoginShape::BareToken(token.to_string());
        }
        return LoginShape::Unrecognized;
    }

    let Some(map) = payload.as_object() else {
        return LoginShape::Unrecognized;
    };

    let account_info = map
        .get("accountInfo")
        .and_then(|v| serde_json::from_value::<AccountInfo>(v.clone()).ok());

    if let Some(token) = str_field(map, "token") {
        return LoginShape::Structured {
            token: token.to_string(),
            account_info,
        };
    }

    let code = str_field(map, "responseCode");
    if code == Some(LEGACY_LOGIN_SUCCESS) {
        if let Some(token) = str_field(map, "responseMessage") {
            return LoginShape::LegacyMessageToken {
                token: token.to_string(),
                account_info,
            };
        }
    }

    match code {
        Some(code) => LoginShape::Rejected {
            code: code.to_string(),
            message: str_field(map, "responseMessage")
                .unwrap_or("Login failed")
                .to_string(),
        },
        None => LoginShape::Unrecognized,
    }
}

// ============================================================================
// Solde
// ============================================================================

/// Formes connues de la réponse de demande de solde
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BalanceShape<'a> {
    /// "1500.00" (texte ou chaîne JSON) ou 1500.0 (nombre JSON)
    Bare(&'a Value),
    BareText(&'a str),
    /// { "accountBalance": 1500.0, ... }
    Flat(&'a Map<String, Value>),
    /// { "responseCode": "...", "accountInfo": { "accountBalance": ... } }
    Nested {
        envelope: &'a Map<String, Value>,
        info: &'a Map<String, Value>,
    },
    Unrecognized,
}

pub(crate) fn classify_balance(payload: &Payload) -> BalanceShape<'_> {
    match payload {
        Payload::Text(s) => BalanceShape::BareText(s.as_str()),
        Payload::Json(v @ (Value::String(_) | Value::Number(_))) => BalanceShape::Bare(v),
        Payload::Json(Value::Object(map)) => {
            if let Some(Value::Object(info)) = map.get("accountInfo") {
                BalanceShape::Nested {
                    envelope: map,
                    info,
                }
            } else if map.contains_key("accountBalance") {
                BalanceShape::Flat(map)
            } else {
                BalanceShape::Unrecognized
            }
        }
        _ => BalanceShape::Unrecognized,
    }
}

/// Produit le solde canonique ; ne renvoie jamais d'erreur
///
/// Défaut : solde absent ("inconnu") si aucune valeur numérique finie
/// n'a été trouvée. Le numéro de compte de la réponse est préféré à celui
/// de la requête.
pub(crate) fn normalize_balance(payload: &Payload, account_number: &str) -> AccountBalanceResult {
    let shape = classify_balance(payload);

    let (envelope, balance, number) = match &shape {
        BalanceShape::Bare(value) => (None, number_from_value(value), None),
        BalanceShape::BareText(text) => (None, parse_amount(text), None),
        BalanceShape::Flat(map) => (
            Some(*map),
            map.get("accountBalance").and_then(number_from_value),
            str_field(map, "accountNumber"),
        ),
        // Le champ plat l'emporte quand les deux formes coexistent
        BalanceShape::Nested { envelope, info } => (
            Some(*envelope),
            envelope
                .get("accountBalance")
                .and_then(number_from_value)
                .or_else(|| info.get("accountBalance").and_then(number_from_value)),
            str_field(info, "accountNumber").or_else(|| str_field(envelope, "accountNumber")),
        ),
        BalanceShape::Unrecognized => {
            warn!(account = %account_number, "Unrecognized balance response shape");
            return AccountBalanceResult::unknown(account_number);
        }
    };

    if balance.is_none() {
        warn!(account = %account_number, "Balance response carried no numeric value");
    }

    // Sans enveloppe, le code reflète ce qui a été trouvé
    let (default_code, default_message) = match balance {
        Some(_) => (SUCCESS_CODE, "Success"),
        None => (BALANCE_UNAVAILABLE_CODE, BALANCE_UNAVAILABLE_MESSAGE),
    };
    let response_code = envelope
        .and_then(|m| str_field(m, "responseCode"))
        .unwrap_or(default_code)
        .to_string();
    let response_message = envelope
        .and_then(|m| str_field(m, "responseMessage"))
        .unwrap_or(default_message)
        .to_string();

    AccountBalanceResult {
        response_code,
        response_message,
        account_info: BalanceInfo {
            account_balance: balance,
            account_number: Some(number.unwrap_or(account_number).to_string()),
        },
    }
}

fn parse_amount(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

// ============================================================================
// Nom du titulaire
// ============================================================================

/// Nom d'affichage ; chaîne vide si introuvable
pub(crate) fn normalize_name(payload: &Payload) -> String {
    if let Some(name) = payload.as_bare_str() {
        return name.trim().to_string();
    }
    payload
        .as_object()
        .and_then(|map| {
            str_field(map, "accountName").or_else(|| match map.get("accountInfo") {
                Some(Value::Object(info)) => str_field(info, "accountName"),
                _ => None,
            })
        })
        .unwrap_or_default()
        .to_string()
}

// ============================================================================
// Relevé / liste de transactions
// ============================================================================

/// Formes connues d'une liste de transactions
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StatementShape<'a> {
    /// [ {...}, {...} ]
    List(&'a [Value]),
    /// { "transactions": [...] }
    Wrapped(&'a [Value]),
    /// { "data": { "transactions": [...] } }
    DoublyWrapped(&'a [Value]),
    Unrecognized,
}

impl<'a> StatementShape<'a> {
    fn entries(&self) -> &'a [Value] {
        match self {
            StatementShape::List(items)
            | StatementShape::Wrapped(items)
            | StatementShape::DoublyWrapped(items) => items,
            StatementShape::Unrecognized => &[],
        }
    }
}

fn transactions_array(map: &Map<String, Value>) -> Option<&[Value]> {
    match map.get("transactions") {
        Some(Value::Array(items)) => Some(items.as_slice()),
        _ => None,
    }
}

pub(crate) fn classify_statement(payload: &Payload) -> StatementShape<'_> {
    match payload {
        Payload::Json(Value::Array(items)) => StatementShape::List(items),
        Payload::Json(Value::Object(map)) => {
            if let Some(items) = transactions_array(map) {
                StatementShape::Wrapped(items)
            } else if let Some(items) = map
                .get("data")
                .and_then(Value::as_object)
                .and_then(transactions_array)
            {
                StatementShape::DoublyWrapped(items)
            } else {
                StatementShape::Unrecognized
            }
        }
        _ => StatementShape::Unrecognized,
    }
}

/// Liste plate de transactions ; `[]` si la forme est inconnue
///
/// Les entrées individuelles illisibles sont ignorées (avec un warning)
/// plutôt que de faire échouer tout le relevé.
pub(crate) fn normalize_statement(payload: &Payload) -> Vec<Transaction> {
    let shape = classify_statement(payload);
    if shape == StatementShape::Unrecognized && *payload != Payload::Empty {
        warn!("Unrecognized statement response shape");
    }

    let entries = shape.entries();
    let transactions: Vec<Transaction> = entries
        .iter()
        .filter(|v| v.is_object())
        .filter_map(|v| serde_json::from_value(v.clone()).ok())
        .collect();

    let skipped = entries.len() - transactions.len();
    if skipped > 0 {
        warn!(skipped, total = entries.len(), "Skipped malformed transactions");
    }
    transactions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(body: &str) -> Payload {
        Payload::parse(body)
    }

    #[test]
    fn test_payload_parse() {
        assert_eq!(payload("  "), Payload::Empty);
        assert_eq!(payload("eyJ.abc.def"), Payload::Text("eyJ.abc.def".to_string()));
        assert_eq!(payload("\"tok\""), Payload::Json(Value::String("tok".to_string())));
        assert_eq!(payload("1500.5"), Payload::Json(serde_json::json!(1500.5)));
    }

    #[test]
    fn test_login_shapes() {
        assert_eq!(classify_login(&payload("tok123")), LoginShape::BareToken("tok123".to_string()));
        assert_eq!(classify_login(&payload("\"tok123\"")), LoginShape::BareToken("tok123".to_string()));

        let structured = classify_login(&payload(
            r#"{"responseCode":"00","token":"tok123","accountInfo":{"accountNumber":"2024000001"}}"#,
        ));
        match structured {
            LoginShape::Structured { token, account_info } => {
                assert_eq!(token, "tok123");
                assert_eq!(account_info.unwrap().account_number.as_deref(), Some("2024000001"));
            }
            other => panic!("unexpected: {:?}", other),
        }

        assert_eq!(
            classify_login(&payload(r#"{"responseCode":"Login Success","responseMessage":"tok123"}"#)),
            LoginShape::LegacyMessageToken {
                token: "tok123".to_string(),
                account_info: None
            }
        );

        assert_eq!(
            classify_login(&payload(r#"{"responseCode":"01","responseMessage":"Bad credentials"}"#)),
            LoginShape::Rejected {
                code: "01".to_string(),
                message: "Bad credentials".to_string()
            }
        );

        assert_eq!(classify_login(&payload("{}")), LoginShape::Unrecognized);
        assert_eq!(classify_login(&payload("")), LoginShape::Unrecognized);
        assert_eq!(classify_login(&payload("[1,2]")), LoginShape::Unrecognized);
    }

    #[test]
    fn test_balance_shapes_agree() {
        let bodies = [
            "1500.75",
            "\"1500.75\"",
            r#"{"accountBalance": 1500.75}"#,
            r#"{"responseCode":"004","responseMessage":"User Account Found",
                "accountInfo":{"accountBalance":1500.75,"accountNumber":"2024000001","accountName":"Ada"}}"#,
            r#"{"accountBalance":1500.75,"accountInfo":{"accountNumber":"2024000001"}}"#,
            r#"{"accountBalance":1500.75,"accountNumber":"2024000001","accountInfo":{"accountName":"Ada"}}"#,
        ];
        for body in bodies {
            let result = normalize_balance(&payload(body), "2024000001");
            assert_eq!(result.balance(), Some(1500.75), "body: {}", body);
            assert_eq!(result.account_info.account_number.as_deref(), Some("2024000001"));
        }
    }

    #[test]
    fn test_balance_envelope_and_defaults() {
        let nested = normalize_balance(
            &payload(r#"{"responseCode":"004","responseMessage":"User Account Found","accountInfo":{"accountBalance":"12"}}"#),
            "1",
        );
        assert_eq!(nested.response_code, "004");
        assert_eq!(nested.response_message, "User Account Found");
        assert_eq!(nested.balance(), Some(12.0));

        let flat = normalize_balance(&payload(r#"{"accountBalance": 3}"#), "1");
        assert_eq!(flat.response_code, SUCCESS_CODE);
        assert_eq!(flat.response_message, "Success");
        assert!(flat.is_known());
    }

    #[test]
    fn test_unknown_balance_is_not_reported_as_success() {
        for body in ["abc", r#"{"foo":1}"#, r#"{"accountBalance":"n/a"}"#] {
            let result = normalize_balance(&payload(body), "1");
            assert_eq!(result.response_code, BALANCE_UNAVAILABLE_CODE, "body: {}", body);
            assert_ne!(result.response_code, SUCCESS_CODE);
            assert!(!result.is_known());
        }

        // Le code de l'enveloppe est conservé tel quel
        let nested = normalize_balance(
            &payload(r#"{"responseCode":"003","responseMessage":"Account not found","accountInfo":{}}"#),
            "1",
        );
        assert_eq!(nested.response_code, "003");
        assert_eq!(nested.balance(), None);
    }

    #[test]
    fn test_balance_degrades_to_unknown() {
        for body in ["abc", "NaN", "", "null", "[]", r#"{"foo":1}"#, r#"{"accountBalance":"n/a"}"#] {
            let result = normalize_balance(&payload(body), "2024000001");
            assert_eq!(result.balance(), None, "body: {}", body);
            assert_eq!(result.account_info.account_number.as_deref(), Some("2024000001"));
        }
    }

    #[test]
    fn test_name_shapes() {
        assert_eq!(normalize_name(&payload("Ada Lovelace")), "Ada Lovelace");
        assert_eq!(normalize_name(&payload("\"Ada Lovelace\"")), "Ada Lovelace");
        assert_eq!(normalize_name(&payload(r#"{"accountName":"Ada"}"#)), "Ada");
        assert_eq!(normalize_name(&payload(r#"{"accountInfo":{"accountName":"Ada"}}"#)), "Ada");
        assert_eq!(normalize_name(&payload("")), "");
        assert_eq!(normalize_name(&payload("42")), "");
    }

    #[test]
    fn test_statement_shapes_agree() {
        let list = r#"[{"id":1,"accountNumber":"1","transactionType":"CREDIT","amount":10,"createdAt":"2024-01-01T00:00:00","status":"SUCCESS"},
                       {"id":2,"accountNumber":"1","transactionType":"DEBIT","amount":4,"createdAt":"2024-01-02T00:00:00","status":"SUCCESS"}]"#;
        let wrapped = format!(r#"{{"transactions":{}}}"#, list);
        let doubly = format!(r#"{{"data":{{"transactions":{}}}}}"#, list);

        let expected = normalize_statement(&payload(list));
        assert_eq!(expected.len(), 2);
        assert_eq!(normalize_statement(&payload(&wrapped)), expected);
        assert_eq!(normalize_statement(&payload(&doubly)), expected);

        assert!(matches!(classify_statement(&payload(&doubly)), StatementShape::DoublyWrapped(_)));
    }

    #[test]
    fn test_statement_malformed_yields_empty() {
        for body in ["", "oops", "null", "{}", r#"{"transactions":"none"}"#, r#"{"data":[]}"#, "42"] {
            assert!(normalize_statement(&payload(body)).is_empty(), "body: {}", body);
        }
    }

    #[test]
    fn test_statement_skips_malformed_entries() {
        let body = r#"[{"id":1,"amount":10,"transactionType":"CREDIT"}, 17, "x", {"id":2,"amount":5}]"#;
        let list = normalize_statement(&payload(body));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(r#"{"message":"Forbidden"}"#), "Forbidden");
        assert_eq!(error_message(r#"{"responseMessage":"Account does not exist"}"#), "Account does not exist");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(""), "request failed");
    }
}
