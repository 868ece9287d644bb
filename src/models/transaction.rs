// ============================================================================
// Structure : Transaction
// ============================================================================
// Une ligne de relevé bancaire (crédit ou débit)
//
// CONCEPTS RUST :
// 1. #[serde(from = "...")] : désérialise via une structure intermédiaire
//    puis convertit avec From. Permet d'accepter plusieurs noms de champs
//    sans que serde refuse les doublons (alias + champ présents ensemble).
// 2. Option<T> dans le tri : None < Some, donc un tri décroissant met
//    naturellement les dates inconnues à la fin.
// ============================================================================

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sens de la transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Credit,
    Debit,
    /// Type non reconnu (conservé pour l'affichage, ignoré des totaux)
    #[serde(other)]
    Unknown,
}

impl TransactionType {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "CREDIT" => TransactionType::Credit,
            "DEBIT" => TransactionType::Debit,
            _ => TransactionType::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Credit => "CREDIT",
            TransactionType::Debit => "DEBIT",
            TransactionType::Unknown => "?",
        }
    }
}

/// Transaction telle qu'affichée par le dashboard et le relevé
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TransactionWire")]
pub struct Transaction {
    pub id: String,
    pub account_number: String,
    pub transaction_type: TransactionType,
    pub amount: f64,
    /// Date brute renvoyée par l'API (ISO 8601 le plus souvent)
    pub created_at: Option<String>,
    pub status: String,
}

impl Transaction {
    /// Date de création interprétée
    ///
    /// Formats acceptés :
    /// - RFC 3339 : "2024-01-15T10:30:00Z"
    /// - LocalDateTime : "2024-01-15T10:30:00" ou "2024-01-15 10:30:00.123"
    /// - Date seule : "2024-01-15" (minuit)
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let raw = self.created_at.as_deref()?.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc());
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(dt);
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    pub fn is_credit(&self) -> bool {
        self.transaction_type == TransactionType::Credit
    }

    pub fn is_failed(&self) -> bool {
        self.status.eq_ignore_ascii_case("FAILED")
    }

    /// Montant signé pour l'affichage : "+1,500.00" / "-200.00"
    pub fn display_amount(&self) -> String {
        let sign = match self.transaction_type {
            TransactionType::Credit => "+",
            TransactionType::Debit => "-",
            TransactionType::Unknown => "",
        };
        format!("{}{:.2}", sign, self.amount)
    }
}

/// Trie les transactions de la plus récente à la plus ancienne
pub fn sort_by_recent(transactions: &mut [Transaction]) {
    // CONCEPT RUST : sort_by_key + Reverse
    // - Option<NaiveDateTime> implémente Ord
    // - Reverse inverse l'ordre : Some(récent) d'abord, None en dernier
    transactions.sort_by_key(|t| std::cmp::Reverse(t.timestamp()));
}

/// Les `limit` transactions les plus récentes, quel que soit l'ordre d'entrée
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sort_by_recent(&mut sorted);
    sorted.truncate(limit);
    sorted
}

// ============================================================================
// Format filaire
// ============================================================================
// Les révisions du backend ont utilisé :
// - transactionType ou type
// - createdAt, date ou timestamp (chaîne ISO ou tableau [a, m, j, h, min, s])
// - id numérique, id texte ou transactionId
// - amount numérique ou texte
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionWire {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    transaction_id: Option<Value>,
    #[serde(default)]
    account_number: Option<String>,
    #[serde(default)]
    transaction_type: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    amount: Option<Value>,
    #[serde(default)]
    created_at: Option<Value>,
    #[serde(default)]
    date: Option<Value>,
    #[serde(default)]
    timestamp: Option<Value>,
    #[serde(default)]
    status: Option<String>,
}

impl From<TransactionWire> for Transaction {
    fn from(wire: TransactionWire) -> Self {
        let id = wire
            .id
            .or(wire.transaction_id)
            .map(|v| scalar_to_string(&v))
            .unwrap_or_default();

        let transaction_type = wire
            .transaction_type
            .or(wire.kind)
            .map(|raw| TransactionType::parse(&raw))
            .unwrap_or(TransactionType::Unknown);

        let amount = wire.amount.as_ref().and_then(number_from_value).unwrap_or(0.0);

        let created_at = [wire.created_at, wire.date, wire.timestamp]
            .into_iter()
            .flatten()
            .find_map(|v| date_from_value(&v));

        Transaction {
            id,
            account_number: wire.account_number.unwrap_or_default(),
            transaction_type,
            amount,
            created_at,
            status: wire.status.unwrap_or_default(),
        }
    }
}

/// Nombre fini depuis un JSON number ou une chaîne numérique
pub(crate) fn number_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Date en chaîne, ou tableau Jackson [année, mois, jour, heure, minute, seconde]
fn date_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(parts) if parts.len() >= 3 => {
            let p: Vec<u32> = parts
                .iter()
                .take(6)
                .map(|v| v.as_u64().and_then(|n| u32::try_from(n).ok()))
                .collect::<Option<Vec<u32>>>()?;
            let at = |i: usize| p.get(i).copied().unwrap_or(0);
            Some(format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                at(0),
                at(1),
                at(2),
                at(3),
                at(4),
                at(5)
            ))
        }
        _ => None,
    }
}
