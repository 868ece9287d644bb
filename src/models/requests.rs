// ============================================================================
// Requêtes envoyées à l'API bancaire
// ============================================================================
// Chaque requête implémente Validate : les règles des formulaires sont
// vérifiées avant tout appel réseau.
// ============================================================================

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::validation::{Checks, Validate, ValidationErrors};

/// Identifiants de connexion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new()
            .required("email", &self.email, "Email is required")
            .email("email", &self.email)
            .required("password", &self.password, "Password is required")
            .min_len("password", &self.password, 5, "Password should be at least 5 characters")
            .finish()
    }
}

/// Demande de solde ou de nom sur un compte
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryRequest {
    pub account_number: String,
}

impl EnquiryRequest {
    pub fn new(account_number: impl Into<String>) -> Self {
        Self {
            account_number: account_number.into().trim().to_string(),
        }
    }
}

impl Validate for EnquiryRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new()
            .required("accountNumber", &self.account_number, "Account number is required")
            .finish()
    }
}

/// Crédit ou débit d'un compte
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditDebitRequest {
    pub account_number: String,
    pub amount: f64,
}

impl Validate for CreditDebitRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new()
            .required("accountNumber", &self.account_number, "Account number is required")
            .positive_amount("amount", self.amount)
            .finish()
    }
}

/// Virement entre deux comptes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub source_account_number: String,
    pub destination_account_number: String,
    pub amount: f64,
}

impl Validate for TransferRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new()
            .required(
                "sourceAccountNumber",
                &self.source_account_number,
                "Source account number is required",
            )
            .required(
                "destinationAccountNumber",
                &self.destination_account_number,
                "Destination account number is required",
            )
            .positive_amount("amount", self.amount)
            .finish()
    }
}

// ============================================================================
// Relevé bancaire : période en jours calendaires
// ============================================================================

/// Demande de relevé sur une période (bornes incluses)
///
/// Les dates partent sur le réseau au format "YYYY-MM-DD" ; la période couvre
/// start_date à 00:00:00 jusqu'à end_date à 23:59:59.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementRequest {
    pub account_number: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl StatementRequest {
    pub fn new(account_number: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            account_number: account_number.into().trim().to_string(),
            start_date,
            end_date,
        }
    }

    /// Les `days` derniers jours jusqu'à `today` inclus (vue "récent" du dashboard)
    pub fn last_days(account_number: impl Into<String>, today: NaiveDate, days: u32) -> Self {
        let start = today - Duration::days(i64::from(days));
        Self::new(account_number, start, today)
    }

    /// Début de période : start_date à 00:00:00
    pub fn starts_at(&self) -> NaiveDateTime {
        self.start_date.and_time(NaiveTime::MIN)
    }

    /// Fin de période : end_date à 23:59:59
    pub fn ends_at(&self) -> NaiveDateTime {
        // CONCEPT RUST : and_hms_opt retourne Option (heure invalide possible)
        // 23:59:59 est toujours valide, on retombe sur minuit par sécurité typée
        self.end_date
            .and_hms_opt(23, 59, 59)
            .unwrap_or_else(|| self.end_date.and_time(NaiveTime::MIN))
    }

    /// Vrai si l'instant tombe dans la période (bornes incluses)
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.starts_at() && at <= self.ends_at()
    }

    /// Paramètres de requête GET : dates ISO calendaires
    pub fn query_params(&self) -> Vec<(String, String)> {
        vec![
            ("accountNumber".to_string(), self.account_number.clone()),
            ("startDate".to_string(), self.start_date.format("%Y-%m-%d").to_string()),
            ("endDate".to_string(), self.end_date.format("%Y-%m-%d").to_string()),
        ]
    }
}

impl Validate for StatementRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new()
            .required("accountNumber", &self.account_number, "Account number is required")
            .ensure(
                self.end_date >= self.start_date,
                "endDate",
                "End date must be after start date",
            )
            .finish()
    }
}

// ============================================================================
// Compte utilisateur : inscription, profil, mot de passe
// ============================================================================

/// Formulaire d'inscription (UserDTO côté serveur)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistration {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub address: String,
    pub state: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub status: String,
}

impl UserRegistration {
    /// Statut envoyé pour tout nouveau compte
    pub const ACTIVE: &'static str = "ACTIVE";
}

impl Validate for UserRegistration {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new()
            .required("firstName", &self.first_name, "First name is required")
            .required("lastName", &self.last_name, "Last name is required")
            .required("gender", &self.gender, "Gender is required")
            .required("address", &self.address, "Address is required")
            .required("state", &self.state, "State is required")
            .required("email", &self.email, "Email is required")
            .email("email", &self.email)
            .required("password", &self.password, "Password is required")
            .min_len(
                "password",
                &self.password,
                6,
                "Password should be of minimum 6 characters length",
            )
            .required("phoneNumber", &self.phone_number, "Phone number is required")
            .phone("phoneNumber", &self.phone_number)
            .finish()
    }
}

/// Mise à jour partielle du profil : seuls les champs Some partent sur le réseau
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_preferences: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
}

impl ProfileUpdate {
    /// Découpe un nom complet : premier mot = prénom, le reste = nom
    pub fn with_full_name(mut self, full_name: &str) -> Self {
        let mut parts = full_name.split_whitespace();
        self.first_name = parts.next().map(str::to_string);
        let rest: Vec<&str> = parts.collect();
        self.last_name = Some(rest.join(" "));
        self
    }
}

impl Validate for ProfileUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new()
            .email("email", self.email.as_deref().unwrap_or_default())
            .phone("phoneNumber", self.phone_number.as_deref().unwrap_or_default())
            .finish()
    }
}

/// Changement de mot de passe
///
/// La confirmation reste côté client : seuls oldPassword et newPassword
/// sont sérialisés.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    #[serde(skip)]
    pub confirm_password: String,
}

impl Validate for PasswordChange {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new()
            .required("oldPassword", &self.old_password, "Current password is required")
            .required("newPassword", &self.new_password, "New password is required")
            .min_len(
                "newPassword",
                &self.new_password,
                6,
                "Password should be of minimum 6 characters length",
            )
            .ensure(
                self.new_password == self.confirm_password,
                "confirmPassword",
                "Passwords do not match.",
            )
            .finish()
    }
}
