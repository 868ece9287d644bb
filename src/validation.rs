// ============================================================================
// Validation des formulaires côté client
// ============================================================================
// Chaque requête est validée AVANT tout appel réseau.
// Les erreurs sont collectées champ par champ pour être affichées en ligne.
//
// CONCEPT RUST : Builder pattern
// - Checks accumule les erreurs, chaque méthode retourne Self
// - finish() convertit l'accumulation en Result
// ============================================================================

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Erreur sur un champ précis du formulaire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Nom du champ tel que sérialisé (ex: "accountNumber")
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Ensemble non vide d'erreurs de validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Premier message pour un champ donné (affichage sous le champ)
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Trait implémenté par toutes les requêtes envoyées à l'API
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

// ============================================================================
// Checks : accumulateur de règles
// ============================================================================

/// Accumulateur de règles de validation
#[derive(Debug, Default)]
pub struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Champ obligatoire (les espaces seuls ne comptent pas)
    pub fn required(mut self, field: &'static str, value: &str, message: &str) -> Self {
        if value.trim().is_empty() {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    /// Email bien formé ; un champ vide est laissé à `required`
    pub fn email(mut self, field: &'static str, value: &str) -> Self {
        let value = value.trim();
        if !value.is_empty() && !is_valid_email(value) {
            self.errors.push(FieldError::new(field, "Enter a valid email"));
        }
        self
    }

    /// Longueur minimale en caractères
    pub fn min_len(mut self, field: &'static str, value: &str, min: usize, message: &str) -> Self {
        if !value.is_empty() && value.chars().count() < min {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    /// Numéro de téléphone à 10 chiffres ; espaces autour ignorés comme pour l'email
    pub fn phone(mut self, field: &'static str, value: &str) -> Self {
        let value = value.trim();
        if !value.is_empty() && !is_valid_phone(value) {
            self.errors
                .push(FieldError::new(field, "Phone number must be 10 digits"));
        }
        self
    }

    /// Montant fini et strictement positif
    ///
    /// CONCEPT RUST : f64::is_finite
    /// - NaN et l'infini passent `> 0.0` de façon surprenante (inf > 0)
    /// - is_finite() les exclut explicitement
    pub fn positive_amount(mut self, field: &'static str, amount: f64) -> Self {
        if !amount.is_finite() || amount <= 0.0 {
            self.errors
                .push(FieldError::new(field, "Amount must be positive"));
        }
        self
    }

    /// Règle libre : ajoute le message si la condition est fausse
    pub fn ensure(mut self, condition: bool, field: &'static str, message: &str) -> Self {
        if !condition {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

fn is_valid_email(value: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| {
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
        })
        .is_match(value)
}

fn is_valid_phone(value: &str) -> bool {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE
        .get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"))
        .is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_blank() {
        let result = Checks::new()
            .required("email", "   ", "Email is required")
            .finish();
        let errors = result.unwrap_err();
        assert_eq!(errors.for_field("email"), Some("Email is required"));
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("a@b.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("not an email"));

        // Vide : géré par `required`, pas par `email`
        assert!(Checks::new().email("email", "").finish().is_ok());
    }

    #[test]
    fn test_positive_amount() {
        assert!(Checks::new().positive_amount("amount", 10.5).finish().is_ok());
        assert!(Checks::new().positive_amount("amount", 0.0).finish().is_err());
        assert!(Checks::new().positive_amount("amount", -3.0).finish().is_err());
        assert!(Checks::new().positive_amount("amount", f64::NAN).finish().is_err());
        assert!(Checks::new()
            .positive_amount("amount", f64::INFINITY)
            .finish()
            .is_err());
    }

    #[test]
    fn test_phone_and_min_len() {
        let errors = Checks::new()
            .phone("phoneNumber", "12345")
            .min_len("password", "abc", 6, "Password should be of minimum 6 characters length")
            .finish()
            .unwrap_err();
        assert_eq!(errors.errors().len(), 2);
        assert!(Checks::new().phone("phoneNumber", "0123456789").finish().is_ok());
    }

    #[test]
    fn test_phone_and_email_ignore_surrounding_spaces() {
        assert!(Checks::new()
            .phone("phoneNumber", " 0123456789 ")
            .email("email", " ada@example.com ")
            .finish()
            .is_ok());
        assert!(Checks::new().phone("phoneNumber", "   ").finish().is_ok());
        assert!(Checks::new().phone("phoneNumber", " 01234 56789 ").finish().is_err());
    }
}
