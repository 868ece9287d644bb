// ============================================================================
// Structure : UserProfile
// ============================================================================
// Profil utilisateur renvoyé par GET /api/user/profile
// ============================================================================

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Profil complet (UserDTO côté serveur, sans le mot de passe)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub gender: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub notification_preferences: Option<String>,
    pub dark_mode: Option<bool>,
}

impl UserProfile {
    /// "Prénom Nom", sans espace traînant si le nom est vide
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn notifications(&self) -> NotificationPreferences {
        NotificationPreferences::parse(self.notification_preferences.as_deref().unwrap_or(""))
    }
}

/// Canaux de notification, stockés côté serveur en CSV ("email,sms,push")
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationPreferences {
    pub email: bool,
    pub sms: bool,
    pub push: bool,
}

impl NotificationPreferences {
    pub fn parse(csv: &str) -> Self {
        let mut prefs = Self::default();
        for item in csv.split(',').map(|s| s.trim().to_ascii_lowercase()) {
            match item.as_str() {
                "email" => prefs.email = true,
                "sms" => prefs.sms = true,
                "push" | "app" => prefs.push = true,
                _ => {}
            }
        }
        prefs
    }

    pub fn to_csv(&self) -> String {
        let mut items = Vec::new();
        if self.email {
            items.push("email");
        }
        if self.sms {
            items.push("sms");
        }
        if self.push {
            items.push("push");
        }
        items.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserialize_with_missing_fields() {
        let json = r#"{"firstName":"Ada","email":"ada@example.com","darkMode":true}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.full_name(), "Ada");
        assert_eq!(profile.dark_mode, Some(true));
        assert_eq!(profile.notifications(), NotificationPreferences::default());
    }

    #[test]
    fn test_profile_deserialize_with_null_fields() {
        let json = r#"{"firstName":"Ada","lastName":"Lovelace","gender":null,"address":null,
            "state":null,"email":"ada@example.com","phoneNumber":null,"status":null,
            "notificationPreferences":null,"darkMode":null}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.full_name(), "Ada Lovelace");
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.gender, "");
        assert_eq!(profile.status, "");
        assert_eq!(profile.phone_number, "");
        assert_eq!(profile.dark_mode, None);
    }

    #[test]
    fn test_notification_csv() {
        let prefs = NotificationPreferences::parse("email, push");
        assert!(prefs.email);
        assert!(!prefs.sms);
        assert!(prefs.push);
        assert_eq!(prefs.to_csv(), "email,push");
        assert_eq!(NotificationPreferences::default().to_csv(), "");
    }
}
