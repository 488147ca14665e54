//! Account and profile data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A local account's profile. The username is the key in the profile file
/// and is not repeated inside the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: u32,
    /// Argon2 PHC string, or a legacy SHA-256 hex digest
    #[serde(rename = "password", default, skip_serializing_if = "String::is_empty")]
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl UserProfile {
    pub fn new(full_name: String, password_hash: String) -> Self {
        Self {
            full_name,
            password_hash,
            created_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    pub fn has_password(&self) -> bool {
        !self.password_hash.is_empty()
    }
}

/// Request to update profile fields. The password hash is never touched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
}

impl ProfileUpdate {
    pub fn apply(self, profile: &mut UserProfile) {
        if let Some(full_name) = self.full_name {
            profile.full_name = full_name.trim().to_string();
        }
        if let Some(email) = self.email {
            profile.email = email.trim().to_string();
        }
        if let Some(age) = self.age {
            profile.age = age;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_login_page_record() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"full_name": "Ada Lovelace", "password": "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"}"#,
        )
        .unwrap();

        assert_eq!(profile.full_name, "Ada Lovelace");
        assert!(profile.has_password());
        assert_eq!(profile.age, 0);
        assert!(profile.email.is_empty());
    }

    #[test]
    fn test_reads_profile_page_record() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"full_name": "Grace", "email": "g@example.com", "age": 30}"#)
                .unwrap();
        assert_eq!(profile.age, 30);
        assert!(!profile.has_password());
    }

    #[test]
    fn test_hash_serialized_under_password_key() {
        let profile = UserProfile::new("Ada".to_string(), "hash".to_string());
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["password"], "hash");
        assert!(value.get("password_hash").is_none());
    }

    #[test]
    fn test_update_keeps_unset_fields() {
        let mut profile = UserProfile::new("Ada".to_string(), "hash".to_string());
        profile.email = "ada@example.com".to_string();

        ProfileUpdate {
            age: Some(36),
            full_name: Some("  Ada King ".to_string()),
            ..Default::default()
        }
        .apply(&mut profile);

        assert_eq!(profile.full_name, "Ada King");
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.age, 36);
        assert_eq!(profile.password_hash, "hash");
    }
}
