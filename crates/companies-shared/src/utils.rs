//! Utility functions

use thiserror::Error;
use uuid::Uuid;

/// Length of the hyphenated form, the only one ids are stored in
const HYPHENATED_LEN: usize = 36;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid UUID: {0}")]
pub struct InvalidUuid(pub String);

/// Accepts only the hyphenated form (`xxxxxxxx-xxxx-...`). Braced, `urn:uuid:`
/// and unhyphenated spellings are rejected.
pub fn is_valid_uuid(s: &str) -> bool {
    s.len() == HYPHENATED_LEN && Uuid::parse_str(s).is_ok()
}

/// Lowercases an id and checks that it is a hyphenated UUID.
pub fn normalize_uuid(s: &str) -> Result<String, InvalidUuid> {
    if !is_valid_uuid(s) {
        return Err(InvalidUuid(s.to_string()));
    }
    Ok(s.to_lowercase())
}

pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        if local.chars().count() <= 2 {
            format!("{}***{}", local.chars().next().unwrap_or('*'), domain)
        } else {
            format!("{}***{}", local.chars().take(2).collect::<String>(), domain)
        }
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_uuid_lowercases() {
        let id = normalize_uuid("6F9619FF-8B86-D011-B42D-00C04FC964FF").unwrap();
        assert_eq!(id, "6f9619ff-8b86-d011-b42d-00c04fc964ff");
    }

    #[test]
    fn test_normalize_uuid_rejects_garbage() {
        assert!(normalize_uuid("nonexistent-id").is_err());
        assert!(!is_valid_uuid(""));
    }

    #[test]
    fn test_only_hyphenated_uuids_are_accepted() {
        for id in [
            "{6f9619ff-8b86-d011-b42d-00c04fc964ff}",
            "urn:uuid:6f9619ff-8b86-d011-b42d-00c04fc964ff",
            "6f9619ff8b86d011b42d00c04fc964ff",
        ] {
            assert!(!is_valid_uuid(id), "{} accepted", id);
            assert_eq!(normalize_uuid(id), Err(InvalidUuid(id.to_string())));
        }
        assert!(is_valid_uuid("6f9619ff-8b86-d011-b42d-00c04fc964ff"));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "al***@example.com");
        assert_eq!(mask_email("a@b.com"), "a***@b.com");
        assert_eq!(mask_email("@b.com"), "****@b.com");
        assert_eq!(mask_email("nobody"), "***");
    }

    #[test]
    fn test_mask_email_multibyte_local_part() {
        assert_eq!(mask_email("aé@x.com"), "a***@x.com");
        assert_eq!(mask_email("éèà@x.com"), "éè***@x.com");
        assert_eq!(mask_email("日本語@x.jp"), "日本***@x.jp");
    }
}
