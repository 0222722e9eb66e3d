//! Field rules for the User form
//!
//! A declarative rule set: field path -> ordered (predicate, message)
//! pairs, evaluated eagerly in one pass. Every offending field is
//! reported, not just the first, so a form can annotate all of them at
//! once. Pure and synchronous; callers must not dispatch a mutation
//! while any field is invalid.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::{ValidateEmail, ValidateUrl};

use super::entity::UserDraft;

/// Minimum length for the display name
pub const MIN_NAME_LENGTH: usize = 3;
/// Minimum length for the username
pub const MIN_USERNAME_LENGTH: usize = 3;
/// Minimum length for the phone field (length only, not digit content)
pub const MIN_PHONE_LENGTH: usize = 10;
/// Minimum length for the company name, when one is given
pub const MIN_COMPANY_NAME_LENGTH: usize = 3;

/// Violated fields from one validation pass, keyed by field path
/// (`name`, `company.name`, `address.street`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate violations in field-path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

struct FieldRule {
    field: &'static str,
    message: &'static str,
    ok: fn(&UserDraft) -> bool,
}

/// Rule table, scanned top to bottom; a field's first failing rule wins.
static RULES: [FieldRule; 8] = [
    FieldRule {
        field: "name",
        message: "Name must be at least 3 characters long",
        ok: |draft| draft.name.chars().count() >= MIN_NAME_LENGTH,
    },
    FieldRule {
        field: "email",
        message: "Invalid email address",
        ok: |draft| draft.email.validate_email(),
    },
    FieldRule {
        field: "phone",
        message: "Phone number must be at least 10 digits",
        ok: |draft| draft.phone.chars().count() >= MIN_PHONE_LENGTH,
    },
    FieldRule {
        field: "username",
        message: "Username must be at least 3 characters long",
        ok: |draft| draft.username.chars().count() >= MIN_USERNAME_LENGTH,
    },
    FieldRule {
        field: "website",
        message: "Invalid URL",
        ok: |draft| draft.website.is_empty() || draft.website.validate_url(),
    },
    FieldRule {
        field: "company.name",
        message: "Company name must be at least 3 characters long",
        ok: |draft| match draft.company.name.as_deref() {
            None => true,
            Some(name) => name.chars().count() >= MIN_COMPANY_NAME_LENGTH,
        },
    },
    FieldRule {
        field: "address.street",
        message: "Street is required",
        ok: |draft| !draft.address.street.is_empty(),
    },
    FieldRule {
        field: "address.city",
        message: "City is required",
        ok: |draft| !draft.address.city.is_empty(),
    },
];

/// Validate a draft against the full rule set.
///
/// Returns every violated field path with its message; deterministic and
/// side-effect free.
pub fn validate(draft: &UserDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    for rule in &RULES {
        if !errors.contains(rule.field) && !(rule.ok)(draft) {
            errors.insert(rule.field, rule.message);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{Address, Company};

    fn valid_draft() -> UserDraft {
        UserDraft {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "0123456789".to_string(),
            username: "janedoe".to_string(),
            website: "https://example.com".to_string(),
            company: Company {
                name: Some("Acme Corp".to_string()),
            },
            address: Address {
                street: "Main St 1".to_string(),
                city: "Springfield".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate(&valid_draft()).is_ok());
    }

    #[test]
    fn test_short_name_rejected() {
        let draft = UserDraft {
            name: "Al".to_string(),
            ..valid_draft()
        };

        let errors = validate(&draft).unwrap_err();
        assert_eq!(
            errors.get("name"),
            Some("Name must be at least 3 characters long")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_invalid_email_rejected() {
        let draft = UserDraft {
            email: "not-an-email".to_string(),
            ..valid_draft()
        };

        let errors = validate(&draft).unwrap_err();
        assert_eq!(errors.get("email"), Some("Invalid email address"));
    }

    #[test]
    fn test_short_phone_rejected() {
        let draft = UserDraft {
            phone: "555-1234".to_string(),
            ..valid_draft()
        };

        let errors = validate(&draft).unwrap_err();
        assert_eq!(
            errors.get("phone"),
            Some("Phone number must be at least 10 digits")
        );
    }

    #[test]
    fn test_phone_length_only_not_digits() {
        // Length is the contract; digit content is not enforced.
        let draft = UserDraft {
            phone: "1-770-736-8031 x56442".to_string(),
            ..valid_draft()
        };

        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn test_short_username_rejected() {
        let draft = UserDraft {
            username: "jd".to_string(),
            ..valid_draft()
        };

        let errors = validate(&draft).unwrap_err();
        assert_eq!(
            errors.get("username"),
            Some("Username must be at least 3 characters long")
        );
    }

    #[test]
    fn test_empty_website_allowed() {
        let draft = UserDraft {
            website: String::new(),
            ..valid_draft()
        };

        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn test_malformed_website_rejected() {
        let draft = UserDraft {
            website: "not a url".to_string(),
            ..valid_draft()
        };

        let errors = validate(&draft).unwrap_err();
        assert_eq!(errors.get("website"), Some("Invalid URL"));
    }

    #[test]
    fn test_missing_company_name_allowed() {
        let draft = UserDraft {
            company: Company { name: None },
            ..valid_draft()
        };

        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn test_short_company_name_rejected() {
        let draft = UserDraft {
            company: Company {
                name: Some("AB".to_string()),
            },
            ..valid_draft()
        };

        let errors = validate(&draft).unwrap_err();
        assert_eq!(
            errors.get("company.name"),
            Some("Company name must be at least 3 characters long")
        );
    }

    #[test]
    fn test_empty_address_rejected() {
        let draft = UserDraft {
            address: Address::default(),
            ..valid_draft()
        };

        let errors = validate(&draft).unwrap_err();
        assert_eq!(errors.get("address.street"), Some("Street is required"));
        assert_eq!(errors.get("address.city"), Some("City is required"));
    }

    #[test]
    fn test_all_violations_reported_together() {
        let errors = validate(&UserDraft::default()).unwrap_err();

        // website and company.name are the only rules an empty form passes
        assert_eq!(errors.len(), 6);
        assert!(errors.contains("name"));
        assert!(errors.contains("email"));
        assert!(errors.contains("phone"));
        assert!(errors.contains("username"));
        assert!(errors.contains("address.street"));
        assert!(errors.contains("address.city"));
    }

    #[test]
    fn test_field_errors_display() {
        let draft = UserDraft {
            name: "Al".to_string(),
            email: "bad".to_string(),
            ..valid_draft()
        };

        let errors = validate(&draft).unwrap_err();
        assert_eq!(
            errors.to_string(),
            "email: Invalid email address; name: Name must be at least 3 characters long"
        );
    }
}
