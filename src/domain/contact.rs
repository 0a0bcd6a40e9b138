//! Contact form submissions.

use thiserror::Error;

use crate::domain::types::ContactPriority;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactValidationError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("email address `{0}` is not valid")]
    InvalidEmail(String),
    #[error("unknown priority `{0}`")]
    UnknownPriority(String),
}

/// A validated contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub priority: ContactPriority,
}

impl ContactSubmission {
    pub fn parse(
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
        priority: Option<&str>,
    ) -> Result<Self, ContactValidationError> {
        let fields = [
            ("name", name.trim()),
            ("email", email.trim()),
            ("subject", subject.trim()),
            ("message", message.trim()),
        ];
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(key, _)| *key)
            .collect();
        if !missing.is_empty() {
            return Err(ContactValidationError::MissingFields(missing));
        }

        let [name, email, subject, message] = fields.map(|(_, value)| value.to_string());

        if !looks_like_email(&email) {
            return Err(ContactValidationError::InvalidEmail(email));
        }

        let priority = match priority.map(str::trim).filter(|value| !value.is_empty()) {
            Some(raw) => raw
                .parse::<ContactPriority>()
                .map_err(|_| ContactValidationError::UnknownPriority(raw.to_string()))?,
            None => ContactPriority::default(),
        };

        Ok(Self {
            name,
            email,
            subject,
            message,
            priority,
        })
    }
}

/// `local@domain.tld` with no whitespace; deliverability is not checked.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
    ) -> Result<ContactSubmission, ContactValidationError> {
        ContactSubmission::parse(name, email, subject, message, None)
    }

    #[test]
    fn valid_submission_defaults_to_normal_priority() {
        let submission = parse(
            " Anna ",
            "anna@example.dk",
            "Tilbud",
            "Hvad koster en hovedrengøring?",
        )
        .unwrap();
        assert_eq!(submission.name, "Anna");
        assert_eq!(submission.priority, ContactPriority::Normal);
    }

    #[test]
    fn every_blank_required_field_is_reported() {
        let err = parse("", "anna@example.dk", "  ", "Hej").unwrap_err();
        assert_eq!(
            err,
            ContactValidationError::MissingFields(vec!["name", "subject"])
        );
    }

    #[test]
    fn malformed_email_is_rejected() {
        for email in ["anna", "anna@", "@example.dk", "anna@example", "an na@example.dk"] {
            assert!(
                matches!(
                    parse("Anna", email, "Emne", "Besked"),
                    Err(ContactValidationError::InvalidEmail(_))
                ),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn priority_is_parsed_when_present() {
        let submission = ContactSubmission::parse(
            "Anna",
            "anna@example.dk",
            "Klage",
            "Rengøringen blev aflyst",
            Some("Urgent"),
        )
        .unwrap();
        assert_eq!(submission.priority, ContactPriority::Urgent);

        let err = ContactSubmission::parse(
            "Anna",
            "anna@example.dk",
            "Klage",
            "Besked",
            Some("asap"),
        )
        .unwrap_err();
        assert_eq!(err, ContactValidationError::UnknownPriority("asap".into()));
    }
}
