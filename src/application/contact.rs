use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::application::repos::{ContactRepo, RepoError};
use crate::domain::contact::{ContactSubmission, ContactValidationError};
use crate::domain::types::ContactPriority;

pub const CONTACT_SUBMISSIONS_METRIC: &str = "rengoring_contact_submissions_total";

#[derive(Debug, Error)]
pub enum ContactError {
    #[error(transparent)]
    Validation(#[from] ContactValidationError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Raw form fields as received.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub priority: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ContactReceipt {
    pub reference: Uuid,
    pub priority: ContactPriority,
}

#[derive(Clone)]
pub struct ContactService {
    inbox: Arc<dyn ContactRepo>,
}

impl ContactService {
    pub fn new(inbox: Arc<dyn ContactRepo>) -> Self {
        Self { inbox }
    }

    pub async fn submit(&self, form: ContactForm) -> Result<ContactReceipt, ContactError> {
        let submission = ContactSubmission::parse(
            &form.name,
            &form.email,
            &form.subject,
            &form.message,
            form.priority.as_deref(),
        )?;

        let reference = Uuid::new_v4();
        let priority = submission.priority;

        info!(
            target = "rengoring::contact",
            %reference,
            priority = priority.as_str(),
            subject = %submission.subject,
            message_chars = submission.message.chars().count(),
            "contact submission received"
        );

        self.inbox.record_submission(submission).await?;
        counter!(CONTACT_SUBMISSIONS_METRIC, "priority" => priority.as_str()).increment(1);

        Ok(ContactReceipt {
            reference,
            priority,
        })
    }
}
