//! Interview invitations for ranked candidates. Sending is simulated: the
//! composed message is returned and the candidate is marked as invited, but
//! nothing is delivered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::prompts::fill_template;

pub const DEFAULT_RECIPIENT: &str = "candidate@example.com";
pub const DEFAULT_POSITION: &str = "Senior Software Engineer";

/// Replace: {name}, {position}
const INVITE_BODY_TEMPLATE: &str = "Dear {name},

We are pleased to invite you to interview for the {position} position.

Please confirm your availability at your earliest convenience.

Best regards,
HR Team";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InviteDraft {
    pub rank_index: usize,
    pub candidate_name: String,
    pub position: String,
    pub email: String,
    pub subject: String,
    pub body: String,
}

impl InviteDraft {
    pub fn for_candidate(rank_index: usize, candidate_name: &str) -> Self {
        Self {
            rank_index,
            candidate_name: candidate_name.to_string(),
            position: DEFAULT_POSITION.to_string(),
            email: DEFAULT_RECIPIENT.to_string(),
            subject: format!("Interview Invitation - {candidate_name}"),
            body: fill_template(
                INVITE_BODY_TEMPLATE,
                &[("position", DEFAULT_POSITION), ("name", candidate_name)],
            ),
        }
    }

    /// Applies the user's edits over the default draft.
    pub fn edited(mut self, edits: InviteEdits) -> Result<Self, AppError> {
        if let Some(email) = edits.email {
            self.email = email.trim().to_string();
        }
        if let Some(subject) = edits.subject {
            self.subject = subject;
        }
        if let Some(body) = edits.body {
            self.body = body;
        }
        if self.email.is_empty() {
            return Err(AppError::Validation("Recipient email is required".to_string()));
        }
        Ok(self)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct InviteEdits {
    pub email: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
}

/// What a simulated send reports back.
#[derive(Debug, Clone, Serialize)]
pub struct SentInvite {
    #[serde(flatten)]
    pub draft: InviteDraft,
    pub delivered: bool,
    pub sent_at: DateTime<Utc>,
}

impl SentInvite {
    pub fn simulate(draft: InviteDraft) -> Self {
        Self {
            draft,
            delivered: false,
            sent_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_draft() {
        let draft = InviteDraft::for_candidate(0, "b.txt");
        assert_eq!(draft.email, "candidate@example.com");
        assert_eq!(draft.subject, "Interview Invitation - b.txt");
        assert!(draft.body.starts_with("Dear b.txt,\n\n"));
        assert!(draft
            .body
            .contains("interview for the Senior Software Engineer position."));
        assert!(draft.body.ends_with("Best regards,\nHR Team"));
    }

    #[test]
    fn test_edits_override_defaults() {
        let draft = InviteDraft::for_candidate(1, "a.txt")
            .edited(InviteEdits {
                email: Some(" alice@example.org ".to_string()),
                subject: None,
                body: Some("Hi Alice".to_string()),
            })
            .unwrap();
        assert_eq!(draft.email, "alice@example.org");
        assert_eq!(draft.subject, "Interview Invitation - a.txt");
        assert_eq!(draft.body, "Hi Alice");
    }

    #[test]
    fn test_blank_recipient_is_rejected() {
        let result = InviteDraft::for_candidate(0, "a.txt").edited(InviteEdits {
            email: Some("  ".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_simulated_send_is_not_delivered() {
        let sent = SentInvite::simulate(InviteDraft::for_candidate(0, "a.txt"));
        let value = serde_json::to_value(&sent).unwrap();
        assert_eq!(value["delivered"], false);
        assert_eq!(value["subject"], "Interview Invitation - a.txt");
    }
}
