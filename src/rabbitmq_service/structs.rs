use serde::{Deserialize, Serialize};

use crate::config::MAIL_PATTERN;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct MailData {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub from: String,
}

/// Envelope understood by the mail worker consuming the queue.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct MailMessage {
    pub pattern: String,
    pub data: MailData,
}

impl MailMessage {
    pub fn send_email(to: &str, subject: &str, text: &str, from: &str) -> Self {
        Self {
            pattern: MAIL_PATTERN.to_string(),
            data: MailData {
                to: to.to_string(),
                subject: subject.to_string(),
                text: text.to_string(),
                from: from.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_matches_worker_contract() {
        let msg = MailMessage::send_email("a@x.com", "Hi", "Body", "noreply@x.com");
        let value = serde_json::to_value(&msg).unwrap();

        assert_eq!(value["pattern"], "send-email");
        assert_eq!(value["data"]["to"], "a@x.com");
        assert_eq!(value["data"]["from"], "noreply@x.com");
    }
}
