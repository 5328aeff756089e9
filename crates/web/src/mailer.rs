use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use storage::services::best_effort;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Mail webhook responded with status {0}")]
    Status(u16),
}

#[derive(Debug, Clone, Serialize)]
pub struct Mail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &Mail) -> Result<(), MailError>;
}

/// Development mailer that only logs what would have been sent.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: &Mail) -> Result<(), MailError> {
        tracing::info!(to = %mail.to, subject = %mail.subject, "Mail not sent, no webhook configured");
        Ok(())
    }
}

/// Posts each mail as JSON to a delivery webhook.
pub struct WebhookMailer {
    client: reqwest::Client,
    url: String,
}

impl WebhookMailer {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl Mailer for WebhookMailer {
    async fn send(&self, mail: &Mail) -> Result<(), MailError> {
        let response = self.client.post(&self.url).json(mail).send().await?;

        if !response.status().is_success() {
            return Err(MailError::Status(response.status().as_u16()));
        }

        tracing::info!(to = %mail.to, subject = %mail.subject, "Mail sent");
        Ok(())
    }
}

/// Send without holding up the request; failures are only logged.
pub fn send_in_background(mailer: Arc<dyn Mailer>, mail: Mail) {
    tokio::spawn(async move {
        best_effort("send mail", mailer.send(&mail)).await;
    });
}

/// Notification sent to a newly created judge.
pub fn judge_assignment_mail(
    from: &str,
    to: &str,
    name: &str,
    game_title: Option<&str>,
    default_password: &str,
) -> Mail {
    let game = game_title.unwrap_or("No game assigned");

    Mail {
        from: from.to_string(),
        to: to.to_string(),
        subject: "Judge Assignment Notification".to_string(),
        text: format!(
            "Dear {name},\n\nYou have been assigned as a judge for: {game}\n\n\
             Your default password is: {default_password}\n\
             Please log in and change your password.\n\nBest regards,\nAdmin"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder(Mutex<Vec<Mail>>);

    #[async_trait]
    impl Mailer for Recorder {
        async fn send(&self, mail: &Mail) -> Result<(), MailError> {
            self.0.lock().unwrap().push(mail.clone());
            Ok(())
        }
    }

    #[test]
    fn test_judge_mail_mentions_game_and_password() {
        let mail = judge_assignment_mail("admin@x", "j@x", "Dr. Saima", Some("Chess"), "123456");

        assert_eq!(mail.to, "j@x");
        assert!(mail.text.contains("Dear Dr. Saima"));
        assert!(mail.text.contains("Chess"));
        assert!(mail.text.contains("123456"));
    }

    #[test]
    fn test_judge_mail_without_game() {
        let mail = judge_assignment_mail("admin@x", "j@x", "Dr. Saima", None, "123456");
        assert!(mail.text.contains("No game assigned"));
    }

    #[tokio::test]
    async fn test_background_send_delivers() {
        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        let mail = judge_assignment_mail("a", "b", "c", None, "d");

        send_in_background(recorder.clone(), mail);

        for _ in 0..50 {
            if !recorder.0.lock().unwrap().is_empty() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(recorder.0.lock().unwrap().len(), 1);
    }
}
