use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use crate::config::Config;
use crate::error::{AppError, Result};

/// Outbound notification mail.
///
/// Delivery is best-effort and never on a request's critical path: callers
/// dispatch through [`Mailer::send_detached`], which swallows failures into
/// the log. Without a configured SMTP endpoint the mailer degrades to
/// logging the envelope (dev mode).
#[derive(Clone)]
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
}

impl Mailer {
    /// Creates a `Mailer` from the application configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let from: Mailbox = config
            .mail_from
            .parse()
            .map_err(|e| AppError::Mail(format!("Invalid MAIL_FROM address: {}", e)))?;

        let transport = match &config.smtp_url {
            Some(url) => Some(
                AsyncSmtpTransport::<Tokio1Executor>::from_url(url)
                    .map_err(|e| AppError::Mail(format!("Invalid SMTP_URL: {}", e)))?
                    .build(),
            ),
            None => None,
        };

        Ok(Self { transport, from })
    }

    /// Sends a single message.
    pub async fn send(&self, to: &str, subject: &str, body: String) -> Result<()> {
        let Some(transport) = &self.transport else {
            // Envelope only. Notification bodies carry credentials and must
            // never reach a log line.
            tracing::info!("📧 SMTP not configured; would send \"{}\" to {}", subject, to);
            return Ok(());
        };

        let message = Message::builder()
            .from(self.from.clone())
            .to(to
                .parse()
                .map_err(|e| AppError::Mail(format!("Invalid recipient {}: {}", to, e)))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| AppError::Mail(format!("Failed to build message: {}", e)))?;

        transport
            .send(message)
            .await
            .map_err(|e| AppError::Mail(format!("SMTP delivery failed: {}", e)))?;

        tracing::info!("✅ Mail \"{}\" sent to {}", subject, to);
        Ok(())
    }

    /// Dispatches a message on a detached task.
    ///
    /// Failures are logged and never propagate to the caller.
    pub fn send_detached(&self, to: String, subject: String, body: String) {
        let mailer = self.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send(&to, &subject, body).await {
                tracing::warn!("❌ Mail delivery to {} failed: {}", to, e);
            }
        });
    }
}

/// The welcome mail sent to a new account.
///
/// NOTE: the body embeds the submitted plaintext password. Known exposure,
/// part of the legacy notification contract; see DESIGN.md.
pub fn welcome_email(email: &str, password: &str) -> (String, String) {
    (
        r#"Congratulations! You have registered on our "Site"!"#.to_string(),
        format!("Your email: {}\nYour password: {}", email, password),
    )
}

/// The operator notification sent for each new account.
///
/// NOTE: carries the submitted plaintext password; see DESIGN.md.
pub fn admin_signup_email(
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> (String, String) {
    (
        r#"Congratulations! Another user registered on our "Site"!"#.to_string(),
        format!(
            "name: {}\nlastName: {}\nemail: {}\npassword: {}",
            first_name, last_name, email, password
        ),
    )
}

/// The reset-password mail.
///
/// Sends the stored credential string (the bcrypt hash). There is no
/// token-based reset flow; see DESIGN.md.
pub fn reset_email(stored_password: &str) -> (String, String) {
    (
        "Reset Password!".to_string(),
        format!("Your password: {}", stored_password),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_body_carries_address_and_password() {
        let (subject, body) = welcome_email("a@x.com", "secret1");
        assert!(subject.contains("registered"));
        assert!(body.contains("a@x.com"));
        assert!(body.contains("secret1"));
    }

    #[test]
    fn admin_body_carries_the_full_identity() {
        let (_, body) = admin_signup_email("Ada", "Lovelace", "a@x.com", "secret1");
        assert!(body.contains("Ada"));
        assert!(body.contains("Lovelace"));
        assert!(body.contains("a@x.com"));
        assert!(body.contains("secret1"));
    }

    #[test]
    fn reset_body_carries_the_stored_credential() {
        let (subject, body) = reset_email("$2b$12$abcdefghijklmnopqrstuv");
        assert_eq!(subject, "Reset Password!");
        assert!(body.contains("$2b$12$"));
    }
}
