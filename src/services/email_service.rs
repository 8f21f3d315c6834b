use reqwest::Client;
use serde::Serialize;

use crate::config::Config;

#[derive(Serialize)]
struct MailpitContact {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Email")]
    email: String,
}

#[derive(Serialize)]
struct MailpitPayload {
    #[serde(rename = "From")]
    from: MailpitContact,
    #[serde(rename = "To")]
    to: Vec<MailpitContact>,
    #[serde(rename = "Subject")]
    subject: String,
    #[serde(rename = "HTML")]
    html: String,
}

#[derive(Serialize)]
struct BrevoSender {
    name: String,
    email: String,
}

#[derive(Serialize)]
struct BrevoRecipient {
    email: String,
}

#[derive(Serialize)]
struct BrevoPayload {
    sender: BrevoSender,
    to: Vec<BrevoRecipient>,
    subject: String,
    #[serde(rename = "htmlContent")]
    html_content: String,
}

// Fire-and-forget transactional email: Brevo in production, Mailpit in dev
#[derive(Clone)]
pub struct EmailService {
    client: Client,
    is_production: bool,
    api_key: String,
    from_email: String,
    mailpit_url: String,
}

impl EmailService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            is_production: !config.brevo_api_key.is_empty(),
            api_key: config.brevo_api_key.clone(),
            from_email: config.smtp_from.clone(),
            mailpit_url: "http://localhost:8025/api/v1/send".to_string(),
        }
    }

    pub async fn send_password_reset_email(
        &self,
        to: &str,
        reset_link: &str,
    ) -> Result<(), String> {
        let subject = "OhMyImage Password Reset";
        let html_body = format!(
            "<p>Click the link below to reset your password:</p>
            <a href=\"{}\">Reset Password</a>
            <p>Or copy this link: {}</p>
            <p>The link is valid for one hour. If you did not request a reset, ignore this email.</p>",
            reset_link, reset_link
        );

        if self.is_production {
            self.send_via_brevo(to, subject, &html_body).await
        } else {
            self.send_via_mailpit(to, subject, &html_body).await
        }
    }

    async fn send_via_brevo(&self, to: &str, subject: &str, html: &str) -> Result<(), String> {
        let payload = BrevoPayload {
            sender: BrevoSender {
                name: "OhMyImage".to_string(),
                email: self.from_email.clone(),
            },
            to: vec![BrevoRecipient {
                email: to.to_string(),
            }],
            subject: subject.to_string(),
            html_content: html.to_string(),
        };

        let response = self
            .client
            .post("https://api.brevo.com/v3/smtp/email")
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| format!("Request error: {}", e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(format!("Brevo API error: {}", error_text))
        }
    }

    async fn send_via_mailpit(&self, to: &str, subject: &str, html: &str) -> Result<(), String> {
        let payload = MailpitPayload {
            from: MailpitContact {
                name: "OhMyImage".into(),
                email: self.from_email.clone(),
            },
            to: vec![MailpitContact {
                name: "".into(),
                email: to.to_string(),
            }],
            subject: subject.to_string(),
            html: html.to_string(),
        };

        let response = self
            .client
            .post(&self.mailpit_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| format!("Mailpit request error: {}", e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(format!("Mailpit error: {}", error_text))
        }
    }
}
