/*
[INPUT]:  Activation records and webhook URL
[OUTPUT]: Discord-style embed messages
[POS]:    Notification layer - best-effort success reports
[UPDATE]: When the embed layout or delivery channel changes
*/

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::outcome::ActivationRecord;

const EMBED_TITLE: &str = "Activate taker daily mining success!";
const EMBED_COLOR: u32 = 0x3498db;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("webhook rejected message (status {status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Delivers activation reports to an outside channel
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, record: &ActivationRecord) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookMessage {
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

impl WebhookMessage {
    pub fn from_record(record: &ActivationRecord) -> Self {
        Self {
            embeds: vec![Embed {
                title: EMBED_TITLE.to_string(),
                description: format!("address: {}", record.address),
                color: EMBED_COLOR,
                fields: vec![
                    EmbedField {
                        name: "point before activate".to_string(),
                        value: reward_text(record.reward_before),
                        inline: true,
                    },
                    EmbedField {
                        name: "point after activate".to_string(),
                        value: reward_text(record.reward_after),
                        inline: true,
                    },
                ],
                footer: EmbedFooter {
                    text: format!("onchain success with tx hash {}", record.onchain_tx_hash),
                },
            }],
        }
    }
}

fn reward_text(reward: Option<Decimal>) -> String {
    reward
        .map(|value| value.normalize().to_string())
        .unwrap_or_else(|| "undefined".to_string())
}

/// Posts embeds to a Discord webhook, without any wallet proxy
#[derive(Debug, Clone)]
pub struct DiscordWebhook {
    client: reqwest::Client,
    url: String,
}

impl DiscordWebhook {
    pub fn new(url: &str) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl Notifier for DiscordWebhook {
    async fn notify(&self, record: &ActivationRecord) -> Result<(), NotifyError> {
        let message = WebhookMessage::from_record(record);
        let response = self.client.post(&self.url).json(&message).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::str::FromStr;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record() -> ActivationRecord {
        ActivationRecord {
            address: "0xabc".to_string(),
            onchain_tx_hash: "0xdeadbeef".to_string(),
            offchain_confirmed: true,
            reward_before: Some(Decimal::from_str("10.50").unwrap()),
            reward_after: None,
        }
    }

    #[test]
    fn test_embed_layout() {
        let json = serde_json::to_value(WebhookMessage::from_record(&record())).unwrap();
        let embed = &json["embeds"][0];

        assert_eq!(embed["title"], EMBED_TITLE);
        assert_eq!(embed["description"], "address: 0xabc");
        assert_eq!(embed["color"], 0x3498db);
        assert_eq!(embed["fields"][0]["value"], "10.5");
        assert_eq!(embed["fields"][0]["inline"], true);
        assert_eq!(embed["fields"][1]["value"], "undefined");
        assert_eq!(embed["footer"]["text"], "onchain success with tx hash 0xdeadbeef");
    }

    #[tokio::test]
    async fn test_webhook_delivery() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let webhook = DiscordWebhook::new(&format!("{}/hook", server.uri())).unwrap();
        webhook.notify(&record()).await.unwrap();
    }

    #[tokio::test]
    async fn test_webhook_rejection_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad embed"))
            .mount(&server)
            .await;

        let webhook = DiscordWebhook::new(&format!("{}/hook", server.uri())).unwrap();
        match webhook.notify(&record()).await.unwrap_err() {
            NotifyError::Rejected { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "bad embed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
