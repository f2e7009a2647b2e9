//! Minimal Telegram Bot API client: long-poll for updates, send replies.
//!
//! Only the two endpoints the bot needs, with the wire structs kept
//! private to this module.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// One inbound text message: raw text plus the sender's stable id and
/// display name.
#[derive(Debug, Clone)]
pub struct Incoming {
    pub user_id: i64,
    pub username: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct UpdatesResponse {
    ok: bool,
    #[serde(default)]
    result: Vec<Update>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    from: Option<Sender>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Sender {
    id: i64,
    username: Option<String>,
    first_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: format!("https://api.telegram.org/bot{token}"),
        }
    }

    /// Long-poll for updates after `offset`. Returns the next offset and
    /// the text messages in the batch; non-text updates advance the
    /// offset but are otherwise dropped.
    pub async fn poll_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<(i64, Vec<Incoming>)> {
        let url = format!("{}/getUpdates", self.base);
        let resp = self
            .http
            .get(&url)
            .query(&[
                ("offset", offset.to_string()),
                ("timeout", timeout_secs.to_string()),
            ])
            .send()
            .await
            .context("getUpdates request")?;
        if !resp.status().is_success() {
            bail!("getUpdates failed: HTTP {}", resp.status());
        }
        let parsed: UpdatesResponse = resp.json().await.context("decode getUpdates")?;
        if !parsed.ok {
            bail!("getUpdates returned ok=false");
        }

        let mut next_offset = offset;
        let mut batch = Vec::new();
        for update in parsed.result {
            next_offset = next_offset.max(update.update_id + 1);
            if let Some(incoming) = to_incoming(update) {
                batch.push(incoming);
            }
        }
        Ok((next_offset, batch))
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        #[derive(Serialize)]
        struct Req<'a> {
            chat_id: i64,
            text: &'a str,
        }

        #[derive(Deserialize)]
        struct Resp {
            ok: bool,
        }

        let url = format!("{}/sendMessage", self.base);
        let resp = self
            .http
            .post(&url)
            .json(&Req { chat_id, text })
            .send()
            .await
            .context("sendMessage request")?;
        if !resp.status().is_success() {
            bail!("sendMessage failed: HTTP {}", resp.status());
        }
        let parsed: Resp = resp.json().await.context("decode sendMessage")?;
        if !parsed.ok {
            bail!("sendMessage returned ok=false");
        }
        Ok(())
    }
}

fn to_incoming(update: Update) -> Option<Incoming> {
    let message = update.message?;
    let text = message.text?;
    let from = message.from?;
    let username = from
        .username
        .or(from.first_name)
        .unwrap_or_else(|| "unknown".to_string());
    Some(Incoming {
        user_id: from.id,
        username,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_updates_batch() {
        let raw = r#"{
          "ok": true,
          "result": [
            {"update_id": 10,
             "message": {"from": {"id": 42, "username": "asha"},
                         "text": "spent 100 on snacks"}},
            {"update_id": 11,
             "message": {"from": {"id": 43, "first_name": "Ravi"},
                         "text": "balance"}},
            {"update_id": 12, "message": null}
          ]
        }"#;

        let parsed: UpdatesResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.ok);

        let incoming: Vec<Incoming> = parsed.result.into_iter().filter_map(to_incoming).collect();
        assert_eq!(incoming.len(), 2);
        assert_eq!(incoming[0].user_id, 42);
        assert_eq!(incoming[0].username, "asha");
        assert_eq!(incoming[0].text, "spent 100 on snacks");
        // Falls back to first_name when no username is set.
        assert_eq!(incoming[1].username, "Ravi");
    }

    #[test]
    fn test_decode_empty_result() {
        let parsed: UpdatesResponse = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert!(parsed.result.is_empty());
    }
}
