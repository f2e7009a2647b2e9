//! The long-polling transport loop and its wiring.

use std::sync::Arc;

use anyhow::Result;
use mentor_core::{Engine, Store};
use mentor_store::JsonStore;
use tracing::{error, info, warn};

use crate::config::{self, Config};
use crate::state;
use crate::summary_job::{self, Schedule};
use crate::telegram::TelegramClient;

/// Run the bot: poll Telegram for messages, answer each through the
/// engine, and keep the weekly-summary job running alongside.
pub async fn serve(cfg: Config) -> Result<()> {
    let token = config::telegram_token(&cfg)?;
    let client = TelegramClient::new(&token);
    let store: Arc<JsonStore> = Arc::new(JsonStore::open(state::default_store_path()?)?);
    let engine = Arc::new(Engine::with_defaults()?);
    let schedule = Schedule::from_config(&cfg.summary)?;

    tokio::spawn(summary_job::run(
        engine.clone(),
        store.clone(),
        client.clone(),
        schedule,
    ));

    poll_loop(&engine, store.as_ref(), &client, cfg.telegram.poll_timeout_secs).await
}

async fn poll_loop(
    engine: &Engine,
    store: &dyn Store,
    client: &TelegramClient,
    poll_timeout_secs: u64,
) -> Result<()> {
    info!("mentor bot polling for updates");
    let mut offset = 0i64;
    loop {
        let (next_offset, batch) = match client.poll_updates(offset, poll_timeout_secs).await {
            Ok(polled) => polled,
            Err(err) => {
                warn!(error = %err, "poll failed; retrying");
                tokio::time::sleep(std::time::Duration::from_secs(3)).await;
                continue;
            }
        };
        offset = next_offset;

        for msg in batch {
            info!(user = msg.user_id, "message received");
            if let Err(err) = store.touch_user(msg.user_id, &msg.username) {
                warn!(user = msg.user_id, error = %err, "user registry update failed");
            }

            let reply = match engine.handle_message(store, msg.user_id, &msg.text) {
                Ok(reply) => reply,
                Err(err) => {
                    // The user sees only the fixed template; the cause
                    // goes to the log.
                    error!(user = msg.user_id, error = %err, "message processing failed");
                    engine.replies().processing_failed()
                }
            };

            if let Err(err) = client.send_message(msg.user_id, &reply).await {
                warn!(user = msg.user_id, error = %err, "send failed");
            }
        }
    }
}
