//! Weekly summary broadcast.
//!
//! Computes the next configured weekday/hour in the configured timezone,
//! sleeps until then, and sends every known user their summary. Per-user
//! failures are logged and skipped; the job itself never dies over one
//! bad send.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use mentor_core::{Engine, Store};
use mentor_store::JsonStore;
use tracing::{error, info, warn};

use crate::config::SummarySection;
use crate::telegram::TelegramClient;

#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    pub weekday: Weekday,
    pub hour: u32,
    pub tz: Tz,
}

impl Schedule {
    pub fn from_config(cfg: &SummarySection) -> Result<Self> {
        let weekday: Weekday = cfg
            .weekday
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid weekday: {}", cfg.weekday))?;
        let tz: Tz = cfg
            .timezone
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid timezone: {}", cfg.timezone))?;
        if cfg.hour > 23 {
            bail!("summary hour out of range: {}", cfg.hour);
        }
        Ok(Self {
            weekday,
            hour: cfg.hour,
            tz,
        })
    }

    /// Next instant at `weekday hour:00` local to the configured
    /// timezone, strictly after `now`.
    pub fn next_fire(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local = now.with_timezone(&self.tz);
        for days_ahead in 0..14 {
            let date = local.date_naive() + Duration::days(days_ahead);
            if date.weekday() != self.weekday {
                continue;
            }
            let Some(naive) = date.and_hms_opt(self.hour, 0, 0) else {
                continue;
            };
            // A nonexistent local time (DST gap) skips to the next week.
            let Some(fire) = self.tz.from_local_datetime(&naive).earliest() else {
                continue;
            };
            let fire = fire.with_timezone(&Utc);
            if fire > now {
                return fire;
            }
        }
        now + Duration::days(1)
    }
}

pub async fn run(
    engine: Arc<Engine>,
    store: Arc<JsonStore>,
    client: TelegramClient,
    schedule: Schedule,
) {
    loop {
        let now = Utc::now();
        let fire = schedule.next_fire(now);
        info!(at = %fire, "next weekly summary broadcast");
        let wait = (fire - now).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;
        broadcast(&engine, store.as_ref(), &client).await;
    }
}

async fn broadcast(engine: &Engine, store: &(dyn Store + Sync), client: &TelegramClient) {
    let users = match store.user_ids().context("list users for broadcast") {
        Ok(users) => users,
        Err(err) => {
            error!(error = %err, "broadcast aborted");
            return;
        }
    };
    info!(users = users.len(), "sending weekly summaries");

    for user in users {
        let text = match engine.weekly_summary_text(store, user) {
            Ok(text) => text,
            Err(err) => {
                warn!(user, error = %err, "summary failed");
                continue;
            }
        };
        if let Err(err) = client.send_message(user, &text).await {
            warn!(user, error = %err, "summary send failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(weekday: Weekday, hour: u32, tz: &str) -> Schedule {
        Schedule {
            weekday,
            hour,
            tz: tz.parse().unwrap(),
        }
    }

    #[test]
    fn test_next_fire_later_this_week() {
        // Wednesday noon UTC -> Sunday 14:00 UTC the same week.
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        let fire = schedule(Weekday::Sun, 14, "UTC").next_fire(now);
        assert_eq!(fire, Utc.with_ymd_and_hms(2026, 8, 9, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_next_fire_rolls_to_next_week() {
        // Sunday 15:00 is already past 14:00 -> following Sunday.
        let now = Utc.with_ymd_and_hms(2026, 8, 9, 15, 0, 0).unwrap();
        let fire = schedule(Weekday::Sun, 14, "UTC").next_fire(now);
        assert_eq!(fire, Utc.with_ymd_and_hms(2026, 8, 16, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_exact_fire_instant_is_not_reused() {
        let now = Utc.with_ymd_and_hms(2026, 8, 9, 14, 0, 0).unwrap();
        let fire = schedule(Weekday::Sun, 14, "UTC").next_fire(now);
        assert_eq!(fire, Utc.with_ymd_and_hms(2026, 8, 16, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_next_fire_honors_timezone() {
        // Sunday 14:00 in Kolkata is 08:30 UTC.
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        let fire = schedule(Weekday::Sun, 14, "Asia/Kolkata").next_fire(now);
        assert_eq!(fire, Utc.with_ymd_and_hms(2026, 8, 9, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_from_config_validates() {
        let good = SummarySection {
            weekday: "sunday".to_string(),
            hour: 14,
            timezone: "UTC".to_string(),
        };
        assert!(Schedule::from_config(&good).is_ok());

        let bad_hour = SummarySection {
            hour: 24,
            ..good.clone()
        };
        assert!(Schedule::from_config(&bad_hour).is_err());

        let bad_tz = SummarySection {
            timezone: "Mars/Olympus".to_string(),
            ..good
        };
        assert!(Schedule::from_config(&bad_tz).is_err());
    }
}
