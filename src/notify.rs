//! Push notifications for threshold breaks and the daily digest.
//!
//! Messages go out as a GET against the push endpoint with `appkey` and
//! `title` query parameters; delivery failures are logged, never retried.

use crate::clock;
use crate::config::{PUSH_ENDPOINT, SEND_SPACING};
use crate::error::{PipelineError, Result};
use crate::models::Snapshot;
use reqwest::{Client, StatusCode};
use std::collections::BTreeMap;
use std::env;
use tracing::{info, warn};

pub struct Notifier {
    appkey: String,
    client: Client,
}

impl Notifier {
    /// Build from the `APPKEY` environment variable. Absence disables
    /// notification for the whole run.
    pub fn from_env(client: Client) -> Option<Self> {
        match env::var("APPKEY") {
            Ok(appkey) if !appkey.is_empty() => Some(Self { appkey, client }),
            _ => {
                warn!("APPKEY is not set, notifications disabled");
                None
            }
        }
    }

    /// Send one titled message.
    pub async fn send(&self, title: &str) -> Result<()> {
        let response = self
            .client
            .get(PUSH_ENDPOINT)
            .query(&[("appkey", self.appkey.as_str()), ("title", title)])
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                info!("notification sent: {title}");
                Ok(())
            }
            status => Err(PipelineError::Status {
                url: PUSH_ENDPOINT.to_string(),
                status,
            }),
        }
    }

    /// One alert per watched currency whose scraped rate sits below its
    /// cutoff, with consecutive sends spaced `SEND_SPACING` apart.
    pub async fn alert_thresholds(&self, snapshot: &Snapshot, thresholds: &BTreeMap<String, f64>) {
        let mut sent_any = false;
        for (currency, cutoff) in thresholds {
            let Some(record) = snapshot.get(currency) else {
                continue;
            };
            match breached(&record.rate, *cutoff) {
                Some(true) => {
                    if sent_any {
                        tokio::time::sleep(SEND_SPACING).await;
                    }
                    sent_any = true;
                    let title = format!("{currency}汇率已跌破{cutoff}，当前{}", record.rate);
                    if let Err(e) = self.send(&title).await {
                        warn!("alert for {currency} failed: {e}");
                    }
                }
                Some(false) => {}
                None => warn!("rate for {currency} is not numeric: {}", record.rate),
            }
        }
    }

    /// Summary of every scraped rate, gated on the configured UTC+8 hour.
    /// Firing once per day relies on the external scheduler invoking at
    /// most one run inside that hour.
    pub async fn send_digest(&self, snapshot: &Snapshot, digest_hour: Option<u32>) {
        if !digest_due(clock::hour_of_day(), digest_hour) {
            return;
        }
        let lines: Vec<String> = snapshot
            .iter()
            .map(|(currency, record)| format!("{currency} {}", record.rate))
            .collect();
        let title = format!("汇率日报：{}", lines.join("，"));
        if let Err(e) = self.send(&title).await {
            warn!("digest failed: {e}");
        }
    }
}

/// `Some(true)` when the raw rate parses and sits below the cutoff,
/// `None` when it does not parse at all.
fn breached(raw: &str, cutoff: f64) -> Option<bool> {
    raw.parse::<f64>().ok().map(|rate| rate < cutoff)
}

fn digest_due(current_hour: u32, digest_hour: Option<u32>) -> bool {
    digest_hour == Some(current_hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_comparison_uses_strict_less_than() {
        assert_eq!(breached("539.5", 540.0), Some(true));
        assert_eq!(breached("540.5", 540.0), Some(false));
        assert_eq!(breached("540", 540.0), Some(false));
    }

    #[test]
    fn unparseable_rate_skips_the_check() {
        assert_eq!(breached("--", 540.0), None);
        assert_eq!(breached("", 540.0), None);
    }

    #[test]
    fn digest_fires_only_in_the_matching_hour() {
        assert!(digest_due(9, Some(9)));
        assert!(!digest_due(10, Some(9)));
        assert!(!digest_due(9, None));
    }

    #[test]
    fn missing_or_empty_appkey_disables_notification() {
        env::remove_var("APPKEY");
        assert!(Notifier::from_env(Client::new()).is_none());

        env::set_var("APPKEY", "");
        assert!(Notifier::from_env(Client::new()).is_none());
        env::remove_var("APPKEY");
    }
}
