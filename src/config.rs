use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// Push-message endpoint; `appkey` and `title` travel as query parameters.
pub const PUSH_ENDPOINT: &str = "https://cx.super4.cn/push_msg";

/// Pause between consecutive alert sends; the endpoint rate-limits bursts.
pub const SEND_SPACING: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source_urls: Vec<String>,
    pub target_currencies: Vec<String>,
    /// Currency → cutoff; an alert fires when the scraped rate drops below.
    pub thresholds: BTreeMap<String, f64>,
    /// UTC+8 hour (0–23) in which the digest message fires, if any.
    pub digest_hour: Option<u32>,
    pub store_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_urls: vec![
                "https://www.boc.cn/sourcedb/whpj/index_1.html".to_string(),
                "https://www.boc.cn/sourcedb/whpj/index.html".to_string(),
            ],
            target_currencies: vec![
                "新加坡元".to_string(),
                "美元".to_string(),
                "欧元".to_string(),
                "英镑".to_string(),
                "日元".to_string(),
                "韩元".to_string(),
            ],
            thresholds: BTreeMap::new(),
            digest_hour: None,
            store_path: "current_rates.json".to_string(),
        }
    }
}

impl Config {
    /// Defaults for the history variant: every paginated listing page,
    /// merged into a dedicated store. The site labels the won 韩国元 on
    /// these pages.
    pub fn history_default() -> Self {
        let mut source_urls: Vec<String> = (1..=9)
            .map(|i| format!("https://www.boc.cn/sourcedb/whpj/index_{i}.html"))
            .collect();
        source_urls.push("https://www.boc.cn/sourcedb/whpj/index.html".to_string());
        Self {
            source_urls,
            target_currencies: vec![
                "新加坡元".to_string(),
                "美元".to_string(),
                "欧元".to_string(),
                "英镑".to_string(),
                "日元".to_string(),
                "韩国元".to_string(),
            ],
            store_path: "history_rates.json".to_string(),
            ..Self::default()
        }
    }

    /// Read configuration from `path`, falling back to the mode's defaults
    /// when the file is absent or unreadable.
    pub fn load_or_default(path: &str, history: bool) -> Self {
        let fallback = if history {
            Self::history_default()
        } else {
            Self::default()
        };
        if !Path::new(path).exists() {
            return fallback;
        }
        match Self::read(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("config file {path} is unreadable ({e}), using defaults");
                fallback
            }
        }
    }

    fn read(path: &str) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
