use crate::config::Config;
use crate::models::{CurrentStore, Snapshot};
use crate::{clock, extract, fetch, notify, store};
use reqwest::Client;
use tracing::{error, info, warn};

/// Fetch every configured page in order and merge the per-page mappings.
pub async fn collect_rates(client: &Client, config: &Config) -> Snapshot {
    let mut combined = Snapshot::new();
    for url in &config.source_urls {
        let page = match fetch::fetch_page(client, url).await {
            Ok(page) => page,
            Err(e) => {
                warn!("fetch {url} failed: {e}");
                continue;
            }
        };
        match extract::extract_rates(&page, &config.target_currencies) {
            Ok(rates) => {
                info!("{url}: matched {} target currencies", rates.len());
                merge_page(&mut combined, rates);
            }
            Err(e) => warn!("no usable quote table at {url}: {e}"),
        }
    }
    combined
}

/// Later pages win on duplicate currencies.
fn merge_page(combined: &mut Snapshot, page: Snapshot) {
    combined.extend(page);
}

/// One current-rates run: scrape, replace the snapshot store, notify.
pub async fn run_current(config: &Config) {
    let client = Client::new();
    let snapshot = collect_rates(&client, config).await;
    if snapshot.is_empty() {
        info!("no rate data obtained");
        return;
    }
    for (currency, record) in &snapshot {
        info!("{currency}: {}", record.rate);
    }

    // Surfaces a corrupt store before it gets replaced.
    if let Err(e) = store::load_current(&config.store_path) {
        warn!("existing store {} is unreadable: {e}", config.store_path);
    }
    let payload = CurrentStore {
        timestamp: clock::timestamp(),
        rates: snapshot.clone(),
    };
    match store::save_current(&config.store_path, &payload) {
        Ok(()) => info!(
            "saved {} currencies to {}",
            payload.rates.len(),
            config.store_path
        ),
        Err(e) => error!("saving {} failed: {e}", config.store_path),
    }

    let Some(notifier) = notify::Notifier::from_env(client) else {
        return;
    };
    notifier
        .alert_thresholds(&snapshot, &config.thresholds)
        .await;
    notifier.send_digest(&snapshot, config.digest_hour).await;
}

/// One history run: scrape, fold the dated quotes into the history store.
/// An unreadable history file aborts the write; the file is left untouched.
pub async fn run_history(config: &Config) {
    let client = Client::new();
    let snapshot = collect_rates(&client, config).await;
    if snapshot.is_empty() {
        info!("no rate data obtained");
        return;
    }

    let mut history = match store::load_history(&config.store_path) {
        Ok(history) => history,
        Err(e) => {
            error!(
                "history store {} is unreadable ({e}), leaving it untouched",
                config.store_path
            );
            return;
        }
    };
    store::merge_history(&mut history, &snapshot);
    match store::save_history(&config.store_path, &history) {
        Ok(()) => info!("history saved to {}", config.store_path),
        Err(e) => error!("saving {} failed: {e}", config.store_path),
    }
}
