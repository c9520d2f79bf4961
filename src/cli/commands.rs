use std::rc::Rc;
use std::time::Duration;

use crate::actions::SubmitOutcome;
use crate::app::{App, AppError, Result};
use crate::cli::Commands;
use crate::config::{format_interval, Config};
use crate::poller::{PollHandle, PollSettings};
use crate::validate::validate_feed_url;
use crate::view::{bind_view, ConsoleView};

/// How many items `check` lists before summarizing the rest.
const CHECK_PREVIEW: usize = 10;

pub async fn dispatch(command: Commands, config: Config) -> Result<()> {
    let app = Rc::new(App::new(&config)?);
    let settings = PollSettings::from(&config.poll);

    match command {
        Commands::Tui { urls } => crate::tui::run(app, &config, settings, urls).await,
        Commands::Watch { urls, ticks } => watch(app, settings, &urls, ticks).await,
        Commands::Check { url } => check(&app, &url).await,
    }
}

pub async fn watch(
    app: Rc<App>,
    settings: PollSettings,
    urls: &[String],
    ticks: Option<u64>,
) -> Result<()> {
    let view = Rc::new(ConsoleView::stdout(app.locale));
    let subscriptions = bind_view(&app.store, view);

    let mut added = 0;
    for url in urls {
        if let SubmitOutcome::Added { .. } = app.submit(url).await {
            added += 1;
        }
    }

    if added == 0 {
        for id in subscriptions {
            app.store.unsubscribe(id);
        }
        return Err(AppError::Other("No feeds could be added".to_string()));
    }

    println!(
        "Watching {} feed(s), polling every {}",
        added,
        format_interval(settings.interval)
    );

    let handle = app.start_polling(settings);
    tokio::select! {
        _ = wait_for_ticks(&handle, ticks) => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            }
        }
    }
    handle.shutdown().await;

    for id in subscriptions {
        app.store.unsubscribe(id);
    }
    Ok(())
}

/// Resolves after `ticks` completed ticks, or never when unbounded.
async fn wait_for_ticks(handle: &PollHandle, ticks: Option<u64>) {
    let Some(ticks) = ticks else {
        return std::future::pending().await;
    };
    while handle.completed_ticks() < ticks {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}

pub async fn check(app: &App, raw_url: &str) -> Result<()> {
    let url = validate_feed_url(raw_url, &[])
        .map_err(|e| AppError::Other(app.locale.text(e.message_key()).to_string()))?;

    let parsed = app
        .fetcher
        .fetch_one(url, &app.normalizer)
        .await
        .map_err(|e| {
            let kind = e.failure_kind();
            tracing::debug!(url, error = %e, "Check failed");
            AppError::Other(app.locale.text(kind.message_key()).to_string())
        })?;

    println!("{}", parsed.title.as_deref().unwrap_or(url));
    if let Some(description) = parsed.description.as_deref().filter(|d| !d.is_empty()) {
        println!("  {}", description);
    }
    println!("{} item(s)", parsed.items.len());

    for item in parsed.items.iter().take(CHECK_PREVIEW) {
        let date = item
            .published_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        println!("  {} {}", date, item.title);
    }
    if parsed.items.len() > CHECK_PREVIEW {
        println!("  ... and {} more", parsed.items.len() - CHECK_PREVIEW);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::task::LocalSet;

    use super::*;
    use crate::testing::{rss_document, ScriptedFetcher};

    #[tokio::test]
    async fn test_check_rejects_invalid_url() {
        let app = App::in_memory(Arc::new(ScriptedFetcher::new()));
        let err = check(&app, "not a url").await.unwrap_err();
        assert_eq!(err.to_string(), "The link must be a valid URL");
    }

    #[tokio::test]
    async fn test_check_does_not_subscribe() {
        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.respond("https://example.com/rss", &rss_document("Ex", &[("1", "One")]));
        let app = App::in_memory(fetcher.clone());

        check(&app, "https://example.com/rss").await.unwrap();

        assert!(app.store.read(|s| s.feeds.is_empty()));
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_check_reports_parse_failure() {
        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.respond("https://example.com/rss", "<html></html>");
        let app = App::in_memory(fetcher);

        let err = check(&app, "https://example.com/rss").await.unwrap_err();
        assert_eq!(err.to_string(), "Resource does not contain valid RSS");
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_stops_after_ticks() {
        LocalSet::new()
            .run_until(async {
                let fetcher = Arc::new(ScriptedFetcher::new());
                fetcher.respond("https://example.com/rss", &rss_document("Ex", &[("1", "One")]));
                let app = Rc::new(App::in_memory(fetcher.clone()));
                let settings = PollSettings {
                    interval: Duration::from_secs(5),
                    poll_on_start: false,
                };

                watch(app.clone(), settings, &["https://example.com/rss".to_string()], Some(2))
                    .await
                    .unwrap();

                // One fetch to subscribe, one per tick.
                assert_eq!(fetcher.calls(), 3);
                assert_eq!(app.store.read(|s| s.feeds.len()), 1);
            })
            .await;
    }

    #[tokio::test]
    async fn test_watch_fails_without_feeds() {
        LocalSet::new()
            .run_until(async {
                let app = Rc::new(App::in_memory(Arc::new(ScriptedFetcher::new())));
                let result = watch(
                    app,
                    PollSettings::default(),
                    &["https://example.com/rss".to_string()],
                    Some(1),
                )
                .await;
                assert!(result.is_err());
            })
            .await;
    }
}
