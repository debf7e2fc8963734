// Demo runner for the site import scheduler.
//
// Seeds an in-memory catalog, catalogs pages for a few sites, lets the
// single worker drain them and shuts down. Pass a JSON SchedulerConfig
// path as the first argument to override defaults; RUST_LOG controls
// verbosity.

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use kodegen_tools_site_import::utils::DEFAULT_USER_AGENT;
use kodegen_tools_site_import::{
    CallerContext, Collaborators, ImportError, ImportEvent, ImportEventBus, ImportRequest,
    ImportScheduler, InMemoryCatalog, LinkRecord, PageImporter, SchedulerConfig, SiteId,
    SystemConfig,
};
use std::sync::Arc;
use std::time::Duration;

struct LoggingImporter;

impl PageImporter for LoggingImporter {
    fn import_page<'a>(
        &'a self,
        request: &'a ImportRequest,
    ) -> BoxFuture<'a, Result<(), ImportError>> {
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;

            let link = format!("https://{}/pages/{}#top", request.site, request.page_id);
            if !request.is_link_recorded(&link) {
                request.record_link(&link, LinkRecord::new(&link, Some(request.page_id)));
            }

            // Every 7th page fails to show the drop path
            if request.page_id % 7 == 0 {
                return Err(ImportError::Failed(format!(
                    "page {} rejected by transformer",
                    request.page_id
                )));
            }

            log::info!(
                "Imported {}/{} as {}",
                request.site,
                request.page_id,
                request.user_agent
            );
            Ok(())
        })
    }
}

fn load_config() -> Result<SchedulerConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {path}"))?;
            SchedulerConfig::from_json_str(&json)
                .with_context(|| format!("Invalid scheduler config in {path}"))
        }
        None => Ok(SchedulerConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let system = SystemConfig::new(config.import_page_max());

    let catalog = Arc::new(InMemoryCatalog::new());
    catalog.set_site("docs.example.com", vec![3, 1, 2], vec![]);

    let bus = ImportEventBus::new(config.event_bus_capacity());
    let collaborators = Collaborators::new(Arc::new(LoggingImporter), catalog.clone());
    let scheduler = ImportScheduler::new(collaborators, config, system, &bus);

    bus.publish(ImportEvent::server_initialized())?;

    let context = CallerContext::for_principal("demo");
    for (site, ids) in [
        ("docs.example.com", vec![10, 4, 7]),
        ("blog.example.com", vec![21, 14, 30]),
        ("wiki.example.com", vec![5, 6]),
    ] {
        let added = scheduler
            .add_cataloged_page_ids(&SiteId::new(site), DEFAULT_USER_AGENT, context.clone(), &ids)
            .await?;
        log::info!("Cataloged {added} pages for {site}");
    }

    let drained = tokio::time::timeout(Duration::from_secs(30), async {
        while scheduler.has_outstanding_work() {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await;
    if drained.is_err() {
        log::warn!("Timed out waiting for imports to drain");
    }

    for site in scheduler.cached_sites() {
        if let Some(snapshot) = scheduler.site_snapshot(&site) {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }
    log::info!("Metrics: {:?}", scheduler.metrics().snapshot());

    bus.publish(ImportEvent::server_shutdown())?;
    tokio::time::sleep(Duration::from_millis(100)).await;
    bus.shutdown();
    Ok(())
}
