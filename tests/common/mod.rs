//! Test doubles and helpers shared by the scheduler test suite

use futures::future::BoxFuture;
use kodegen_tools_site_import::{
    CallerContext, Collaborators, ImportError, ImportEventBus, ImportRequest, ImportScheduler,
    InMemoryCatalog, IndexingHook, PageId, PageImporter, SchedulerConfig, SiteId, SystemConfig,
};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Semaphore;

pub const UA: &str = "test-agent/1.0";

/// One recorded importer invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCall {
    pub site: SiteId,
    pub page_id: PageId,
    pub user_agent: String,
    pub principal: Option<String>,
}

/// Importer that records every call and fails on demand
#[derive(Default)]
pub struct RecordingImporter {
    calls: Mutex<Vec<ImportCall>>,
    failing: Mutex<HashSet<PageId>>,
    fatal: Mutex<HashSet<PageId>>,
    gate: Option<Arc<Semaphore>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

#[allow(dead_code)]
impl RecordingImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every import waits for a permit on `gate` before finishing
    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn fail_on(&self, page_id: PageId) {
        self.failing.lock().insert(page_id);
    }

    pub fn fatal_on(&self, page_id: PageId) {
        self.fatal.lock().insert(page_id);
    }

    pub fn calls(&self) -> Vec<ImportCall> {
        self.calls.lock().clone()
    }

    /// Most imports ever running at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn pages_for(&self, site: &SiteId) -> Vec<PageId> {
        self.calls
            .lock()
            .iter()
            .filter(|call| &call.site == site)
            .map(|call| call.page_id)
            .collect()
    }
}

impl PageImporter for RecordingImporter {
    fn import_page<'a>(
        &'a self,
        request: &'a ImportRequest,
    ) -> BoxFuture<'a, Result<(), ImportError>> {
        Box::pin(async move {
            let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
            let result = self.record_and_run(request).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            result
        })
    }
}

impl RecordingImporter {
    async fn record_and_run(&self, request: &ImportRequest) -> Result<(), ImportError> {
        self.calls.lock().push(ImportCall {
            site: request.site.clone(),
            page_id: request.page_id,
            user_agent: request.user_agent.clone(),
            principal: request.context.principal.clone(),
        });

        if let Some(gate) = &self.gate {
            match gate.acquire().await {
                Ok(permit) => permit.forget(),
                Err(_) => return Err(ImportError::Failed("gate closed".to_string())),
            }
        }

        if self.fatal.lock().contains(&request.page_id) {
            return Err(ImportError::Fatal(format!(
                "page {} is poison",
                request.page_id
            )));
        }
        if self.failing.lock().contains(&request.page_id) {
            return Err(ImportError::Failed(format!(
                "page {} is broken",
                request.page_id
            )));
        }
        Ok(())
    }
}

/// Indexing hook that counts pause/resume calls
#[derive(Default)]
pub struct CountingIndexingHook {
    pauses: AtomicUsize,
    resumes: AtomicUsize,
}

#[allow(dead_code)]
impl CountingIndexingHook {
    pub fn pauses(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }

    pub fn resumes(&self) -> usize {
        self.resumes.load(Ordering::SeqCst)
    }
}

impl IndexingHook for CountingIndexingHook {
    fn pause_indexing(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }

    fn resume_indexing(&self) {
        self.resumes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Everything a scheduler test needs, wired together
#[allow(dead_code)]
pub struct Harness {
    pub scheduler: ImportScheduler,
    pub importer: Arc<RecordingImporter>,
    pub catalog: Arc<InMemoryCatalog>,
    pub system: SystemConfig,
    pub bus: ImportEventBus,
    pub indexing: Arc<CountingIndexingHook>,
}

#[allow(dead_code)]
impl Harness {
    pub fn new() -> Self {
        Self::with_importer(RecordingImporter::new(), -1)
    }

    pub fn with_cap(import_page_max: i64) -> Self {
        Self::with_importer(RecordingImporter::new(), import_page_max)
    }

    pub fn with_importer(importer: RecordingImporter, import_page_max: i64) -> Self {
        let importer = Arc::new(importer);
        let catalog = Arc::new(InMemoryCatalog::new());
        let indexing = Arc::new(CountingIndexingHook::default());
        let system = SystemConfig::new(import_page_max);
        let config = SchedulerConfig::default()
            .with_import_page_max(import_page_max)
            .with_idle_wait(Duration::from_millis(50));
        let bus = ImportEventBus::new(config.event_bus_capacity());

        let collaborators = Collaborators::new(importer.clone(), catalog.clone())
            .with_indexing_hook(indexing.clone());
        let scheduler = ImportScheduler::new(collaborators, config, system.clone(), &bus);

        Self {
            scheduler,
            importer,
            catalog,
            system,
            bus,
            indexing,
        }
    }

    pub async fn catalog_pages(&self, site: &str, ids: &[PageId]) -> usize {
        let context = CallerContext::for_principal("tester");
        match self
            .scheduler
            .add_cataloged_page_ids(&SiteId::new(site), UA, context, ids)
            .await
        {
            Ok(added) => added,
            Err(e) => panic!("cataloging pages for {site} failed: {e}"),
        }
    }

    pub fn imported(&self, site: &str) -> Vec<PageId> {
        self.scheduler
            .site_snapshot(&SiteId::new(site))
            .map(|snapshot| snapshot.imported)
            .unwrap_or_default()
    }
}

/// Poll `condition` every 10ms until it holds or `limit` elapses
#[allow(dead_code)]
pub async fn wait_until<F>(limit: Duration, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    tokio::time::timeout(limit, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .is_ok()
}

/// Await a future with a generous timeout, panicking if it hangs
#[allow(dead_code)]
pub async fn bounded<T>(future: impl Future<Output = T>) -> T {
    match tokio::time::timeout(Duration::from_secs(5), future).await {
        Ok(value) => value,
        Err(_) => panic!("operation timed out"),
    }
}
