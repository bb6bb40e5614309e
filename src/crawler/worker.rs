//! Worker tasks
//!
//! A worker is a tokio task that owns nothing but its command receiver and
//! shared handles to the fetcher and extractor. It runs one
//! fetch → extract → same-host filter per `Crawl` command, reports the
//! outcome, then waits for the coordinator to tell it what to do next.

use crate::crawler::fetcher::{FetchError, Fetcher};
use crate::crawler::parser::LinkExtractor;
use crate::url::filter_same_host;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Identity of a worker, unique for the lifetime of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerId(pub u64);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of one completed crawl task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlResult {
    /// Worker that performed the task
    pub worker_id: WorkerId,

    /// URL that was fetched
    pub source_url: String,

    /// Same-host hrefs found on the page, in document order
    pub discovered_links: Vec<String>,
}

/// Instructions sent from the coordinator to a single worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerCommand {
    /// Fetch and extract this URL
    Crawl(String),
    /// Release resources and exit
    Stop,
}

/// Messages sent from workers to the coordinator
#[derive(Debug)]
pub enum WorkerEvent {
    /// The assigned page was fetched and its links extracted
    Completed(CrawlResult),

    /// The assigned page could not be fetched
    Failed {
        worker_id: WorkerId,
        url: String,
        error: FetchError,
    },

    /// The worker task ended without being told to stop
    Crashed { worker_id: WorkerId },
}

/// Everything a worker needs besides its channels
pub(crate) struct WorkerContext<F, E> {
    pub fetcher: Arc<F>,
    pub extractor: Arc<E>,
    pub host: Arc<str>,
}

impl<F, E> Clone for WorkerContext<F, E> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            extractor: Arc::clone(&self.extractor),
            host: Arc::clone(&self.host),
        }
    }
}

/// Reports `Crashed` to the coordinator if dropped while still armed
///
/// Dropped during unwinding when the worker task panics, which is the only
/// way a worker can exit without first seeing `Stop` or a closed channel.
struct CrashGuard {
    worker_id: WorkerId,
    events: UnboundedSender<WorkerEvent>,
    armed: bool,
}

impl CrashGuard {
    fn new(worker_id: WorkerId, events: UnboundedSender<WorkerEvent>) -> Self {
        Self {
            worker_id,
            events,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for CrashGuard {
    fn drop(&mut self) {
        if self.armed {
            let _ = self.events.send(WorkerEvent::Crashed {
                worker_id: self.worker_id,
            });
        }
    }
}

/// Fetches one page and returns its same-host links
pub async fn crawl_page<F, E>(
    fetcher: &F,
    extractor: &E,
    url: &str,
    host: &str,
) -> Result<Vec<String>, FetchError>
where
    F: Fetcher,
    E: LinkExtractor,
{
    let content = fetcher.fetch(url).await?;
    let links = extractor.extract_links(&content);
    Ok(filter_same_host(links, host))
}

/// Worker main loop
pub(crate) async fn run_worker<F, E>(
    worker_id: WorkerId,
    mut commands: UnboundedReceiver<WorkerCommand>,
    events: UnboundedSender<WorkerEvent>,
    context: WorkerContext<F, E>,
) where
    F: Fetcher,
    E: LinkExtractor,
{
    let mut guard = CrashGuard::new(worker_id, events.clone());
    tracing::trace!("Worker {} started", worker_id);

    while let Some(command) = commands.recv().await {
        let url = match command {
            WorkerCommand::Crawl(url) => url,
            WorkerCommand::Stop => break,
        };

        tracing::debug!("Worker {} crawling {}", worker_id, url);
        let event = match crawl_page(&*context.fetcher, &*context.extractor, &url, &context.host)
            .await
        {
            Ok(discovered_links) => WorkerEvent::Completed(CrawlResult {
                worker_id,
                source_url: url,
                discovered_links,
            }),
            Err(error) => WorkerEvent::Failed {
                worker_id,
                url,
                error,
            },
        };

        if events.send(event).is_err() {
            // Coordinator is gone; nobody is left to give instructions
            break;
        }
    }

    guard.disarm();
    tracing::trace!("Worker {} exiting", worker_id);
}
