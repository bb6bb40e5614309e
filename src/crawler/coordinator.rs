//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator is a single-threaded, message-driven loop. It alone owns
//! the frontier, the visited set and pool membership; workers only ever see
//! the URL they were handed. For every event it:
//! - Marks the reported page visited and merges its links into the frontier
//! - Reassigns the reporting worker, or retires it when the frontier is empty
//! - Spawns at most one extra worker if backlog and pool headroom allow
//!
//! The crawl ends at quiescence: empty frontier and no active workers.

use crate::config::{CrawlerConfig, FetchErrorPolicy};
use crate::crawler::fetcher::{FetchError, Fetcher};
use crate::crawler::frontier::{Frontier, VisitedSet};
use crate::crawler::parser::LinkExtractor;
use crate::crawler::pool::WorkerPool;
use crate::crawler::worker::{CrawlResult, WorkerEvent, WorkerId};
use crate::output::{CrawlReporter, CrawlStats, CrawlSummary, FailedPage};
use crate::url::Seed;
use crate::{Result, StrandError};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Main crawler coordinator structure
pub struct Coordinator<F, E> {
    seed: Seed,
    policy: FetchErrorPolicy,
    frontier: Frontier,
    visited: VisitedSet,
    failed: Vec<FailedPage>,
    failed_urls: HashSet<String>,
    pool: WorkerPool<F, E>,
    events: UnboundedReceiver<WorkerEvent>,
    links_discovered: usize,
}

impl<F, E> Coordinator<F, E>
where
    F: Fetcher,
    E: LinkExtractor,
{
    /// Creates a coordinator for a crawl rooted at `seed`
    ///
    /// # Arguments
    ///
    /// * `seed` - Validated seed; its host bounds the crawl
    /// * `config` - Crawler settings (worker limit, fetch-error policy)
    /// * `fetcher` - Page fetcher shared by all workers
    /// * `extractor` - Link extractor shared by all workers
    pub fn new(seed: Seed, config: &CrawlerConfig, fetcher: F, extractor: E) -> Self {
        let (events_tx, events) = mpsc::unbounded_channel();
        let pool = WorkerPool::new(
            config.max_workers,
            Arc::new(fetcher),
            Arc::new(extractor),
            seed.host(),
            events_tx,
        );

        Self {
            seed,
            policy: config.on_fetch_error,
            frontier: Frontier::new(),
            visited: VisitedSet::new(),
            failed: Vec::new(),
            failed_urls: HashSet::new(),
            pool,
            events,
            links_discovered: 0,
        }
    }

    /// Runs the crawl to quiescence
    ///
    /// Every completed page and every failure is passed to `reporter` as soon
    /// as the coordinator accepts it, in worker-completion order.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSummary)` - No work pending and every worker retired
    /// * `Err(StrandError)` - A fatal error stopped the crawl; all workers
    ///   have been shut down
    pub async fn run(mut self, reporter: &mut dyn CrawlReporter) -> Result<CrawlSummary> {
        let start_time = Instant::now();
        tracing::info!(
            "Starting crawler for {} (up to {} workers)",
            self.seed,
            self.pool.max_workers()
        );

        if let Err(e) = self.crawl_loop(reporter).await {
            let stopped = self.pool.shutdown();
            tracing::error!("Crawl aborted, stopped {} workers: {}", stopped, e);
            return Err(e);
        }

        let summary = CrawlSummary {
            seed: self.seed.to_string(),
            stats: CrawlStats {
                pages_visited: self.visited.len(),
                links_discovered: self.links_discovered,
                pages_failed: self.failed.len(),
                workers_spawned: self.pool.spawned_count(),
                peak_workers: self.pool.peak_count(),
                elapsed: start_time.elapsed(),
            },
            visited: self.visited.into_vec(),
            failed: self.failed,
        };

        tracing::info!(
            "Crawl completed: {} pages visited, {} failed in {:?}",
            summary.stats.pages_visited,
            summary.stats.pages_failed,
            summary.stats.elapsed
        );

        reporter.finish(&summary)?;
        Ok(summary)
    }

    async fn crawl_loop(&mut self, reporter: &mut dyn CrawlReporter) -> Result<()> {
        self.pool.spawn(self.seed.to_string())?;
        self.process_events(reporter).await
    }

    async fn process_events(&mut self, reporter: &mut dyn CrawlReporter) -> Result<()> {
        while self.pool.active_count() > 0 {
            // The pool holds a sender for as long as it exists, so the
            // channel cannot close while workers are active.
            let Some(event) = self.events.recv().await else {
                break;
            };
            self.handle_event(event, reporter)?;
        }

        debug_assert!(self.frontier.is_empty(), "quiescent with pending work");
        Ok(())
    }

    fn handle_event(&mut self, event: WorkerEvent, reporter: &mut dyn CrawlReporter) -> Result<()> {
        match event {
            WorkerEvent::Completed(result) => self.handle_result(result, reporter),
            WorkerEvent::Failed {
                worker_id,
                url,
                error,
            } => self.handle_failure(worker_id, url, error, reporter),
            WorkerEvent::Crashed { worker_id } => self.handle_crash(worker_id, reporter),
        }
    }

    fn handle_result(&mut self, result: CrawlResult, reporter: &mut dyn CrawlReporter) -> Result<()> {
        let worker_id = result.worker_id;
        self.pool.record_report(worker_id)?;

        if !self.visited.mark(&result.source_url) {
            tracing::warn!("{} reported twice", result.source_url);
        }
        reporter.record_page(&result)?;

        let mut queued = 0;
        for link in &result.discovered_links {
            if self.offer(link) {
                queued += 1;
            }
        }
        self.links_discovered += result.discovered_links.len();

        tracing::debug!(
            "Worker {} finished {}: {} links, {} new, frontier {}",
            worker_id,
            result.source_url,
            result.discovered_links.len(),
            queued,
            self.frontier.len()
        );

        self.dispatch(worker_id, reporter)?;
        self.maybe_spawn()
    }

    fn handle_failure(
        &mut self,
        worker_id: WorkerId,
        url: String,
        error: FetchError,
        reporter: &mut dyn CrawlReporter,
    ) -> Result<()> {
        self.pool.record_report(worker_id)?;
        tracing::warn!("Worker {} failed to fetch {}: {}", worker_id, url, error);

        self.record_failure(url.clone(), error.to_string(), reporter)?;
        if self.policy == FetchErrorPolicy::Abort {
            return Err(StrandError::Fetch { url, source: error });
        }

        self.dispatch(worker_id, reporter)?;
        self.maybe_spawn()
    }

    fn handle_crash(&mut self, worker_id: WorkerId, reporter: &mut dyn CrawlReporter) -> Result<()> {
        if !self.drop_lost_worker(worker_id, reporter)? {
            return Ok(());
        }

        // Replace the lost worker if there is still work for it
        self.maybe_spawn()
    }

    /// Removes a worker that exited on its own, failing the URL it held
    ///
    /// Returns false if the worker had already left the pool.
    fn drop_lost_worker(
        &mut self,
        worker_id: WorkerId,
        reporter: &mut dyn CrawlReporter,
    ) -> Result<bool> {
        let held = match self.pool.remove_crashed(worker_id) {
            Ok(held) => held,
            Err(StrandError::UnknownWorker(_)) => {
                tracing::debug!("Ignoring crash report from retired worker {}", worker_id);
                return Ok(false);
            }
            Err(e) => return Err(e),
        };
        tracing::error!("Worker {} exited unexpectedly", worker_id);

        if let Some(url) = held {
            self.record_failure(url.clone(), "worker exited unexpectedly".to_string(), reporter)?;
            if self.policy == FetchErrorPolicy::Abort {
                return Err(StrandError::WorkerCrashed { url });
            }
        }
        Ok(true)
    }

    /// Queues a discovered link unless it is visited, queued, in flight or failed
    fn offer(&mut self, link: &str) -> bool {
        if self.failed_urls.contains(link) || self.pool.is_in_flight(link) {
            return false;
        }
        self.frontier.enqueue(link.to_string(), &self.visited)
    }

    /// Gives a reported worker its next URL, or retires it
    ///
    /// A worker that went away is dropped without a replacement; the caller's
    /// `maybe_spawn` picks its URL back up from the frontier.
    fn dispatch(&mut self, worker_id: WorkerId, reporter: &mut dyn CrawlReporter) -> Result<()> {
        let Some(url) = self.frontier.dequeue() else {
            return self.pool.retire(worker_id);
        };

        match self.pool.assign(worker_id, url.clone()) {
            Ok(()) => Ok(()),
            Err(StrandError::WorkerGone(_)) => {
                tracing::warn!("Worker {} went away before taking {}", worker_id, url);
                self.frontier.enqueue(url, &self.visited);
                self.drop_lost_worker(worker_id, reporter)?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Spawns one worker for the next frontier URL if the pool has headroom
    fn maybe_spawn(&mut self) -> Result<()> {
        if self.frontier.is_empty() || !self.pool.has_capacity() {
            return Ok(());
        }

        if let Some(url) = self.frontier.dequeue() {
            self.pool.spawn(url)?;
        }
        Ok(())
    }

    fn record_failure(
        &mut self,
        url: String,
        reason: String,
        reporter: &mut dyn CrawlReporter,
    ) -> Result<()> {
        let failure = FailedPage { url, reason };
        reporter.record_failure(&failure)?;
        self.failed_urls.insert(failure.url.clone());
        self.failed.push(failure);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemoryReporter;
    use crate::url::validate_seed;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// One page of the in-memory test site
    #[derive(Clone, Default)]
    struct Page {
        links: Vec<String>,
        delay_ms: u64,
        fail: bool,
        panic: bool,
    }

    /// Fetcher over an in-memory site that records every fetch
    ///
    /// Page content is one href per line; `LineExtractor` splits it back.
    #[derive(Default)]
    struct FakeSite {
        pages: HashMap<String, Page>,
        fetches: Mutex<Vec<String>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl FakeSite {
        fn page(mut self, url: &str, links: &[&str]) -> Self {
            self.pages.insert(
                url.to_string(),
                Page {
                    links: links.iter().map(|l| l.to_string()).collect(),
                    ..Page::default()
                },
            );
            self
        }

        fn slow_page(mut self, url: &str, links: &[&str], delay_ms: u64) -> Self {
            self = self.page(url, links);
            if let Some(page) = self.pages.get_mut(url) {
                page.delay_ms = delay_ms;
            }
            self
        }

        fn failing_page(mut self, url: &str) -> Self {
            self.pages.insert(
                url.to_string(),
                Page {
                    fail: true,
                    ..Page::default()
                },
            );
            self
        }

        fn panicking_page(mut self, url: &str) -> Self {
            self.pages.insert(
                url.to_string(),
                Page {
                    panic: true,
                    ..Page::default()
                },
            );
            self
        }
    }

    /// Shares one `FakeSite` between the test and the coordinator
    #[derive(Clone)]
    struct SharedSite(Arc<FakeSite>);

    impl SharedSite {
        fn fetches(&self) -> Vec<String> {
            self.0.fetches.lock().unwrap().clone()
        }

        fn fetch_count(&self, url: &str) -> usize {
            self.fetches().iter().filter(|u| u.as_str() == url).count()
        }

        fn max_in_flight(&self) -> usize {
            self.0.max_in_flight.load(Ordering::SeqCst)
        }
    }

    impl Fetcher for SharedSite {
        fn fetch(
            &self,
            url: &str,
        ) -> impl Future<Output = std::result::Result<String, FetchError>> + Send {
            let site = Arc::clone(&self.0);
            let url = url.to_string();
            async move {
                site.fetches.lock().unwrap().push(url.clone());
                let now = site.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                site.max_in_flight.fetch_max(now, Ordering::SeqCst);

                let page = site.pages.get(&url).cloned();
                if let Some(page) = &page {
                    if page.delay_ms > 0 {
                        tokio::time::sleep(Duration::from_millis(page.delay_ms)).await;
                    } else {
                        tokio::task::yield_now().await;
                    }
                }
                site.in_flight.fetch_sub(1, Ordering::SeqCst);

                match page {
                    Some(page) if page.panic => panic!("simulated worker crash on {}", url),
                    Some(page) if page.fail => Err(FetchError::Status { status: 500 }),
                    Some(page) => Ok(page.links.join("\n")),
                    None => Err(FetchError::Status { status: 404 }),
                }
            }
        }
    }

    struct LineExtractor;

    impl LinkExtractor for LineExtractor {
        fn extract_links(&self, content: &str) -> Vec<String> {
            content
                .lines()
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        }
    }

    fn config(max_workers: usize, policy: FetchErrorPolicy) -> CrawlerConfig {
        CrawlerConfig {
            max_workers,
            on_fetch_error: policy,
            ..CrawlerConfig::default()
        }
    }

    fn create_coordinator(
        site: FakeSite,
        seed: &str,
        max_workers: usize,
        policy: FetchErrorPolicy,
    ) -> (Coordinator<SharedSite, LineExtractor>, SharedSite) {
        let shared = SharedSite(Arc::new(site));
        let coordinator = Coordinator::new(
            validate_seed(seed).unwrap(),
            &config(max_workers, policy),
            shared.clone(),
            LineExtractor,
        );
        (coordinator, shared)
    }

    async fn run_crawl(
        site: FakeSite,
        seed: &str,
        max_workers: usize,
        policy: FetchErrorPolicy,
    ) -> (Result<CrawlSummary>, SharedSite, MemoryReporter) {
        let (coordinator, shared) = create_coordinator(site, seed, max_workers, policy);

        let mut reporter = MemoryReporter::default();
        let result = coordinator.run(&mut reporter).await;
        (result, shared, reporter)
    }

    fn sorted(mut urls: Vec<String>) -> Vec<String> {
        urls.sort();
        urls
    }

    #[tokio::test]
    async fn test_single_page_site() {
        let site = FakeSite::default().page("http://example.com/", &[]);

        let (result, shared, reporter) =
            run_crawl(site, "http://example.com/", 1, FetchErrorPolicy::Abort).await;
        let summary = result.unwrap();

        assert_eq!(summary.visited, vec!["http://example.com/"]);
        assert_eq!(summary.stats.workers_spawned, 1);
        assert_eq!(shared.fetches(), vec!["http://example.com/"]);
        assert!(reporter.finished);
    }

    #[tokio::test]
    async fn test_scenario_two_workers() {
        let site = FakeSite::default()
            .page(
                "http://example.com/",
                &[
                    "http://example.com/a",
                    "http://example.com/b",
                    "http://other.com/c",
                ],
            )
            .page(
                "http://example.com/a",
                &["http://example.com/", "http://example.com/c2"],
            )
            .page("http://example.com/b", &[])
            .page("http://example.com/c2", &[]);

        let (result, shared, _) =
            run_crawl(site, "http://example.com/", 2, FetchErrorPolicy::Abort).await;
        let summary = result.unwrap();

        assert_eq!(
            sorted(summary.visited.clone()),
            vec![
                "http://example.com/",
                "http://example.com/a",
                "http://example.com/b",
                "http://example.com/c2",
            ]
        );
        assert_eq!(shared.fetch_count("http://other.com/c"), 0);
        assert_eq!(shared.fetch_count("http://example.com/"), 1);
        assert!(summary.failed.is_empty());
        assert!(summary.stats.peak_workers <= 2);
    }

    #[tokio::test]
    async fn test_frontier_is_last_in_first_out() {
        let site = FakeSite::default()
            .page(
                "http://example.com/",
                &[
                    "http://example.com/1",
                    "http://example.com/2",
                    "http://example.com/3",
                ],
            )
            .page("http://example.com/1", &[])
            .page("http://example.com/2", &[])
            .page("http://example.com/3", &[]);

        let (result, shared, _) =
            run_crawl(site, "http://example.com/", 1, FetchErrorPolicy::Abort).await;
        result.unwrap();

        // A single worker makes the order deterministic
        assert_eq!(
            shared.fetches(),
            vec![
                "http://example.com/",
                "http://example.com/3",
                "http://example.com/2",
                "http://example.com/1",
            ]
        );
    }

    #[tokio::test]
    async fn test_reporter_sees_pages_in_completion_order() {
        let site = FakeSite::default()
            .page(
                "http://example.com/",
                &["http://example.com/slow", "http://example.com/fast"],
            )
            .slow_page("http://example.com/slow", &[], 100)
            .page("http://example.com/fast", &[]);

        let (result, _, reporter) =
            run_crawl(site, "http://example.com/", 2, FetchErrorPolicy::Abort).await;
        let summary = result.unwrap();

        let order: Vec<_> = reporter.pages.iter().map(|p| p.source_url.clone()).collect();
        assert_eq!(
            order,
            vec![
                "http://example.com/",
                "http://example.com/fast",
                "http://example.com/slow",
            ]
        );
        assert_eq!(summary.visited, order);
    }

    #[tokio::test]
    async fn test_no_premature_termination_while_worker_in_flight() {
        // After "/", worker 1 takes "/fast" and worker 2 is spawned for
        // "/slow". "/fast" reports with an empty frontier and its worker is
        // retired while "/slow" is still fetching. Ending the crawl at that
        // point would lose "/late", which only "/slow" links to.
        let site = FakeSite::default()
            .page(
                "http://example.com/",
                &["http://example.com/slow", "http://example.com/fast"],
            )
            .slow_page("http://example.com/slow", &["http://example.com/late"], 150)
            .page("http://example.com/fast", &[])
            .page("http://example.com/late", &[]);

        let (result, shared, reporter) =
            run_crawl(site, "http://example.com/", 2, FetchErrorPolicy::Abort).await;
        let summary = result.unwrap();

        assert_eq!(shared.fetch_count("http://example.com/late"), 1);
        assert_eq!(
            summary.visited.last().map(String::as_str),
            Some("http://example.com/late")
        );
        assert_eq!(summary.stats.pages_visited, 4);
        assert!(reporter.finished);
    }

    #[tokio::test]
    async fn test_concurrency_bound_and_no_duplicate_fetches() {
        // Every page links to every other page, so each link is discovered
        // many times while other workers are fetching it.
        let urls: Vec<String> = (0..20)
            .map(|i| format!("http://example.com/{}", i))
            .collect();
        let links: Vec<&str> = urls.iter().map(String::as_str).collect();

        let mut site = FakeSite::default().page("http://example.com/", &links);
        for url in &urls {
            site = site.slow_page(url, &links, 5);
        }

        let (result, shared, _) =
            run_crawl(site, "http://example.com/", 3, FetchErrorPolicy::Abort).await;
        let summary = result.unwrap();

        assert_eq!(summary.stats.pages_visited, 21);
        assert!(shared.max_in_flight() <= 3);
        assert!(summary.stats.peak_workers <= 3);
        assert_eq!(summary.stats.peak_workers, 3);

        for url in &urls {
            assert_eq!(shared.fetch_count(url), 1, "{} fetched more than once", url);
        }
        assert_eq!(shared.fetches().len(), 21);
    }

    #[tokio::test]
    async fn test_pool_grows_one_worker_per_result() {
        let site = FakeSite::default()
            .page(
                "http://example.com/",
                &[
                    "http://example.com/a",
                    "http://example.com/b",
                    "http://example.com/c",
                ],
            )
            .slow_page("http://example.com/a", &[], 50)
            .slow_page("http://example.com/b", &[], 50)
            .slow_page("http://example.com/c", &[], 50);

        let (result, _, _) =
            run_crawl(site, "http://example.com/", 8, FetchErrorPolicy::Abort).await;
        let summary = result.unwrap();

        // One result from "/" allows one reassignment plus one spawn
        assert_eq!(summary.stats.peak_workers, 2);
        assert_eq!(summary.stats.pages_visited, 4);
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_by_default() {
        let site = FakeSite::default()
            .page("http://example.com/", &["http://example.com/broken"])
            .failing_page("http://example.com/broken");

        let (result, _, reporter) =
            run_crawl(site, "http://example.com/", 1, FetchErrorPolicy::Abort).await;

        match result {
            Err(StrandError::Fetch { url, source }) => {
                assert_eq!(url, "http://example.com/broken");
                assert!(matches!(source, FetchError::Status { status: 500 }));
            }
            other => panic!("expected fetch error, got {:?}", other.map(|s| s.visited)),
        }
        assert_eq!(reporter.failures.len(), 1);
        assert!(!reporter.finished);
    }

    #[tokio::test]
    async fn test_fetch_failure_continue_policy() {
        let site = FakeSite::default()
            .page(
                "http://example.com/",
                &["http://example.com/ok", "http://example.com/broken"],
            )
            .failing_page("http://example.com/broken")
            .page("http://example.com/ok", &["http://example.com/broken"]);

        let (result, shared, reporter) =
            run_crawl(site, "http://example.com/", 1, FetchErrorPolicy::Continue).await;
        let summary = result.unwrap();

        assert_eq!(
            sorted(summary.visited.clone()),
            vec!["http://example.com/", "http://example.com/ok"]
        );
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].url, "http://example.com/broken");
        assert_eq!(summary.failed[0].reason, "HTTP 500");
        assert_eq!(reporter.failures, summary.failed);

        // A failed page is reported once and never retried
        assert_eq!(shared.fetch_count("http://example.com/broken"), 1);
    }

    #[tokio::test]
    async fn test_failed_seed_with_continue_policy_terminates() {
        let site = FakeSite::default().failing_page("http://example.com/");

        let (result, _, _) =
            run_crawl(site, "http://example.com/", 4, FetchErrorPolicy::Continue).await;
        let summary = result.unwrap();

        assert!(summary.visited.is_empty());
        assert_eq!(summary.stats.pages_failed, 1);
    }

    #[tokio::test]
    async fn test_worker_crash_is_reported_and_crawl_continues() {
        let site = FakeSite::default()
            .page(
                "http://example.com/",
                &["http://example.com/ok", "http://example.com/boom"],
            )
            .panicking_page("http://example.com/boom")
            .page("http://example.com/ok", &[]);

        let (result, _, reporter) =
            run_crawl(site, "http://example.com/", 1, FetchErrorPolicy::Continue).await;
        let summary = result.unwrap();

        assert_eq!(
            sorted(summary.visited.clone()),
            vec!["http://example.com/", "http://example.com/ok"]
        );
        assert_eq!(reporter.failures.len(), 1);
        assert_eq!(reporter.failures[0].url, "http://example.com/boom");
        // The crashed worker was replaced so "/ok" still got crawled
        assert_eq!(summary.stats.workers_spawned, 2);
    }

    #[tokio::test]
    async fn test_worker_crash_aborts_by_default() {
        let site = FakeSite::default().panicking_page("http://example.com/");

        let (result, _, _) =
            run_crawl(site, "http://example.com/", 1, FetchErrorPolicy::Abort).await;

        assert!(matches!(
            result,
            Err(StrandError::WorkerCrashed { url }) if url == "http://example.com/"
        ));
    }

    #[tokio::test]
    async fn test_seed_is_crawled_as_written() {
        let site = FakeSite::default()
            .page("http://example.com", &["http://example.com/"])
            .page("http://example.com/", &["http://example.com"]);

        let (result, shared, _) =
            run_crawl(site, "http://example.com", 1, FetchErrorPolicy::Abort).await;
        let summary = result.unwrap();

        assert_eq!(summary.seed, "http://example.com");
        assert_eq!(
            summary.visited,
            vec!["http://example.com", "http://example.com/"]
        );
        assert_eq!(shared.fetch_count("http://example.com"), 1);
    }

    #[tokio::test]
    async fn test_vanished_worker_is_replaced_once() {
        let site = FakeSite::default()
            .page(
                "http://example.com/",
                &["http://example.com/a", "http://example.com/b"],
            )
            .page("http://example.com/a", &[])
            .page("http://example.com/b", &[]);
        let (mut coordinator, shared) =
            create_coordinator(site, "http://example.com/", 3, FetchErrorPolicy::Abort);
        let mut reporter = MemoryReporter::default();

        let first = coordinator.pool.spawn("http://example.com/".to_string()).unwrap();
        let event = coordinator.events.recv().await.unwrap();
        assert!(matches!(event, WorkerEvent::Completed(_)));

        // The worker exits after reporting, before it can take "/b"
        coordinator.pool.kill_worker(first).await;
        coordinator.handle_event(event, &mut reporter).unwrap();

        assert_eq!(coordinator.pool.state(first), None);
        assert_eq!(coordinator.pool.spawned_count(), 2);
        assert_eq!(coordinator.pool.active_count(), 1);
        assert_eq!(coordinator.frontier.len(), 1);
        assert!(reporter.failures.is_empty());

        coordinator.process_events(&mut reporter).await.unwrap();

        assert_eq!(
            sorted(coordinator.visited.iter().map(str::to_string).collect()),
            vec![
                "http://example.com/",
                "http://example.com/a",
                "http://example.com/b",
            ]
        );
        assert_eq!(shared.fetch_count("http://example.com/a"), 1);
        assert_eq!(shared.fetch_count("http://example.com/b"), 1);
        assert!(coordinator.frontier.is_empty());
    }
}
