use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use tracing::debug;
use std::sync::Arc;
use tokio::sync::OnceCell;


const FETCH_BUCKETS: [f64; 8] = [0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        debug!("Initializing Metrics ...");
        Metrics::new()}
    ).await
}


#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Token cache metrics
    pub token_cache_hits: IntCounter,
    pub token_cache_misses: IntCounter,
    pub token_cache_purges: IntCounter,

    // Authorization endpoint; failures labelled by reason ("transport" | "status" | "parse")
    pub token_fetch_requests: IntCounter,
    pub token_fetch_failures: IntCounterVec,
    pub token_fetch_duration: Histogram,

    // Event-list endpoint
    pub events_fetch_requests: IntCounter,
    pub events_fetch_failures: IntCounterVec,
    pub events_fetch_duration: Histogram,

    // Parser metrics
    pub parse_failures: IntCounter,
    pub events_returned: IntGauge,

    // Config
    pub config_validation_errors: IntCounter,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("gigfinder".into()), None)
            .unwrap_or_default();

        let metrics: Arc<Metrics> = Arc::new(Self {
            token_cache_hits: IntCounter::new("token_cache_hits_total", "Valid cached tokens reused").unwrap(),
            token_cache_misses: IntCounter::new("token_cache_misses_total", "Runs that had to fetch a new token").unwrap(),
            token_cache_purges: IntCounter::new("token_cache_purges_total", "Corrupt cache records removed").unwrap(),

            token_fetch_requests: IntCounter::new("token_fetch_requests_total", "Token requests sent to the auth endpoint").unwrap(),
            token_fetch_failures: IntCounterVec::new(Opts::new("token_fetch_failures_total", "Token request failures by reason"), &["reason"]).unwrap(),
            token_fetch_duration: Histogram::with_opts(HistogramOpts::new("token_fetch_duration_seconds", "Token request duration seconds").buckets(FETCH_BUCKETS.to_vec())).unwrap(),

            events_fetch_requests: IntCounter::new("events_fetch_requests_total", "Event-list requests").unwrap(),
            events_fetch_failures: IntCounterVec::new(Opts::new("events_fetch_failures_total", "Event-list request failures by reason"), &["reason"]).unwrap(),
            events_fetch_duration: Histogram::with_opts(HistogramOpts::new("events_fetch_duration_seconds", "Event-list request duration seconds").buckets(FETCH_BUCKETS.to_vec())).unwrap(),

            parse_failures: IntCounter::new("parse_failures_total", "Config or response parse failures").unwrap(),
            events_returned: IntGauge::new("events_returned", "Gigs returned by the last event-list request").unwrap(),

            config_validation_errors: IntCounter::new("config_validation_errors_total", "Validation errors during startup").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.token_cache_hits.clone())).unwrap();
        reg.register(Box::new(metrics.token_cache_misses.clone())).unwrap();
        reg.register(Box::new(metrics.token_cache_purges.clone())).unwrap();
        reg.register(Box::new(metrics.token_fetch_requests.clone())).unwrap();
        reg.register(Box::new(metrics.token_fetch_failures.clone())).unwrap();
        reg.register(Box::new(metrics.token_fetch_duration.clone())).unwrap();
        reg.register(Box::new(metrics.events_fetch_requests.clone())).unwrap();
        reg.register(Box::new(metrics.events_fetch_failures.clone())).unwrap();
        reg.register(Box::new(metrics.events_fetch_duration.clone())).unwrap();
        reg.register(Box::new(metrics.parse_failures.clone())).unwrap();
        reg.register(Box::new(metrics.events_returned.clone())).unwrap();
        reg.register(Box::new(metrics.config_validation_errors.clone())).unwrap();

        metrics
    }
}
