//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Resolutions (query -> set outcome, default substitutions)
//! - Cache effectiveness (memory hits vs remote lookups)
//! - The remote catalog (request outcomes, latency)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Resolver Metrics
// =============================================================================

/// Resolutions total by result.
pub static RESOLUTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("brickfind_resolutions_total", "Total key resolutions"),
        &["result"], // "found", "not_found", "error"
    )
    .unwrap()
});

/// Narrowing steps taken per resolution.
pub static NARROWING_STEPS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "brickfind_narrowing_steps",
            "Number of narrowing steps taken per resolution",
        )
        .buckets(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]),
    )
    .unwrap()
});

/// Default set substitutions.
pub static DEFAULT_SUBSTITUTIONS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "brickfind_default_substitutions_total",
        "Queries answered with the default set",
    )
    .unwrap()
});

// =============================================================================
// Cache Metrics
// =============================================================================

/// Cache hits by table.
pub static CACHE_HITS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("brickfind_cache_hits_total", "Lookups answered from memory"),
        &["table"], // "entry", "probe"
    )
    .unwrap()
});

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Remote catalog lookups by outcome.
pub static CATALOG_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("brickfind_catalog_lookups_total", "Remote catalog lookups"),
        &["catalog", "outcome"], // outcome: "found", "not_found", "error"
    )
    .unwrap()
});

/// Remote catalog lookup duration in seconds.
pub static CATALOG_LOOKUP_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "brickfind_catalog_lookup_duration_seconds",
            "Duration of remote catalog lookups",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["catalog"],
    )
    .unwrap()
});

/// Get all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Resolver
        Box::new(RESOLUTIONS.clone()),
        Box::new(NARROWING_STEPS.clone()),
        Box::new(DEFAULT_SUBSTITUTIONS.clone()),
        // Cache
        Box::new(CACHE_HITS.clone()),
        // Catalog
        Box::new(CATALOG_LOOKUPS.clone()),
        Box::new(CATALOG_LOOKUP_DURATION.clone()),
    ]
}
