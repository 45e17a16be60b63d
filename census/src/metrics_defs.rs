//! Metrics definitions for fetching and categorizing records.

use shared::metrics_defs::{MetricDef, MetricType};

pub const PAGES_FETCHED: MetricDef = MetricDef {
    name: "fetch.pages",
    metric_type: MetricType::Counter,
    description: "Number of pages successfully fetched from upstream",
};

pub const RECORDS_FETCHED: MetricDef = MetricDef {
    name: "fetch.records",
    metric_type: MetricType::Counter,
    description: "Number of records normalized from fetched pages",
};

pub const PAGE_FAILURES: MetricDef = MetricDef {
    name: "fetch.page_failures",
    metric_type: MetricType::Counter,
    description: "Number of page fetches that ended pagination early",
};

pub const FETCH_DURATION: MetricDef = MetricDef {
    name: "fetch.duration",
    metric_type: MetricType::Histogram,
    description: "Time to walk all pages in seconds",
};

pub const GROUPS_EMITTED: MetricDef = MetricDef {
    name: "categorize.groups",
    metric_type: MetricType::Counter,
    description: "Number of category groups produced",
};

pub const ALL_METRICS: &[MetricDef] = &[
    PAGES_FETCHED,
    RECORDS_FETCHED,
    PAGE_FAILURES,
    FETCH_DURATION,
    GROUPS_EMITTED,
];
