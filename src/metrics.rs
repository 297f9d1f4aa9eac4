//! Lightweight global metrics for forage-pager.
//!
//! Потокобезопасные атомарные счётчики (process-wide, общие для всех адаптеров):
//! - request builder
//! - response recorder

use std::sync::atomic::{AtomicU64, Ordering};

// ----- Request builder -----
static REQUESTS_BUILT: AtomicU64 = AtomicU64::new(0);
static TOKENS_ATTACHED: AtomicU64 = AtomicU64::new(0);
static TOKENS_DROPPED_TERM_CHANGED: AtomicU64 = AtomicU64::new(0);

// ----- Response recorder -----
static RESPONSES_RECORDED: AtomicU64 = AtomicU64::new(0);
static RESPONSES_WITHOUT_TOKEN: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    // Request builder
    pub requests_built: u64,
    pub tokens_attached: u64,
    pub tokens_dropped_term_changed: u64,

    // Response recorder
    pub responses_recorded: u64,
    pub responses_without_token: u64,
}

impl MetricsSnapshot {
    /// Share of built requests that carried a continuation token.
    pub fn token_hit_ratio(&self) -> f64 {
        if self.requests_built == 0 {
            0.0
        } else {
            self.tokens_attached as f64 / self.requests_built as f64
        }
    }
}

#[inline]
pub fn record_request_built() {
    REQUESTS_BUILT.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_token_attached() {
    TOKENS_ATTACHED.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_token_dropped_term_changed() {
    TOKENS_DROPPED_TERM_CHANGED.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_response(has_token: bool) {
    RESPONSES_RECORDED.fetch_add(1, Ordering::Relaxed);
    if !has_token {
        RESPONSES_WITHOUT_TOKEN.fetch_add(1, Ordering::Relaxed);
    }
}

pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        requests_built: REQUESTS_BUILT.load(Ordering::Relaxed),
        tokens_attached: TOKENS_ATTACHED.load(Ordering::Relaxed),
        tokens_dropped_term_changed: TOKENS_DROPPED_TERM_CHANGED.load(Ordering::Relaxed),
        responses_recorded: RESPONSES_RECORDED.load(Ordering::Relaxed),
        responses_without_token: RESPONSES_WITHOUT_TOKEN.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    REQUESTS_BUILT.store(0, Ordering::Relaxed);
    TOKENS_ATTACHED.store(0, Ordering::Relaxed);
    TOKENS_DROPPED_TERM_CHANGED.store(0, Ordering::Relaxed);
    RESPONSES_RECORDED.store(0, Ordering::Relaxed);
    RESPONSES_WITHOUT_TOKEN.store(0, Ordering::Relaxed);
}
