// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the per-client card generation quota

use chrono::Utc;
use fabstir_card_node::generation::rate_limiter::{
    CardRateLimiter, InMemoryQuotaStore, ManualClock, QuotaStore, DEFAULT_WINDOW,
};
use std::sync::Arc;
use std::time::Duration;

fn limiter(max: u32) -> (CardRateLimiter, Arc<ManualClock>, Arc<InMemoryQuotaStore>) {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let store = Arc::new(InMemoryQuotaStore::new());
    let limiter = CardRateLimiter::with_store(store.clone(), clock.clone(), max, DEFAULT_WINDOW);
    (limiter, clock, store)
}

#[test]
fn test_first_max_calls_allowed_with_decreasing_remaining() {
    for max in [3u32, 10] {
        let (limiter, _, _) = limiter(max);
        let remaining: Vec<u32> = (0..max)
            .map(|_| {
                let decision = limiter.check_rate_limit("client");
                assert!(decision.allowed);
                decision.remaining
            })
            .collect();
        let expected: Vec<u32> = (0..max).rev().collect();
        assert_eq!(remaining, expected);

        let denied = limiter.check_rate_limit("client");
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
    }
}

#[test]
fn test_client_is_fresh_after_window_elapses() {
    let (limiter, clock, _) = limiter(3);
    for _ in 0..4 {
        limiter.check_rate_limit("client");
    }
    assert!(!limiter.check_rate_limit("client").allowed);

    clock.advance(DEFAULT_WINDOW + Duration::from_secs(1));

    let decision = limiter.check_rate_limit("client");
    assert!(decision.allowed);
    assert_eq!(decision.remaining, 2);
}

#[test]
fn test_count_never_exceeds_max() {
    let (limiter, _, store) = limiter(3);
    for _ in 0..10 {
        limiter.check_rate_limit("client");
    }
    assert_eq!(store.get("client").unwrap().count, 3);
}

#[test]
fn test_one_entry_per_client() {
    let (limiter, clock, store) = limiter(2);
    limiter.check_rate_limit("a");
    limiter.check_rate_limit("a");
    clock.advance(DEFAULT_WINDOW * 2);
    limiter.check_rate_limit("a");
    limiter.check_rate_limit("b");
    assert_eq!(store.len(), 2);
    assert_eq!(store.get("a").unwrap().count, 1);
}

#[test]
fn test_different_clients_independent_limits() {
    let (limiter, _, _) = limiter(1);
    assert!(limiter.check_rate_limit("client-a").allowed);
    assert!(!limiter.check_rate_limit("client-a").allowed);
    assert!(limiter.check_rate_limit("client-b").allowed);
}

#[test]
fn test_custom_window_expires_in_real_time() {
    let limiter = CardRateLimiter::with_window(1, Duration::from_millis(100));
    assert!(limiter.check_rate_limit("client").allowed);
    assert!(!limiter.check_rate_limit("client").allowed);

    std::thread::sleep(Duration::from_millis(150));

    assert!(
        limiter.check_rate_limit("client").allowed,
        "Should allow after window expires"
    );
}

#[tokio::test]
async fn test_concurrent_tasks_respect_quota() {
    let limiter = Arc::new(CardRateLimiter::new(5));
    let mut handles = Vec::new();
    for _ in 0..40 {
        let limiter = limiter.clone();
        handles.push(tokio::spawn(async move {
            limiter.check_rate_limit("burst").allowed
        }));
    }

    let mut admitted = 0;
    for handle in handles {
        if handle.await.unwrap() {
            admitted += 1;
        }
    }
    assert_eq!(admitted, 5);
}
