//! Unit tests for the fixed-window rate limiter

use std::time::Duration;
use storage_api::middleware::{RateDecision, RateLimiter};

#[tokio::test(start_paused = true)]
async fn requests_over_the_limit_are_refused_until_the_window_resets() {
    let limiter = RateLimiter::new(3, Duration::from_secs(60));

    for remaining in [2, 1, 0] {
        assert_eq!(
            limiter.check("203.0.113.7").await,
            RateDecision::Allowed { remaining }
        );
    }
    assert!(matches!(
        limiter.check("203.0.113.7").await,
        RateDecision::Limited { .. }
    ));

    tokio::time::advance(Duration::from_secs(60)).await;

    assert_eq!(
        limiter.check("203.0.113.7").await,
        RateDecision::Allowed { remaining: 2 }
    );
}

#[tokio::test(start_paused = true)]
async fn retry_after_counts_down_the_window() {
    let limiter = RateLimiter::new(1, Duration::from_secs(900));
    limiter.check("client").await;

    tokio::time::advance(Duration::from_secs(300)).await;

    assert_eq!(
        limiter.check("client").await,
        RateDecision::Limited {
            retry_after: Duration::from_secs(600)
        }
    );
}

#[tokio::test]
async fn clients_are_limited_independently() {
    let limiter = RateLimiter::new(1, Duration::from_secs(60));

    assert!(matches!(limiter.check("a").await, RateDecision::Allowed { .. }));
    assert!(matches!(limiter.check("b").await, RateDecision::Allowed { .. }));
    assert!(matches!(limiter.check("a").await, RateDecision::Limited { .. }));
}

#[tokio::test]
async fn default_allows_one_hundred_per_window() {
    let limiter = RateLimiter::default();
    assert_eq!(limiter.max_requests(), 100);

    for _ in 0..100 {
        assert!(matches!(limiter.check("client").await, RateDecision::Allowed { .. }));
    }
    assert!(matches!(limiter.check("client").await, RateDecision::Limited { .. }));
}
