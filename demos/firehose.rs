//! # Example: firehose
//!
//! Floods the relay from several producer threads and watches the pool drain.
//!
//! Demonstrates how to:
//! - Size and name the pool through [`RelayBuilder`].
//! - Run concurrent producers against per-key subscribers.
//! - Surface the crate's `tracing` output (claims, drops, shutdown).
//!
//! ## Flow
//! ```text
//! producer0 ─┐
//! producer1 ─┤                      ┌─► lane-0 counter
//! producer2 ─┼─► push(lane-N, i) ───┼─► lane-1 counter
//! producer3 ─┘                      ├─► lane-2 counter
//!                                   └─► lane-3 counter
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example firehose
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use keyrelay::Relay;

const PRODUCERS: usize = 4;
const LANES: u64 = 4;
const VALUES_PER_PRODUCER: u64 = 2_500;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let relay: Relay<String, u64> = Relay::builder()
        .with_workers(4)
        .with_name_prefix("firehose")
        .build()?;

    // One counting subscriber per lane.
    let totals: Vec<Arc<AtomicU64>> = (0..LANES).map(|_| Arc::new(AtomicU64::new(0))).collect();
    for (lane, total) in totals.iter().enumerate() {
        relay.subscribe(format!("lane-{lane}"), total, |total, _key, _value| {
            total.fetch_add(1, Ordering::Relaxed);
        });
    }

    let started = Instant::now();
    thread::scope(|s| {
        for _ in 0..PRODUCERS {
            s.spawn(|| {
                for i in 0..VALUES_PER_PRODUCER {
                    relay.push(format!("lane-{}", i % LANES), i);
                }
            });
        }
    });

    // A key nobody claimed: the value is dropped, visible at TRACE level.
    relay.push("lane-owned-by-no-one".into(), 0);

    let expected = PRODUCERS as u64 * VALUES_PER_PRODUCER;
    let deadline = Instant::now() + Duration::from_secs(10);
    while totals.iter().map(|t| t.load(Ordering::Relaxed)).sum::<u64>() < expected
        && Instant::now() < deadline
    {
        thread::sleep(Duration::from_millis(5));
    }

    for (lane, total) in totals.iter().enumerate() {
        println!("[lane-{lane}] delivered {}", total.load(Ordering::Relaxed));
    }
    let drained: u64 = totals.iter().map(|t| t.load(Ordering::Relaxed)).sum();
    println!("[main] drained {drained} values in {:?}", started.elapsed());
    Ok(())
}
