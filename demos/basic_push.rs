//! # Example: basic_push
//!
//! Minimal example of claiming a key and pushing values at it.
//!
//! Demonstrates how to:
//! - Build a [`Relay`] with the default worker pool.
//! - Claim a key for a subscriber with [`Relay::subscribe`].
//! - Push values and let the pool deliver them in the background.
//!
//! ## Flow
//! ```text
//! subscribe("orders", &printer)
//! push("orders", ..) ──► FifoQueue ──► worker ──► printer callback
//! push("audit", ..)  ──► no subscriber, value is dropped
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic_push
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use keyrelay::{PoolError, Relay};

struct Printer {
    delivered: AtomicUsize,
}

fn main() -> Result<(), PoolError> {
    // 1. Build a relay with the default pool (one worker per core).
    let relay: Relay<String, String> = Relay::new()?;

    // 2. Claim a key for the subscriber.
    let printer = Arc::new(Printer {
        delivered: AtomicUsize::new(0),
    });
    relay.subscribe("orders".into(), &printer, |printer, key, value| {
        let n = printer.delivered.fetch_add(1, Ordering::SeqCst) + 1;
        println!("[{key}] #{n}: {value}");
    });

    // 3. Push values at the claimed key, plus one nobody listens to.
    for item in ["espresso", "flat white", "doppio"] {
        relay.push("orders".into(), item.to_string());
    }
    relay.push("audit".into(), "dropped on the floor".to_string());

    // 4. Delivery is asynchronous: give the pool a moment to catch up.
    let deadline = Instant::now() + Duration::from_secs(5);
    while printer.delivered.load(Ordering::SeqCst) < 3 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(1));
    }
    println!(
        "[main] delivered {} of 3",
        printer.delivered.load(Ordering::SeqCst)
    );
    Ok(())
}
