//! # Example: lifetimes
//!
//! Shows how key ownership follows subscriber lifetimes.
//!
//! Demonstrates how to:
//! - Refuse a second claim while the owner is alive.
//! - Reclaim a key after its owner is dropped, with no explicit cleanup.
//! - Release a key eagerly with [`Relay::unsubscribe`].
//!
//! ## Flow
//! ```text
//! subscribe("ticker", &alice) ─► true   (key was vacant)
//! subscribe("ticker", &bob)   ─► false  (alice is alive)
//! drop(alice)
//! push("ticker", 99)          ─► silently dropped, no live owner
//! subscribe("ticker", &bob)   ─► true   (stale owner replaced)
//! unsubscribe("ticker")
//! subscribe("ticker", &carol) ─► true   (vacant again)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example lifetimes
//! ```

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use keyrelay::{PoolError, Relay};

struct Agent {
    name: &'static str,
}

fn on_tick(agent: &Agent, key: &&'static str, value: &u64) {
    println!("[{key}] {} got {value}", agent.name);
}

fn main() -> Result<(), PoolError> {
    // One worker keeps the printed delivery order stable.
    let relay: Relay<&'static str, u64> = Relay::builder().with_workers(1).build()?;

    let alice = Arc::new(Agent { name: "alice" });
    let bob = Arc::new(Agent { name: "bob" });

    // 1. Alice claims the key; Bob is refused while she is alive.
    println!("[claim] alice: {}", relay.subscribe("ticker", &alice, on_tick));
    println!("[claim] bob:   {}", relay.subscribe("ticker", &bob, on_tick));
    relay.push("ticker", 1);
    thread::sleep(Duration::from_millis(50));

    // 2. Dropping Alice releases the key implicitly. A value pushed in the
    //    gap reaches no one: the stale handle upgrades to nothing.
    drop(alice);
    relay.push("ticker", 99);
    thread::sleep(Duration::from_millis(50));
    println!("[claim] bob:   {}", relay.subscribe("ticker", &bob, on_tick));
    relay.push("ticker", 2);
    thread::sleep(Duration::from_millis(50));

    // 3. Explicit release makes the key claimable at once.
    relay.unsubscribe(&"ticker");
    let carol = Arc::new(Agent { name: "carol" });
    println!("[claim] carol: {}", relay.subscribe("ticker", &carol, on_tick));
    relay.push("ticker", 3);
    thread::sleep(Duration::from_millis(50));

    Ok(())
}
