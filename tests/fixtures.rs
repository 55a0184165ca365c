//! Shared helpers for the integration suite.

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Subscriber that records every `(key, value)` pair it receives.
#[derive(Debug, Default)]
pub struct Recorder {
    entries: Mutex<Vec<(String, String)>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, key: &str, value: &str) {
        self.entries.lock().push((key.to_string(), value.to_string()));
    }

    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries.lock().clone()
    }

    /// Recorded values, sorted. Delivery order across workers is unspecified,
    /// so assertions compare the multiset rather than the sequence.
    pub fn sorted_values(&self) -> Vec<String> {
        let mut values: Vec<String> = self
            .entries
            .lock()
            .iter()
            .map(|(_, value)| value.clone())
            .collect();
        values.sort();
        values
    }

    pub fn count(&self) -> usize {
        self.entries.lock().len()
    }
}

/// Subscriber whose callback blocks until the paired [`GateControl`] opens it.
///
/// Pinning a worker on a gated task makes queue-order scenarios deterministic
/// on a single-worker pool.
pub struct Gate {
    wait: Mutex<mpsc::Receiver<()>>,
}

impl Gate {
    pub fn wait(&self) {
        // A token buffered by `open` before the callback runs is consumed
        // immediately, so open/wait ordering does not matter.
        let _ = self.wait.lock().recv();
    }
}

pub struct GateControl {
    release: mpsc::Sender<()>,
}

impl GateControl {
    pub fn open(&self) {
        let _ = self.release.send(());
    }
}

pub fn gate() -> (Gate, GateControl) {
    let (release, wait) = mpsc::channel();
    (
        Gate {
            wait: Mutex::new(wait),
        },
        GateControl { release },
    )
}

/// Polls `pred` until it holds or a five second deadline passes.
pub fn wait_for(mut pred: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if pred() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    pred()
}
