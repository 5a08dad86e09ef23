use crate::domain::ports::DispatchNotifier;
use std::sync::{Arc, Mutex};

/// Prints the delivery line to stdout.
pub struct ConsoleDispatcher;

impl DispatchNotifier for ConsoleDispatcher {
    fn dispatch(&self, buyer_id: &str, vendor_id: &str, quantity: u64) {
        println!("Dispatching delivery of {quantity} units from {vendor_id} to {buyer_id}.");
    }
}

/// Captures dispatch invocations for inspection in tests.
///
/// `Clone` shares the underlying buffer, so a handle kept by the test
/// still sees notifications fired through the copy handed to the engine.
#[derive(Default, Clone)]
pub struct RecordingDispatcher {
    records: Arc<Mutex<Vec<(String, String, u64)>>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the `(buyer_id, vendor_id, quantity)` tuples recorded so far.
    pub fn records(&self) -> Vec<(String, String, u64)> {
        self.records.lock().expect("dispatch records lock poisoned").clone()
    }
}

impl DispatchNotifier for RecordingDispatcher {
    fn dispatch(&self, buyer_id: &str, vendor_id: &str, quantity: u64) {
        self.records
            .lock()
            .expect("dispatch records lock poisoned")
            .push((buyer_id.to_string(), vendor_id.to_string(), quantity));
    }
}
