//! Order Persistence
//!
//! This example demonstrates binding a machine to a stored record and
//! carrying it across process restarts with snapshots.
//!
//! Key concepts:
//! - The PersistedState storage contract
//! - attach: fresh hosts versus reloaded hosts
//! - Automatic state write-back after each transition
//! - Snapshot capture, JSON encoding, and restore
//!
//! Run with: cargo run --example order_persistence

use flowstate::{attach, Instance, PersistedState, Snapshot, Specification, SpecificationBuilder};
use std::sync::Arc;

// A record whose current state lives in a string column.
struct Order {
    workflow_state: Option<String>,
    sku: String,
}

impl PersistedState for Order {
    fn stored_state(&self) -> Option<String> {
        self.workflow_state.clone()
    }

    fn store_state(&mut self, state: &str) {
        self.workflow_state = Some(state.to_string());
    }
}

fn order_spec() -> Arc<Specification<Order>> {
    let mut builder = SpecificationBuilder::new();
    builder.state("accepted").event("pack", "packed");
    builder.state("packed").event("ship", "shipped");
    builder.state("shipped");
    Arc::new(builder.finalize().unwrap())
}

fn main() {
    println!("=== Order Persistence Example ===\n");

    let spec = order_spec();

    // A fresh order gets the initial state written back on attach.
    let mut order = Order {
        workflow_state: None,
        sku: "KB-0042".to_string(),
    };
    let mut machine = attach(spec.clone(), &mut order).unwrap();
    println!("fresh order stored state: {:?}", order.workflow_state);

    machine.trigger(&mut order, "pack", &[]).unwrap();
    println!("after pack: {:?}", order.workflow_state);

    // Snapshots capture the machine side: state, halt status, journal.
    let blob = machine.snapshot().to_json().unwrap();
    println!("\nsnapshot blob:\n{blob}\n");

    // "Reload" the record elsewhere and resume from the stored column...
    let mut reloaded = Order {
        workflow_state: order.workflow_state.clone(),
        sku: order.sku.clone(),
    };
    let mut resumed = attach(spec.clone(), &mut reloaded).unwrap();
    println!("resumed from column at: {}", resumed.state());

    resumed.trigger(&mut reloaded, "ship", &[]).unwrap();
    println!("after ship: {:?}", reloaded.workflow_state);

    // ...or rebuild the full machine, journal included, from the blob.
    let decoded = Snapshot::from_json(&blob).unwrap();
    let restored = Instance::restore(spec, &decoded).unwrap();
    println!("\nrestored from snapshot at: {}", restored.state());
    println!("journal path: {:?}", restored.journal().path());
}
