//! Coin-Operated Turnstile
//!
//! This example demonstrates a machine assembled at runtime with no host.
//!
//! Key concepts:
//! - States and events declared as strings at runtime
//! - Unbound machines (no host record)
//! - State predicate queries ("locked?")
//! - Rejection of names no state declares
//!
//! Run with: cargo run --example turnstile

use flowstate::{Instance, SpecificationBuilder};
use std::sync::Arc;

fn main() {
    // Engine debug logs go to stderr; every transition shows up at DEBUG.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Turnstile Example ===\n");

    let mut builder = SpecificationBuilder::new();
    builder.state("locked").event("coin", "unlocked");
    builder.state("unlocked").event("push", "locked");
    let spec = Arc::new(builder.finalize().unwrap());

    let mut turnstile = Instance::unbound(spec);
    println!("starting state: {}", turnstile.state());
    println!("available events: {:?}\n", turnstile.available_events());

    turnstile.trigger_unbound("coin", &[]).unwrap();
    println!("after coin: {}", turnstile.state());

    turnstile.trigger_unbound("push", &[]).unwrap();
    println!("after push: {}\n", turnstile.state());

    // Undeclared "name?" events answer predicates instead of transitioning.
    let query = turnstile.trigger_unbound("locked?", &[]).unwrap();
    println!("locked? -> {:?}", query.as_query());

    // Unknown names are rejected, naming the state that refused them.
    let error = turnstile.trigger_unbound("jump", &[]).unwrap_err();
    println!("jump -> {error}");
}
