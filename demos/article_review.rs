//! Article Review Workflow
//!
//! This example demonstrates hooks, actions, and both halt flavors.
//!
//! Key concepts:
//! - Entry and exit hooks on individual states
//! - A specification-wide transition hook
//! - Actions that halt softly (queryable) or hard (an error)
//! - Event arguments flowing into actions and hooks
//!
//! Run with: cargo run --example article_review

use flowstate::{Instance, SpecificationBuilder};
use serde_json::{json, Value};
use std::sync::Arc;

// The record driven by the workflow.
#[derive(Default)]
struct Article {
    body: String,
    reviewer: Option<String>,
}

fn main() {
    println!("=== Article Review Example ===\n");

    let mut builder = SpecificationBuilder::new();
    builder
        .state("draft")
        .event_with(
            "submit",
            "review",
            |article: &mut Article, control, args| {
                if article.body.is_empty() {
                    control.halt("draft has no body");
                    return Value::Null;
                }
                article.reviewer = args.first().and_then(Value::as_str).map(str::to_string);
                json!(article.reviewer)
            },
        )
        .on_exit(|_: &mut Article, to, event, _| {
            println!("  leaving draft for {to} ({event})");
        });
    builder
        .state("review")
        .event("approve", "published")
        .event_with("reject", "draft", |_: &mut Article, control, _| {
            control.halt_fatal("rejections must go through an editor");
            Value::Null
        })
        .on_entry(|article: &mut Article, _, _, _| {
            println!(
                "  review started by {}",
                article.reviewer.as_deref().unwrap_or("nobody")
            );
        });
    builder.state("published");
    builder.on_transition(|_: &mut Article, from, to, event, _| {
        println!("  [audit] {from} -> {to} via {event}");
    });
    let spec = Arc::new(builder.finalize().unwrap());

    let mut article = Article::default();
    let mut machine = Instance::new(spec, &mut article);
    println!("starting state: {}\n", machine.state());

    // Submitting an empty draft halts softly: no move, queryable reason.
    let outcome = machine.trigger(&mut article, "submit", &[]).unwrap();
    println!(
        "submit on empty body -> {:?} (reason: {})\n",
        outcome,
        machine.halted_because().unwrap_or("none")
    );

    article.body = "One weird trick for borrow checking.".to_string();
    machine
        .trigger(&mut article, "submit", &[json!("alice")])
        .unwrap();
    println!("state after submit: {}\n", machine.state());

    // A hard halt surfaces as an error and also leaves the state alone.
    let error = machine.trigger(&mut article, "reject", &[]).unwrap_err();
    println!("reject -> {error}");
    println!("state after reject: {}\n", machine.state());

    machine.trigger(&mut article, "approve", &[]).unwrap();
    println!("state after approve: {}", machine.state());
    println!("terminal: {}", machine.in_terminal_state());
}
