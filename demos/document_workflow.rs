//! Document Approval Workflow
//!
//! This example attaches a declared state machine to a document record.
//!
//! Key concepts:
//! - Declaring states and events once per type
//! - Initializing and rehydrating instance state
//! - State predicates (`draft?`, `was_review?`)
//! - Transition queries by event, source and target
//! - Assignment history with path and timing
//!
//! Run with: RUST_LOG=statemark=trace cargo run --example document_workflow

use std::sync::OnceLock;

use statemark::{state_enum, state_machine, Requirements, StateMachine, StateTracker, Stateful};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum DocState {
        Draft => draft,
        Review => review,
        Approved => approved,
        Published => published,
    }
}

fn document_states() -> &'static StateMachine {
    static MACHINE: OnceLock<StateMachine> = OnceLock::new();
    MACHINE.get_or_init(|| {
        state_machine! {
            initial: draft;
            event submit: draft => review;
            event approve: [review] => approved;
            event reject: [review] => draft;
            event publish: [approved] => published;
        }
    })
}

struct Document {
    id: u64,
    tracker: StateTracker,
}

impl Document {
    fn new(id: u64) -> Self {
        let mut document = Self {
            id,
            tracker: StateTracker::new(),
        };
        document.init_state();
        document
    }
}

impl Stateful for Document {
    fn state_machine(&self) -> &StateMachine {
        document_states()
    }

    fn tracker(&self) -> &StateTracker {
        &self.tracker
    }

    fn tracker_mut(&mut self) -> &mut StateTracker {
        &mut self.tracker
    }
}

fn describe(document: &Document) {
    let state = document
        .state()
        .map_or_else(|| "<none>".to_string(), ToString::to_string);
    println!("  Document {} is {}", document.id, state);

    let next = document
        .state()
        .map(|s| document.state_transitions(&Requirements::new().from(s)))
        .unwrap_or_default();
    for transition in next {
        println!(
            "    can `{}` -> {}",
            transition.event,
            transition
                .to
                .map_or_else(|| "<unspecified>".to_string(), |s| s.to_string())
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Document Approval Workflow ===\n");

    let machine = document_states();
    let states: Vec<String> = machine.states().iter().map(ToString::to_string).collect();
    println!("States: {}\n", states.join(" -> "));

    let mut doc = Document::new(123);
    describe(&doc);

    for step in [DocState::Review, DocState::Approved, DocState::Published] {
        println!("\nAssigning {:?}", step);
        doc.set_state(step);
        describe(&doc);
    }

    println!();
    for query in ["draft?", "published?", "was_review?", "was_rejected?"] {
        match doc.query(query) {
            Ok(answer) => println!("  {query} => {answer}"),
            Err(e) => println!("  {query} => error: {e}"),
        }
    }

    let past: Vec<String> = doc
        .past_states()
        .into_iter()
        .map(|s| s.map_or_else(|| "<none>".to_string(), ToString::to_string))
        .collect();
    println!("\nHistory: {}", past.join(", "));

    let path: Vec<String> = doc
        .state_path()
        .into_iter()
        .map(|s| s.map_or_else(|| "<none>".to_string(), ToString::to_string))
        .collect();
    println!("Path: {}", path.join(" -> "));
    for transition in doc.state_history().transitions() {
        println!(
            "  {} entered at {}",
            transition.to,
            transition.timestamp.format("%H:%M:%S%.3f")
        );
    }
    if let Some(elapsed) = doc.time_in_flight() {
        println!("Time in flight: {elapsed:?}");
    }

    println!("\nEvents leading to approved:");
    for transition in doc.state_transitions(&Requirements::new().to(DocState::Approved)) {
        println!("  {} from {:?}", transition.event, transition.from);
    }

    println!("\n=== Example Complete ===");
}
