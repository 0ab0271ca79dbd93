//! Onboarding Tour
//!
//! This example walks a user through a registered onboarding tour and then
//! prunes it once it has been finished for long enough.
//!
//! Key concepts:
//! - Registering tour and step templates
//! - Owned tours and lookup by owner
//! - Navigation with next/previous
//! - Change notifications logged through tracing
//! - Pruning completed tours from TOML configuration
//!
//! Run with: RUST_LOG=debug cargo run --example onboarding

use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use waypost::events::{CompositeNotifier, RecordingNotifier, TracingNotifier};
use waypost::tour::{StepTemplate, TourRegistry, TourTemplate};
use waypost::{
    InMemoryTourStore, OwnerRef, Pruner, TourError, TourFactory, TourStore, Tourable,
    WaypostConfig,
};

struct User {
    id: i64,
    email: &'static str,
}

impl Tourable for User {
    fn owner_ref(&self) -> OwnerRef {
        OwnerRef::new("user", self.id)
    }
}

fn main() -> Result<(), TourError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Onboarding Tour Example ===\n");

    let registry = TourRegistry::new()
        .with_tour(
            "onboarding",
            TourTemplate::builder()
                .owned()
                .steps(["welcome", "profile", "invite-team"])
                .build()?,
        )
        .with_step("welcome", StepTemplate::named("Welcome aboard"));

    let recorder = Arc::new(RecordingNotifier::new());
    let notifier = CompositeNotifier::new()
        .with(Arc::new(TracingNotifier))
        .with(recorder.clone());
    let store = Arc::new(InMemoryTourStore::new());
    let factory = TourFactory::new(store.clone(), Arc::new(notifier)).with_registry(registry);

    let user = User {
        id: 42,
        email: "ada@example.com",
    };
    println!("Starting onboarding for {}", user.email);

    let mut tour = factory.make("onboarding", &user)?;
    tour.set_context(json!({ "source": "signup" }))?;
    tour.start()?;
    print_position(&tour);

    tour.next()?;
    print_position(&tour);

    tour.previous()?;
    print_position(&tour);

    // A later request picks the tour up by owner.
    let mut resumed = factory
        .find_owned("onboarding", &user)?
        .ok_or_else(|| TourError::NotFound("onboarding".into()))?;
    resumed.next()?.next()?;
    print_position(&resumed);

    resumed.finish(Some(Utc::now() - Duration::days(10)))?;
    println!("Status: {}", resumed.status());
    println!("Changes observed: {}", recorder.changes().len());

    println!("\n--- Pruning ---");
    let config = WaypostConfig::from_toml_str(
        r#"
        [prune]
        mode = "shallow"
        min_age = "1 week"
        "#,
    )?;
    let report = Pruner::new(store.clone(), config.prune).prune()?;
    println!(
        "Pruned {} tour(s) in {} mode, {} step(s) removed",
        report.pruned.len(),
        report.mode,
        report.steps_removed
    );
    println!("Tours kept: {}", store.list_tours()?.len());

    Ok(())
}

fn print_position(tour: &waypost::Tour) {
    match tour.current() {
        Some(step) => println!("  [{}] at step '{}'", tour.status(), step.name()),
        None => println!("  [{}] no current step", tour.status()),
    }
}
