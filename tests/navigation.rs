//! Navigation through a tour's steps.

use serde_json::json;
use std::sync::Arc;
use waypost::events::NoopNotifier;
use waypost::storage::InMemoryTourStore;
use waypost::{Tour, TourError, TourFactory, TourStatus, TourStep};

fn factory() -> TourFactory {
    TourFactory::new(Arc::new(InMemoryTourStore::new()), Arc::new(NoopNotifier))
}

fn three_step_tour(factory: &TourFactory) -> Tour {
    let mut tour = factory.make_unowned("tour").unwrap();
    tour.add_steps(["step-1", "step-2", "step-3"]).unwrap();
    tour
}

fn current(tour: &Tour) -> Option<&str> {
    tour.current().map(TourStep::name)
}

#[test]
fn navigates_an_entire_tour() {
    let factory = factory();
    let mut tour = three_step_tour(&factory);
    assert_eq!(current(&tour), None);

    tour.start().unwrap();
    assert_eq!(current(&tour), Some("step-1"));

    tour.next().unwrap();
    assert_eq!(current(&tour), Some("step-2"));

    tour.next().unwrap();
    assert_eq!(current(&tour), Some("step-3"));

    tour.next().unwrap();
    assert_eq!(current(&tour), None);
    assert_eq!(tour.status(), TourStatus::Completed);
    assert!(tour.completed());
    assert!(tour.completed_at().is_none());
}

#[test]
fn navigates_back_and_forth() {
    let factory = factory();
    let mut tour = three_step_tour(&factory);

    tour.start().unwrap();
    tour.next().unwrap();
    assert_eq!(current(&tour), Some("step-2"));

    tour.previous().unwrap();
    assert_eq!(current(&tour), Some("step-1"));

    tour.previous().unwrap();
    assert_eq!(current(&tour), Some("step-1"));
}

#[test]
fn restart_returns_to_first_step() {
    let factory = factory();
    let mut tour = three_step_tour(&factory);

    tour.start().unwrap().next().unwrap().restart().unwrap();

    assert_eq!(current(&tour), Some("step-1"));
    assert_eq!(tour.status(), TourStatus::Started);
}

#[test]
fn restart_revives_a_finished_tour() {
    let factory = factory();
    let mut tour = three_step_tour(&factory);

    tour.finish(None).unwrap().restart().unwrap();

    assert_eq!(tour.status(), TourStatus::Started);
    assert_eq!(current(&tour), Some("step-1"));
    tour.next().unwrap();
    assert_eq!(current(&tour), Some("step-2"));
}

#[test]
fn cannot_navigate_when_not_mutable() {
    let factory = factory();
    let mut tour = three_step_tour(&factory);

    tour.next().unwrap();
    tour.next().unwrap();
    tour.fail().unwrap();

    assert!(matches!(tour.next(), Err(TourError::InvalidState(_))));
    assert!(matches!(tour.previous(), Err(TourError::InvalidState(_))));
    assert_eq!(tour.status(), TourStatus::Failed);
}

#[test]
fn terminal_operations_clear_pointer_and_block_both_directions() {
    type Terminal = fn(&mut Tour) -> waypost::Result<&mut Tour>;
    let operations: [(&str, Terminal, TourStatus); 3] = [
        ("fail", |tour| tour.fail(), TourStatus::Failed),
        ("cancel", |tour| tour.cancel(), TourStatus::Cancelled),
        ("finish", |tour| tour.finish(None), TourStatus::Completed),
    ];

    for (label, operation, expected) in operations {
        let factory = factory();
        let mut tour = three_step_tour(&factory);
        tour.start().unwrap().next().unwrap();

        operation(&mut tour).unwrap();

        assert_eq!(current(&tour), None, "{label}");
        assert_eq!(tour.status(), expected, "{label}");
        assert!(!tour.status().is_mutable(), "{label}");
        assert!(matches!(tour.next(), Err(TourError::InvalidState(_))), "{label}");
        assert!(matches!(tour.previous(), Err(TourError::InvalidState(_))), "{label}");
        assert_eq!(current(&tour), None, "{label}");
    }
}

#[test]
fn cancelled_tour_clears_pointer_and_blocks_navigation() {
    let factory = factory();
    let mut tour = three_step_tour(&factory);

    tour.start().unwrap().cancel().unwrap();

    assert_eq!(current(&tour), None);
    assert_eq!(tour.status(), TourStatus::Cancelled);
    assert!(tour.next().is_err());
}

#[test]
fn cannot_navigate_without_steps() {
    let factory = factory();
    let mut tour = factory.make_unowned("empty").unwrap();

    let err = tour.next().unwrap_err();
    assert!(matches!(err, TourError::InvalidState(_)));
    assert!(err.to_string().contains("no steps in tour"));
    assert!(matches!(tour.previous(), Err(TourError::InvalidState(_))));
}

#[test]
fn single_step_tour_completes_on_next() {
    let factory = factory();
    let mut tour = factory.make_unowned("single").unwrap();
    tour.add_step("only").unwrap();

    tour.start().unwrap().next().unwrap();

    assert_eq!(tour.status(), TourStatus::Completed);
    assert_eq!(current(&tour), None);
}

#[test]
fn duplicate_step_names_collapse_to_the_newest_step() {
    let factory = factory();
    let mut tour = factory.make_unowned("dupes").unwrap();
    tour.add_steps(["a", "b"]).unwrap();
    let newest = tour.create_step("a").unwrap();

    assert_eq!(tour.steps().len(), 2);
    assert_eq!(tour.step(0usize), Some(&newest));

    tour.start().unwrap();
    assert_eq!(tour.current(), Some(&newest));
    tour.next().unwrap();
    assert_eq!(current(&tour), Some("b"));
}

#[test]
fn rehydrated_tour_continues_where_it_left_off() {
    let factory = factory();
    let mut tour = three_step_tour(&factory);
    tour.start().unwrap().next().unwrap();
    tour.set_context(json!({"progress": {"seen": ["step-1"]}})).unwrap();

    let mut found = factory.find(tour.id()).unwrap().unwrap();
    assert_eq!(found.status(), tour.status());
    assert_eq!(found.status(), TourStatus::Started);
    assert_eq!(current(&found), Some("step-2"));
    assert_eq!(found.context(), tour.context());
    assert_eq!(found.context(), Some(&json!({"progress": {"seen": ["step-1"]}})));

    found.next().unwrap();
    assert_eq!(current(&found), Some("step-3"));
}
