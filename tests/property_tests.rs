//! Property-based tests for tour status and navigation.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use chrono::Duration;
use proptest::prelude::*;
use std::sync::Arc;
use waypost::config::parse_age;
use waypost::events::NoopNotifier;
use waypost::storage::InMemoryTourStore;
use waypost::{Guard, State, TourFactory, TourStatus};

prop_compose! {
    fn arbitrary_status()(index in 0..TourStatus::ALL.len()) -> TourStatus {
        TourStatus::ALL[index]
    }
}

#[derive(Clone, Copy, Debug)]
enum Move {
    Next,
    Previous,
}

fn arbitrary_move() -> impl Strategy<Value = Move> {
    prop_oneof![Just(Move::Next), Just(Move::Previous)]
}

fn factory() -> TourFactory {
    TourFactory::new(Arc::new(InMemoryTourStore::new()), Arc::new(NoopNotifier))
}

proptest! {
    #[test]
    fn mutable_statuses_are_never_final(status in arbitrary_status()) {
        prop_assert!(!(status.is_mutable() && status.is_final()));
        prop_assert_eq!(Guard::navigable().check(&status), status.is_mutable());
    }

    #[test]
    fn only_failed_is_an_error(status in arbitrary_status()) {
        prop_assert_eq!(status.is_error(), status == TourStatus::Failed);
    }

    #[test]
    fn status_name_parses_back(status in arbitrary_status()) {
        let parsed: TourStatus = status.name().parse().unwrap();
        prop_assert_eq!(parsed, status);
    }

    #[test]
    fn persisted_status_is_never_restarted(status in arbitrary_status()) {
        prop_assert_ne!(status.persisted(), TourStatus::Restarted);
        prop_assert_eq!(status.persisted().persisted(), status.persisted());
    }

    #[test]
    fn status_roundtrip_serialization(status in arbitrary_status()) {
        let json = serde_json::to_string(&status).unwrap();
        prop_assert_eq!(&json, &format!("\"{}\"", status.as_str()));
        let deserialized: TourStatus = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(status, deserialized);
    }

    #[test]
    fn next_walks_every_step_then_completes(count in 1usize..8) {
        let factory = factory();
        let mut tour = factory.make_unowned("walk").unwrap();
        tour.add_steps((0..count).map(|i| format!("step-{i}"))).unwrap();
        tour.start().unwrap();

        for i in 0..count {
            let expected = format!("step-{i}");
            prop_assert_eq!(tour.current().map(|s| s.name()), Some(expected.as_str()));
            tour.next().unwrap();
        }

        prop_assert!(tour.current().is_none());
        prop_assert_eq!(tour.status(), TourStatus::Completed);
    }

    #[test]
    fn pointer_tracks_position_under_random_moves(
        count in 2usize..6,
        moves in prop::collection::vec(arbitrary_move(), 0..20)
    ) {
        let factory = factory();
        let mut tour = factory.make_unowned("wander").unwrap();
        tour.add_steps((0..count).map(|i| format!("step-{i}"))).unwrap();
        tour.start().unwrap();
        let mut position = 0usize;

        for step in moves {
            if tour.completed() {
                prop_assert!(tour.next().is_err());
                break;
            }
            match step {
                Move::Next => {
                    tour.next().unwrap();
                    position += 1;
                }
                Move::Previous => {
                    tour.previous().unwrap();
                    position = position.saturating_sub(1);
                }
            }

            if position == count {
                prop_assert!(tour.completed());
                prop_assert!(tour.current().is_none());
            } else {
                let expected = tour.step(position).map(|s| s.id());
                prop_assert_eq!(tour.current().map(|s| s.id()), expected);
            }
        }
    }

    #[test]
    fn ages_in_days_scale_linearly(amount in 0i64..1000) {
        prop_assert_eq!(parse_age(&format!("{amount} days")).unwrap(), Duration::days(amount));
        prop_assert_eq!(parse_age(&format!("{amount} weeks")).unwrap(), Duration::weeks(amount));
    }
}
