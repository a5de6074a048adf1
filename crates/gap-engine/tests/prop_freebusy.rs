//! Property-based tests for free-interval computation using proptest.
//!
//! These tests verify invariants that should hold for *any* set of busy
//! intervals and any valid window, under every gap policy.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use gap_engine::freebusy::{find_free_intervals_with, GapPolicy};
use gap_engine::{AvailabilityWindow, BusyInterval, FreeInterval};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
}

/// A busy interval starting within a five-day span, lasting up to 10 hours.
fn arb_busy() -> impl Strategy<Value = BusyInterval> {
    (0i64..5 * 24 * 60, 0i64..=600).prop_map(|(offset, length)| {
        let start: NaiveDateTime = base_date().and_time(NaiveTime::MIN) + Duration::minutes(offset);
        BusyInterval::new(start, start + Duration::minutes(length)).unwrap()
    })
}

fn arb_busy_list() -> impl Strategy<Value = Vec<BusyInterval>> {
    prop::collection::vec(arb_busy(), 0..12)
}

/// A valid window: 1-5 days, earliest <= latest, positive minimum length.
fn arb_window() -> impl Strategy<Value = AvailabilityWindow> {
    (0u64..3, 0u64..5, 0u32..=12, 12u32..=23, 1i64..=240).prop_map(
        |(skip, days, earliest_hour, latest_hour, min_minutes)| {
            let start_date = base_date() + chrono::Days::new(skip);
            let end_date = start_date + chrono::Days::new(days);
            AvailabilityWindow::new(start_date, end_date, Duration::minutes(min_minutes))
                .with_daily_bounds(
                    NaiveTime::from_hms_opt(earliest_hour, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(latest_hour, 59, 0).unwrap(),
                )
        },
    )
}

fn arb_policy() -> impl Strategy<Value = GapPolicy> {
    (any::<bool>(), any::<bool>()).prop_map(|(merge, split)| {
        let mut policy = GapPolicy::default();
        if merge {
            policy = policy.merge_overlaps();
        }
        if split {
            policy = policy.split_by_day();
        }
        policy
    })
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

fn assert_sorted_disjoint(free: &[FreeInterval]) -> Result<(), TestCaseError> {
    for pair in free.windows(2) {
        prop_assert!(
            pair[0].start < pair[1].start,
            "not strictly ascending: {:?} then {:?}",
            pair[0],
            pair[1]
        );
        prop_assert!(
            pair[0].end <= pair[1].start,
            "overlap: {:?} and {:?}",
            pair[0],
            pair[1]
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Property 1: Every free interval meets the minimum length
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn every_interval_meets_min_length(
        busy in arb_busy_list(),
        window in arb_window(),
        policy in arb_policy(),
    ) {
        let free = find_free_intervals_with(&busy, &window, policy);
        for interval in &free {
            prop_assert!(interval.end - interval.start >= window.min_length);
            prop_assert_eq!(interval.duration_minutes, (interval.end - interval.start).num_minutes());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Output is strictly ascending and non-overlapping
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn output_is_sorted_and_disjoint(
        busy in arb_busy_list(),
        window in arb_window(),
        policy in arb_policy(),
    ) {
        let free = find_free_intervals_with(&busy, &window, policy);
        assert_sorted_disjoint(&free)?;
    }
}

// ---------------------------------------------------------------------------
// Property 3: Input order does not matter
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn output_independent_of_input_order(
        busy in arb_busy_list(),
        window in arb_window(),
        policy in arb_policy(),
    ) {
        let mut reversed = busy.clone();
        reversed.reverse();

        let forward = find_free_intervals_with(&busy, &window, policy);
        let backward = find_free_intervals_with(&reversed, &window, policy);
        prop_assert_eq!(forward, backward);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Empty input yields empty output
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn empty_input_yields_empty_output(window in arb_window(), policy in arb_policy()) {
        prop_assert!(find_free_intervals_with(&[], &window, policy).is_empty());
    }
}

// ---------------------------------------------------------------------------
// Property 5: With merging, no free interval intersects a busy interval
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn merged_output_never_overlaps_busy_time(
        busy in arb_busy_list(),
        window in arb_window(),
        split in any::<bool>(),
    ) {
        let mut policy = GapPolicy::default().merge_overlaps();
        if split {
            policy = policy.split_by_day();
        }

        let free = find_free_intervals_with(&busy, &window, policy);
        for interval in &free {
            for b in &busy {
                prop_assert!(
                    !(interval.start < b.end && b.start < interval.end),
                    "free {:?} overlaps busy {:?}",
                    interval,
                    b
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: Split-by-day pieces stay inside one day's bounds
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn split_pieces_respect_daily_bounds(
        busy in arb_busy_list(),
        window in arb_window(),
        merge in any::<bool>(),
    ) {
        let mut policy = GapPolicy::default().split_by_day();
        if merge {
            policy = policy.merge_overlaps();
        }

        let free = find_free_intervals_with(&busy, &window, policy);
        for interval in &free {
            let day = interval.start.date();
            prop_assert_eq!(interval.end.date(), day);
            prop_assert!(window.contains_date(day));
            prop_assert!(interval.start.time() >= window.earliest_time);
            prop_assert!(interval.end.time() <= window.latest_time);
        }
    }
}
