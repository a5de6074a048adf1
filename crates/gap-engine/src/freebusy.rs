//! Compute free intervals from busy calendar intervals.
//!
//! Sorts busy intervals by start time, then reports the gap before the first
//! interval (from the daily earliest bound), the gap between every consecutive
//! pair, and the gap after the last interval (to the daily latest bound). Gaps
//! shorter than the window's minimum length are dropped.
//!
//! By default overlapping busy intervals are left as-is and multi-day gaps are
//! reported whole. [`GapPolicy`] opts into merging overlaps and into splitting
//! gaps into per-day pieces clipped to the daily bounds.

use chrono::NaiveDateTime;

use crate::interval::{AvailabilityWindow, BusyInterval, FreeInterval};

type Span = (NaiveDateTime, NaiveDateTime);

/// What to do with busy intervals that overlap each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Sort only. A gap between two intervals that overlap is negative and
    /// never reported, but an interval nested inside a longer one still
    /// produces gaps on either side of it.
    #[default]
    Preserve,
    /// Coalesce overlapping or touching intervals into maximal busy spans first.
    Merge,
}

/// How gaps that cross midnight are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpanPolicy {
    /// Report the raw gap between two busy intervals, overnight hours included.
    #[default]
    Verbatim,
    /// Cut every gap into one piece per calendar day, each clipped to
    /// `[earliest_time, latest_time]` and restricted to the window's dates.
    SplitByDay,
}

/// Combined gap-computation policy. The default reproduces the plain
/// sort-and-step behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GapPolicy {
    pub overlap: OverlapPolicy,
    pub span: SpanPolicy,
}

impl GapPolicy {
    pub fn merge_overlaps(mut self) -> Self {
        self.overlap = OverlapPolicy::Merge;
        self
    }

    pub fn split_by_day(mut self) -> Self {
        self.span = SpanPolicy::SplitByDay;
        self
    }
}

/// Busy spans sorted by `(start, end)`. The sort is stable, so exact
/// duplicates keep their input order.
fn sorted_spans(busy: &[BusyInterval]) -> Vec<Span> {
    let mut spans: Vec<Span> = busy.iter().map(|b| (b.start, b.end)).collect();
    spans.sort_by_key(|&(start, end)| (start, end));
    spans
}

/// Merge overlapping or adjacent spans. Input must be sorted by start.
fn merge_busy_periods(spans: Vec<Span>) -> Vec<Span> {
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }
    merged
}

/// Candidate gaps in ascending order, before any length filtering.
fn candidate_gaps(spans: &[Span], window: &AvailabilityWindow) -> Vec<Span> {
    let (Some(&first), Some(&last)) = (spans.first(), spans.last()) else {
        return Vec::new();
    };

    let mut gaps = Vec::with_capacity(spans.len() + 1);

    // Leading gap: from the daily lower bound up to the first busy start.
    let first_day = first.0.date();
    if first_day >= window.start_date {
        gaps.push((window.day_open(first_day), first.0));
    }

    for pair in spans.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        if curr.0.date() >= window.start_date && prev.1.date() <= window.end_date {
            gaps.push((prev.1, curr.0));
        }
    }

    // Trailing gap: from the last busy end up to the daily upper bound.
    let last_day = last.1.date();
    if last_day <= window.end_date {
        gaps.push((last.1, window.day_close(last_day)));
    }

    gaps
}

/// Cut `[start, end)` at day boundaries, clip each day to the daily bounds,
/// and keep only days inside the window.
fn split_by_day(start: NaiveDateTime, end: NaiveDateTime, window: &AvailabilityWindow) -> Vec<Span> {
    let mut pieces = Vec::new();
    if end <= start {
        return pieces;
    }

    let mut day = start.date();
    while day <= end.date() {
        if window.contains_date(day) {
            let piece_start = start.max(window.day_open(day));
            let piece_end = end.min(window.day_close(day));
            if piece_start < piece_end {
                pieces.push((piece_start, piece_end));
            }
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    pieces
}

/// Find free intervals with the default [`GapPolicy`].
///
/// Busy intervals may be unsorted and may overlap. An empty input yields an
/// empty result: with nothing busy there is no anchor for a leading or
/// trailing gap, and the whole window is not synthesized as free.
///
/// The window is not validated here. Callers should run
/// [`AvailabilityWindow::validate`] first; an invalid window produces an
/// empty or meaningless result but never panics.
pub fn find_free_intervals(busy: &[BusyInterval], window: &AvailabilityWindow) -> Vec<FreeInterval> {
    find_free_intervals_with(busy, window, GapPolicy::default())
}

/// Find free intervals under an explicit [`GapPolicy`].
///
/// Returns intervals sorted by start, pairwise non-overlapping, each at least
/// `window.min_length` long (given a positive `min_length`).
pub fn find_free_intervals_with(
    busy: &[BusyInterval],
    window: &AvailabilityWindow,
    policy: GapPolicy,
) -> Vec<FreeInterval> {
    let mut spans = sorted_spans(busy);
    if policy.overlap == OverlapPolicy::Merge {
        spans = merge_busy_periods(spans);
    }

    let gaps = candidate_gaps(&spans, window);
    let gaps: Vec<Span> = match policy.span {
        SpanPolicy::Verbatim => gaps,
        SpanPolicy::SplitByDay => gaps
            .into_iter()
            .flat_map(|(start, end)| split_by_day(start, end, window))
            .collect(),
    };

    gaps.into_iter()
        .filter(|&(start, end)| end - start >= window.min_length)
        .map(|(start, end)| FreeInterval::between(start, end))
        .collect()
}

/// Find the earliest free interval under the given policy.
///
/// Delegates to [`find_free_intervals_with`] and returns its first result.
pub fn find_first_free_interval(
    busy: &[BusyInterval],
    window: &AvailabilityWindow,
    policy: GapPolicy,
) -> Option<FreeInterval> {
    find_free_intervals_with(busy, window, policy)
        .into_iter()
        .next()
}
