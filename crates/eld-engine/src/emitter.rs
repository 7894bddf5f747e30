//! Interval emission: drafts → final log rows.
//!
//! # Responsibilities
//!
//! 1. **Driving buffer**: contiguous driving drafts with the same label are
//!    merged into one run and written out in rows of exactly
//!    `driving_flush_minutes`.  Whatever is left is written when a
//!    non-driving draft arrives or when the emitter is flushed.
//! 2. **Midnight split**: every row is cut at each local midnight it
//!    crosses.  The piece before the cut ends at [`END_OF_DAY`]; the piece
//!    after starts at [`MIDNIGHT`].
//! 3. **Overlap guard**: a piece that intersects a row already recorded for
//!    the same date is dropped, logged at `warn`, and kept in
//!    [`dropped`][IntervalEmitter::dropped] so the caller can report it.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta};
use eld_core::{DutyStatus, END_OF_DAY, GeoPoint, MIDNIGHT, Polyline};
use tracing::warn;

use crate::{Draft, DutyInterval, Pace, TripContext};

// ── Driving run ───────────────────────────────────────────────────────────────

/// Buffered driving not yet written as rows.
#[derive(Debug)]
struct DrivingRun {
    label:    String,
    /// Start of the first unwritten second.
    start:    DateTime<FixedOffset>,
    /// Drafts overlapping `[start, end]`, in order.
    segments: Vec<Draft>,
}

impl DrivingRun {
    fn end(&self) -> DateTime<FixedOffset> {
        self.segments.last().map_or(self.start, |s| s.end)
    }

    /// Odometer at instant `t`, following the route pace inside the draft
    /// containing it.
    fn odometer_at(&self, t: DateTime<FixedOffset>, pace: &Pace) -> f64 {
        for seg in &self.segments {
            if t <= seg.end {
                let secs = (t - seg.start).num_milliseconds().max(0) as f64 / 1_000.0;
                return pace.miles_after(seg.start_miles, secs).min(seg.end_miles);
            }
        }
        self.segments.last().map_or(0.0, |s| s.end_miles)
    }

    /// Forget everything before `cut`.
    fn advance_to(&mut self, cut: DateTime<FixedOffset>) {
        self.segments.retain(|s| s.end > cut);
        self.start = cut;
    }
}

// ── IntervalEmitter ───────────────────────────────────────────────────────────

pub struct IntervalEmitter<'a> {
    flush_secs:  i64,
    total_miles: f64,
    pace:        &'a Pace,
    path:        Option<&'a Polyline>,
    run:         Option<DrivingRun>,
    accepted:    Vec<DutyInterval>,
    dropped:     Vec<DutyInterval>,
    /// Recorded `(start, end)` spans per date, for the overlap guard.
    by_date:     BTreeMap<NaiveDate, Vec<(NaiveTime, NaiveTime)>>,
}

impl<'a> IntervalEmitter<'a> {
    pub fn new(ctx: &TripContext<'a>) -> Self {
        Self {
            flush_secs:  ctx.policy.driving_flush_secs().max(1),
            total_miles: ctx.total_distance(),
            pace:        ctx.pace,
            path:        ctx.input.path.as_ref(),
            run:         None,
            accepted:    Vec::new(),
            dropped:     Vec::new(),
            by_date:     BTreeMap::new(),
        }
    }

    /// Rows accepted so far, in emission order.
    pub fn accepted(&self) -> &[DutyInterval] {
        &self.accepted
    }

    /// Rows rejected by the overlap guard, in emission order.
    pub fn dropped(&self) -> &[DutyInterval] {
        &self.dropped
    }

    /// Feed one draft.  Empty drafts are ignored.
    pub fn push(&mut self, draft: Draft) {
        if draft.end <= draft.start {
            return;
        }
        if draft.status == DutyStatus::Driving {
            self.push_driving(draft);
        } else {
            self.flush();
            let marker = draft.end_miles;
            self.record_span(draft.start, draft.end, draft.status, &draft.label, |_| marker);
        }
    }

    /// Write out any buffered driving.
    pub fn flush(&mut self) {
        let Some(run) = self.run.take() else { return };
        let pace = self.pace;
        let end = run.end();
        if end > run.start {
            self.record_span(run.start, end, DutyStatus::Driving, &run.label, |t| run.odometer_at(t, pace));
        }
    }

    /// Flush and return `(accepted, dropped)`, accepted sorted by
    /// `(date, start_time)`.
    pub fn finish(mut self) -> (Vec<DutyInterval>, Vec<DutyInterval>) {
        self.flush();
        let mut accepted = self.accepted;
        accepted.sort_by(|a, b| (a.date, a.start_time).cmp(&(b.date, b.start_time)));
        (accepted, self.dropped)
    }

    fn push_driving(&mut self, draft: Draft) {
        let extends = self
            .run
            .as_ref()
            .is_some_and(|run| run.label == draft.label && run.end() == draft.start);
        if !extends {
            self.flush();
            self.run = Some(DrivingRun {
                label:    draft.label.clone(),
                start:    draft.start,
                segments: Vec::new(),
            });
        }

        let Some(mut run) = self.run.take() else { return };
        run.segments.push(draft);
        let pace = self.pace;

        // Write every complete row; keep the remainder buffered.
        while (run.end() - run.start).num_seconds() >= self.flush_secs {
            let cut = run.start + TimeDelta::seconds(self.flush_secs);
            self.record_span(run.start, cut, DutyStatus::Driving, &run.label, |t| run.odometer_at(t, pace));
            run.advance_to(cut);
        }
        if run.end() > run.start {
            self.run = Some(run);
        }
    }

    /// Split `[start, end)` at local midnights and record each piece.
    ///
    /// `marker_at` gives the odometer at a piece's end instant.
    fn record_span(
        &mut self,
        start:     DateTime<FixedOffset>,
        end:       DateTime<FixedOffset>,
        status:    DutyStatus,
        label:     &str,
        marker_at: impl Fn(DateTime<FixedOffset>) -> f64,
    ) {
        let local_start = start.naive_local();
        let local_end = end.naive_local();
        let mut cursor = local_start;

        while cursor < local_end {
            let next_midnight = cursor.date().succ_opt().map(|d| d.and_time(MIDNIGHT));
            let (piece_end, end_time) = match next_midnight {
                Some(midnight) if midnight <= local_end => (midnight, END_OF_DAY),
                _ => (local_end, local_end.time()),
            };

            let marker = marker_at(start + (piece_end - local_start));
            let piece = DutyInterval {
                date:                  cursor.date(),
                start_time:            cursor.time(),
                end_time,
                status,
                label:                 label.to_owned(),
                distance_marker_miles: marker,
                position:              self.position_at(marker),
            };
            self.record(piece);
            cursor = piece_end;
        }
    }

    fn position_at(&self, marker: f64) -> Option<GeoPoint> {
        let fraction = if self.total_miles > 0.0 { marker / self.total_miles } else { 0.0 };
        self.path.and_then(|path| path.point_at_fraction(fraction))
    }

    fn record(&mut self, piece: DutyInterval) {
        let spans = self.by_date.entry(piece.date).or_default();
        let overlaps = spans
            .iter()
            .any(|&(s, e)| piece.start_time < e && s < piece.end_time);
        if overlaps {
            warn!(
                date = %piece.date,
                start = %piece.start_time,
                end = %piece.end_time,
                label = %piece.label,
                "dropping interval that overlaps a recorded one"
            );
            self.dropped.push(piece);
            return;
        }
        spans.push((piece.start_time, piece.end_time));
        self.accepted.push(piece);
    }
}
