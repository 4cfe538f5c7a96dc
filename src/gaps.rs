//! Gap annotation for rendered event lists.
//!
//! Events on the same or adjacent days read as one cluster; a jump of
//! more than a day gets a single separator line on each side of the
//! cluster rather than one per adjacent pair.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::event::Event;

/// One output line: an event, or a separator between date clusters.
/// The separator carries no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Event(Event),
    Gap,
}

/// Which end of an event's date range defines adjacency.
#[derive(Debug, Clone, Copy)]
pub enum DateField {
    Start,
    #[allow(dead_code)]
    End,
}

impl DateField {
    fn of(self, event: &Event) -> NaiveDate {
        match self {
            DateField::Start => event.start,
            DateField::End => event.end,
        }
    }
}

/// Insert a `Row::Gap` on each side of every run of date-adjacent events.
///
/// Two consecutive events are adjacent when their selected dates are at
/// most one day apart; adjacent pairs merge transitively into runs. Rows
/// that are already gaps pass through untouched and break any run.
pub fn add_gaps(rows: Vec<Row>, field: DateField) -> Vec<Row> {
    let mut runs: Vec<[usize; 2]> = Vec::new();
    for index in 0..rows.len().saturating_sub(1) {
        let (Row::Event(first), Row::Event(second)) = (&rows[index], &rows[index + 1]) else {
            continue;
        };
        if (field.of(second) - field.of(first)).num_days() <= 1 {
            match runs.last_mut() {
                Some(run) if run[1] == index => run[1] = index + 1,
                _ => runs.push([index, index + 1]),
            }
        }
    }

    // A run needs no marker on a side that starts/ends the list or that
    // already borders a gap row.
    let mut breaks = HashSet::new();
    for [lo, hi] in &runs {
        if *lo > 0 && matches!(rows[lo - 1], Row::Event(_)) {
            breaks.insert(*lo);
        }
        if hi + 1 < rows.len() && matches!(rows[hi + 1], Row::Event(_)) {
            breaks.insert(hi + 1);
        }
    }

    let mut annotated = Vec::with_capacity(rows.len() + breaks.len());
    for (index, row) in rows.into_iter().enumerate() {
        if breaks.contains(&index) {
            annotated.push(Row::Gap);
        }
        annotated.push(row);
    }
    annotated
}
