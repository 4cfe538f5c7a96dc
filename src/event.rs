//! Event extraction and the list pipeline.

use chrono::NaiveDate;

use crate::date::{self, DATE_PATTERN};
use crate::filter::SearchSpec;
use crate::menu::MenuAnchor;

/// One tournament event lifted from a menu anchor.
///
/// Constructed once per qualifying anchor and immutable afterwards.
/// A single-day tournament has `start == end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub series: String,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Turn one menu anchor into an event record.
///
/// Blank anchors and anchors without a date notation produce nothing —
/// that covers the series label anchors themselves. Anchors whose date
/// tokens fail to parse, or whose menu ancestry gave them no series
/// label, are skipped with a diagnostic; one bad anchor must not sink
/// the whole page.
pub fn parse_event_anchor(reference_year: i32, anchor: &MenuAnchor) -> Option<Event> {
    let text = anchor.text.trim();
    if text.is_empty() {
        return None;
    }
    let first = DATE_PATTERN.find(text)?;
    let dates = match date::resolve_range(reference_year, text) {
        Ok(dates) => dates,
        Err(err) => {
            log::warn!("skipping anchor {text:?}: {err}");
            return None;
        }
    };
    let start = *dates.first()?;
    let end = dates.get(1).copied().unwrap_or(start);

    let series = match &anchor.series {
        Some(series) => series.clone(),
        None => {
            log::warn!("skipping anchor {text:?}: no series label in menu ancestry");
            return None;
        }
    };

    Some(Event {
        series,
        name: text[..first.start()].trim().to_string(),
        start,
        end,
    })
}

/// Extract, filter, truncate and optionally sort the events of one page.
///
/// A negative `limit` means no limit; truncation is applied to the
/// filtered list before sorting. The sort is stable, ascending by
/// (start date, series, name).
pub fn find_events(
    reference_year: i32,
    anchors: &[MenuAnchor],
    limit: i64,
    spec: &SearchSpec,
    sort_by_date: bool,
) -> Vec<Event> {
    let mut events: Vec<Event> = anchors
        .iter()
        .filter_map(|anchor| parse_event_anchor(reference_year, anchor))
        .filter(|event| spec.matches(&[event.series.as_str(), event.name.as_str()]))
        .collect();
    if limit >= 0 {
        events.truncate(limit as usize);
    }
    if sort_by_date {
        events.sort_by(|a, b| (a.start, &a.series, &a.name).cmp(&(b.start, &b.series, &b.name)));
    }
    events
}

/// Drop events that ended before `today`. `today` is threaded in by the
/// caller so the pipeline stays deterministic.
pub fn drop_past(events: Vec<Event>, today: NaiveDate) -> Vec<Event> {
    events.into_iter().filter(|e| e.end >= today).collect()
}
