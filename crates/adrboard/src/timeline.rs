//! Timeline of ADR status changes.

use std::cmp::Reverse;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::adr::{TimelineEvent, TimelineEventType};

/// Events that share a calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGroup<'a> {
    /// Month key, `YYYY-MM`.
    pub key: String,
    /// Display label, e.g. "March 2024".
    pub label: String,
    /// Events in the month, newest first.
    pub events: Vec<&'a TimelineEvent>,
}

/// Keep events of `kind` (all events when `None`), newest first.
///
/// Events on the same date keep their input order.
#[must_use]
pub fn filter_events(
    events: &[TimelineEvent],
    kind: Option<TimelineEventType>,
) -> Vec<&TimelineEvent> {
    let mut selected: Vec<_> = events
        .iter()
        .filter(|event| kind.map_or(true, |kind| event.kind == kind))
        .collect();
    selected.sort_by_key(|event| Reverse(event.date));
    selected
}

/// Group already ordered events by month, preserving order.
#[must_use]
pub fn group_by_month<'a>(events: &[&'a TimelineEvent]) -> Vec<MonthGroup<'a>> {
    let mut groups: Vec<MonthGroup<'a>> = Vec::new();
    for &event in events {
        let key = month_key(event.date);
        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => group.events.push(event),
            None => groups.push(MonthGroup {
                label: month_label(event.date),
                key,
                events: vec![event],
            }),
        }
    }
    groups
}

/// `YYYY-MM` key for a date.
#[must_use]
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Long month label for a date, e.g. "January 2024".
#[must_use]
pub fn month_label(date: NaiveDate) -> String {
    format!("{} {}", date.format("%B"), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adr::fixtures::date;

    fn event(id: &str, kind: TimelineEventType, on: &str) -> TimelineEvent {
        TimelineEvent {
            id: id.to_string(),
            adr_id: "adr-001".to_string(),
            adr_title: "Title".to_string(),
            kind,
            date: date(on),
            description: String::new(),
        }
    }

    fn sample() -> Vec<TimelineEvent> {
        vec![
            event("e1", TimelineEventType::Created, "2024-01-05"),
            event("e2", TimelineEventType::Accepted, "2024-03-10"),
            event("e3", TimelineEventType::Updated, "2024-01-20"),
            event("e4", TimelineEventType::Accepted, "2024-03-10"),
        ]
    }

    fn ids(events: &[&TimelineEvent]) -> Vec<String> {
        events.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_filter_events_newest_first_stable() {
        let events = sample();
        let all = filter_events(&events, None);
        assert_eq!(ids(&all), vec!["e2", "e4", "e3", "e1"]);
    }

    #[test]
    fn test_filter_events_by_kind() {
        let events = sample();
        let accepted = filter_events(&events, Some(TimelineEventType::Accepted));
        assert_eq!(ids(&accepted), vec!["e2", "e4"]);
        assert!(filter_events(&events, Some(TimelineEventType::Deprecated)).is_empty());
    }

    #[test]
    fn test_group_by_month() {
        let events = sample();
        let ordered = filter_events(&events, None);
        let groups = group_by_month(&ordered);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "2024-03");
        assert_eq!(groups[0].label, "March 2024");
        assert_eq!(ids(&groups[0].events), vec!["e2", "e4"]);
        assert_eq!(groups[1].key, "2024-01");
        assert_eq!(ids(&groups[1].events), vec!["e3", "e1"]);
    }

    #[test]
    fn test_group_by_month_empty() {
        assert!(group_by_month(&[]).is_empty());
    }

    #[test]
    fn test_month_helpers() {
        assert_eq!(month_key(date("2023-09-07")), "2023-09");
        assert_eq!(month_label(date("2023-09-07")), "September 2023");
    }
}
