use dioxus::prelude::*;
use store::{Entity, RecordId};

use crate::clock::current_time;

/// Oldest entries are dropped past this many.
const MAX_ENTRIES: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

/// The record kind (and record, when known) an entry is about.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Subject {
    pub collection: &'static str,
    pub noun: &'static str,
    pub id: Option<RecordId>,
}

impl Subject {
    pub fn of<T: Entity>(id: Option<RecordId>) -> Self {
        Self {
            collection: T::COLLECTION,
            noun: T::NOUN,
            id,
        }
    }

    pub fn label(&self) -> String {
        match self.id {
            Some(id) => format!("{} #{id}", self.noun),
            None => self.noun.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub subject: Option<Subject>,
    pub message: String,
}

/// Which entries the panel shows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LogFilter {
    #[default]
    All,
    Errors,
    /// Entries about one collection, e.g. `"appointments"`.
    Collection(&'static str),
}

impl LogFilter {
    pub fn matches(self, entry: &LogEntry) -> bool {
        match self {
            LogFilter::All => true,
            LogFilter::Errors => entry.level == LogLevel::Error,
            LogFilter::Collection(name) => entry.subject.is_some_and(|s| s.collection == name),
        }
    }
}

/// Session-local record of what the user did and what failed.
#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    pub entries: Vec<LogEntry>,
    pub visible: bool,
    pub filter: LogFilter,
}

impl ActivityLog {
    pub fn push(&mut self, level: LogLevel, subject: Option<Subject>, message: &str, timestamp: String) {
        self.entries.push(LogEntry {
            timestamp,
            level,
            subject,
            message: message.to_string(),
        });
        if self.entries.len() > MAX_ENTRIES {
            let excess = self.entries.len() - MAX_ENTRIES;
            self.entries.drain(..excess);
        }
    }

    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|e| e.level == LogLevel::Error).count()
    }

    /// Entries passing the current filter, newest first.
    pub fn shown(&self) -> Vec<LogEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| self.filter.matches(e))
            .cloned()
            .collect()
    }

    /// Collections mentioned in the log with their entry counts, in order of
    /// first appearance.
    pub fn collections(&self) -> Vec<(&'static str, usize)> {
        let mut seen: Vec<(&'static str, usize)> = Vec::new();
        for subject in self.entries.iter().filter_map(|e| e.subject) {
            match seen.iter_mut().find(|(name, _)| *name == subject.collection) {
                Some((_, count)) => *count += 1,
                None => seen.push((subject.collection, 1)),
            }
        }
        seen
    }

    /// Drop entries matching the current filter and fall back to showing all.
    pub fn clear_shown(&mut self) {
        let filter = self.filter;
        self.entries.retain(|e| !filter.matches(e));
        self.filter = LogFilter::All;
    }
}

pub fn use_activity_log() -> Signal<ActivityLog> {
    use_context::<Signal<ActivityLog>>()
}

fn record(log: &mut Signal<ActivityLog>, level: LogLevel, subject: Option<Subject>, message: &str) {
    let target = subject.map(|s| s.label()).unwrap_or_default();
    match level {
        LogLevel::Info | LogLevel::Success => tracing::info!(target: "activity", subject = %target, "{}", message),
        LogLevel::Warning => tracing::warn!(target: "activity", subject = %target, "{}", message),
        LogLevel::Error => tracing::error!(target: "activity", subject = %target, "{}", message),
    }
    log.write().push(level, subject, message, current_time());
}

/// Append to the activity log and mirror the line to `tracing`.
pub fn log_activity(log: &mut Signal<ActivityLog>, level: LogLevel, message: &str) {
    record(log, level, None, message);
}

/// Like [`log_activity`], tagged with the record kind so the panel can filter.
pub fn log_entity_activity<T: Entity>(
    log: &mut Signal<ActivityLog>,
    level: LogLevel,
    id: Option<RecordId>,
    message: &str,
) {
    record(log, level, Some(Subject::of::<T>(id)), message);
}

#[cfg(test)]
mod tests {
    use store::{Appointment, Patient};

    use super::*;

    fn sample() -> ActivityLog {
        let mut log = ActivityLog::default();
        log.push(LogLevel::Info, None, "Using clinic backend", "09:59:59".into());
        log.push(LogLevel::Success, Some(Subject::of::<Patient>(None)), "Created patient", "10:00:00".into());
        log.push(
            LogLevel::Error,
            Some(Subject::of::<Appointment>(Some(42))),
            "Failed to delete appointment",
            "10:00:01".into(),
        );
        log.push(
            LogLevel::Success,
            Some(Subject::of::<Appointment>(Some(42))),
            "Deleted appointment 42",
            "10:00:02".into(),
        );
        log
    }

    #[test]
    fn test_log_is_capped() {
        let mut log = ActivityLog::default();
        for i in 0..(MAX_ENTRIES + 5) {
            log.push(LogLevel::Info, None, &format!("entry {i}"), "00:00:00".into());
        }
        assert_eq!(log.entries.len(), MAX_ENTRIES);
        assert_eq!(log.entries[0].message, "entry 5");
    }

    #[test]
    fn test_error_count() {
        assert_eq!(sample().error_count(), 1);
    }

    #[test]
    fn test_filter_by_collection_newest_first() {
        let mut log = sample();
        log.filter = LogFilter::Collection("appointments");
        let shown: Vec<String> = log.shown().into_iter().map(|e| e.message).collect();
        assert_eq!(shown, vec!["Deleted appointment 42", "Failed to delete appointment"]);

        log.filter = LogFilter::Errors;
        assert_eq!(log.shown().len(), 1);

        log.filter = LogFilter::All;
        assert_eq!(log.shown()[0].message, "Deleted appointment 42");
        assert_eq!(log.shown().len(), 4);
    }

    #[test]
    fn test_collections_counted_in_order_of_appearance() {
        assert_eq!(sample().collections(), vec![("patients", 1), ("appointments", 2)]);
    }

    #[test]
    fn test_clear_shown_keeps_other_entries() {
        let mut log = sample();
        log.filter = LogFilter::Collection("appointments");
        log.clear_shown();
        assert_eq!(log.filter, LogFilter::All);
        assert_eq!(log.entries.len(), 2);
        assert!(log.entries.iter().all(|e| e.subject.map(|s| s.collection) != Some("appointments")));
    }

    #[test]
    fn test_subject_label() {
        assert_eq!(Subject::of::<Appointment>(Some(42)).label(), "appointment #42");
        assert_eq!(Subject::of::<Patient>(None).label(), "patient");
    }
}
