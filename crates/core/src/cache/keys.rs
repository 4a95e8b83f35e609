use uuid::Uuid;

use crate::record::RecordKind;

/// Returns the cache key for a single record.
pub fn record_key(kind: RecordKind, id: Uuid) -> String {
    format!("record:{}:{}", kind, id)
}

/// Returns the cache key for a list of records, optionally scoped to a parent.
pub fn list_key(kind: RecordKind, parent_id: Option<Uuid>) -> String {
    match parent_id {
        Some(parent_id) => format!("list:{}:{}", kind, parent_id),
        None => format!("list:{}:all", kind),
    }
}

/// Returns the pattern matching every cached list of a kind.
pub fn list_pattern(kind: RecordKind) -> String {
    format!("list:{}:*", kind)
}

/// Returns the pub/sub channel name for change events of a kind.
pub fn events_channel(kind: RecordKind) -> String {
    format!("events:{}", kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::pattern_matches;

    fn fixed_id() -> Uuid {
        Uuid::parse_str("bbbbbbbb-bbbb-bbbb-bbbb-bbbbbbbbbbbb").unwrap()
    }

    #[test]
    fn test_record_key() {
        assert_eq!(
            record_key(RecordKind::FillUp, fixed_id()),
            "record:fill_up:bbbbbbbb-bbbb-bbbb-bbbb-bbbbbbbbbbbb"
        );
    }

    #[test]
    fn test_list_keys() {
        assert_eq!(list_key(RecordKind::Trip, None), "list:trip:all");
        assert_eq!(
            list_key(RecordKind::Trip, Some(fixed_id())),
            "list:trip:bbbbbbbb-bbbb-bbbb-bbbb-bbbbbbbbbbbb"
        );
    }

    #[test]
    fn test_list_pattern_covers_all_list_keys_of_kind() {
        let pattern = list_pattern(RecordKind::TimeEntry);

        assert!(pattern_matches(&pattern, &list_key(RecordKind::TimeEntry, None)));
        assert!(pattern_matches(
            &pattern,
            &list_key(RecordKind::TimeEntry, Some(fixed_id()))
        ));
        assert!(!pattern_matches(&pattern, &list_key(RecordKind::Project, None)));
        assert!(!pattern_matches(
            &pattern,
            &record_key(RecordKind::TimeEntry, fixed_id())
        ));
    }

    #[test]
    fn test_events_channel() {
        assert_eq!(
            events_channel(RecordKind::MaintenanceTask),
            "events:maintenance_task"
        );
    }
}
