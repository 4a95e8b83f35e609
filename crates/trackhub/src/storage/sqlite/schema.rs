//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// SQL statement to create the document table and its indexes.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS records (
    kind TEXT NOT NULL,
    id TEXT NOT NULL,
    parent_id TEXT,
    body TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (kind, id)
);

CREATE INDEX IF NOT EXISTS idx_records_kind_parent ON records(kind, parent_id);
CREATE INDEX IF NOT EXISTS idx_records_kind_created ON records(kind, created_at);
"#;

pub const INSERT_RECORD: &str = r#"
INSERT INTO records (kind, id, parent_id, body, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

pub const SELECT_RECORD_BY_ID: &str = r#"
SELECT body
FROM records
WHERE kind = ?1 AND id = ?2
"#;

pub const SELECT_RECORDS_BY_KIND: &str = r#"
SELECT body
FROM records
WHERE kind = ?1
ORDER BY created_at ASC, id ASC
"#;

pub const SELECT_RECORDS_BY_PARENT: &str = r#"
SELECT body
FROM records
WHERE kind = ?1 AND parent_id = ?2
ORDER BY created_at ASC, id ASC
"#;

pub const UPDATE_RECORD: &str = r#"
UPDATE records
SET parent_id = ?3, body = ?4, updated_at = ?5
WHERE kind = ?1 AND id = ?2
"#;

pub const DELETE_RECORD: &str = r#"
DELETE FROM records
WHERE kind = ?1 AND id = ?2
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_valid_sql() {
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS records"));
        assert!(CREATE_TABLES.contains("PRIMARY KEY (kind, id)"));
        assert!(CREATE_TABLES.contains("records(kind, parent_id)"));
    }

    #[test]
    fn test_queries_are_scoped_by_kind() {
        for query in [
            INSERT_RECORD,
            SELECT_RECORD_BY_ID,
            SELECT_RECORDS_BY_KIND,
            SELECT_RECORDS_BY_PARENT,
            UPDATE_RECORD,
            DELETE_RECORD,
        ] {
            assert!(query.contains("kind"), "{query}");
        }
        assert!(SELECT_RECORDS_BY_KIND.contains("ORDER BY created_at"));
        assert!(SELECT_RECORDS_BY_PARENT.contains("parent_id = ?2"));
    }
}
