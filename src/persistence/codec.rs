use crate::domain::{Category, TaskId};
use crate::error::StoreError;
use crate::persistence::files::atomic_write;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Persisted task record. Hierarchy is carried by `parent_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    pub id: TaskId,
    pub category: Category,
    pub title: String,
    /// Minutes
    pub time_required: i64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<TaskId>,
}

/// Persisted log record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLog {
    pub task_id: TaskId,
    /// Minutes
    pub duration: i64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Local>,
}

/// The whole on-disk document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub tasks: Vec<RawTask>,
    #[serde(default)]
    pub logs: Vec<RawLog>,
}

/// Read and decode the document at `path`
pub fn load<P: AsRef<Path>>(path: P) -> Result<RawDocument, StoreError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = serde_json::from_str(&text).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded document");
    Ok(doc)
}

/// Encode `doc` and replace the file at `path`
pub fn store<P: AsRef<Path>>(path: P, doc: &RawDocument) -> Result<(), StoreError> {
    let path = path.as_ref();
    let write_error = |source: anyhow::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    let json = serde_json::to_string_pretty(doc).map_err(|e| write_error(e.into()))?;
    atomic_write(path, &json).map_err(write_error)?;
    tracing::debug!(
        path = %path.display(),
        tasks = doc.tasks.len(),
        logs = doc.logs.len(),
        "stored document"
    );
    Ok(())
}

/// Local timestamps as "YYYY-MM-DD HH:MM:SS". Reading also accepts the
/// unpadded variant ("2021-3-5 9:7:3") and RFC 3339.
pub mod timestamp {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn format(value: &DateTime<Local>) -> String {
        value.format(FORMAT).to_string()
    }

    pub fn parse(text: &str) -> Option<DateTime<Local>> {
        let text = text.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return Some(parsed.with_timezone(&Local));
        }
        let naive = NaiveDateTime::parse_from_str(text, FORMAT).ok()?;
        Local.from_local_datetime(&naive).earliest()
    }

    pub fn serialize<S: Serializer>(
        value: &DateTime<Local>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Local>, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
  "tasks": [
    { "id": 1, "category": "DAILY", "title": "Read", "timeRequired": 30, "createdAt": "2024-05-01 08:00:00" },
    { "id": 2, "category": "LONG_TERM", "title": "Thesis", "timeRequired": 600, "createdAt": "2024-5-1 9:5:3" }
  ],
  "logs": [
    { "taskId": 1, "duration": 20, "createdAt": "2024-05-02T08:00:00+00:00" }
  ]
}"#;

    #[test]
    fn test_load_sample_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timebox.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let doc = load(&path).unwrap();
        assert_eq!(doc.tasks.len(), 2);
        assert_eq!(doc.tasks[1].category, Category::Other);
        assert_eq!(doc.tasks[1].parent_id, None);
        assert_eq!(
            doc.tasks[1].created_at,
            Local.with_ymd_and_hms(2024, 5, 1, 9, 5, 3).single().unwrap()
        );
        assert_eq!(doc.logs[0].duration, 20);
    }

    #[test]
    fn test_store_then_load_preserves_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timebox.json");
        let created = Local.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).single().unwrap();
        let doc = RawDocument {
            tasks: vec![
                RawTask {
                    id: 1,
                    category: Category::Weekly,
                    title: "Gym".to_string(),
                    time_required: 0,
                    created_at: created,
                    parent_id: None,
                },
                RawTask {
                    id: 2,
                    category: Category::Weekly,
                    title: "Legs".to_string(),
                    time_required: 45,
                    created_at: created,
                    parent_id: Some(1),
                },
            ],
            logs: vec![RawLog {
                task_id: 2,
                duration: 40,
                created_at: created,
            }],
        };

        store(&path, &doc).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"createdAt\": \"2024-05-01 08:00:00\""));
        assert!(text.contains("\"parentId\": 1"));
        assert!(text.contains("\"timeRequired\": 45"));

        assert_eq!(load(&path).unwrap(), doc);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let err = load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
        assert!(err.is_read_error());
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timebox.json");

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load(&path).unwrap_err(), StoreError::Parse { .. }));

        std::fs::write(
            &path,
            r#"{"tasks":[{"id":1,"category":"YEARLY","title":"x","timeRequired":1,"createdAt":"2024-01-01 00:00:00"}],"logs":[]}"#,
        )
        .unwrap();
        assert!(matches!(load(&path).unwrap_err(), StoreError::Parse { .. }));
    }

    #[test]
    fn test_timestamp_parse_variants() {
        let expected = Local.with_ymd_and_hms(2021, 3, 5, 9, 7, 3).single().unwrap();
        assert_eq!(timestamp::parse("2021-03-05 09:07:03"), Some(expected));
        assert_eq!(timestamp::parse("2021-3-5 9:7:3"), Some(expected));
        assert!(timestamp::parse("yesterday").is_none());
        assert_eq!(timestamp::format(&expected), "2021-03-05 09:07:03");
    }
}
