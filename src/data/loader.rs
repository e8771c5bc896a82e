use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::thread;

use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::ChunkReader;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{Dataset, Record};
use super::ordering::OrderingDescriptor;

// ---------------------------------------------------------------------------
// Sources: local paths or http(s) URLs
// ---------------------------------------------------------------------------

/// Where a resource is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl Source {
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            Source::Url(s.to_string())
        } else {
            Source::File(PathBuf::from(s))
        }
    }

    /// Lowercased file extension, or `""` when there is none.
    pub fn extension(&self) -> String {
        let ext = match self {
            Source::File(path) => path.extension().and_then(|e| e.to_str()).unwrap_or(""),
            Source::Url(url) => {
                let path = url.split(['?', '#']).next().unwrap_or("");
                let last = path.rsplit('/').next().unwrap_or("");
                last.rsplit_once('.').map_or("", |(_, ext)| ext)
            }
        };
        ext.to_ascii_lowercase()
    }

    fn read_bytes(&self) -> Result<Vec<u8>, LoadError> {
        match self {
            Source::File(path) => std::fs::read(path).map_err(|err| LoadError::Io {
                source_name: path.display().to_string(),
                err,
            }),
            Source::Url(url) => {
                let body = fetch_url(url)?.bytes().map_err(|err| LoadError::Http {
                    source_name: url.clone(),
                    err,
                })?;
                Ok(body.to_vec())
            }
        }
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::File(path.to_path_buf())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{url}"),
        }
    }
}

fn fetch_url(url: &str) -> Result<reqwest::blocking::Response, LoadError> {
    let response = reqwest::blocking::get(url).map_err(|err| LoadError::Http {
        source_name: url.to_string(),
        err,
    })?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            source_name: url.to_string(),
            status,
        });
    }
    Ok(response)
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Everything the viewer needs from its two resources.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub dataset: Dataset,
    /// `None` when no ordering was requested or it could not be loaded.
    pub ordering: Option<OrderingDescriptor>,
}

/// Fetch the records and the optional ordering concurrently.
///
/// Only a records failure is an error; an ordering failure is logged and
/// reported as `ordering: None`.
pub fn load_all(records: &Source, ordering: Option<&Source>) -> Result<Loaded, LoadError> {
    thread::scope(|scope| {
        let ordering_task = ordering.map(|src| scope.spawn(move || load_ordering_or_default(src)));
        let dataset = load_records(records);
        let ordering = match ordering_task {
            Some(task) => task.join().unwrap_or_else(|_| {
                log::error!("Ordering loader panicked. Using default ordering.");
                None
            }),
            None => None,
        };
        Ok(Loaded {
            dataset: dataset?,
            ordering,
        })
    })
}

/// Load the bibliography. Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "Author": "...", "Year": "2020", ... }, ...]` (also the default)
/// * `.csv`     – header row with field names, one record per row
/// * `.parquet` – any columns, every value rendered as text
pub fn load_records(source: &Source) -> Result<Dataset, LoadError> {
    let records = match source.extension().as_str() {
        "json" | "" => parse_json_records(&source.read_bytes()?)?,
        "csv" => parse_csv_records(&source.read_bytes()?)?,
        "parquet" | "pq" => load_parquet(source)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };
    log::info!("Loaded {} records from {source}", records.len());
    Ok(Dataset::new(records))
}

/// Load and parse an ordering descriptor.
pub fn load_ordering(source: &Source) -> Result<OrderingDescriptor, LoadError> {
    let bytes = source.read_bytes()?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn load_ordering_or_default(source: &Source) -> Option<OrderingDescriptor> {
    match load_ordering(source) {
        Ok(desc) => Some(desc),
        Err(e) => {
            log::warn!("Could not load ordering from {source}: {e}. Using default ordering.");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Parse a records-oriented JSON array. Non-string scalars are kept as
/// their JSON text; `null` marks the field as absent.
pub fn parse_json_records(bytes: &[u8]) -> Result<Vec<Record>, LoadError> {
    let root: JsonValue = serde_json::from_slice(bytes)?;
    let rows = root.as_array().ok_or(LoadError::NotAnArray)?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let obj = row.as_object().ok_or(LoadError::NotAnObject(i))?;
            let fields: BTreeMap<String, String> = obj
                .iter()
                .filter_map(|(key, val)| json_to_text(val).map(|text| (key.clone(), text)))
                .collect();
            Ok(Record { fields })
        })
        .collect()
}

fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Null => None,
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with field names. Empty cells are absent fields.
pub fn parse_csv_records(bytes: &[u8]) -> Result<Vec<Record>, LoadError> {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let fields = headers
            .iter()
            .zip(row.iter())
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        records.push(Record { fields });
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

fn load_parquet(source: &Source) -> Result<Vec<Record>, LoadError> {
    match source {
        Source::File(path) => {
            let file = std::fs::File::open(path).map_err(|err| LoadError::Io {
                source_name: path.display().to_string(),
                err,
            })?;
            read_parquet(file)
        }
        Source::Url(url) => {
            let body = fetch_url(url)?.bytes().map_err(|err| LoadError::Http {
                source_name: url.clone(),
                err,
            })?;
            read_parquet(body)
        }
    }
}

/// Read every row group; each column is cast to text, nulls become absent fields.
fn read_parquet<R: ChunkReader + 'static>(reader: R) -> Result<Vec<Record>, LoadError> {
    let batches = ParquetRecordBatchReaderBuilder::try_new(reader)?.build()?;

    let mut records = Vec::new();
    for batch in batches {
        let batch = batch?;
        let schema = batch.schema();

        let mut text_columns = Vec::with_capacity(batch.num_columns());
        for (field, column) in schema.fields().iter().zip(batch.columns()) {
            text_columns.push((field.name().clone(), cast(column, &DataType::Utf8)?));
        }

        for row in 0..batch.num_rows() {
            let mut fields = BTreeMap::new();
            for (name, column) in &text_columns {
                if column.is_null(row) {
                    continue;
                }
                fields.insert(name.clone(), column.as_string::<i32>().value(row).to_string());
            }
            records.push(Record { fields });
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_source_parse_and_extension() {
        assert_eq!(Source::parse("data.json"), Source::File(PathBuf::from("data.json")));
        assert_eq!(Source::parse("https://example.org/papers.CSV?v=2").extension(), "csv");
        assert_eq!(Source::parse("http://example.org/api/papers").extension(), "");
        assert_eq!(Source::parse("lib/papers.parquet").extension(), "parquet");
    }

    #[test]
    fn test_json_records_text_and_null() {
        let records = parse_json_records(
            br#"[{"Author": "Lee", "Year": 2020, "Open": true, "Venue": null}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Year"), Some("2020"));
        assert_eq!(records[0].get("Open"), Some("true"));
        assert_eq!(records[0].get("Venue"), None);
    }

    #[test]
    fn test_json_rejects_non_array() {
        assert!(matches!(parse_json_records(br#"{"Author": "Lee"}"#), Err(LoadError::NotAnArray)));
        assert!(matches!(parse_json_records(br#"[1]"#), Err(LoadError::NotAnObject(0))));
        assert!(matches!(parse_json_records(b"not json"), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_csv_records() {
        let records = parse_csv_records(b"Author,Year,Venue\nLee,2020,CHI\nKim,2019,\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Venue"), Some("CHI"));
        assert_eq!(records[1].get("Venue"), None);
        assert_eq!(records[1].year(), "2019");
    }

    #[test]
    fn test_load_records_from_file() {
        let file = write_temp(".json", r#"[{"Author": "Lee"}, {"Author": "Kim"}]"#);
        let ds = load_records(&Source::from(file.path())).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.all()[1].author(), "Kim");
    }

    #[test]
    fn test_load_records_unsupported_extension() {
        let file = write_temp(".xlsx", "");
        assert!(matches!(
            load_records(&Source::from(file.path())),
            Err(LoadError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn test_load_parquet_records() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Author", DataType::Utf8, true),
            Field::new("Year", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("Lee"), None])),
                Arc::new(Int64Array::from(vec![2020, 2019])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.as_file().try_clone().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_records(&Source::from(file.path())).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.all()[0].author(), "Lee");
        assert_eq!(ds.all()[0].year(), "2020");
        assert_eq!(ds.all()[1].get("Author"), None);
    }

    #[test]
    fn test_load_all_with_ordering() {
        let data = write_temp(".json", r#"[{"Author": "Lee", "Venue": "CHI"}]"#);
        let ordering = write_temp(
            ".json",
            r#"{"keysOrder": ["Venue"], "groups": [{"name": "", "keys": ["Venue"]}], "buttonsOrder": {"Venue": ["CHI"]}}"#,
        );
        let loaded = load_all(&Source::from(data.path()), Some(&Source::from(ordering.path()))).unwrap();
        assert_eq!(loaded.dataset.len(), 1);
        let desc = loaded.ordering.unwrap();
        assert_eq!(desc.keys_order, vec!["Venue"]);
    }

    #[test]
    fn test_ordering_failure_falls_back() {
        let data = write_temp(".json", r#"[{"Author": "Lee"}]"#);
        let bad = write_temp(".json", "{ not json");
        let missing = Source::File(PathBuf::from("/definitely/not/here/ordering.json"));

        let loaded = load_all(&Source::from(data.path()), Some(&Source::from(bad.path()))).unwrap();
        assert!(loaded.ordering.is_none());
        let loaded = load_all(&Source::from(data.path()), Some(&missing)).unwrap();
        assert!(loaded.ordering.is_none());
        let loaded = load_all(&Source::from(data.path()), None).unwrap();
        assert!(loaded.ordering.is_none());
    }

    #[test]
    fn test_records_failure_is_fatal() {
        let missing = Source::File(PathBuf::from("/definitely/not/here/data.json"));
        assert!(matches!(load_all(&missing, None), Err(LoadError::Io { .. })));
    }
}
