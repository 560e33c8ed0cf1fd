use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::ipc::reader::FileReader;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::{DataError, DataResult};
use super::hall_of_fame::extract_hof_enhancers;
use super::model::{columns, EnhancerDataset, MetadataRecord, MetadataValue, PeakRecord, RawTable};
use super::summary::IntegrityReport;

/// Metadata file name shipped with the dataset.
pub const DEFAULT_METADATA_FILE: &str = "Enhancer_and_experiment_metadata_1751579195077.feather";

/// Number of chunk families (`part1` … `part4`).
pub const DEFAULT_PARTS: usize = 4;

// ---------------------------------------------------------------------------
// Load configuration
// ---------------------------------------------------------------------------

/// Where the data files live.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadConfig {
    pub data_dir: PathBuf,
    /// Relative paths resolve against `data_dir`.
    pub metadata_file: PathBuf,
    pub parts: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            metadata_file: PathBuf::from(DEFAULT_METADATA_FILE),
            parts: DEFAULT_PARTS,
        }
    }
}

impl LoadConfig {
    pub fn metadata_path(&self) -> PathBuf {
        self.data_dir.join(&self.metadata_file)
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load peak chunks and metadata, then extract the Hall of Fame enhancers.
pub fn load_all(config: &LoadConfig) -> DataResult<EnhancerDataset> {
    log::info!("Loading data from {}", config.data_dir.display());

    let peaks = load_peak_data(&config.data_dir, config.parts)?;
    if peaks.is_empty() {
        return Err(DataError::EmptyPeakData);
    }

    let metadata = load_metadata(&config.metadata_path())?;
    let hof_enhancers = extract_hof_enhancers(&metadata, &peaks);

    log::info!(
        "Peak data: {} rows, metadata: {} records, Hall of Fame enhancers: {}",
        peaks.len(),
        metadata.len(),
        hof_enhancers.len()
    );
    IntegrityReport::validate(&peaks, &metadata).log();

    Ok(EnhancerDataset::new(
        peaks,
        metadata,
        hof_enhancers,
        config.data_dir.clone(),
    ))
}

// ---------------------------------------------------------------------------
// Peak chunks
// ---------------------------------------------------------------------------

/// Glob-style pattern of one chunk family, for messages.
pub fn chunk_pattern(part: usize) -> String {
    format!("part{part}*chunk*.csv")
}

/// Whether `name` matches `part{part}*chunk*.csv` (case-sensitive).
fn matches_chunk(name: &str, part: usize) -> bool {
    let Some(rest) = name.strip_prefix(&format!("part{part}")) else {
        return false;
    };
    rest.strip_suffix(".csv")
        .is_some_and(|body| body.contains("chunk"))
}

fn file_names(dir: &Path) -> DataResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Chunk files in load order: family by family, by name within a family.
pub fn discover_chunks(dir: &Path, parts: usize) -> DataResult<Vec<PathBuf>> {
    let names = file_names(dir)?;
    let mut chunks = Vec::new();
    for part in 1..=parts {
        let family: Vec<&String> = names.iter().filter(|n| matches_chunk(n, part)).collect();
        log::info!("Pattern {}: found {} files", chunk_pattern(part), family.len());
        chunks.extend(family.into_iter().map(|n| dir.join(n)));
    }
    Ok(chunks)
}

/// Read one chunk file.
pub fn load_chunk(path: &Path) -> DataResult<Vec<PeakRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize::<PeakRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Remove exact duplicate rows, keeping the first.  Returns the kept rows
/// and how many were dropped.
pub fn drop_duplicates(rows: Vec<PeakRecord>) -> (Vec<PeakRecord>, usize) {
    let keep: Vec<bool> = {
        let mut seen = HashSet::with_capacity(rows.len());
        rows.iter().map(|r| seen.insert(r.dedup_key())).collect()
    };
    let before = rows.len();
    let kept: Vec<PeakRecord> = rows
        .into_iter()
        .zip(keep)
        .filter_map(|(row, keep)| keep.then_some(row))
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}

/// Concatenate every chunk of `dir` into one de-duplicated table.
pub fn load_peak_data(dir: &Path, parts: usize) -> DataResult<Vec<PeakRecord>> {
    let chunks = discover_chunks(dir, parts)?;
    if chunks.is_empty() {
        let expected = (1..=parts).map(chunk_pattern).collect::<Vec<_>>().join(", ");
        let present = file_names(dir)?
            .into_iter()
            .filter(|n| n.ends_with(".csv"))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(DataError::NoChunks {
            dir: dir.to_path_buf(),
            expected,
            present,
        });
    }

    let mut rows = Vec::new();
    for chunk in &chunks {
        let chunk_rows = load_chunk(chunk)?;
        log::info!(
            "  Loaded {}: {} rows",
            chunk.file_name().and_then(|n| n.to_str()).unwrap_or("?"),
            chunk_rows.len()
        );
        rows.extend(chunk_rows);
    }
    log::info!("Combined {} chunks: {} total rows", chunks.len(), rows.len());

    let (rows, removed) = drop_duplicates(rows);
    if removed > 0 {
        log::info!("Removed {removed} duplicate rows");
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Load the enhancer/experiment metadata file.  Dispatch by extension:
///
/// * `.feather` / `.arrow` / `.ipc` – Arrow IPC file (what pandas `to_feather` writes)
/// * `.parquet` / `.pq`
/// * `.csv`
/// * `.json` – `[{ "Enhancer_ID": ..., ... }, ...]`
pub fn load_metadata(path: &Path) -> DataResult<Vec<MetadataRecord>> {
    log::info!("Looking for metadata at: {}", path.display());
    if !path.is_file() {
        return Err(DataError::MissingFile(path.to_path_buf()));
    }

    let mut table = read_table(path)?;
    log::info!("Loaded metadata: {} records", table.rows.len());

    let renamed = table.normalize_columns();
    log::debug!("Renamed columns: {renamed:?}");

    for required in [columns::ENHANCER_ID, columns::HALL_OF_FAME] {
        if !table.has_column(required) {
            return Err(DataError::MissingColumn(required.to_string()));
        }
    }

    Ok(table
        .rows
        .iter()
        .filter_map(MetadataRecord::from_row)
        .collect())
}

fn read_table(path: &Path) -> DataResult<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "feather" | "arrow" | "ipc" => read_ipc(path),
        "parquet" | "pq" => read_parquet(path),
        "csv" => read_csv(path),
        "json" => read_json(path),
        other => Err(DataError::UnsupportedFormat(other.to_string())),
    }
}

// -- Arrow / Parquet --

fn read_ipc(path: &Path) -> DataResult<RawTable> {
    let reader = FileReader::try_new(File::open(path)?, None)?;
    let mut table = RawTable::default();
    for batch in reader {
        append_batch(&mut table, &batch?)?;
    }
    Ok(table)
}

fn read_parquet(path: &Path) -> DataResult<RawTable> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(path)?)?.build()?;
    let mut table = RawTable::default();
    for batch in reader {
        append_batch(&mut table, &batch?)?;
    }
    Ok(table)
}

fn append_batch(table: &mut RawTable, batch: &RecordBatch) -> DataResult<()> {
    let schema = batch.schema();
    if table.columns.is_empty() {
        table.columns = schema.fields().iter().map(|f| f.name().clone()).collect();
    }

    let mut rows = vec![BTreeMap::new(); batch.num_rows()];
    for (field, column) in schema.fields().iter().zip(batch.columns()) {
        for (row, value) in rows.iter_mut().zip(column_values(column)?) {
            row.insert(field.name().clone(), value);
        }
    }
    table.rows.extend(rows);
    Ok(())
}

/// Convert one Arrow column into metadata cells.  Anything that is not a
/// plain boolean or number (dictionaries, dates, large strings, ...) is cast
/// to UTF-8 text.
fn column_values(column: &ArrayRef) -> DataResult<Vec<MetadataValue>> {
    let n = column.len();
    let values = match column.data_type() {
        DataType::Null => vec![MetadataValue::Null; n],
        DataType::Boolean => {
            let arr = column.as_boolean();
            (0..n)
                .map(|i| if arr.is_null(i) {
                    MetadataValue::Null
                } else {
                    MetadataValue::Bool(arr.value(i))
                })
                .collect()
        }
        dt if dt.is_integer() => {
            let cast_arr = cast(column.as_ref(), &DataType::Int64)?;
            let arr = cast_arr.as_primitive::<Int64Type>();
            (0..n)
                .map(|i| if arr.is_null(i) {
                    MetadataValue::Null
                } else {
                    MetadataValue::Integer(arr.value(i))
                })
                .collect()
        }
        dt if dt.is_floating() => {
            let cast_arr = cast(column.as_ref(), &DataType::Float64)?;
            let arr = cast_arr.as_primitive::<Float64Type>();
            (0..n)
                .map(|i| if arr.is_null(i) {
                    MetadataValue::Null
                } else {
                    MetadataValue::Float(arr.value(i))
                })
                .collect()
        }
        _ => {
            let cast_arr = cast(column.as_ref(), &DataType::Utf8)?;
            let arr = cast_arr.as_string::<i32>();
            (0..n)
                .map(|i| if arr.is_null(i) {
                    MetadataValue::Null
                } else {
                    MetadataValue::String(arr.value(i).to_string())
                })
                .collect()
        }
    };
    Ok(values)
}

// -- CSV --

fn read_csv(path: &Path) -> DataResult<RawTable> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: BTreeMap<String, MetadataValue> = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), guess_metadata_type(v)))
            .collect();
        rows.push(row);
    }

    Ok(RawTable {
        columns: headers,
        rows,
    })
}

fn guess_metadata_type(s: &str) -> MetadataValue {
    if s.is_empty() {
        return MetadataValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return MetadataValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return MetadataValue::Float(f);
    }
    if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") {
        return MetadataValue::Bool(s.eq_ignore_ascii_case("true"));
    }
    MetadataValue::String(s.to_string())
}

// -- JSON --

fn read_json(path: &Path) -> DataResult<RawTable> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;
    let records = root
        .as_array()
        .ok_or_else(|| DataError::InvalidFormat("expected top-level JSON array".into()))?;

    let mut table = RawTable::default();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| DataError::InvalidFormat(format!("row {i} is not a JSON object")))?;

        let mut row = BTreeMap::new();
        for (key, val) in obj {
            if !table.has_column(key) {
                table.columns.push(key.clone());
            }
            row.insert(key.clone(), json_to_metadata(val));
        }
        table.rows.push(row);
    }
    Ok(table)
}

fn json_to_metadata(val: &JsonValue) -> MetadataValue {
    match val {
        JsonValue::String(s) => MetadataValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                MetadataValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                MetadataValue::Float(f)
            } else {
                MetadataValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => MetadataValue::Bool(*b),
        JsonValue::Null => MetadataValue::Null,
        other => MetadataValue::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{BooleanArray, Float64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::error::ArrowError;
    use arrow::ipc::writer::{FileWriter, IpcWriteOptions};
    use arrow::ipc::CompressionType;
    use parquet::arrow::ArrowWriter;
    use tempfile::tempdir;

    use super::*;

    const PEAK_HEADER: &str = "enhancer_id,chr,start,end,cell_type,accessibility,position\n";

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    fn metadata_csv() -> String {
        [
            "Enhancer_ID,Hall_of_fame,Cargo,Experiment_Type,Proximal_Gene,GC delivered,Image_link",
            "eA,TRUE,SYFP2,EPI,Gad2,5.00E+11,https://img/a1.png",
            "eB,FALSE,SYFP2,EPI,Sst,1.00E+12,FALSE",
            "eC,TRUE,iCre,LIGHTSHEET,Pvalb,5.00E+11,",
        ]
        .join("\n")
    }

    #[test]
    fn chunk_names_match_case_sensitively() {
        assert!(matches_chunk("part1_chunk_001.csv", 1));
        assert!(matches_chunk("part1chunk.csv", 1));
        assert!(!matches_chunk("Part1_chunk_001.csv", 1));
        assert!(!matches_chunk("part1_chunk_001.CSV", 1));
        assert!(!matches_chunk("part1_001.csv", 1));
        assert!(!matches_chunk("part2_chunk_001.csv", 1));
    }

    #[test]
    fn discovery_orders_by_family_then_name() -> DataResult<()> {
        let dir = tempdir()?;
        for name in [
            "part2_peaks_chunk_001.csv",
            "part1_peaks_chunk_002.csv",
            "part1_peaks_chunk_001.csv",
            "part4_peaks_chunk_001.csv",
            "notes.csv",
        ] {
            write(dir.path(), name, PEAK_HEADER);
        }

        let chunks = discover_chunks(dir.path(), DEFAULT_PARTS)?;
        let names: Vec<_> = chunks
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "part1_peaks_chunk_001.csv",
                "part1_peaks_chunk_002.csv",
                "part2_peaks_chunk_001.csv",
                "part4_peaks_chunk_001.csv",
            ]
        );
        Ok(())
    }

    #[test]
    fn chunks_are_concatenated_and_deduplicated() -> DataResult<()> {
        let dir = tempdir()?;
        write(
            dir.path(),
            "part1_chunk_1.csv",
            &format!("{PEAK_HEADER}eA,chr1,100,600,1 L2/3 IT,0.5,120\neA,chr1,100,600,2 L4 IT,0.8,120\n"),
        );
        // No position column; the eA row differs from part1 by position only.
        write(
            dir.path(),
            "part2_chunk_1.csv",
            "enhancer_id,chr,start,end,cell_type,accessibility\neA,chr1,100,600,1 L2/3 IT,0.5\neC,chr2,50.0,90.0,1 L2/3 IT,\n",
        );
        write(
            dir.path(),
            "part3_chunk_1.csv",
            &format!("{PEAK_HEADER}eA,chr1,100,600,2 L4 IT,0.8,120\n"),
        );

        let peaks = load_peak_data(dir.path(), DEFAULT_PARTS)?;
        assert_eq!(peaks.len(), 4);
        assert_eq!(peaks[2].position, None);
        assert_eq!(peaks[3].enhancer_id, "eC");
        assert_eq!(peaks[3].start, 50);
        assert_eq!(peaks[3].accessibility, 0.0);
        Ok(())
    }

    #[test]
    fn missing_chunks_reports_expected_patterns() {
        let dir = tempdir().unwrap();
        write(dir.path(), "Part1_chunk_1.csv", PEAK_HEADER);

        match load_peak_data(dir.path(), 2) {
            Err(DataError::NoChunks { expected, present, .. }) => {
                assert_eq!(expected, "part1*chunk*.csv, part2*chunk*.csv");
                assert_eq!(present, "Part1_chunk_1.csv");
            }
            other => panic!("expected NoChunks, got {other:?}"),
        }
    }

    #[test]
    fn csv_metadata_is_normalized() -> DataResult<()> {
        let dir = tempdir()?;
        write(dir.path(), "meta.csv", &metadata_csv());

        let records = load_metadata(&dir.path().join("meta.csv"))?;
        assert_eq!(records.len(), 3);
        assert!(records[0].hall_of_fame);
        assert!(!records[1].hall_of_fame);
        assert_eq!(records[0].cargo.as_deref(), Some("SYFP2"));
        assert_eq!(records[0].gc_delivered.as_deref(), Some("500000000000"));
        assert_eq!(records[2].experiment.as_deref(), Some("LIGHTSHEET"));
        assert_eq!(records[2].imaging.image_link, None);
        Ok(())
    }

    fn metadata_batch() -> Result<RecordBatch, ArrowError> {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Enhancer_ID", DataType::Utf8, false),
            Field::new("Hall_of_fame", DataType::Utf8, true),
            Field::new("Cargo", DataType::Utf8, true),
            Field::new("GC delivered", DataType::Float64, true),
            Field::new("Viewer Link", DataType::Utf8, true),
            Field::new("flag", DataType::Boolean, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["eA", "eB"])),
                Arc::new(StringArray::from(vec![Some("TRUE"), None])),
                Arc::new(StringArray::from(vec![Some("SYFP2"), Some("iCre")])),
                Arc::new(Float64Array::from(vec![Some(3e11), None])),
                Arc::new(StringArray::from(vec![Some("https://a, https://b"), None])),
                Arc::new(BooleanArray::from(vec![Some(true), None])),
            ],
        )
    }

    fn assert_metadata_batch_records(records: &[MetadataRecord]) {
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].enhancer_id, "eA");
        assert!(records[0].hall_of_fame);
        assert_eq!(records[0].cargo.as_deref(), Some("SYFP2"));
        assert_eq!(records[0].gc_delivered.as_deref(), Some("300000000000"));
        assert_eq!(records[0].imaging.viewer_link.as_deref(), Some("https://a, https://b"));
        assert!(!records[1].hall_of_fame);
        assert_eq!(records[1].gc_delivered, None);
    }

    #[test]
    fn feather_metadata_is_read() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("meta.feather");

        let batch = metadata_batch()?;
        let mut writer = FileWriter::try_new(File::create(&path)?, &batch.schema())?;
        writer.write(&batch)?;
        writer.finish()?;

        assert_metadata_batch_records(&load_metadata(&path)?);
        Ok(())
    }

    #[test]
    fn lz4_feather_metadata_is_read() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("meta.feather");

        let batch = metadata_batch()?;
        let options = IpcWriteOptions::default().try_with_compression(Some(CompressionType::LZ4_FRAME))?;
        let mut writer = FileWriter::try_new_with_options(File::create(&path)?, &batch.schema(), options)?;
        writer.write(&batch)?;
        writer.finish()?;

        assert_metadata_batch_records(&load_metadata(&path)?);
        Ok(())
    }

    #[test]
    fn parquet_metadata_is_read() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let batch = metadata_batch()?;

        for name in ["meta.parquet", "meta.pq"] {
            let path = dir.path().join(name);
            let mut writer = ArrowWriter::try_new(File::create(&path)?, batch.schema(), None)?;
            writer.write(&batch)?;
            writer.close()?;

            assert_metadata_batch_records(&load_metadata(&path)?);
        }
        Ok(())
    }

    #[test]
    fn json_metadata_is_read() -> DataResult<()> {
        let dir = tempdir()?;
        write(
            dir.path(),
            "meta.json",
            r#"[{"Enhancer_ID": "eA", "Hall_of_fame": "TRUE", "GC delivered": 500000000000}]"#,
        );

        let records = load_metadata(&dir.path().join("meta.json"))?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].gc_delivered.as_deref(), Some("500000000000"));
        Ok(())
    }

    #[test]
    fn json_metadata_must_be_an_array_of_objects() {
        let dir = tempdir().unwrap();

        write(dir.path(), "object.json", r#"{"Enhancer_ID": "eA", "Hall_of_fame": "TRUE"}"#);
        assert!(matches!(
            load_metadata(&dir.path().join("object.json")),
            Err(DataError::InvalidFormat(msg)) if msg.contains("array")
        ));

        write(dir.path(), "rows.json", r#"[{"Enhancer_ID": "eA", "Hall_of_fame": "TRUE"}, 7]"#);
        assert!(matches!(
            load_metadata(&dir.path().join("rows.json")),
            Err(DataError::InvalidFormat(msg)) if msg == "row 1 is not a JSON object"
        ));
    }

    #[test]
    fn metadata_errors() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_metadata(&dir.path().join("absent.feather")),
            Err(DataError::MissingFile(_))
        ));

        write(dir.path(), "meta.txt", "x");
        assert!(matches!(
            load_metadata(&dir.path().join("meta.txt")),
            Err(DataError::UnsupportedFormat(ext)) if ext == "txt"
        ));

        write(dir.path(), "meta.csv", "Enhancer_ID,Cargo\neA,SYFP2\n");
        assert!(matches!(
            load_metadata(&dir.path().join("meta.csv")),
            Err(DataError::MissingColumn(col)) if col == "Hall_of_fame"
        ));
    }

    #[test]
    fn load_all_builds_dataset() -> DataResult<()> {
        let dir = tempdir()?;
        write(
            dir.path(),
            "part1_chunk_1.csv",
            &format!("{PEAK_HEADER}eA,chr1,100,600,1 L2/3 IT,0.5,120\neB,chr3,10,20,2 L4 IT,0.1,15\n"),
        );
        write(
            dir.path(),
            "part2_chunk_1.csv",
            &format!("{PEAK_HEADER}eC,chr2,50,90,2 L4 IT,0.9,60\n"),
        );
        write(dir.path(), "meta.csv", &metadata_csv());

        let config = LoadConfig {
            data_dir: dir.path().to_path_buf(),
            metadata_file: PathBuf::from("meta.csv"),
            parts: DEFAULT_PARTS,
        };
        let dataset = load_all(&config)?;

        assert_eq!(dataset.peaks.len(), 3);
        assert_eq!(dataset.metadata.len(), 3);
        let ids: Vec<_> = dataset.hof_enhancers.iter().map(|e| e.enhancer_id.as_str()).collect();
        assert_eq!(ids, vec!["eA", "eC"]);
        assert_eq!(dataset.cell_types, vec!["1 L2/3 IT", "2 L4 IT"]);
        assert_eq!(dataset.peak_indices("eC"), &[2]);
        assert_eq!(dataset.source_dir, dir.path());
        Ok(())
    }

    #[test]
    fn load_all_rejects_header_only_chunks() {
        let dir = tempdir().unwrap();
        write(dir.path(), "part1_chunk_1.csv", PEAK_HEADER);
        write(dir.path(), "meta.csv", &metadata_csv());

        let config = LoadConfig {
            data_dir: dir.path().to_path_buf(),
            metadata_file: PathBuf::from("meta.csv"),
            parts: 1,
        };
        assert!(matches!(load_all(&config), Err(DataError::EmptyPeakData)));
    }
}
