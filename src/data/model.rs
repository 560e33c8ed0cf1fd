use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;

use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Normalized metadata column names.
pub mod columns {
    pub const ENHANCER_ID: &str = "enhancer_id";
    pub const HALL_OF_FAME: &str = "Hall_of_fame";
    pub const CARGO: &str = "cargo";
    pub const EXPERIMENT: &str = "experiment";
    pub const PROXIMAL_GENE: &str = "proximal_gene";
    pub const GC_DELIVERED: &str = "GC delivered";
    pub const IMAGE_LINK: &str = "image_link";
    pub const NEUROGLANCER_1: &str = "neuroglancer_1";
    pub const NEUROGLANCER_3: &str = "neuroglancer_3";
    pub const VIEWER_LINK: &str = "viewer_link";
    pub const CORONAL_MIP: &str = "coronal_mip";
    pub const SAGITTAL_MIP: &str = "sagittal_mip";
}

/// Source column name → normalized column name.
pub const COLUMN_RENAMES: &[(&str, &str)] = &[
    ("Enhancer_ID", columns::ENHANCER_ID),
    ("Cargo", columns::CARGO),
    ("Experiment_Type", columns::EXPERIMENT),
    ("Proximal_Gene", columns::PROXIMAL_GENE),
    ("Image_link", columns::IMAGE_LINK),
    ("Neuroglancer 1", columns::NEUROGLANCER_1),
    ("Neuroglancer 3", columns::NEUROGLANCER_3),
    ("Viewer Link", columns::VIEWER_LINK),
    ("Coronal_MIP", columns::CORONAL_MIP),
    ("Sagittal_MIP", columns::SAGITTAL_MIP),
];

// ---------------------------------------------------------------------------
// MetadataValue – a single cell in a metadata column
// ---------------------------------------------------------------------------

/// A dynamically-typed metadata cell, as read from feather / parquet / CSV / JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl MetadataValue {
    /// Text label used for display and for filter matching.
    ///
    /// Null, NaN and blank strings have no label. Whole floats drop their
    /// fraction so `5e11` reads `500000000000`; booleans read `TRUE` / `FALSE`.
    pub fn label(&self) -> Option<String> {
        match self {
            MetadataValue::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            MetadataValue::Integer(i) => Some(i.to_string()),
            MetadataValue::Float(v) if v.is_nan() => None,
            MetadataValue::Float(v) if v.fract() == 0.0 && v.abs() < 1e18 => {
                Some(format!("{}", *v as i64))
            }
            MetadataValue::Float(v) => Some(v.to_string()),
            MetadataValue::Bool(true) => Some("TRUE".to_string()),
            MetadataValue::Bool(false) => Some("FALSE".to_string()),
            MetadataValue::Null => None,
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – untyped metadata as loaded from disk
// ---------------------------------------------------------------------------

/// Column-named rows of dynamically typed cells.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<BTreeMap<String, MetadataValue>>,
}

impl RawTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Apply [`COLUMN_RENAMES`] to the columns that exist.  Returns the
    /// `(old, new)` pairs that were renamed.
    pub fn normalize_columns(&mut self) -> Vec<(String, String)> {
        let mut renamed = Vec::new();
        for &(old, new) in COLUMN_RENAMES {
            if !self.has_column(old) || self.has_column(new) {
                continue;
            }
            for col in self.columns.iter_mut().filter(|c| c.as_str() == old) {
                *col = new.to_string();
            }
            for row in &mut self.rows {
                if let Some(value) = row.remove(old) {
                    row.insert(new.to_string(), value);
                }
            }
            renamed.push((old.to_string(), new.to_string()));
        }
        renamed
    }
}

// ---------------------------------------------------------------------------
// Peak data – one accessibility measurement (one CSV row)
// ---------------------------------------------------------------------------

/// A single row of the chunked peak table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PeakRecord {
    pub enhancer_id: String,
    #[serde(default)]
    pub chr: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub start: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub end: i64,
    pub cell_type: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub accessibility: f64,
    /// Track coordinate of the measurement, when the chunk carries one.
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub position: Option<i64>,
}

impl PeakRecord {
    /// Key over every field, used to drop duplicate rows after concatenation.
    pub fn dedup_key(&self) -> (&str, &str, i64, i64, &str, u64, Option<i64>) {
        (
            &self.enhancer_id,
            &self.chr,
            self.start,
            self.end,
            &self.cell_type,
            self.accessibility.to_bits(),
            self.position,
        )
    }

    /// Coordinate used on the x axis of accessibility tracks.
    pub fn track_position(&self) -> i64 {
        self.position.unwrap_or(self.start)
    }
}

// Pandas writes integer columns holding NaN as floats ("1200.0") and leaves
// missing values empty; accept both.
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

fn lenient_i64<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    Ok(lenient_opt_i64(d)?.unwrap_or(0))
}

fn lenient_opt_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let raw = String::deserialize(d)?;
    if let Ok(i) = raw.trim().parse::<i64>() {
        return Ok(Some(i));
    }
    match parse_number(&raw) {
        Some(v) => Ok(Some(v as i64)),
        None if raw.trim().is_empty() || raw.trim().eq_ignore_ascii_case("nan") => Ok(None),
        None => Err(serde::de::Error::custom(format!("'{raw}' is not a number"))),
    }
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let raw = String::deserialize(d)?;
    match parse_number(&raw) {
        Some(v) => Ok(v),
        None if raw.trim().is_empty() || raw.trim().eq_ignore_ascii_case("nan") => Ok(0.0),
        None => Err(serde::de::Error::custom(format!("'{raw}' is not a number"))),
    }
}

// ---------------------------------------------------------------------------
// Metadata – one record per enhancer × experiment
// ---------------------------------------------------------------------------

/// Imaging URL fields of a metadata record.  Each may hold several
/// comma-separated URLs or the literal `FALSE`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImagingLinks {
    pub image_link: Option<String>,
    pub neuroglancer_1: Option<String>,
    pub neuroglancer_3: Option<String>,
    pub viewer_link: Option<String>,
    pub coronal_mip: Option<String>,
    pub sagittal_mip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRecord {
    pub enhancer_id: String,
    pub hall_of_fame: bool,
    pub cargo: Option<String>,
    pub experiment: Option<String>,
    pub proximal_gene: Option<String>,
    pub gc_delivered: Option<String>,
    pub imaging: ImagingLinks,
}

impl MetadataRecord {
    /// Project a normalized raw row.  Rows without an enhancer id yield `None`.
    pub fn from_row(row: &BTreeMap<String, MetadataValue>) -> Option<Self> {
        let text = |col: &str| row.get(col).and_then(MetadataValue::label);

        let enhancer_id = text(columns::ENHANCER_ID)?;
        Some(MetadataRecord {
            enhancer_id,
            hall_of_fame: text(columns::HALL_OF_FAME).as_deref() == Some("TRUE"),
            cargo: text(columns::CARGO),
            experiment: text(columns::EXPERIMENT),
            proximal_gene: text(columns::PROXIMAL_GENE),
            gc_delivered: text(columns::GC_DELIVERED),
            imaging: ImagingLinks {
                image_link: text(columns::IMAGE_LINK),
                neuroglancer_1: text(columns::NEUROGLANCER_1),
                neuroglancer_3: text(columns::NEUROGLANCER_3),
                viewer_link: text(columns::VIEWER_LINK),
                coronal_mip: text(columns::CORONAL_MIP),
                sagittal_mip: text(columns::SAGITTAL_MIP),
            },
        })
    }
}

// ---------------------------------------------------------------------------
// HofEnhancer – a Hall of Fame enhancer with merged metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HofEnhancer {
    pub enhancer_id: String,
    pub chr: String,
    pub start: i64,
    pub end: i64,
    pub cargo: Option<String>,
    pub experiment: Option<String>,
    pub proximal_gene: Option<String>,
    pub gc_delivered: Option<String>,
}

impl HofEnhancer {
    /// Length in base pairs.
    pub fn length(&self) -> i64 {
        self.end - self.start
    }

    /// `chr:start-end`
    pub fn location(&self) -> String {
        format!("{}:{}-{}", self.chr, self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Cell types
// ---------------------------------------------------------------------------

/// Cell type labels lacking a leading number sort after all numbered ones.
pub const UNNUMBERED_CELL_TYPE: u32 = 999;

/// Leading number of a cell type label (`"12 L6 CT"` → 12).
pub fn cell_type_number(label: &str) -> u32 {
    let digits: String = label.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(UNNUMBERED_CELL_TYPE)
}

/// Unique cell types of the peak table, ordered by leading number then label.
pub fn ordered_cell_types(peaks: &[PeakRecord]) -> Vec<String> {
    let unique: BTreeSet<&str> = peaks.iter().map(|p| p.cell_type.as_str()).collect();
    let mut cell_types: Vec<String> = unique.into_iter().map(str::to_string).collect();
    cell_types.sort_by_key(|ct| cell_type_number(ct));
    cell_types
}

// ---------------------------------------------------------------------------
// EnhancerDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Everything the dashboard shows, loaded once and immutable afterwards.
#[derive(Debug, Clone)]
pub struct EnhancerDataset {
    /// Concatenated, de-duplicated peak rows.
    pub peaks: Vec<PeakRecord>,
    /// All metadata records (Hall of Fame or not).
    pub metadata: Vec<MetadataRecord>,
    /// Hall of Fame enhancers, sorted by id.
    pub hof_enhancers: Vec<HofEnhancer>,
    /// Cell types ordered by their leading number.
    pub cell_types: Vec<String>,
    /// Directory the data was loaded from.
    pub source_dir: PathBuf,
    peaks_by_enhancer: HashMap<String, Vec<usize>>,
}

impl EnhancerDataset {
    pub fn new(
        peaks: Vec<PeakRecord>,
        metadata: Vec<MetadataRecord>,
        hof_enhancers: Vec<HofEnhancer>,
        source_dir: PathBuf,
    ) -> Self {
        let cell_types = ordered_cell_types(&peaks);
        let mut peaks_by_enhancer: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, peak) in peaks.iter().enumerate() {
            peaks_by_enhancer
                .entry(peak.enhancer_id.clone())
                .or_default()
                .push(i);
        }
        EnhancerDataset {
            peaks,
            metadata,
            hof_enhancers,
            cell_types,
            source_dir,
            peaks_by_enhancer,
        }
    }

    /// Ids of the Hall of Fame enhancers.
    pub fn hof_ids(&self) -> BTreeSet<&str> {
        self.hof_enhancers
            .iter()
            .map(|e| e.enhancer_id.as_str())
            .collect()
    }

    /// Indices into `peaks` for one enhancer, in load order.
    pub fn peak_indices(&self, enhancer_id: &str) -> &[usize] {
        self.peaks_by_enhancer
            .get(enhancer_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_drop_blank_and_whole_fractions() {
        assert_eq!(MetadataValue::String("  ".into()).label(), None);
        assert_eq!(MetadataValue::Float(f64::NAN).label(), None);
        assert_eq!(MetadataValue::Float(5e11).label().as_deref(), Some("500000000000"));
        assert_eq!(MetadataValue::Float(2.5).label().as_deref(), Some("2.5"));
        assert_eq!(MetadataValue::Bool(true).label().as_deref(), Some("TRUE"));
        assert_eq!(MetadataValue::Null.label(), None);
    }

    #[test]
    fn normalize_renames_source_columns_only_once() {
        let mut table = RawTable {
            columns: vec!["Enhancer_ID".into(), "Viewer Link".into(), "Hall_of_fame".into()],
            rows: vec![BTreeMap::from([
                ("Enhancer_ID".to_string(), MetadataValue::String("eHGT_001".into())),
                ("Viewer Link".to_string(), MetadataValue::String("https://v".into())),
                ("Hall_of_fame".to_string(), MetadataValue::String("TRUE".into())),
            ])],
        };

        let renamed = table.normalize_columns();
        assert_eq!(renamed.len(), 2);
        assert!(table.has_column("enhancer_id"));
        assert!(table.has_column("viewer_link"));
        assert!(table.has_column("Hall_of_fame"));

        let record = MetadataRecord::from_row(&table.rows[0]).unwrap();
        assert_eq!(record.enhancer_id, "eHGT_001");
        assert!(record.hall_of_fame);
        assert_eq!(record.imaging.viewer_link.as_deref(), Some("https://v"));
    }

    #[test]
    fn hall_of_fame_requires_true_marker() {
        let row = BTreeMap::from([
            ("enhancer_id".to_string(), MetadataValue::String("e1".into())),
            ("Hall_of_fame".to_string(), MetadataValue::String("FALSE".into())),
        ]);
        assert!(!MetadataRecord::from_row(&row).unwrap().hall_of_fame);

        let row = BTreeMap::from([
            ("enhancer_id".to_string(), MetadataValue::String("e1".into())),
            ("Hall_of_fame".to_string(), MetadataValue::Bool(true)),
        ]);
        assert!(MetadataRecord::from_row(&row).unwrap().hall_of_fame);

        let row = BTreeMap::from([("cargo".to_string(), MetadataValue::String("SYFP2".into()))]);
        assert!(MetadataRecord::from_row(&row).is_none());
    }

    #[test]
    fn cell_types_sort_by_leading_number() {
        let peak = |ct: &str| PeakRecord {
            enhancer_id: "e".into(),
            chr: "chr1".into(),
            start: 0,
            end: 10,
            cell_type: ct.into(),
            accessibility: 0.0,
            position: None,
        };
        let peaks = vec![
            peak("10 L5 ET"),
            peak("2 L4 IT"),
            peak("Microglia"),
            peak("1 L2/3 IT"),
            peak("2 L4 IT"),
        ];

        assert_eq!(
            ordered_cell_types(&peaks),
            vec!["1 L2/3 IT", "2 L4 IT", "10 L5 ET", "Microglia"]
        );
        assert_eq!(cell_type_number("34 Oligo"), 34);
        assert_eq!(cell_type_number("Astro"), UNNUMBERED_CELL_TYPE);
    }

    #[test]
    fn enhancer_geometry() {
        let e = HofEnhancer {
            enhancer_id: "e1".into(),
            chr: "chr7".into(),
            start: 1_000,
            end: 1_650,
            cargo: None,
            experiment: None,
            proximal_gene: None,
            gc_delivered: None,
        };
        assert_eq!(e.length(), 650);
        assert_eq!(e.location(), "chr7:1000-1650");
    }
}
