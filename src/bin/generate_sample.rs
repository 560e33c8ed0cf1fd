//! Writes a synthetic Hall of Fame data directory: four families of peak
//! chunk CSVs and a feather metadata file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::ipc::writer::FileWriter;
use arrow::record_batch::RecordBatch;
use clap::Parser;
use serde::Serialize;

/// Generate a synthetic Hall of Fame data directory.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory to write the chunks and metadata into
    #[arg(default_value = "sample_data")]
    out_dir: PathBuf,

    /// Number of enhancers to generate
    #[arg(long, default_value_t = 16)]
    enhancers: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const METADATA_FILE: &str = "Enhancer_and_experiment_metadata_1751579195077.feather";
const PARTS: usize = 4;
const CHUNKS_PER_PART: usize = 2;
const POSITIONS_PER_PEAK: usize = 6;

const CELL_TYPES: [&str; 7] = [
    "1 L2/3 IT CTX",
    "2 L4/5 IT CTX",
    "5 L5 ET CTX",
    "10 L6 CT CTX",
    "21 Sst Gaba",
    "22 Pvalb Gaba",
    "Astro",
];
const CARGOS: [&str; 3] = ["SYFP2", "iCre", "Flpo"];
const GENES: [&str; 6] = ["Gad2", "Sst", "Pvalb", "Vip", "Rorb", "Fezf2"];
const GC_DELIVERED: [f64; 3] = [5.0e11, 1.0e12, 3.0e12];
const CHROMOSOMES: [&str; 4] = ["chr1", "chr7", "chr11", "chr19"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

// ---------------------------------------------------------------------------
// Peak chunks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
struct PeakRow {
    enhancer_id: String,
    chr: String,
    start: i64,
    end: i64,
    cell_type: String,
    accessibility: f64,
    position: i64,
}

struct Enhancer {
    id: String,
    chr: &'static str,
    start: i64,
    end: i64,
}

fn enhancers(rng: &mut SimpleRng, n: usize) -> Vec<Enhancer> {
    (0..n)
        .map(|i| {
            let start = 1_000_000 + rng.below(50_000_000) as i64;
            Enhancer {
                id: format!("AiE{:04}m", i + 1),
                chr: CHROMOSOMES[rng.below(CHROMOSOMES.len())],
                start,
                end: start + 300 + rng.below(700) as i64,
            }
        })
        .collect()
}

/// Accessibility rises towards the centre of the enhancer.  Each enhancer is
/// open in a few cell types only.
fn peak_rows(rng: &mut SimpleRng, enhancer: &Enhancer) -> Vec<PeakRow> {
    let open = rng.below(CELL_TYPES.len());
    let mut rows = Vec::new();
    for (k, cell_type) in CELL_TYPES.iter().enumerate() {
        let scale = if k == open || k == (open + 3) % CELL_TYPES.len() {
            1.0
        } else {
            0.15
        };
        let step = (enhancer.end - enhancer.start) / (POSITIONS_PER_PEAK as i64 - 1);
        for p in 0..POSITIONS_PER_PEAK {
            let position = enhancer.start + p as i64 * step;
            let centre = 1.0 - ((p as f64 / (POSITIONS_PER_PEAK - 1) as f64) - 0.5).abs() * 2.0;
            let accessibility = scale * (0.2 + 0.8 * centre) * (0.7 + 0.3 * rng.next_f64());
            rows.push(PeakRow {
                enhancer_id: enhancer.id.clone(),
                chr: enhancer.chr.to_string(),
                start: enhancer.start,
                end: enhancer.end,
                cell_type: cell_type.to_string(),
                accessibility: (accessibility * 1000.0).round() / 1000.0,
                position,
            });
        }
    }
    rows
}

fn write_chunk(path: &Path, rows: &[PeakRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Spread the rows over `part{p}_chunk{c}.csv`.  The first row of every
/// chunk after the first repeats the last row of the previous chunk.
fn write_chunks(out_dir: &Path, rows: &[PeakRow]) -> Result<usize> {
    if rows.is_empty() {
        return Ok(0);
    }
    let n_chunks = PARTS * CHUNKS_PER_PART;
    let per_chunk = rows.len().div_ceil(n_chunks);
    let mut previous_last: Option<&PeakRow> = None;

    for (i, chunk) in rows.chunks(per_chunk).enumerate() {
        let path = out_dir.join(format!(
            "part{}_chunk{}.csv",
            i / CHUNKS_PER_PART + 1,
            i % CHUNKS_PER_PART + 1
        ));
        let mut chunk_rows: Vec<PeakRow> = previous_last.into_iter().cloned().collect();
        chunk_rows.extend_from_slice(chunk);
        write_chunk(&path, &chunk_rows)?;
        previous_last = chunk.last();
    }
    Ok(rows.len().div_ceil(per_chunk))
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MetadataColumns {
    enhancer_id: Vec<String>,
    hall_of_fame: Vec<&'static str>,
    cargo: Vec<&'static str>,
    experiment: Vec<&'static str>,
    gene: Vec<&'static str>,
    gc_delivered: Vec<Option<f64>>,
    image_link: Vec<Option<String>>,
    neuroglancer_1: Vec<Option<String>>,
    coronal_mip: Vec<Option<String>>,
    sagittal_mip: Vec<Option<String>>,
}

impl MetadataColumns {
    fn push(&mut self, rng: &mut SimpleRng, id: &str, hall_of_fame: bool, experiment: &'static str) {
        let lightsheet = experiment == "LIGHTSHEET";
        self.enhancer_id.push(id.to_string());
        self.hall_of_fame.push(if hall_of_fame { "TRUE" } else { "FALSE" });
        self.cargo.push(CARGOS[rng.below(CARGOS.len())]);
        self.experiment.push(experiment);
        self.gene.push(GENES[rng.below(GENES.len())]);
        self.gc_delivered.push(if rng.below(5) == 0 {
            None
        } else {
            Some(GC_DELIVERED[rng.below(GC_DELIVERED.len())])
        });
        self.image_link.push(if lightsheet {
            Some("FALSE".to_string())
        } else {
            Some(format!(
                "https://picsum.photos/seed/{id}-1/640/360,https://picsum.photos/seed/{id}-2/640/360"
            ))
        });
        self.neuroglancer_1.push(
            lightsheet.then(|| format!("https://neuroglancer-demo.appspot.com/#!{{\"title\":\"{id}\"}}")),
        );
        self.coronal_mip
            .push(lightsheet.then(|| format!("https://picsum.photos/seed/{id}-coronal/640/360")));
        self.sagittal_mip
            .push(lightsheet.then(|| format!("https://picsum.photos/seed/{id}-sagittal/640/360")));
    }

    fn into_batch(self) -> Result<RecordBatch> {
        let text = |name: &str| Field::new(name, DataType::Utf8, true);
        let schema = Arc::new(Schema::new(vec![
            text("Enhancer_ID"),
            text("Hall_of_fame"),
            text("Cargo"),
            text("Experiment_Type"),
            text("Proximal_Gene"),
            Field::new("GC delivered", DataType::Float64, true),
            text("Image_link"),
            text("Neuroglancer 1"),
            text("Coronal_MIP"),
            text("Sagittal_MIP"),
        ]));

        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(self.enhancer_id)),
            Arc::new(StringArray::from(self.hall_of_fame)),
            Arc::new(StringArray::from(self.cargo)),
            Arc::new(StringArray::from(self.experiment)),
            Arc::new(StringArray::from(self.gene)),
            Arc::new(Float64Array::from(self.gc_delivered)),
            Arc::new(StringArray::from(self.image_link)),
            Arc::new(StringArray::from(self.neuroglancer_1)),
            Arc::new(StringArray::from(self.coronal_mip)),
            Arc::new(StringArray::from(self.sagittal_mip)),
        ];
        Ok(RecordBatch::try_new(schema, columns)?)
    }
}

fn write_metadata(path: &Path, batch: &RecordBatch) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = FileWriter::try_new(file, &batch.schema())?;
    writer.write(batch)?;
    writer.finish()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let out_dir = args.out_dir;
    std::fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(args.seed);
    let enhancers = enhancers(&mut rng, args.enhancers);

    let rows: Vec<PeakRow> = enhancers
        .iter()
        .flat_map(|e| peak_rows(&mut rng, e))
        .collect();
    let n_chunks = write_chunks(&out_dir, &rows)?;

    // Every third enhancer is not in the Hall of Fame; a few have both
    // experiment types.  One Hall of Fame id has no peaks at all.
    let mut metadata = MetadataColumns::default();
    for (i, enhancer) in enhancers.iter().enumerate() {
        let hall_of_fame = i % 3 != 2;
        let experiment = if i % 2 == 0 { "EPI" } else { "LIGHTSHEET" };
        metadata.push(&mut rng, &enhancer.id, hall_of_fame, experiment);
        if i % 4 == 0 {
            metadata.push(&mut rng, &enhancer.id, hall_of_fame, "LIGHTSHEET");
        }
    }
    metadata.push(&mut rng, "AiE9999m", true, "EPI");

    let n_metadata = metadata.enhancer_id.len();
    let metadata_path = out_dir.join(METADATA_FILE);
    write_metadata(&metadata_path, &metadata.into_batch()?)?;

    println!(
        "Wrote {} peak rows in {n_chunks} chunks and {n_metadata} metadata rows to {}",
        rows.len(),
        out_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn flags_are_not_taken_as_the_output_dir() {
        let err = Args::try_parse_from(["generate_sample", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(Args::try_parse_from(["generate_sample", "--out", "x"]).is_err());

        let args = Args::try_parse_from(["generate_sample"]).unwrap();
        assert_eq!(args.out_dir, PathBuf::from("sample_data"));
        let args = Args::try_parse_from(["generate_sample", "demo", "--enhancers", "3"]).unwrap();
        assert_eq!(args.out_dir, PathBuf::from("demo"));
        assert_eq!(args.enhancers, 3);
    }

    #[test]
    fn chunks_repeat_the_previous_boundary_row() -> Result<()> {
        let dir = tempdir()?;
        let mut rng = SimpleRng::new(7);
        let rows: Vec<PeakRow> = enhancers(&mut rng, 2)
            .iter()
            .flat_map(|e| peak_rows(&mut rng, e))
            .collect();

        let n_chunks = write_chunks(dir.path(), &rows)?;
        assert_eq!(n_chunks, PARTS * CHUNKS_PER_PART);

        let mut written = 0;
        for part in 1..=PARTS {
            for chunk in 1..=CHUNKS_PER_PART {
                let path = dir.path().join(format!("part{part}_chunk{chunk}.csv"));
                written += csv::Reader::from_path(&path)?.records().count();
            }
        }
        assert_eq!(written, rows.len() + n_chunks - 1);
        Ok(())
    }

    #[test]
    fn no_rows_write_no_chunks() -> Result<()> {
        let dir = tempdir()?;
        assert_eq!(write_chunks(dir.path(), &[])?, 0);
        assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
        Ok(())
    }
}
