//! Writes a synthetic pitch table as `sample_pitches.csv` and
//! `sample_pitches.parquet` for trying the viewer without real data.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Mean (vert rel, horz rel, vert appr, horz appr) for a pitch type.
fn pitch_profile(pitch_type: &str) -> [f64; 4] {
    match pitch_type {
        "Fastball" => [-1.2, -2.8, -4.9, 1.1],
        "Sinker" => [-1.6, -3.1, -5.6, 2.2],
        "Slider" => [0.4, -1.6, -7.8, -0.6],
        "Curveball" => [1.9, -1.1, -9.4, -1.4],
        "ChangeUp" => [-0.8, -3.4, -7.2, 1.9],
        "Cutter" => [-0.5, -2.1, -5.9, 0.2],
        _ => [0.0, -2.0, -6.5, 0.0],
    }
}

struct Rows {
    pitcher: Vec<Option<String>>,
    pitch_type: Vec<Option<String>>,
    angles: [Vec<Option<f64>>; 4],
}

fn generate(rng: &mut SimpleRng) -> Rows {
    // (pitcher, arsenal with pitch counts)
    let pitchers: [(&str, &[(&str, usize)]); 3] = [
        ("Alvarez, Marco", &[("Fastball", 120), ("Slider", 60), ("ChangeUp", 30), ("Knuckleball", 4)]),
        ("Becker, Sam", &[("Sinker", 90), ("Cutter", 45), ("Curveball", 5)]),
        ("Chen, Lee", &[("Fastball", 80), ("Curveball", 50), ("Slider", 1)]),
    ];

    let mut rows = Rows {
        pitcher: Vec::new(),
        pitch_type: Vec::new(),
        angles: Default::default(),
    };

    for (p_idx, (pitcher, arsenal)) in pitchers.iter().enumerate() {
        // Per-pitcher arm slot shift so pitchers differ.
        let shift = p_idx as f64 * 0.35;
        for &(pitch_type, count) in arsenal.iter() {
            let profile = pitch_profile(pitch_type);
            for _ in 0..count {
                let missing = rng.next_f64() < 0.03;
                let missing_col = (rng.next_u64() % 6) as usize;

                rows.pitcher
                    .push((!(missing && missing_col == 0)).then(|| pitcher.to_string()));
                rows.pitch_type
                    .push((!(missing && missing_col == 1)).then(|| pitch_type.to_string()));
                for (i, column) in rows.angles.iter_mut().enumerate() {
                    let value = rng.gauss(profile[i] + shift, 0.45 + 0.1 * i as f64);
                    column.push((!(missing && missing_col == i + 2)).then_some(value));
                }
            }
        }
    }
    rows
}

const COLUMNS: [&str; 6] = [
    "Pitcher",
    "TaggedPitchType",
    "VertRelAngle",
    "HorzRelAngle",
    "VertApprAngle",
    "HorzApprAngle",
];

fn write_csv(rows: &Rows, path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(COLUMNS)?;
    for i in 0..rows.pitcher.len() {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let num = |v: Option<f64>| v.map(|x| format!("{x:.4}")).unwrap_or_default();
        writer.write_record([
            text(&rows.pitcher[i]),
            text(&rows.pitch_type[i]),
            num(rows.angles[0][i]),
            num(rows.angles[1][i]),
            num(rows.angles[2][i]),
            num(rows.angles[3][i]),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &Rows, path: &str) -> Result<()> {
    let fields: Vec<Field> = COLUMNS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let dtype = if i < 2 { DataType::Utf8 } else { DataType::Float64 };
            Field::new(*name, dtype, true)
        })
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(rows.pitcher.clone())),
            Arc::new(StringArray::from(rows.pitch_type.clone())),
            Arc::new(Float64Array::from(rows.angles[0].clone())),
            Arc::new(Float64Array::from(rows.angles[1].clone())),
            Arc::new(Float64Array::from(rows.angles[2].clone())),
            Arc::new(Float64Array::from(rows.angles[3].clone())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_csv(&rows, "sample_pitches.csv")?;
    write_parquet(&rows, "sample_pitches.parquet")?;

    println!(
        "Wrote {} pitches to sample_pitches.csv and sample_pitches.parquet",
        rows.pitcher.len()
    );
    Ok(())
}
