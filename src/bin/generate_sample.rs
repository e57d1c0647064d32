//! Writes a synthetic, already-cleaned passenger table so the dashboard can be
//! tried without the real dataset.
//!
//! ```text
//! generate_sample [OUTPUT]   # OUTPUT defaults to cleaned_titanic.csv; *.parquet writes Parquet
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const PASSENGERS: usize = 891;

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

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Pick an index according to relative weights.
    fn weighted(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        let mut roll = self.next_f64() * total;
        for (i, w) in weights.iter().enumerate() {
            if roll < *w {
                return i;
            }
            roll -= w;
        }
        weights.len() - 1
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Passenger {
    passenger_id: i64,
    survived: i64,
    pclass: i64,
    sex: &'static str,
    age: Option<f64>,
    sib_sp: i64,
    parch: i64,
    fare: f64,
    embarked: Option<&'static str>,
}

fn generate(rng: &mut SimpleRng) -> Vec<Passenger> {
    (1..=PASSENGERS as i64)
        .map(|passenger_id| {
            let pclass = [1, 2, 3][rng.weighted(&[216.0, 184.0, 491.0])];
            let sex = if rng.chance(0.35) { "female" } else { "male" };

            let age_mean = match pclass {
                1 => 38.0,
                2 => 30.0,
                _ => 25.0,
            };
            let age = (!rng.chance(0.2))
                .then(|| (rng.gauss(age_mean, 13.0).clamp(0.42, 80.0) * 2.0).round() / 2.0);

            let base_fare = match pclass {
                1 => 84.0,
                2 => 20.0,
                _ => 13.0,
            };
            let fare = (base_fare * rng.gauss(0.0, 0.5).exp() * 100.0).round() / 100.0;

            let mut p_survive = match (sex, pclass) {
                ("female", 1) => 0.97,
                ("female", 2) => 0.92,
                ("female", _) => 0.50,
                (_, 1) => 0.37,
                (_, 2) => 0.16,
                _ => 0.14,
            };
            if age.is_some_and(|a| a < 10.0) {
                p_survive = (p_survive + 0.3_f64).min(1.0);
            }

            let embarked = match rng.weighted(&[644.0, 168.0, 77.0, 2.0]) {
                0 => Some("S"),
                1 => Some("C"),
                2 => Some("Q"),
                _ => None,
            };

            Passenger {
                passenger_id,
                survived: i64::from(rng.chance(p_survive)),
                pclass,
                sex,
                age,
                sib_sp: rng.weighted(&[608.0, 209.0, 28.0, 16.0, 18.0]) as i64,
                parch: rng.weighted(&[678.0, 118.0, 80.0, 15.0]) as i64,
                fare,
                embarked,
            }
        })
        .collect()
}

fn write_csv(path: &Path, passengers: &[Passenger]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating output file")?;
    for p in passengers {
        writer.serialize(p).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, passengers: &[Passenger]) -> Result<()> {
    let int_col = |f: fn(&Passenger) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from_iter_values(passengers.iter().map(f)))
    };
    let columns: Vec<ArrayRef> = vec![
        int_col(|p| p.passenger_id),
        int_col(|p| p.survived),
        int_col(|p| p.pclass),
        Arc::new(StringArray::from_iter_values(passengers.iter().map(|p| p.sex))),
        Arc::new(Float64Array::from_iter(passengers.iter().map(|p| p.age))),
        int_col(|p| p.sib_sp),
        int_col(|p| p.parch),
        Arc::new(Float64Array::from_iter_values(passengers.iter().map(|p| p.fare))),
        Arc::new(StringArray::from_iter(passengers.iter().map(|p| p.embarked))),
    ];

    let schema = Arc::new(Schema::new(vec![
        Field::new("PassengerId", DataType::Int64, false),
        Field::new("Survived", DataType::Int64, false),
        Field::new("Pclass", DataType::Int64, false),
        Field::new("Sex", DataType::Utf8, false),
        Field::new("Age", DataType::Float64, true),
        Field::new("SibSp", DataType::Int64, false),
        Field::new("Parch", DataType::Int64, false),
        Field::new("Fare", DataType::Float64, false),
        Field::new("Embarked", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(titanic_eda::config::DEFAULT_DATA_PATH));

    let mut rng = SimpleRng::new(42);
    let passengers = generate(&mut rng);

    let is_parquet = output
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet") || e.eq_ignore_ascii_case("pq"));
    if is_parquet {
        write_parquet(&output, &passengers)?;
    } else {
        write_csv(&output, &passengers)?;
    }

    println!("Wrote {} passengers to {}", passengers.len(), output.display());
    Ok(())
}
