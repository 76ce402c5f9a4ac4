use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

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

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One output row, in the column layout the dashboard reads.
#[derive(Serialize)]
struct SampleLaunch {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

/// Booster eras in flight order: (category, flights, success probability,
/// payload ceiling in kg).
const ERAS: [(&str, usize, f64, f64); 5] = [
    ("v1.0", 5, 0.0, 700.0),
    ("v1.1", 15, 0.35, 4500.0),
    ("FT", 24, 0.65, 9600.0),
    ("B4", 11, 0.6, 6800.0),
    ("B5", 18, 0.9, 15600.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

fn generate(rng: &mut SimpleRng) -> Vec<SampleLaunch> {
    let mut launches = Vec::new();
    let mut flight_number = 1;

    for &(category, flights, success_rate, payload_ceiling) in &ERAS {
        for _ in 0..flights {
            // The first flights all flew from the Cape.
            let site = if category == "v1.0" {
                SITES[0]
            } else {
                rng.pick(&SITES)
            };
            // Payload rounded to the nearest 10 kg; some early flights carried none.
            let payload = if category == "v1.0" && rng.next_f64() < 0.4 {
                0.0
            } else {
                (rng.next_f64() * payload_ceiling / 10.0).round() * 10.0
            };
            let class = i64::from(rng.next_f64() < success_rate);

            launches.push(SampleLaunch {
                flight_number,
                launch_site: site.to_string(),
                class,
                payload_mass_kg: payload,
                booster_version_category: category.to_string(),
            });
            flight_number += 1;
        }
    }
    launches
}

fn write_csv(path: &str, launches: &[SampleLaunch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    for launch in launches {
        writer.serialize(launch).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn write_parquet(path: &str, launches: &[SampleLaunch]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(
            launches.iter().map(|l| l.flight_number),
        )),
        Arc::new(StringArray::from_iter_values(
            launches.iter().map(|l| l.launch_site.as_str()),
        )),
        Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
        Arc::new(Float64Array::from_iter_values(
            launches.iter().map(|l| l.payload_mass_kg),
        )),
        Arc::new(StringArray::from_iter_values(
            launches.iter().map(|l| l.booster_version_category.as_str()),
        )),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let launches = generate(&mut rng);

    let csv_path = "sample_launches.csv";
    let parquet_path = "sample_launches.parquet";
    write_csv(csv_path, &launches)?;
    write_parquet(parquet_path, &launches)?;

    log::info!(
        "Wrote {} launches to {csv_path} and {parquet_path}",
        launches.len()
    );
    println!("Wrote {} launches to {csv_path} and {parquet_path}", launches.len());
    Ok(())
}
