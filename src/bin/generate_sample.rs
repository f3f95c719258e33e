//! Writes a small demo expression matrix as `sample_matrix.tsv` and
//! `sample_matrix.parquet`: 12 proteins, 3 replicates each of two
//! conditions, plus a retention-time column `rt`.

use std::io::Write;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
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

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);

    let columns: Vec<String> = ["ctrl", "treat"]
        .iter()
        .flat_map(|cond| (1..=3).map(move |rep| format!("{cond}_{rep}")))
        .collect();

    let mut labels = Vec::new();
    let mut cells: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];
    let mut rt = Vec::new();

    for i in 0..12 {
        labels.push(format!("P{:05}|PROT{i}_HUMAN", 10_000 + i * 37));
        rt.push(5.0 + rng.next_f64() * 55.0);

        // log2 abundance; every third protein shifts in the treated group
        let base = rng.gauss(24.0, 2.0);
        let shift = if i % 3 == 0 { rng.gauss(1.5, 0.3) } else { 0.0 };
        for (c, col) in columns.iter().enumerate() {
            let mean = if col.starts_with("treat") { base + shift } else { base };
            cells[c].push(rng.gauss(mean, 0.25));
        }
    }

    // TSV
    let mut tsv = std::io::BufWriter::new(std::fs::File::create("sample_matrix.tsv")?);
    writeln!(tsv, "protein\t{}\trt", columns.join("\t"))?;
    for (row, label) in labels.iter().enumerate() {
        let values: Vec<String> = cells.iter().map(|col| format!("{:.4}", col[row])).collect();
        writeln!(tsv, "{label}\t{}\t{:.3}", values.join("\t"), rt[row])?;
    }
    tsv.flush()?;

    // Parquet with the same layout
    let mut fields = vec![Field::new("protein", DataType::Utf8, false)];
    let mut arrays: Vec<ArrayRef> = vec![Arc::new(StringArray::from(labels.clone()))];
    for (col, values) in columns.iter().zip(cells) {
        fields.push(Field::new(col, DataType::Float64, false));
        arrays.push(Arc::new(Float64Array::from(values)));
    }
    fields.push(Field::new("rt", DataType::Float64, false));
    arrays.push(Arc::new(Float64Array::from(rt)));

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;

    let file = std::fs::File::create("sample_matrix.parquet")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    println!(
        "Wrote {} proteins x {} replicates to sample_matrix.tsv / sample_matrix.parquet",
        labels.len(),
        columns.len()
    );
    Ok(())
}
