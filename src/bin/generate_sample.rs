use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::StringArray;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::{json, Map, Value};

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const AUTHORS: [&str; 12] = [
    "Adams", "bauer", "Chen", "Dubois", "Evans", "Fischer", "García", "Hoffmann", "Ito", "Jensen", "Kim", "Lee",
];
const TOPICS: [&str; 6] = ["Haptic", "Gaze", "Voice", "Gesture", "Mid-air", "Wearable"];
const NOUNS: [&str; 5] = ["Interaction", "Feedback", "Navigation", "Typing", "Selection"];

// Filter keys, grouped as in the generated ordering descriptor.
const GROUPS: [(&str, &[(&str, &[&str])]); 3] = [
    ("Publication", &[("Venue", &["CHI", "UIST", "CSCW", "TOCHI"])]),
    (
        "Study",
        &[
            ("Method", &["Lab study", "Field study", "Survey", "Interview"]),
            ("Population", &["Students", "Older adults", "Experts"]),
        ],
    ),
    ("Technology", &[("Device", &["Phone", "Watch", "Headset", "Desktop"])]),
];

// Listed in the ordering but never generated: always-disabled buttons.
const UNUSED_DEVICE: &str = "Smell display";

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let n_papers = 120;

    let mut rows: Vec<Map<String, Value>> = Vec::with_capacity(n_papers);
    for id in 0..n_papers {
        let year = 2000 + rng.next_u64() % 25;
        let title = format!("{} {} for Everyday Use", rng.pick(&TOPICS), rng.pick(&NOUNS));
        let doi_url = if rng.next_u64() % 5 == 0 {
            format!("https://dl.example.org/proceedings/{year}/paper-{id}.pdf")
        } else {
            format!("https://doi.org/10.1145/{year}.{id:05}")
        };

        let mut row = Map::new();
        row.insert("id".into(), json!(id.to_string()));
        row.insert("Author".into(), json!(rng.pick(&AUTHORS)));
        row.insert("Year".into(), json!(year.to_string()));
        row.insert("Paper".into(), json!(title));
        row.insert("DOI_URL".into(), json!(doi_url));
        for (_, keys) in GROUPS {
            for &(key, values) in keys {
                row.insert(key.into(), json!(rng.pick(values)));
            }
        }
        rows.push(row);
    }

    let keys_order: Vec<&str> = GROUPS
        .iter()
        .flat_map(|(_, keys)| keys.iter().map(|(k, _)| *k))
        .collect();
    let groups: Vec<Value> = GROUPS
        .iter()
        .map(|(name, keys)| json!({ "name": name, "keys": keys.iter().map(|(k, _)| *k).collect::<Vec<_>>() }))
        .collect();
    let mut buttons_order = Map::new();
    for (_, keys) in GROUPS {
        for &(key, values) in keys {
            let mut ordered: Vec<&str> = values.to_vec();
            if key == "Device" {
                ordered.push(UNUSED_DEVICE);
            }
            buttons_order.insert(key.into(), json!(ordered));
        }
    }
    let ordering = json!({
        "keysOrder": keys_order,
        "groups": groups,
        "buttonsOrder": buttons_order,
    });

    std::fs::write("data.json", serde_json::to_string_pretty(&rows)?).context("writing data.json")?;
    std::fs::write("ordering.json", serde_json::to_string_pretty(&ordering)?).context("writing ordering.json")?;
    write_parquet(&rows, "sample_data.parquet")?;

    println!("Wrote {n_papers} papers to data.json and sample_data.parquet, filter ordering to ordering.json");
    Ok(())
}

/// The same papers as a Parquet table with one text column per field.
fn write_parquet(rows: &[Map<String, Value>], path: &str) -> Result<()> {
    let Some(first) = rows.first() else {
        return Ok(());
    };
    let names: Vec<&String> = first.keys().collect();

    let schema = Arc::new(Schema::new(
        names
            .iter()
            .map(|name| Field::new(name.as_str(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));
    let columns = names
        .iter()
        .map(|name| {
            let values: Vec<Option<&str>> = rows.iter().map(|r| r.get(*name).and_then(Value::as_str)).collect();
            Arc::new(StringArray::from(values)) as arrow::array::ArrayRef
        })
        .collect();

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}
