//! Seeded document generator shared by the benchmarks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build a scene-like document with `objects` entries, each carrying a
/// 4x4 transform and a block list of sample values.
pub fn numeric_document(objects: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::from("version: 8\nobjects:\n");

    for i in 0..objects {
        out.push_str(&format!("  - id: obj{i}\n"));
        out.push_str("    transform:\n");
        for _ in 0..4 {
            let row: Vec<String> = (0..4)
                .map(|_| format!("{:.4}", rng.gen_range(-10.0..10.0)))
                .collect();
            out.push_str(&format!("      - [{}]\n", row.join(", ")));
        }
        out.push_str("    samples:\n");
        for _ in 0..8 {
            out.push_str(&format!("      - {}\n", rng.gen_range(-1000i32..1000)));
        }
        out.push_str(&format!("    label: item_{}\n", rng.gen_range(0u32..1_000_000)));
    }
    out
}
