mod synthetic_data;

use query_lite::{Schema, SchemaConfig};
use std::time::Instant;

const QUERIES: usize = 100_000;

fn main() {
    let queries = synthetic_data::synthetic_queries(QUERIES);
    let cfg = SchemaConfig::default();
    println!("Generated {QUERIES} synthetic query strings");

    let start = Instant::now();
    let mut rejected = 0usize;
    let mut filters = 0usize;
    for q in &queries {
        let schema = Schema::with_config(q.as_str(), &cfg);
        if schema.validate().is_err() {
            rejected += 1;
            continue;
        }
        let out = schema.parse();
        filters += out.filter().map_or(0, bson::Document::len);
    }
    let elapsed = start.elapsed();
    let per_query = elapsed.as_secs_f64() * 1e6 / QUERIES as f64;
    println!("parsed {QUERIES} queries in {elapsed:?} ({per_query:.2} us/query)");
    println!("rejected={rejected} filter_clauses={filters}");
}
