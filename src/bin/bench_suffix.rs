// Benchmark script to compare suffix index construction strategies
use std::time::Instant;
use suffixseek::{IndexConfig, SequenceStore, SortAlgorithm, SuffixIndex};

fn time_build(store: &SequenceStore, algorithm: SortAlgorithm, parallel: bool) -> SuffixIndex {
    let start = Instant::now();
    let index = SuffixIndex::build(store, &IndexConfig { algorithm, parallel })
        .expect("Failed to build suffix index");
    println!(
        "{:<12} parallel={:<5} {:?}",
        algorithm.to_string(),
        parallel,
        start.elapsed()
    );
    index
}

fn main() {
    println!("Suffix Index Construction Benchmark");
    println!("===================================");

    let Some(input) = std::env::args().nth(1) else {
        eprintln!("usage: bench_suffix <fasta>");
        std::process::exit(2);
    };

    println!("Loading sequence from {}", input);
    let store = SequenceStore::from_fasta(&input).expect("Failed to load test sequence");
    println!("Sequence length: {}", store.len());
    println!();

    let sequential = time_build(&store, SortAlgorithm::Comparison, false);
    let parallel = time_build(&store, SortAlgorithm::Comparison, true);
    let sais = time_build(&store, SortAlgorithm::SuffixArray, true);

    println!();
    if sequential == parallel && parallel == sais {
        println!("All strategies produced the same order");
    } else {
        println!("Strategies disagree!");
        std::process::exit(1);
    }
}
