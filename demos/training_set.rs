//! Writes the training sets of all three ontologies and prints the gene counts
//!
//! Usage: training_set <SNAPSHOT> <OUTPUT DIR> [TAXON ID]
use std::process;

use goexp::extract::count_genes;
use goexp::workflow::create_training_sets;
use goexp::{ExtractionConfig, OutputLayout, PassStrategy, ReaderSnapshot, TaxonFilter};

mod tsv_snapshot;
use tsv_snapshot::TsvDecoder;

fn main() {
    simple_logger::init_with_env().unwrap();

    let mut args = std::env::args();
    let (Some(snapshot), Some(output)) = (args.nth(1), args.next()) else {
        println!("Usage: training_set <SNAPSHOT> <OUTPUT DIR> [TAXON ID]");
        process::exit(1)
    };
    let taxon = match args.next() {
        Some(taxon_id) => TaxonFilter::taxon(&taxon_id),
        None => TaxonFilter::All,
    };

    let mut snapshot = ReaderSnapshot::open(snapshot, TsvDecoder).unwrap();
    let config = ExtractionConfig::default()
        .with_taxon(taxon)
        .with_strategy(PassStrategy::SinglePass)
        .with_output(OutputLayout::new(output, "training"));

    for summary in create_training_sets(&mut snapshot, &config).unwrap() {
        println!(
            "{}\t{} of {} proteins",
            summary.category, summary.emitted, summary.selected
        );
    }

    let counts = count_genes(&mut snapshot, config.vocabulary(), config.taxon()).unwrap();
    println!(
        "MFO: {}\tBPO: {}\tCCO: {}",
        counts.mfo(),
        counts.bpo(),
        counts.cco()
    );
}
