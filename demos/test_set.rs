//! Writes the test sets of proteins that gained experimental evidence
//! between two snapshots
//!
//! Usage: test_set <T1 SNAPSHOT> <T2 SNAPSHOT> <OUTPUT DIR> [TAXON ID]
use std::process;

use goexp::workflow::create_test_sets;
use goexp::{ExtractionConfig, OutputLayout, ReaderSnapshot, TaxonFilter};

mod tsv_snapshot;
use tsv_snapshot::TsvDecoder;

fn main() {
    simple_logger::init_with_env().unwrap();

    let mut args = std::env::args();
    let (Some(t1), Some(t2), Some(output)) = (args.nth(1), args.next(), args.next()) else {
        println!("Usage: test_set <T1 SNAPSHOT> <T2 SNAPSHOT> <OUTPUT DIR> [TAXON ID]");
        process::exit(1)
    };
    let taxon = args
        .next()
        .map_or(TaxonFilter::All, |taxon_id| TaxonFilter::taxon(&taxon_id));

    let mut t1 = ReaderSnapshot::open(t1, TsvDecoder).unwrap();
    let mut t2 = ReaderSnapshot::open(t2, TsvDecoder).unwrap();
    let config = ExtractionConfig::default()
        .with_taxon(taxon)
        .with_output(OutputLayout::new(output, "test"));

    let summaries = create_test_sets(&mut t1, &mut t2, &config).unwrap();
    for summary in summaries {
        println!(
            "{}\t{} found at t2\t{} gained experimental evidence",
            summary.category, summary.matched, summary.emitted
        );
    }
}
