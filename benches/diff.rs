use std::io::sink;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use goexp::diff::{nexp_diff, reevaluation_diff};
use goexp::output::CategoryOutput;
use goexp::state::{NexpIndex, PriorTermMap};
use goexp::{AnnotationEntry, CrossReference, Emitter, EvidenceVocabulary, MemorySnapshot};
use goexp::{OntologyCategory, ProbeMode, SyntheticIds, TaxonFilter};

/// t1 has only electronic annotations, t2 adds experimental ones to every other protein
fn snapshots(size: usize) -> (MemorySnapshot, MemorySnapshot) {
    let t1 = (0..size)
        .map(|idx| {
            AnnotationEntry::new([format!("P{idx:05}"), format!("Q{idx:05}")], "MKVLAAGIV")
                .with_cross_reference(CrossReference::go(
                    &format!("GO:{:07}", idx % 700),
                    "P",
                    "IEA:InterPro",
                ))
        })
        .collect();
    let t2 = (0..size)
        .map(|idx| {
            let mut entry = AnnotationEntry::new([format!("Q{idx:05}")], "MKVLAAGIV")
                .with_cross_reference(CrossReference::go(
                    &format!("GO:{:07}", idx % 700),
                    "P",
                    "IEA:InterPro",
                ));
            if idx % 2 == 0 {
                entry.add_cross_reference(CrossReference::go(
                    &format!("GO:{:07}", idx % 300),
                    "P",
                    "IDA:PubMed",
                ));
            }
            entry
        })
        .collect();
    (t1, t2)
}

fn diff_benchmark(c: &mut Criterion) {
    let vocabulary = EvidenceVocabulary::experimental();
    let (mut t1, mut t2) = snapshots(5000);

    c.bench_function("build nexp index", |b| {
        b.iter(|| {
            NexpIndex::build(
                &mut t1,
                OntologyCategory::Bpo,
                black_box(&vocabulary),
                &TaxonFilter::All,
            )
            .expect("in-memory snapshot cannot fail")
            .len()
        })
    });

    let index = NexpIndex::build(&mut t1, OntologyCategory::Bpo, &vocabulary, &TaxonFilter::All)
        .expect("in-memory snapshot cannot fail");
    c.bench_function("nexp diff", |b| {
        b.iter(|| {
            let mut output = CategoryOutput::new(
                OntologyCategory::Bpo,
                SyntheticIds::new("1").expect("valid namespace"),
                Emitter::new(sink(), sink()),
            );
            nexp_diff(black_box(&index), &mut t2, &vocabulary, &mut output)
                .expect("writing to sink cannot fail")
                .emitted
        })
    });

    let mut prior = PriorTermMap::new();
    for idx in 0..5000 {
        prior.insert(
            &format!("T{idx}"),
            &format!("Q{idx:05}"),
            &format!("GO:{:07}", idx % 700),
        );
    }
    c.bench_function("reevaluation diff", |b| {
        b.iter(|| {
            let mut emitter = Emitter::new(sink(), sink());
            reevaluation_diff(
                black_box(&prior),
                &mut t2,
                OntologyCategory::Bpo,
                &vocabulary,
                ProbeMode::Exhaustive,
                &mut emitter,
            )
            .expect("writing to sink cannot fail")
            .emitted
        })
    });
}

criterion_group! {
    name = diff;
    config = Criterion::default().sample_size(20).measurement_time(Duration::from_secs(10));
    targets = diff_benchmark
}
criterion_main!(diff);
