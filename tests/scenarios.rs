use std::fs;
use std::path::Path;

use goexp::workflow::{create_reevaluation_set, create_test_sets, create_training_sets};
use goexp::{AnnotationEntry, CrossReference, EvidenceVocabulary, ExtractionConfig};
use goexp::{MemorySnapshot, OntologyCategory, OutputLayout, ProbeMode, Record, TaxonFilter};
use goexp::SnapshotSource;

fn exp_only() -> EvidenceVocabulary {
    "EXP".parse().unwrap()
}

fn config(dir: &Path, prefix: &str) -> ExtractionConfig {
    ExtractionConfig::default()
        .with_vocabulary(exp_only())
        .with_output(OutputLayout::new(dir, prefix))
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

#[test]
fn gained_experimental_evidence_between_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let mut t1 = MemorySnapshot::new(vec![AnnotationEntry::new(["A"], "MKV")
        .with_cross_reference(CrossReference::go("G:0001", "P", "IEA:x"))]);
    let mut t2 = MemorySnapshot::new(vec![AnnotationEntry::new(["A"], "MKV")
        .with_cross_reference(CrossReference::go("G:0001", "P", "IEA:x"))
        .with_cross_reference(CrossReference::go("G:0002", "P", "EXP:y"))]);

    let config = config(dir.path(), "test").with_categories(&[OntologyCategory::Bpo]);
    let summaries = create_test_sets(&mut t1, &mut t2, &config).unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].emitted, 1);
    assert_eq!(read(dir.path(), "test_BPO.fasta"), ">10000001 A\nMKV\n");
    assert_eq!(read(dir.path(), "test_BPO.tsv"), "10000001\tA\tG:0002\n");
}

#[test]
fn training_set_of_single_entry() {
    let dir = tempfile::tempdir().unwrap();
    let mut snapshot = MemorySnapshot::new(vec![AnnotationEntry::new(["P99999"], "MAAA")
        .with_cross_reference(CrossReference::go("G:0003", "F", "EXP:z"))]);

    let config = config(dir.path(), "train").with_categories(&[OntologyCategory::Mfo]);
    create_training_sets(&mut snapshot, &config).unwrap();

    assert_eq!(read(dir.path(), "train_MFO.fasta"), ">10000001 P99999\nMAAA\n");
    assert_eq!(read(dir.path(), "train_MFO.tsv"), "10000001\tP99999\tG:0003\n");
}

#[test]
fn reevaluation_stops_after_first_gain() {
    let dir = tempfile::tempdir().unwrap();
    let prior = dir.path().join("prior.tsv");
    fs::write(&prior, "T1\tACC1\tG:0010\nT2\tACC2\tG:0020\n").unwrap();

    let mut t2 = MemorySnapshot::new(vec![
        AnnotationEntry::new(["acc1"], "MKV")
            .with_cross_reference(CrossReference::go("G:0010", "C", "EXP:x"))
            .with_cross_reference(CrossReference::go("G:0011", "C", "EXP:x")),
        AnnotationEntry::new(["ACC2"], "MAA")
            .with_cross_reference(CrossReference::go("G:0021", "C", "EXP:x")),
    ]);

    let config = config(dir.path(), "reeval");
    let summary =
        create_reevaluation_set(&prior, &mut t2, OntologyCategory::Cco, &config).unwrap();
    assert_eq!(summary.emitted, 1);
    assert_eq!(summary.scanned, 1);
    assert_eq!(read(dir.path(), "reeval_CCO.fasta"), ">T1 ACC1\nMKV\n");
    assert_eq!(read(dir.path(), "reeval_CCO.tsv"), "T1\tACC1\tG:0011\n");

    let config = config.with_probe_mode(ProbeMode::Exhaustive);
    let summary =
        create_reevaluation_set(&prior, &mut t2, OntologyCategory::Cco, &config).unwrap();
    assert_eq!(summary.emitted, 2);
    assert_eq!(
        read(dir.path(), "reeval_CCO.tsv"),
        "T1\tACC1\tG:0011\nT2\tACC2\tG:0021\n"
    );
}

#[test]
fn no_qualifying_entries_gives_empty_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut snapshot = MemorySnapshot::new(vec![AnnotationEntry::new(["P1"], "M")
        .with_taxon("9606")
        .with_cross_reference(CrossReference::go("G:1", "F", "IEA:x"))]);

    let config = config(dir.path(), "empty").with_taxon(TaxonFilter::taxon("7227"));
    let summaries = create_training_sets(&mut snapshot, &config).unwrap();
    assert!(summaries.iter().all(|summary| summary.emitted == 0));

    for category in OntologyCategory::ALL {
        assert_eq!(read(dir.path(), &format!("empty_{category}.fasta")), "");
        assert_eq!(read(dir.path(), &format!("empty_{category}.tsv")), "");
    }
}

fn mixed_snapshot() -> MemorySnapshot {
    let mut entries = Vec::new();
    for idx in 0..50usize {
        let mut entry = AnnotationEntry::new(
            [format!("P{idx:03}"), format!("Q{idx:03}")],
            &"MKV".repeat(idx % 5 + 1),
        )
        .with_taxon(if idx % 2 == 0 { "9606" } else { "559292" });
        for xref in 0..(idx % 7) {
            let evidence = if (idx + xref) % 3 == 0 { "EXP:x" } else { "IEA:x" };
            let aspect = ["F", "P", "C"][xref % 3];
            entry.add_cross_reference(CrossReference::go(
                &format!("G:{:04}", (idx * 13 + xref) % 97),
                aspect,
                evidence,
            ));
        }
        entries.push(entry);
    }
    MemorySnapshot::new(entries)
}

#[test]
fn training_extraction_is_deterministic() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let mut snapshot = mixed_snapshot();

    create_training_sets(&mut snapshot, &config(first.path(), "run")).unwrap();
    create_training_sets(&mut snapshot, &config(second.path(), "run")).unwrap();

    for category in OntologyCategory::ALL {
        for name in [format!("run_{category}.fasta"), format!("run_{category}.tsv")] {
            assert_eq!(read(first.path(), &name), read(second.path(), &name));
        }
    }
}

#[test]
fn emitted_accessions_belong_to_their_entries() {
    let dir = tempfile::tempdir().unwrap();
    let mut snapshot = mixed_snapshot();
    let entries: Vec<AnnotationEntry> = snapshot.scan().unwrap().map(Result::unwrap).collect();

    let config = config(dir.path(), "acc").with_taxon(TaxonFilter::taxon("9606"));
    let summaries = create_training_sets(&mut snapshot, &config).unwrap();
    assert!(summaries.iter().any(|summary| summary.emitted > 0));

    for category in OntologyCategory::ALL {
        for row in read(dir.path(), &format!("acc_{category}.tsv")).lines() {
            let accession = row.split('\t').nth(1).unwrap();
            assert!(
                entries.iter().any(|entry| entry.matches_accession(accession)
                    && entry.has_taxon("9606")),
                "{accession} is not a 9606 accession"
            );
        }
    }
}

#[test]
fn taxon_namespace_ids() {
    let dir = tempfile::tempdir().unwrap();
    let mut snapshot = mixed_snapshot();
    let config = config(dir.path(), "yeast").with_taxon(TaxonFilter::taxon("559292"));
    create_training_sets(&mut snapshot, &config).unwrap();

    for category in OntologyCategory::ALL {
        let mapping = read(dir.path(), &format!("yeast_{category}.tsv"));
        for (idx, row) in mapping.lines().enumerate() {
            let id = row.split('\t').next().unwrap();
            assert_eq!(id, format!("559292{:07}", idx + 1));
        }
    }
}
