//! A minimal snapshot format for the demos
//!
//! One protein per line, four tab separated columns:
//!
//! ```text
//! P12345;Q00001	9606	MKVLAAGIV	GO:0005634|C|IDA:UniProtKB;GO:0003677|F|IEA:InterPro
//! ```
use std::io::BufRead;

use goexp::{AnnotationEntry, CrossReference, GoExpError, GoExpResult, RecordDecoder};

pub struct TsvDecoder;

impl RecordDecoder for TsvDecoder {
    type Entry = AnnotationEntry;

    fn decode<R: BufRead>(&mut self, reader: &mut R) -> GoExpResult<Option<AnnotationEntry>> {
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            if !line.trim().is_empty() && !line.starts_with('#') {
                break;
            }
        }

        let mut cols = line.trim_end().split('\t');
        let (Some(accessions), Some(taxon), Some(sequence)) = (cols.next(), cols.next(), cols.next())
        else {
            return Err(GoExpError::Decode(line.trim_end().to_string()));
        };

        let mut entry = AnnotationEntry::new(accessions.split(';'), sequence).with_taxon(taxon);
        for xref in cols.next().unwrap_or_default().split(';').filter(|x| !x.is_empty()) {
            let mut fields = xref.split('|');
            let (Some(term), Some(aspect), Some(evidence)) =
                (fields.next(), fields.next(), fields.next())
            else {
                return Err(GoExpError::Decode(xref.to_string()));
            };
            entry.add_cross_reference(CrossReference::go(term, aspect, evidence));
        }
        Ok(Some(entry))
    }
}
