//! Restartable, forward-only access to the records of a snapshot
//!
//! A snapshot is usually far too large to keep in memory. Every pass over it
//! therefore streams the records from the start, and passes that need the
//! same snapshot more than once (one pass per ontology category, or an index
//! pass followed by a diff pass) restart the source in between.
//!
//! [`SnapshotSource::scan`] always restarts the source before returning the
//! iterator, so every pass sees every record exactly once.
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::{debug, trace};

use crate::annotations::{AnnotationEntry, Record};
use crate::GoExpError;
use crate::GoExpResult;

/// A restartable sequence of records
pub trait SnapshotSource {
    /// The record type produced by the source
    type Entry: Record;

    /// Re-positions the source at its first record
    ///
    /// # Errors
    ///
    /// Returns an error if the backing resource cannot be re-positioned
    fn restart(&mut self) -> GoExpResult<()>;

    /// Produces the next record, `None` once the snapshot is exhausted
    fn next_entry(&mut self) -> Option<GoExpResult<Self::Entry>>;

    /// Iterates the remaining records from the current position
    fn entries(&mut self) -> Entries<'_, Self>
    where
        Self: Sized,
    {
        Entries { source: self }
    }

    /// Restarts the source and iterates all records
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be restarted
    fn scan(&mut self) -> GoExpResult<Entries<'_, Self>>
    where
        Self: Sized,
    {
        self.restart()?;
        Ok(self.entries())
    }
}

/// Iterator over the records of a [`SnapshotSource`]
pub struct Entries<'a, S: SnapshotSource> {
    source: &'a mut S,
}

impl<S: SnapshotSource> Iterator for Entries<'_, S> {
    type Item = GoExpResult<S::Entry>;
    fn next(&mut self) -> Option<Self::Item> {
        self.source.next_entry()
    }
}

impl<S: SnapshotSource> std::fmt::Debug for Entries<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entries")
    }
}

/// A snapshot held in memory
///
/// Mostly useful for tests and small data sets. Each call to
/// [`SnapshotSource::next_entry`] hands out a copy of the record, so the
/// consumer owns it just like a freshly decoded record.
///
/// # Examples
///
/// ```
/// use goexp::{AnnotationEntry, MemorySnapshot, SnapshotSource};
///
/// let mut snapshot = MemorySnapshot::new(vec![
///     AnnotationEntry::new(["P1"], "M"),
///     AnnotationEntry::new(["P2"], "M"),
/// ]);
///
/// assert_eq!(snapshot.scan().unwrap().count(), 2);
/// // scanning again starts from the first record
/// assert_eq!(snapshot.scan().unwrap().count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshot<E = AnnotationEntry> {
    entries: Vec<E>,
    position: usize,
}

impl<E> MemorySnapshot<E> {
    /// Constructs a snapshot from records
    pub fn new(entries: Vec<E>) -> Self {
        Self {
            entries,
            position: 0,
        }
    }

    /// Number of records in the snapshot
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the snapshot holds no records
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E: Record + Clone> SnapshotSource for MemorySnapshot<E> {
    type Entry = E;

    fn restart(&mut self) -> GoExpResult<()> {
        trace!("Restarting in-memory snapshot at position {}", self.position);
        self.position = 0;
        Ok(())
    }

    fn next_entry(&mut self) -> Option<GoExpResult<E>> {
        let entry = self.entries.get(self.position)?.clone();
        self.position += 1;
        Some(Ok(entry))
    }
}

impl<E> FromIterator<E> for MemorySnapshot<E> {
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Turns raw snapshot data into records
///
/// This is the seam to the external record parser. The decoder is called
/// repeatedly with the same reader and must return `Ok(None)` once the
/// reader is exhausted.
pub trait RecordDecoder {
    /// The record type produced by the decoder
    type Entry: Record;

    /// Decodes the next record from `reader`
    ///
    /// # Errors
    ///
    /// [`GoExpError::Decode`] or [`GoExpError::Io`] if the data is not a
    /// valid record
    fn decode<R: BufRead>(&mut self, reader: &mut R) -> GoExpResult<Option<Self::Entry>>;

    /// Clears any state kept between records, called on every restart
    fn reset(&mut self) {}
}

/// A snapshot streamed from a seekable resource, e.g. a file
///
/// Restarting seeks the resource back to its first byte. Records are decoded
/// anew on every pass and never cached.
pub struct ReaderSnapshot<R: Read + Seek, D: RecordDecoder> {
    reader: BufReader<R>,
    decoder: D,
    decoded: usize,
}

impl<D: RecordDecoder> ReaderSnapshot<File, D> {
    /// Opens a snapshot file
    ///
    /// # Errors
    ///
    /// [`GoExpError::CannotOpenFile`] if the file cannot be opened
    pub fn open<P: AsRef<Path>>(path: P, decoder: D) -> GoExpResult<Self> {
        let filename = path.as_ref().display().to_string();
        let file = File::open(path).map_err(|_| GoExpError::CannotOpenFile(filename))?;
        Ok(Self::new(file, decoder))
    }
}

impl<R: Read + Seek, D: RecordDecoder> ReaderSnapshot<R, D> {
    /// Constructs a snapshot from any seekable reader
    pub fn new(reader: R, decoder: D) -> Self {
        Self {
            reader: BufReader::new(reader),
            decoder,
            decoded: 0,
        }
    }

    /// Returns the underlying reader
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl<R: Read + Seek, D: RecordDecoder> SnapshotSource for ReaderSnapshot<R, D> {
    type Entry = D::Entry;

    fn restart(&mut self) -> GoExpResult<()> {
        debug!("Restarting snapshot after {} decoded records", self.decoded);
        self.reader.seek(SeekFrom::Start(0))?;
        self.decoder.reset();
        self.decoded = 0;
        Ok(())
    }

    fn next_entry(&mut self) -> Option<GoExpResult<D::Entry>> {
        match self.decoder.decode(&mut self.reader) {
            Ok(Some(entry)) => {
                self.decoded += 1;
                Some(Ok(entry))
            }
            Ok(None) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

impl<R: Read + Seek, D: RecordDecoder> std::fmt::Debug for ReaderSnapshot<R, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReaderSnapshot({} decoded)", self.decoded)
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;

    /// One record per line: `ACC1,ACC2<TAB>SEQUENCE`
    struct LineDecoder;

    impl RecordDecoder for LineDecoder {
        type Entry = AnnotationEntry;

        fn decode<R: BufRead>(&mut self, reader: &mut R) -> GoExpResult<Option<AnnotationEntry>> {
            let mut line = String::new();
            if reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let Some((accessions, sequence)) = line.trim_end().split_once('\t') else {
                return Err(GoExpError::Decode(line));
            };
            Ok(Some(AnnotationEntry::new(
                accessions.split(','),
                sequence,
            )))
        }
    }

    #[test]
    fn memory_snapshot_restarts() {
        let mut snapshot: MemorySnapshot = ["P1", "P2", "P3"]
            .into_iter()
            .map(|acc| AnnotationEntry::new([acc], "M"))
            .collect();

        let first = snapshot.entries().next().unwrap().unwrap();
        assert_eq!(first.primary_accession(), Some("P1"));
        assert_eq!(snapshot.entries().count(), 2);
        assert_eq!(snapshot.entries().count(), 0);

        let accessions: Vec<String> = snapshot
            .scan()
            .unwrap()
            .map(|e| e.unwrap().accessions()[0].clone())
            .collect();
        assert_eq!(accessions, vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn empty_memory_snapshot() {
        let mut snapshot = MemorySnapshot::<AnnotationEntry>::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.scan().unwrap().count(), 0);
    }

    #[test]
    fn reader_snapshot_rewinds() {
        let data = "P1,Q1\tMKV\nP2\tMAA\n";
        let mut snapshot = ReaderSnapshot::new(Cursor::new(data), LineDecoder);

        let entries: Vec<AnnotationEntry> =
            snapshot.scan().unwrap().map(|e| e.unwrap()).collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].accessions(), ["P1", "Q1"]);
        assert_eq!(entries[1].sequence(), "MAA");

        // second pass decodes the same records again
        assert_eq!(snapshot.scan().unwrap().count(), 2);
    }

    #[test]
    fn reader_snapshot_decode_error() {
        let data = "P1\tMKV\nbroken\n";
        let mut snapshot = ReaderSnapshot::new(Cursor::new(data), LineDecoder);
        let results: Vec<GoExpResult<AnnotationEntry>> = snapshot.scan().unwrap().collect();
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(GoExpError::Decode(_))));
    }

    #[test]
    fn open_missing_file() {
        let res = ReaderSnapshot::open("/non/existing/snapshot.dat", LineDecoder);
        assert!(matches!(res, Err(GoExpError::CannotOpenFile(_))));
    }
}
