use noodles::sam::alignment::record_buf::RecordBuf;
use std::collections::VecDeque;
use std::io;

/// Read name used for records without one, as written on the wire.
pub const MISSING_NAME: &[u8] = b"*";

/// Name of a record as raw bytes.
#[must_use]
pub fn record_name(record: &RecordBuf) -> &[u8] {
    match record.name() {
        Some(name) => <_ as AsRef<[u8]>>::as_ref(name),
        None => MISSING_NAME,
    }
}

/// A stream of alignment records read one at a time into a reused buffer.
pub trait RecordSource {
    /// Read the next record into `record`. Returns `false` at end of stream.
    ///
    /// # Errors
    ///
    /// Returns an I/O error for malformed or truncated input.
    fn read_record(&mut self, record: &mut RecordBuf) -> io::Result<bool>;
}

/// A destination for alignment records.
pub trait RecordSink {
    /// # Errors
    ///
    /// Returns an I/O error if the record cannot be written.
    fn write_record(&mut self, record: &RecordBuf) -> io::Result<()>;
}

impl RecordSource for VecDeque<RecordBuf> {
    fn read_record(&mut self, record: &mut RecordBuf) -> io::Result<bool> {
        match self.pop_front() {
            Some(next) => {
                *record = next;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl RecordSink for Vec<RecordBuf> {
    fn write_record(&mut self, record: &RecordBuf) -> io::Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn write_record(&mut self, record: &RecordBuf) -> io::Result<()> {
        (**self).write_record(record)
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use bstr::BString;
    use noodles::sam::alignment::record_buf::RecordBuf;

    /// Record with a name and optional primary/mate reference indices
    pub fn record(name: &str, tid: Option<usize>, mtid: Option<usize>) -> RecordBuf {
        let mut record = RecordBuf::builder().set_name(BString::from(name)).build();
        *record.reference_sequence_id_mut() = tid;
        *record.mate_reference_sequence_id_mut() = mtid;
        record
    }

    pub fn names(records: &[RecordBuf]) -> Vec<String> {
        records
            .iter()
            .map(|r| String::from_utf8_lossy(super::record_name(r)).into_owned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::testutil::record;
    use super::*;

    #[test]
    fn test_record_name() {
        assert_eq!(record_name(&record("r1", None, None)), b"r1");
        assert_eq!(record_name(&RecordBuf::default()), MISSING_NAME);
    }

    #[test]
    fn test_vec_deque_source() {
        let mut source: VecDeque<RecordBuf> =
            vec![record("a", None, None), record("b", None, None)].into();
        let mut buf = RecordBuf::default();
        assert!(source.read_record(&mut buf).unwrap());
        assert_eq!(record_name(&buf), b"a");
        assert!(source.read_record(&mut buf).unwrap());
        assert_eq!(record_name(&buf), b"b");
        assert!(!source.read_record(&mut buf).unwrap());
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<RecordBuf> = Vec::new();
        sink.write_record(&record("a", Some(1), None)).unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].reference_sequence_id(), Some(1));
    }
}
