use noodles::sam::alignment::io::Write as AlignmentWrite;
use noodles::sam::alignment::record_buf::RecordBuf;
use noodles::sam::Header;
use noodles::{bam, sam};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::core::record::{RecordSink, RecordSource};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Alignment container, chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentFormat {
    Sam,
    Bam,
    Cram,
}

impl AlignmentFormat {
    /// Detect the format from a path's extension (case-insensitive).
    ///
    /// Paths without an extension are treated as SAM.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnsupportedFormat` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("sam") | None => Ok(Self::Sam),
            Some("bam") => Ok(Self::Bam),
            Some("cram") => Ok(Self::Cram),
            Some(ext) => Err(ParseError::UnsupportedFormat(ext.to_string())),
        }
    }
}

/// Read the header of a SAM/BAM/CRAM file, ignoring any records.
///
/// Used for the header templates written to each output.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, or `ParseError::UnsupportedFormat` for unknown extensions.
pub fn read_header_template(path: &Path) -> Result<Header, ParseError> {
    match AlignmentFormat::from_path(path)? {
        AlignmentFormat::Sam => read_sam_header(path),
        AlignmentFormat::Bam => read_bam_header(path),
        AlignmentFormat::Cram => read_cram_header(path),
    }
}

fn read_sam_header(path: &Path) -> Result<Header, ParseError> {
    let mut reader = File::open(path)
        .map(BufReader::new)
        .map(sam::io::Reader::new)?;

    reader
        .read_header()
        .map_err(|e| ParseError::Noodles(e.to_string()))
}

fn read_bam_header(path: &Path) -> Result<Header, ParseError> {
    let mut reader = File::open(path).map(bam::io::Reader::new)?;

    reader
        .read_header()
        .map_err(|e| ParseError::Noodles(e.to_string()))
}

fn read_cram_header(path: &Path) -> Result<Header, ParseError> {
    use noodles::cram;

    let mut reader = File::open(path).map(cram::io::Reader::new)?;

    reader
        .read_file_definition()
        .map_err(|e| ParseError::Noodles(e.to_string()))?;

    reader
        .read_file_header()
        .map_err(|e| ParseError::Noodles(e.to_string()))
}

/// Record decoding shared by the SAM and BAM readers
trait RecordBufRead {
    fn read_record_buf(&mut self, header: &Header, record: &mut RecordBuf) -> io::Result<usize>;
}

impl<R: Read> RecordBufRead for bam::io::Reader<R> {
    fn read_record_buf(&mut self, header: &Header, record: &mut RecordBuf) -> io::Result<usize> {
        bam::io::Reader::read_record_buf(self, header, record)
    }
}

impl<R: BufRead> RecordBufRead for sam::io::Reader<R> {
    fn read_record_buf(&mut self, header: &Header, record: &mut RecordBuf) -> io::Result<usize> {
        sam::io::Reader::read_record_buf(self, header, record)
    }
}

/// Sequential reader over a SAM or BAM file.
///
/// The header is read when the file is opened. CRAM is not supported for record
/// input since decoding it requires the reference sequences.
pub struct AlignmentReader {
    path: PathBuf,
    header: Header,
    inner: Box<dyn RecordBufRead>,
}

impl AlignmentReader {
    /// Open a SAM or BAM file and read its header.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be opened,
    /// `ParseError::Noodles` if the header is invalid, or
    /// `ParseError::UnsupportedFormat` for CRAM and unknown extensions.
    pub fn open(path: &Path) -> Result<Self, ParseError> {
        let (header, inner): (Header, Box<dyn RecordBufRead>) =
            match AlignmentFormat::from_path(path)? {
                AlignmentFormat::Bam => {
                    let mut reader = File::open(path).map(bam::io::Reader::new)?;
                    let header = reader
                        .read_header()
                        .map_err(|e| ParseError::Noodles(e.to_string()))?;
                    (header, Box::new(reader))
                }
                AlignmentFormat::Sam => {
                    let mut reader = File::open(path)
                        .map(BufReader::new)
                        .map(sam::io::Reader::new)?;
                    let header = reader
                        .read_header()
                        .map_err(|e| ParseError::Noodles(e.to_string()))?;
                    (header, Box::new(reader))
                }
                AlignmentFormat::Cram => {
                    return Err(ParseError::UnsupportedFormat("cram".to_string()));
                }
            };

        debug!(
            path = %path.display(),
            references = header.reference_sequences().len(),
            "Opened alignment input"
        );

        Ok(Self {
            path: path.to_path_buf(),
            header,
            inner,
        })
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for AlignmentReader {
    fn read_record(&mut self, record: &mut RecordBuf) -> io::Result<bool> {
        self.inner
            .read_record_buf(&self.header, record)
            .map(|n| n > 0)
    }
}

/// Writer for one output, bound to the header its records are encoded against.
///
/// `.sam` paths are written as SAM text; everything else except CRAM as BAM.
pub struct AlignmentWriter {
    path: PathBuf,
    header: Header,
    inner: Box<dyn AlignmentWrite>,
}

impl AlignmentWriter {
    /// Create (truncate) the output file. Nothing is written until `write_header`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be created, or
    /// `ParseError::UnsupportedFormat` for CRAM.
    pub fn create(path: &Path, header: Header) -> Result<Self, ParseError> {
        let inner: Box<dyn AlignmentWrite> = match AlignmentFormat::from_path(path) {
            Ok(AlignmentFormat::Sam) => {
                Box::new(File::create(path).map(BufWriter::new).map(sam::io::Writer::new)?)
            }
            Ok(AlignmentFormat::Cram) => {
                return Err(ParseError::UnsupportedFormat("cram".to_string()));
            }
            Ok(AlignmentFormat::Bam) | Err(_) => {
                Box::new(File::create(path).map(bam::io::Writer::new)?)
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            header,
            inner,
        })
    }

    /// Write the header. Must be called exactly once, before any record.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the header cannot be written.
    pub fn write_header(&mut self) -> io::Result<()> {
        self.inner.write_alignment_header(&self.header)
    }

    /// Flush buffered records and write any trailer (the BGZF EOF block for BAM).
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the final write fails.
    pub fn finish(mut self) -> io::Result<()> {
        self.inner.finish(&self.header)
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for AlignmentWriter {
    fn write_record(&mut self, record: &RecordBuf) -> io::Result<()> {
        self.inner.write_alignment_record(&self.header, record)
    }
}
