//! Write operations for archives

// crate modules
use crate::archive::Archive;
use crate::codec;
use crate::convention::Convention;
use crate::error::{Error, Result};
use crate::pack::ToArchive;

// standard library
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

// external crates
use log::debug;

/// Somewhere an archive can be persisted to and read back from
///
/// Filesystem paths and in-memory streams are accepted uniformly by the
/// writer through this seam. Implementations surface
/// [Error::DestinationUnavailable] whenever the destination cannot be opened
/// or accessed, naming the target.
pub trait Destination {
    /// Read any existing archive, `None` when the destination holds nothing
    fn load(&mut self) -> Result<Option<Archive>>;

    /// Replace the destination content with `archive`
    fn store(&mut self, archive: &Archive) -> Result<()>;
}

/// A destination backed by a filesystem path
#[derive(Debug, Clone)]
pub struct FileDestination {
    path: PathBuf,
}

impl FileDestination {
    /// Initialise a destination from anything that can be turned into a path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The destination path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, source: std::io::Error) -> Error {
        Error::DestinationUnavailable {
            target: self.path.display().to_string(),
            source,
        }
    }
}

impl Destination for FileDestination {
    fn load(&mut self) -> Result<Option<Archive>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path).map_err(|e| self.unavailable(e))?;
        let length = file.metadata().map_err(|e| self.unavailable(e))?.len();
        if length == 0 {
            return Ok(None);
        }

        Ok(Some(codec::decode_from(BufReader::new(file))?))
    }

    fn store(&mut self, archive: &Archive) -> Result<()> {
        let file = File::create(&self.path).map_err(|e| self.unavailable(e))?;
        let mut writer = BufWriter::new(file);
        codec::encode_into(&mut writer, archive)?;
        writer.flush().map_err(|e| self.unavailable(e))
    }
}

/// A destination backed by an open binary stream
///
/// Anything readable, writable, and seekable works, most usefully an
/// in-memory `Cursor<Vec<u8>>`. Rewriting does not truncate the stream;
/// stale bytes past the encoded archive are ignored on read-back because the
/// codec reads exact lengths.
#[derive(Debug)]
pub struct StreamDestination<S: Read + Write + Seek> {
    stream: S,
}

impl<S: Read + Write + Seek> StreamDestination<S> {
    /// Wrap an open stream
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Reference to the underlying stream
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Release the underlying stream
    pub fn into_inner(self) -> S {
        self.stream
    }
}

fn stream_unavailable(source: std::io::Error) -> Error {
    Error::DestinationUnavailable {
        target: "stream".to_string(),
        source,
    }
}

impl<S: Read + Write + Seek> Destination for StreamDestination<S> {
    fn load(&mut self) -> Result<Option<Archive>> {
        self.stream
            .seek(SeekFrom::Start(0))
            .map_err(stream_unavailable)?;

        let mut buffer = Vec::new();
        self.stream
            .read_to_end(&mut buffer)
            .map_err(stream_unavailable)?;

        if buffer.is_empty() {
            return Ok(None);
        }
        Ok(Some(codec::decode_from(buffer.as_slice())?))
    }

    fn store(&mut self, archive: &Archive) -> Result<()> {
        self.stream
            .seek(SeekFrom::Start(0))
            .map_err(stream_unavailable)?;
        codec::encode_into(&mut self.stream, archive)?;
        self.stream.flush().map_err(stream_unavailable)
    }
}

/// Persist an archive to a destination
///
/// With `append` false the destination content is replaced wholesale, so
/// only the archive's keys exist afterwards. With `append` true any existing
/// content is loaded first and merged underneath: the archive's values win
/// on key collision, existing keys absent from the archive are preserved. An
/// absent or empty destination appends onto nothing.
///
/// The codec capability is checked before any data is touched, so a missing
/// backend fails with [Error::SerializationUnsupported] without opening the
/// destination.
pub fn write_archive<D: Destination>(
    destination: &mut D,
    archive: Archive,
    append: bool,
) -> Result<()> {
    if !codec::serialization_available() {
        return Err(Error::SerializationUnsupported);
    }

    let merged = if append {
        match destination.load()? {
            Some(mut existing) => {
                debug!(
                    "appending {} entries over {} existing",
                    archive.len(),
                    existing.len()
                );
                existing.merge(archive);
                existing
            }
            None => archive,
        }
    } else {
        archive
    };

    destination.store(&merged)
}

/// Export a record to any destination
///
/// Packs `record` under `convention` and persists the result, composing
/// [ToArchive] and [write_archive()]. Each call is a self-contained
/// transformation; concurrent exporters targeting the same destination must
/// be serialized by the caller.
///
/// ```rust
/// # use sertools_matbin::{export, Convention, StreamDestination};
/// # use sertools_objects::Detector;
/// # use nalgebra::DMatrix;
/// # use std::io::Cursor;
/// let mut detector = Detector::new("spectrum");
/// detector.set_bins(DMatrix::zeros(10, 12));
///
/// let mut destination = StreamDestination::new(Cursor::new(Vec::new()));
/// export(&detector, &mut destination, Convention::Disambiguated, false).unwrap();
/// ```
pub fn export<R: ToArchive, D: Destination>(
    record: &R,
    destination: &mut D,
    convention: Convention,
    append: bool,
) -> Result<()> {
    let archive = record.to_archive(convention)?;
    write_archive(destination, archive, append)
}

/// Export a record to a file path
///
/// Convenience wrapper over [export()] for the common filesystem case.
///
/// ```rust, no_run
/// # use sertools_matbin::{export_to_file, Convention};
/// # use sertools_objects::Detector;
/// # use nalgebra::DMatrix;
/// let mut detector = Detector::new("spectrum");
/// detector.set_bins(DMatrix::zeros(10, 12));
///
/// export_to_file(&detector, "results.matbin", Convention::Canonical, false).unwrap();
/// ```
pub fn export_to_file<R: ToArchive, P: AsRef<Path>>(
    record: &R,
    path: P,
    convention: Convention,
    append: bool,
) -> Result<()> {
    export(
        record,
        &mut FileDestination::new(path),
        convention,
        append,
    )
}
