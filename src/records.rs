//! Fixed-width integer records.
//!
//! A record file is a flat run of integers with no header and no terminator.
//! Decoding stops at the first short read, so a trailing partial record is
//! dropped.

use std::{
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Read, Write},
    path::Path,
};

/// Byte order of a record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

/// An integer type that can be stored as one record.
pub trait Record: Copy + Send + Sync + 'static {
    /// Width of one encoded record in bytes.
    const WIDTH: usize;

    /// # Panics
    /// If `bytes` is not exactly [Record::WIDTH] long.
    fn decode(bytes: &[u8], endian: Endian) -> Self;

    fn encode(self, endian: Endian, out: &mut [u8]);
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                const WIDTH: usize = size_of::<$ty>();

                #[inline]
                fn decode(bytes: &[u8], endian: Endian) -> Self {
                    let raw: [u8; size_of::<$ty>()] =
                        bytes.try_into().expect("record slice has record width");
                    match endian {
                        Endian::Little => <$ty>::from_le_bytes(raw),
                        Endian::Big => <$ty>::from_be_bytes(raw),
                    }
                }

                #[inline]
                fn encode(self, endian: Endian, out: &mut [u8]) {
                    let raw = match endian {
                        Endian::Little => self.to_le_bytes(),
                        Endian::Big => self.to_be_bytes(),
                    };
                    out.copy_from_slice(&raw);
                }
            }
        )*
    };
}

impl_record!(i8, i16, i32, i64, u8, u16, u32, u64);

/// Fill `buf` as far as the reader allows. Returns the number of bytes read,
/// less than `buf.len()` only at end of input.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Iterator over the records of a byte stream.
///
/// Yields `Err` once on an I/O failure and then stops.
pub struct RecordReader<R, T> {
    reader: R,
    endian: Endian,
    chunk: Vec<u8>,
    trailing: usize,
    done: bool,
    _record: std::marker::PhantomData<T>,
}

impl<R: Read, T: Record> RecordReader<R, T> {
    pub fn new(reader: R, endian: Endian) -> Self {
        Self {
            reader,
            endian,
            chunk: vec![0; T::WIDTH],
            trailing: 0,
            done: false,
            _record: std::marker::PhantomData,
        }
    }

    /// Bytes of an incomplete record found at the end of the input.
    ///
    /// Only meaningful once the iterator is exhausted.
    pub fn trailing_bytes(&self) -> usize {
        self.trailing
    }
}

impl<R: Read, T: Record> Iterator for RecordReader<R, T> {
    type Item = crate::error::Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match read_full(&mut self.reader, &mut self.chunk) {
            Ok(n) if n == T::WIDTH => Some(Ok(T::decode(&self.chunk, self.endian))),
            Ok(n) => {
                self.trailing = n;
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e.into()))
            }
        }
    }
}

/// Decode every full record of `reader`, in order.
pub fn read_records<T: Record, R: Read>(reader: R, endian: Endian) -> crate::error::Result<Vec<T>> {
    let mut records = RecordReader::<R, T>::new(reader, endian);
    let values = records.by_ref().collect::<crate::error::Result<Vec<T>>>()?;
    if records.trailing_bytes() > 0 {
        log::warn!(
            "ignoring {} trailing byte(s), not a full {}-byte record",
            records.trailing_bytes(),
            T::WIDTH
        );
    }
    Ok(values)
}

pub fn read_records_from_path<T: Record, P: AsRef<Path>>(
    path: P,
    endian: Endian,
) -> crate::error::Result<Vec<T>> {
    let path = path.as_ref();
    let file = BufReader::new(File::open(path)?);
    let values = read_records(file, endian)?;
    log::debug!("decoded {} record(s) from '{}'", values.len(), path.display());
    Ok(values)
}

pub fn write_records<T: Record, W: Write>(
    writer: &mut W,
    values: &[T],
    endian: Endian,
) -> crate::error::Result {
    let mut chunk = vec![0u8; T::WIDTH];
    for value in values {
        value.encode(endian, &mut chunk);
        writer.write_all(&chunk)?;
    }
    Ok(())
}

pub fn write_records_to_path<T: Record, P: AsRef<Path>>(
    path: P,
    values: &[T],
    endian: Endian,
) -> crate::error::Result {
    let mut file = BufWriter::new(File::create(path)?);
    write_records(&mut file, values, endian)?;
    file.flush()?;
    Ok(())
}
