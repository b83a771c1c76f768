//! Fixed-header dump file reader and writer.
//!
//! Stage outputs are stored as a fixed-size ASCII `KEY VALUE` header
//! followed by raw little-endian samples. The header carries only the
//! geometry needed to interpret the payload; there are no timestamps or
//! variable metadata, so identical inputs produce byte-identical files.
//!
//! Payload layout is `[ndat][nchan][npol]`: all polarizations of a time
//! sample are adjacent, channels within a sample are adjacent within
//! that.

use std::io::Cursor;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use num_complex::Complex;

use pfbvec_spec::Dtype;

use crate::error::SignalError;
use crate::signal::Signal;

/// Fixed size of the ASCII header, in bytes.
pub const HEADER_SIZE: usize = 4096;

/// Header format version written by this crate.
pub const HEADER_VERSION: &str = "1.0";

/// Parsed header geometry of a dump file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpHeader {
    /// Header size in bytes; payload starts at this offset.
    pub hdr_size: usize,
    /// Header format version.
    pub hdr_version: String,
    /// Bits per sample component (a complex sample has two components).
    pub nbit: u32,
    /// Components per sample: 1 real, 2 complex.
    pub ndim: u32,
    /// Number of polarizations.
    pub npol: u32,
    /// Number of channels.
    pub nchan: u32,
    /// Number of time samples.
    pub ndat: usize,
}

impl DumpHeader {
    /// Bytes one (sample, channel, polarization) cell occupies.
    pub fn bytes_per_cell(&self) -> usize {
        (self.nbit as usize / 8) * self.ndim as usize
    }

    /// Total payload size the geometry implies.
    pub fn payload_size(&self) -> usize {
        self.ndat * self.nchan as usize * self.npol as usize * self.bytes_per_cell()
    }

    /// The sample dtype implied by `nbit` and `ndim`.
    pub fn dtype(&self) -> Result<Dtype, SignalError> {
        match (self.nbit, self.ndim) {
            (32, 1) => Ok(Dtype::Float32),
            (64, 1) => Ok(Dtype::Float64),
            (32, 2) => Ok(Dtype::Complex64),
            (64, 2) => Ok(Dtype::Complex128),
            _ => Err(SignalError::InvalidHeaderValue {
                key: "NBIT",
                value: format!("{} (ndim {})", self.nbit, self.ndim),
            }),
        }
    }
}

/// A dump file held in memory: parsed header plus raw payload bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct DumpFile {
    /// Parsed header.
    pub header: DumpHeader,
    /// Raw little-endian payload.
    pub payload: Vec<u8>,
}

impl DumpFile {
    /// Writes `signal` to `path`, replicating it across `n_pol`
    /// polarizations in a single channel.
    pub fn write(path: &Path, signal: &Signal, n_pol: u32) -> Result<(), SignalError> {
        let dtype = signal.dtype();
        let ndim: u32 = if dtype.is_complex() { 2 } else { 1 };
        let nbit = dtype.bits_per_sample() / ndim;

        let header_text = format!(
            "HDR_SIZE {}\nHDR_VERSION {}\nNBIT {}\nNDIM {}\nNPOL {}\nNCHAN 1\nNDAT {}\n",
            HEADER_SIZE,
            HEADER_VERSION,
            nbit,
            ndim,
            n_pol,
            signal.len()
        );
        let mut bytes =
            Vec::with_capacity(HEADER_SIZE + signal.len() * n_pol as usize * signal.bytes_per_sample());
        bytes.extend_from_slice(header_text.as_bytes());
        bytes.resize(HEADER_SIZE, 0);

        for idx in 0..signal.len() {
            for _ in 0..n_pol {
                signal.write_sample_le(idx, &mut bytes);
            }
        }

        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Reads and parses a dump file.
    pub fn read(path: &Path) -> Result<Self, SignalError> {
        let bytes = std::fs::read(path)?;
        if bytes.len() < HEADER_SIZE {
            return Err(SignalError::TruncatedHeader(bytes.len()));
        }

        let header = parse_header(&bytes[..HEADER_SIZE])?;
        let payload = bytes[header.hdr_size.min(bytes.len())..].to_vec();
        if payload.len() != header.payload_size() {
            return Err(SignalError::PayloadSizeMismatch {
                expected: header.payload_size(),
                got: payload.len(),
            });
        }

        Ok(Self { header, payload })
    }

    /// Decodes channel 0, polarization 0 of the payload into a signal.
    pub fn primary_signal(&self) -> Result<Signal, SignalError> {
        let dtype = self.header.dtype()?;
        let stride =
            self.header.bytes_per_cell() * self.header.nchan as usize * self.header.npol as usize;
        let mut cursor = Cursor::new(self.payload.as_slice());

        Ok(match dtype {
            Dtype::Float32 => {
                let mut out = Vec::with_capacity(self.header.ndat);
                for idx in 0..self.header.ndat {
                    cursor.set_position((idx * stride) as u64);
                    out.push(cursor.read_f32::<LittleEndian>()?);
                }
                Signal::Float32(out)
            }
            Dtype::Float64 => {
                let mut out = Vec::with_capacity(self.header.ndat);
                for idx in 0..self.header.ndat {
                    cursor.set_position((idx * stride) as u64);
                    out.push(cursor.read_f64::<LittleEndian>()?);
                }
                Signal::Float64(out)
            }
            Dtype::Complex64 => {
                let mut out = Vec::with_capacity(self.header.ndat);
                for idx in 0..self.header.ndat {
                    cursor.set_position((idx * stride) as u64);
                    let re = cursor.read_f32::<LittleEndian>()?;
                    let im = cursor.read_f32::<LittleEndian>()?;
                    out.push(Complex::new(re, im));
                }
                Signal::Complex64(out)
            }
            Dtype::Complex128 => {
                let mut out = Vec::with_capacity(self.header.ndat);
                for idx in 0..self.header.ndat {
                    cursor.set_position((idx * stride) as u64);
                    let re = cursor.read_f64::<LittleEndian>()?;
                    let im = cursor.read_f64::<LittleEndian>()?;
                    out.push(Complex::new(re, im));
                }
                Signal::Complex128(out)
            }
        })
    }
}

fn parse_header(raw: &[u8]) -> Result<DumpHeader, SignalError> {
    let text = String::from_utf8_lossy(raw);
    let text = text.trim_end_matches('\0');

    let lookup = |key: &'static str| -> Result<&str, SignalError> {
        for line in text.lines() {
            let mut parts = line.split_whitespace();
            if parts.next() == Some(key) {
                return parts.next().ok_or(SignalError::MissingHeaderKey(key));
            }
        }
        Err(SignalError::MissingHeaderKey(key))
    };

    let parse_num = |key: &'static str| -> Result<usize, SignalError> {
        let value = lookup(key)?;
        value
            .parse()
            .map_err(|_| SignalError::InvalidHeaderValue {
                key,
                value: value.to_string(),
            })
    };

    Ok(DumpHeader {
        hdr_size: parse_num("HDR_SIZE")?,
        hdr_version: lookup("HDR_VERSION")?.to_string(),
        nbit: parse_num("NBIT")? as u32,
        ndim: parse_num("NDIM")? as u32,
        npol: parse_num("NPOL")? as u32,
        nchan: parse_num("NCHAN")? as u32,
        ndat: parse_num("NDAT")?,
    })
}
