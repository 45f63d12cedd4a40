/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use core::fmt::{Debug, Formatter};

use crate::bytestream::KByteReaderTrait;

/// Errors that may occur when pulling bytes from a source
pub enum KByteIoError {
    /// A standard library error
    ///
    /// Only available with the `std` feature
    #[cfg(feature = "std")]
    StdIoError(std::io::Error),
    /// Not enough bytes to satisfy a read
    // found, requested
    NotEnoughBytes(usize, usize),
    /// An error with a static cause
    Generic(&'static str)
}

impl Debug for KByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            #[cfg(feature = "std")]
            KByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {err}")
            }
            KByteIoError::NotEnoughBytes(found, expected) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            KByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for KByteIoError {
    fn from(value: std::io::Error) -> Self {
        KByteIoError::StdIoError(value)
    }
}

impl From<&'static str> for KByteIoError {
    fn from(value: &'static str) -> Self {
        KByteIoError::Generic(value)
    }
}

/// The reader wrapper
///
/// This wraps anything that implements [`KByteReaderTrait`] and extends
/// the core trait methods with utilities like endian aware reads, so
/// that each implementation doesn't have to provide its own.
///
/// The kolo formats are little endian throughout, hence only `_le`
/// helpers exist here.
pub struct KReader<T> {
    inner: T
}

impl<T: KByteReaderTrait> KReader<T> {
    /// Create a new reader from a source that implements the
    /// [`KByteReaderTrait`]
    pub fn new(source: T) -> KReader<T> {
        KReader { inner: source }
    }

    /// Read a single byte from the underlying stream
    ///
    /// If an error occurs it will return `0`, which makes a true `0`
    /// indistinguishable from an error. For that there is
    /// [`read_u8_err`](Self::read_u8_err).
    #[inline(always)]
    pub fn read_u8(&mut self) -> u8 {
        self.inner.read_byte_no_error()
    }

    /// Read a single byte returning an error if the read cannot be
    /// satisfied
    #[inline(always)]
    pub fn read_u8_err(&mut self) -> Result<u8, KByteIoError> {
        let mut buf = [0];
        self.inner.read_const_bytes(&mut buf)?;
        Ok(buf[0])
    }

    /// Read a `u16` as a little endian integer, returning an error if
    /// the underlying buffer cannot support the read.
    #[inline]
    pub fn get_u16_le_err(&mut self) -> Result<u16, KByteIoError> {
        let mut buf = [0; 2];
        self.inner.read_const_bytes(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Read a fixed number of known bytes and return them or an error
    /// if the read cannot be satisfied.
    ///
    /// `N` must be small enough to fit the stack space.
    #[inline(always)]
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], KByteIoError> {
        let mut byte_store: [u8; N] = [0; N];
        self.inner.read_const_bytes(&mut byte_store)?;
        Ok(byte_store)
    }

    /// Read bytes required to fill `buf` exactly, or error out
    ///
    /// Similar to [`std::io::Read::read_exact`]
    pub fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), KByteIoError> {
        self.inner.read_exact_bytes(buf)
    }

    /// Skip ahead ignoring `num` bytes
    #[inline(always)]
    pub fn skip(&mut self, num: usize) -> Result<(), KByteIoError> {
        self.inner.skip_bytes(num as u64)
    }

    /// Return the current position of the inner reader or an error if
    /// that occurred when querying it
    #[inline(always)]
    pub fn position(&mut self) -> Result<u64, KByteIoError> {
        self.inner.position()
    }

    /// Return true if the underlying source can no longer produce bytes
    ///
    /// This call may be expensive depending on the underlying source,
    /// e.g for a file we have to ask the OS whether more content exists.
    #[inline(always)]
    pub fn eof(&mut self) -> Result<bool, KByteIoError> {
        self.inner.is_eof()
    }
}
