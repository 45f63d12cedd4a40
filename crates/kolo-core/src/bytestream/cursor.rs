/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use crate::bytestream::reader::KByteIoError;
use crate::bytestream::KByteReaderTrait;

/// An in-memory byte source
///
/// This is the preferred source when the whole stream already lives in
/// memory; all operations are bounds-checked slice accesses with no
/// syscalls behind them.
///
/// It wraps anything that derefs to a byte slice
///
/// ```
/// use kolo_core::bytestream::KCursor;
///
/// let from_slice = KCursor::new(b"GIF89a");
/// let from_vec = KCursor::new(vec![0x47, 0x49, 0x46]);
/// # let _ = (from_slice, from_vec);
/// ```
pub struct KCursor<T: AsRef<[u8]>> {
    inner:    T,
    position: usize
}

impl<T: AsRef<[u8]>> KCursor<T> {
    /// Create a new cursor positioned at the start of `inner`
    pub fn new(inner: T) -> KCursor<T> {
        KCursor { inner, position: 0 }
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.inner.as_ref().len().saturating_sub(self.position)
    }
}

impl<T: AsRef<[u8]>> KByteReaderTrait for KCursor<T> {
    #[inline(always)]
    fn read_byte_no_error(&mut self) -> u8 {
        match self.inner.as_ref().get(self.position) {
            Some(byte) => {
                self.position += 1;
                *byte
            }
            None => 0
        }
    }

    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), KByteIoError> {
        let remaining = self.remaining();
        if remaining < buf.len() {
            // position stays put on failure
            return Err(KByteIoError::NotEnoughBytes(remaining, buf.len()));
        }
        let start = self.position;
        buf.copy_from_slice(&self.inner.as_ref()[start..start + buf.len()]);
        self.position += buf.len();
        Ok(())
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), KByteIoError> {
        self.read_exact_bytes(buf)
    }

    #[inline(always)]
    fn skip_bytes(&mut self, num: u64) -> Result<(), KByteIoError> {
        let len = self.inner.as_ref().len();
        self.position = match usize::try_from(num) {
            Ok(num) => self.position.saturating_add(num).min(len),
            Err(_) => len
        };
        Ok(())
    }

    #[inline(always)]
    fn position(&mut self) -> Result<u64, KByteIoError> {
        Ok(self.position as u64)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, KByteIoError> {
        Ok(self.position >= self.inner.as_ref().len())
    }
}
