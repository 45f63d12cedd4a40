/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![cfg(feature = "std")]

use std::io::{BufRead, Seek, SeekFrom};

use crate::bytestream::reader::KByteIoError;
use crate::bytestream::KByteReaderTrait;

/// Implementation for anything that is `BufRead + Seek`, e.g
/// `BufReader<File>` or `Cursor<Vec<u8>>`.
///
/// Prefer [`KCursor`](crate::bytestream::KCursor) for in-memory buffers,
/// this path exists for decoding straight from files without slurping
/// them first.
impl<T> KByteReaderTrait for T
where
    T: BufRead + Seek
{
    #[inline(always)]
    fn read_byte_no_error(&mut self) -> u8 {
        let mut buf = [0];
        let _ = self.read_exact(&mut buf);
        buf[0]
    }

    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), KByteIoError> {
        self.read_exact(buf).map_err(KByteIoError::from)
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), KByteIoError> {
        self.read_exact(buf).map_err(KByteIoError::from)
    }

    #[inline(always)]
    fn skip_bytes(&mut self, num: u64) -> Result<(), KByteIoError> {
        let num = i64::try_from(num).map_err(|_| KByteIoError::Generic("skip offset overflow"))?;
        self.seek(SeekFrom::Current(num))?;
        Ok(())
    }

    #[inline(always)]
    fn position(&mut self) -> Result<u64, KByteIoError> {
        self.stream_position().map_err(KByteIoError::from)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, KByteIoError> {
        Ok(self.fill_buf()?.is_empty())
    }
}
