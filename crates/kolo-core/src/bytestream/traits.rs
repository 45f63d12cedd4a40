/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Traits for byte sources in the kolo family of decoders

use crate::bytestream::reader::KByteIoError;

/// The input trait implemented for byte sources.
///
/// The kolo decoders are forward-only consumers, so the surface is
/// deliberately small: exact reads, a forward skip and position/eof
/// queries. There is no rewind and no random access.
pub trait KByteReaderTrait {
    /// Read a single byte and return `0` if we can't read it, e.g
    /// because of EOF.
    ///
    /// The implementation should be as fast as possible, this is called
    /// from hot loops where it may become the bottleneck.
    fn read_byte_no_error(&mut self) -> u8;

    /// Read exact bytes required to fill `buf` or return an error if
    /// that isn't possible.
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), KByteIoError>;

    /// Read exact bytes required to fill `buf` or return an error if
    /// that isn't possible.
    ///
    /// The same as [`read_exact_bytes`](Self::read_exact_bytes) but as a
    /// separate method so implementations can make it cost fewer
    /// instructions for small constant sizes.
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), KByteIoError>;

    /// Skip `num` bytes ahead without looking at them.
    ///
    /// Skipping past the end of the source is not an error; the next
    /// read will report EOF.
    fn skip_bytes(&mut self, num: u64) -> Result<(), KByteIoError>;

    /// Return the current position from the start of the stream.
    fn position(&mut self) -> Result<u64, KByteIoError>;

    /// Report whether the source can produce more bytes.
    ///
    /// ## Warning
    /// This may cause a syscall for file backed sources, use it with
    /// care.
    fn is_eof(&mut self) -> Result<bool, KByteIoError>;
}
