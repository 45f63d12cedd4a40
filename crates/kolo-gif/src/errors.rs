/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use core::fmt::{Debug, Display, Formatter};

use kolo_core::bytestream::KByteIoError;

/// Possible errors that may occur during decoding
///
/// Any error poisons the decoder; callers should drop it rather than
/// call further methods.
pub enum GifDecoderErrors {
    /// The stream does not start with the `GIF` signature
    NotAGif,
    /// The stream is a GIF but uses features this decoder does not
    /// handle, e.g the 87a dialect or indexed modes without a global
    /// color table
    UnsupportedFormat(&'static str),
    /// A block started with a byte that is neither an image separator,
    /// an extension introducer nor the trailer
    BadSeparator(u8),
    /// The stream violates the container or LZW framing rules
    MalformedStream(&'static str),
    /// Too large dimensions for width or height, configurable via
    /// [`DecoderOptions`](kolo_core::options::DecoderOptions)
    TooLargeDimensions(&'static str, usize, usize),
    /// Underlying input errors, including short reads
    IoErrors(KByteIoError),
    /// The LZW code table could not be allocated
    ResourceExhausted(&'static str)
}

impl Debug for GifDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            GifDecoderErrors::NotAGif => {
                writeln!(f, "Not a gif, magic bytes didn't match")
            }
            GifDecoderErrors::UnsupportedFormat(v) => {
                writeln!(f, "Unsupported format: {v}")
            }
            GifDecoderErrors::BadSeparator(v) => {
                writeln!(f, "Unknown block separator {v:#04X}")
            }
            GifDecoderErrors::MalformedStream(v) => {
                writeln!(f, "Malformed stream: {v}")
            }
            GifDecoderErrors::TooLargeDimensions(a, b, c) => {
                writeln!(f, "Too large dimensions for {a}, expected less than {b} but found {c}")
            }
            GifDecoderErrors::IoErrors(err) => {
                writeln!(f, "I/O error {err:?}")
            }
            GifDecoderErrors::ResourceExhausted(v) => {
                writeln!(f, "Allocation failed: {v}")
            }
        }
    }
}

impl Display for GifDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GifDecoderErrors {}

impl From<KByteIoError> for GifDecoderErrors {
    fn from(value: KByteIoError) -> Self {
        GifDecoderErrors::IoErrors(value)
    }
}
