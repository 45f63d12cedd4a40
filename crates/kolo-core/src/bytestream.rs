/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Byte sources for the kolo decoders
//!
//! The decoders pull bytes through [`KReader`], a thin wrapper that adds
//! endian aware helpers on top of anything implementing
//! [`KByteReaderTrait`].
//!
//! Two implementations ship with this crate
//!
//! - [`KCursor`] for in-memory buffers, the preferred source
//! - any `BufRead + Seek` type, e.g a `BufReader<File>`, when the `std`
//!   feature is enabled
pub use cursor::KCursor;
pub use reader::{KByteIoError, KReader};
pub use traits::KByteReaderTrait;

mod cursor;
mod reader;
#[cfg(feature = "std")]
mod std_readers;
mod traits;
