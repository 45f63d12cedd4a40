/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! An animated GIF decoder
//!
//! This crate decodes GIF89a streams frame by frame. Each decoded frame
//! leaves the decoder holding the composited logical screen as 8-bit
//! palette indices, together with the active palette and the frame's
//! timing, placement, transparency and disposal metadata. Painting the
//! indices to an output surface (and honoring transparency while doing
//! so) is left to the caller.
//!
//! # Features
//! - `no_std` with `alloc`
//! - Interlaced images
//! - Frame disposal (keep, restore to background, restore previous)
//! - `std` (default): decode straight from `BufRead + Seek` sources
//! - `log` (default): diagnostics through the `log` crate facade
//!
//! # Unsupported
//! - The 87a dialect (rejected when parsing the header)
//! - Streams without a global color table
//! - Encoding
//!
//! # Usage
//! Iterate frames from an in-memory buffer with
//! [`KCursor`](kolo_core::bytestream::KCursor)
//!
//! ```no_run
//! use kolo_core::bytestream::KCursor;
//! use kolo_gif::GifDecoder;
//!
//! let data = std::fs::read("image.gif").unwrap();
//! let mut decoder = GifDecoder::new(KCursor::new(&data));
//!
//! while let Some(frame) = decoder.next_frame().unwrap() {
//!     let canvas = decoder.canvas();
//!     let palette = decoder.palette().unwrap();
//!     // paint `canvas` via `palette`, wait `frame.delay` hundredths of a second
//! }
//! ```
//!
//! Or decode directly from a file, requires the `std` feature
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! use kolo_gif::GifDecoder;
//!
//! let source = BufReader::new(File::open("image.gif").unwrap());
//! let mut decoder = GifDecoder::new(source);
//! let first_frame = decoder.decode().unwrap();
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub use decoder::{probe_gif, FrameInfo, GifDecoder};
pub use enums::DisposalMethod;
pub use errors::GifDecoderErrors;
pub use kolo_core;

mod decoder;
mod enums;
mod errors;
mod lzw;
mod placement;
