/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Core routines shared by the kolo decoders
//!
//! This crate provides the small set of building blocks the decoder
//! crates have in common
//!
//! - A byte source trait with an in-memory cursor and, under the `std`
//!   feature, a blanket implementation for `BufRead + Seek` types
//! - A reader wrapper with endian aware helpers
//! - Decoder options shared by all decoders
//! - A logging facade that forwards to the `log` crate when the `log`
//!   feature is enabled and compiles to nothing otherwise
//!
//! The crate is `no_std`; the `std` feature only adds the standard
//! library reader implementations and `std::error::Error` impls.
#![cfg_attr(not(feature = "std"), no_std)]

pub mod bytestream;
pub mod log;
pub mod options;
