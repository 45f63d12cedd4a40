/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! The LZW decompressor for image data
//!
//! GIF image data is a stream of variable width codes, packed LSB first
//! across byte and sub-block boundaries. Codes index a table of strings
//! built incrementally while decoding; two reserved codes reset the
//! table (CLEAR) and end the stream (STOP).
//!
//! The string table stores one `(prefix, suffix)` pair per entry, so a
//! string is materialized by walking prefixes back to a literal and
//! writing suffixes right to left into the frame rectangle.

use alloc::vec::Vec;

use kolo_core::bytestream::{KByteReaderTrait, KReader};
use kolo_core::log::warn;

use crate::errors::GifDecoderErrors;
use crate::placement::Placement;

/// Sentinel prefix marking an entry as a single literal.
///
/// Lives out of band: real prefixes never reach 0xFFF because the last
/// table slot is 0xFFF and an entry never points at itself or later.
const NO_PREFIX: u16 = 0xFFF;

/// 12-bit code ceiling
const MAX_ENTRIES: usize = 1 << 12;
const MAX_KEY_SIZE: u8 = 12;

#[derive(Copy, Clone, Default)]
struct Entry {
    length: u16,
    prefix: u16,
    suffix: u8
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum AddStatus {
    Ok,
    /// The new entry count is a power of two: codes need one more bit
    /// from the next read on
    GrowKeySize,
    /// The table reached the 12-bit ceiling; the entry at the cap is
    /// still stored but no further additions may happen
    Full
}

/// The growable prefix/suffix string table.
///
/// Storage is allocated to the 0x1000-entry worst case up front, so
/// "growth" is just the logical entry count moving; a CLEAR rewinds it
/// without touching the literal entries.
struct CodeTable {
    entries:  Vec<Entry>,
    nentries: usize,
    /// Entry count right after a reset: literals plus CLEAR and STOP
    base:     usize
}

impl CodeTable {
    fn new(key_size: u8) -> Result<CodeTable, GifDecoderErrors> {
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(MAX_ENTRIES)
            .map_err(|_| GifDecoderErrors::ResourceExhausted("LZW code table"))?;
        entries.resize(MAX_ENTRIES, Entry::default());

        for key in 0..(1_usize << key_size) {
            entries[key] = Entry { length: 1, prefix: NO_PREFIX, suffix: key as u8 };
        }
        let base = (1 << key_size) + 2;

        Ok(CodeTable { entries, nentries: base, base })
    }

    fn reset(&mut self) {
        self.nentries = self.base;
    }

    const fn nentries(&self) -> usize {
        self.nentries
    }

    #[inline(always)]
    fn entry(&self, code: usize) -> Entry {
        self.entries[code]
    }

    fn add(&mut self, length: u16, prefix: u16, suffix: u8) -> AddStatus {
        debug_assert!(self.nentries < MAX_ENTRIES);

        self.entries[self.nentries] = Entry { length, prefix, suffix };
        self.nentries += 1;

        if self.nentries == MAX_ENTRIES {
            AddStatus::Full
        } else if self.nentries.is_power_of_two() {
            AddStatus::GrowKeySize
        } else {
            AddStatus::Ok
        }
    }

    /// KwKwK fix-up: the newest entry was added with last round's first
    /// character, correct it once the real one is known.
    #[inline(always)]
    fn patch_last_suffix(&mut self, suffix: u8) {
        self.entries[self.nentries - 1].suffix = suffix;
    }
}

/// Pulls the next N-bit code out of the sub-block chain.
///
/// State survives across calls within one image; a fresh image gets a
/// fresh `BitSource`.
struct BitSource {
    /// Bytes left in the current sub-block
    sub_len: u8,
    /// Bit position inside the current byte, 0..=7
    shift:   u8,
    /// Current source byte
    byte:    u8
}

impl BitSource {
    const fn new() -> BitSource {
        BitSource { sub_len: 0, shift: 0, byte: 0 }
    }

    /// Accumulate `key_size` bits LSB first, fetching source bytes (and
    /// sub-block length prefixes) as the read crosses boundaries.
    fn get_key<T: KByteReaderTrait>(
        &mut self, stream: &mut KReader<T>, key_size: u8
    ) -> Result<u16, GifDecoderErrors> {
        let mut key = 0_u16;
        let mut bits_read = 0_u8;

        while bits_read < key_size {
            let rpad = (self.shift + bits_read) % 8;
            if rpad == 0 {
                if self.sub_len == 0 {
                    self.sub_len = stream.read_u8_err()?;
                    if self.sub_len == 0 {
                        return Err(GifDecoderErrors::MalformedStream(
                            "zero length sub-block inside image data"
                        ));
                    }
                }
                self.byte = stream.read_u8_err()?;
                self.sub_len -= 1;
            }
            let frag_size = (key_size - bits_read).min(8 - rpad);
            key |= u16::from(self.byte >> rpad) << bits_read;
            bits_read += frag_size;
        }

        self.shift = (self.shift + key_size) % 8;
        Ok(key & ((1 << key_size) - 1))
    }
}

/// Decompresses one image's pixel data into the frame rectangle.
pub(crate) struct LzwDecoder {
    key_size:      u8,
    init_key_size: u8,
    clear:         u16,
    stop:          u16,
    table:         CodeTable,
    bits:          BitSource
}

impl LzwDecoder {
    /// `min_code_size` is the literal code width byte preceding the
    /// sub-block chain.
    pub fn new(min_code_size: u8) -> Result<LzwDecoder, GifDecoderErrors> {
        if !(1..=8).contains(&min_code_size) {
            return Err(GifDecoderErrors::MalformedStream("invalid minimum LZW code size"));
        }

        Ok(LzwDecoder {
            key_size:      min_code_size + 1,
            init_key_size: min_code_size + 1,
            clear:         1 << min_code_size,
            stop:          (1 << min_code_size) + 1,
            table:         CodeTable::new(min_code_size)?,
            bits:          BitSource::new()
        })
    }

    /// Run the code stream until STOP, writing palette indices into
    /// `canvas` at the offsets `placement` dictates.
    ///
    /// In strict mode an index outside the active palette and a STOP
    /// before the rectangle is filled are errors; lenient mode takes
    /// any index and leaves unfilled pixels alone with a diagnostic.
    pub fn decode_into<T: KByteReaderTrait>(
        &mut self, stream: &mut KReader<T>, placement: &Placement, canvas: &mut [u8],
        palette_size: usize, strict: bool
    ) -> Result<(), GifDecoderErrors> {
        let pixel_count = placement.pixel_count();

        let mut code = self.bits.get_key(stream, self.key_size)?;
        if code != self.clear {
            return Err(GifDecoderErrors::MalformedStream(
                "image data does not start with a clear code"
            ));
        }

        let mut table_is_full = false;
        let mut grow = false;
        let mut frm_off = 0_usize;
        // state of the previously emitted string
        let mut prev_code = 0_u16;
        let mut prev_first = 0_u8;
        let mut str_len = 0_u16;

        loop {
            if code == self.clear {
                self.key_size = self.init_key_size;
                self.table.reset();
                table_is_full = false;
                // a pending grow from just before the clear would widen
                // post-reset codes and desync from the encoder
                grow = false;
            } else if !table_is_full {
                match self.table.add(str_len + 1, prev_code, prev_first) {
                    AddStatus::Full => table_is_full = true,
                    AddStatus::GrowKeySize => grow = true,
                    AddStatus::Ok => {}
                }
            }

            code = self.bits.get_key(stream, self.key_size)?;
            if code == self.clear {
                continue;
            }
            if code == self.stop {
                break;
            }
            if grow && self.key_size < MAX_KEY_SIZE {
                self.key_size += 1;
                grow = false;
            }

            // valid codes reach at most the entry added above
            if usize::from(code) >= self.table.nentries() {
                return Err(GifDecoderErrors::MalformedStream("LZW code out of range"));
            }

            let entry = self.table.entry(usize::from(code));
            str_len = entry.length;

            let end = frm_off + usize::from(str_len);
            if end > pixel_count {
                return Err(GifDecoderErrors::MalformedStream(
                    "pixel data overflows the frame rectangle"
                ));
            }

            // emit the string right to left, walking prefixes down to
            // the literal that starts it
            let mut e = entry;
            let mut p = end - 1;
            loop {
                if strict && usize::from(e.suffix) >= palette_size {
                    return Err(GifDecoderErrors::MalformedStream(
                        "palette index outside the active palette"
                    ));
                }
                canvas[placement.canvas_offset(p)] = e.suffix;
                if e.prefix == NO_PREFIX {
                    break;
                }
                e = self.table.entry(usize::from(e.prefix));
                p -= 1;
            }
            let first = e.suffix;

            if usize::from(code) < self.table.nentries() - 1 && !table_is_full {
                self.table.patch_last_suffix(first);
            }

            frm_off = end;
            prev_code = code;
            prev_first = first;
        }

        if frm_off != pixel_count {
            if strict {
                return Err(GifDecoderErrors::MalformedStream(
                    "image data stopped before the frame rectangle was filled"
                ));
            }
            warn!("image data holds {frm_off} of {pixel_count} pixels, rest left untouched");
        }

        // sub-block terminator
        if stream.read_u8_err()? != 0 {
            return Err(GifDecoderErrors::MalformedStream(
                "missing sub-block terminator after image data"
            ));
        }
        Ok(())
    }
}
