//! Helpers for building GIF89a streams byte by byte in tests.
#![allow(dead_code)]

/// Pack LZW codes LSB-first using the same code width schedule a
/// decoder follows: widths start at `min_code_size + 1`, grow by one
/// right after the table entry count hits a power of two (applied from
/// the next code on), and reset on CLEAR.
pub fn pack_codes(min_code_size: u8, codes: &[u16]) -> Vec<u8> {
    let clear = 1_u16 << min_code_size;
    let stop = clear + 1;
    let base = (1_usize << min_code_size) + 2;
    let init_width = min_code_size + 1;

    let mut width = init_width;
    let mut nentries = base;
    let mut table_full = false;
    let mut grow = false;

    let mut out: Vec<u8> = Vec::new();
    let mut bit_pos = 0_usize;

    for i in 0..codes.len() {
        let code = codes[i];

        // mirror the table bookkeeping the decoder performs between the
        // previous code and this one
        if i > 0 {
            let prev = codes[i - 1];
            if prev == clear {
                width = init_width;
                nentries = base;
                table_full = false;
                grow = false;
            } else if prev != stop && !table_full {
                nentries += 1;
                if nentries == 0x1000 {
                    table_full = true;
                } else if nentries.is_power_of_two() {
                    grow = true;
                }
            }
        }

        assert!(code < (1 << width), "code {code} does not fit {width} bits");
        for bit in 0..width {
            if bit_pos % 8 == 0 {
                out.push(0);
            }
            if (code >> bit) & 1 == 1 {
                *out.last_mut().unwrap() |= 1 << (bit_pos % 8);
            }
            bit_pos += 1;
        }

        if code != clear && code != stop && grow && width < 12 {
            width += 1;
            grow = false;
        }
    }
    out
}

/// Builds a GIF89a byte stream block by block.
pub struct GifBuilder {
    bytes:       Vec<u8>,
    gct_entries: usize
}

impl GifBuilder {
    /// Header and logical screen descriptor with a global color table
    /// of `1 << (gct_exp + 1)` entries.
    pub fn new(width: u16, height: u16, gct_exp: u8, bg_index: u8) -> GifBuilder {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"GIF89a");
        bytes.extend_from_slice(&width.to_le_bytes());
        bytes.extend_from_slice(&height.to_le_bytes());
        // global table present, 8-bit depth, table size exponent
        bytes.push(0xF0 | gct_exp);
        bytes.push(bg_index);
        bytes.push(0); // aspect ratio

        GifBuilder { bytes, gct_entries: 2 << gct_exp }
    }

    /// Global color table; missing entries are padded with black.
    pub fn palette(mut self, colors: &[[u8; 3]]) -> GifBuilder {
        assert!(colors.len() <= self.gct_entries);
        for i in 0..self.gct_entries {
            let color = colors.get(i).copied().unwrap_or([0, 0, 0]);
            self.bytes.extend_from_slice(&color);
        }
        self
    }

    /// Graphic control extension bound to the next image.
    pub fn graphic_control(
        mut self, disposal: u8, delay: u16, transparent: Option<u8>
    ) -> GifBuilder {
        self.bytes.extend_from_slice(&[0x21, 0xF9, 0x04]);
        let mut packed = (disposal & 7) << 2;
        if transparent.is_some() {
            packed |= 1;
        }
        self.bytes.push(packed);
        self.bytes.extend_from_slice(&delay.to_le_bytes());
        self.bytes.push(transparent.unwrap_or(0));
        self.bytes.push(0);
        self
    }

    /// Netscape application extension carrying the animation loop count.
    pub fn netscape_loop(mut self, count: u16) -> GifBuilder {
        self.bytes.extend_from_slice(&[0x21, 0xFF, 0x0B]);
        self.bytes.extend_from_slice(b"NETSCAPE");
        self.bytes.extend_from_slice(b"2.0");
        self.bytes.extend_from_slice(&[0x03, 0x01]);
        self.bytes.extend_from_slice(&count.to_le_bytes());
        self.bytes.push(0);
        self
    }

    /// Comment extension with a single sub-block.
    pub fn comment(mut self, text: &[u8]) -> GifBuilder {
        assert!(text.len() <= 255);
        self.bytes.extend_from_slice(&[0x21, 0xFE]);
        self.bytes.push(text.len() as u8);
        self.bytes.extend_from_slice(text);
        self.bytes.push(0);
        self
    }

    /// Plain text extension (12 bytes of grid metadata, all zero, plus
    /// one text sub-block).
    pub fn plain_text(mut self, text: &[u8]) -> GifBuilder {
        assert!(text.len() <= 255);
        self.bytes.extend_from_slice(&[0x21, 0x01, 0x0C]);
        self.bytes.extend_from_slice(&[0; 12]);
        self.bytes.push(text.len() as u8);
        self.bytes.extend_from_slice(text);
        self.bytes.push(0);
        self
    }

    /// An extension with a label this decoder does not know.
    pub fn unknown_extension(mut self, label: u8, payload: &[u8]) -> GifBuilder {
        assert!(payload.len() <= 255);
        self.bytes.extend_from_slice(&[0x21, label]);
        self.bytes.push(payload.len() as u8);
        self.bytes.extend_from_slice(payload);
        self.bytes.push(0);
        self
    }

    /// Image with packed `codes` as its data, no local palette.
    pub fn image(self, x: u16, y: u16, w: u16, h: u16, min_code_size: u8, codes: &[u16]) -> GifBuilder {
        self.image_ex(x, y, w, h, false, None, min_code_size, codes)
    }

    /// Image with full control over interlacing and the local palette.
    pub fn image_ex(
        mut self, x: u16, y: u16, w: u16, h: u16, interlaced: bool,
        local_palette: Option<&[[u8; 3]]>, min_code_size: u8, codes: &[u16]
    ) -> GifBuilder {
        self.push_image_descriptor(x, y, w, h, interlaced, local_palette);
        self.bytes.push(min_code_size);
        let packed = pack_codes(min_code_size, codes);
        for chunk in packed.chunks(255) {
            self.bytes.push(chunk.len() as u8);
            self.bytes.extend_from_slice(chunk);
        }
        self.bytes.push(0);
        self
    }

    /// Image whose data sub-blocks and terminator byte are given raw,
    /// for building streams that violate the framing rules.
    pub fn image_raw(
        mut self, x: u16, y: u16, w: u16, h: u16, min_code_size: u8, blocks: &[&[u8]],
        terminator: u8
    ) -> GifBuilder {
        self.push_image_descriptor(x, y, w, h, false, None);
        self.bytes.push(min_code_size);
        for block in blocks {
            self.bytes.push(block.len() as u8);
            self.bytes.extend_from_slice(block);
        }
        self.bytes.push(terminator);
        self
    }

    fn push_image_descriptor(
        &mut self, x: u16, y: u16, w: u16, h: u16, interlaced: bool,
        local_palette: Option<&[[u8; 3]]>
    ) {
        self.bytes.push(0x2C);
        self.bytes.extend_from_slice(&x.to_le_bytes());
        self.bytes.extend_from_slice(&y.to_le_bytes());
        self.bytes.extend_from_slice(&w.to_le_bytes());
        self.bytes.extend_from_slice(&h.to_le_bytes());

        let mut fisrz = 0_u8;
        if interlaced {
            fisrz |= 0x40;
        }
        if let Some(palette) = local_palette {
            assert!(palette.len().is_power_of_two() && palette.len() >= 2);
            let exp = palette.len().trailing_zeros() as u8 - 1;
            fisrz |= 0x80 | exp;
        }
        self.bytes.push(fisrz);

        if let Some(palette) = local_palette {
            for color in palette {
                self.bytes.extend_from_slice(color);
            }
        }
    }

    /// Append the stream trailer and return the bytes.
    pub fn trailer(mut self) -> Vec<u8> {
        self.bytes.push(0x3B);
        self.bytes
    }

    /// Return the bytes without a trailer.
    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}
