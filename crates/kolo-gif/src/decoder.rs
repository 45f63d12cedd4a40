/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use alloc::vec;
use alloc::vec::Vec;

use kolo_core::bytestream::{KByteReaderTrait, KReader};
use kolo_core::log::{trace, warn};
use kolo_core::options::DecoderOptions;

use crate::enums::DisposalMethod;
use crate::errors::GifDecoderErrors;
use crate::lzw::LzwDecoder;
use crate::placement::Placement;

// block separators
const IMAGE_SEPARATOR: u8 = b','; // 0x2C
const EXTENSION_INTRODUCER: u8 = b'!'; // 0x21
const TRAILER: u8 = b';'; // 0x3B

// extension labels
const EXT_PLAIN_TEXT: u8 = 0x01;
const EXT_GRAPHIC_CONTROL: u8 = 0xF9;
const EXT_COMMENT: u8 = 0xFE;
const EXT_APPLICATION: u8 = 0xFF;

/// Probe some bytes to see if they consist of a GIF image
pub fn probe_gif(bytes: &[u8]) -> bool {
    if let Some(magic) = bytes.get(0..6) {
        return magic[0..4] == *b"GIF8" && (magic[4] == b'9' || magic[4] == b'7') && magic[5] == b'a';
    }
    false
}

/// Metadata of one decoded frame
///
/// Returned by [`GifDecoder::next_frame`]; the pixels themselves live in
/// [`GifDecoder::canvas`] which at that point holds the whole logical
/// screen with this frame composited in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameInfo {
    /// Left edge of the frame rectangle inside the logical screen
    pub x:            usize,
    /// Top edge of the frame rectangle inside the logical screen
    pub y:            usize,
    /// Width of the frame rectangle
    pub width:        usize,
    /// Height of the frame rectangle
    pub height:       usize,
    /// Time to show this frame, in hundredths of a second
    pub delay:        u16,
    /// What to do with the rectangle before the next frame
    pub disposal:     DisposalMethod,
    /// Whether the stream asks to wait for user input before advancing
    pub user_input:   bool,
    /// Palette index to treat as fully transparent, when given
    pub transparency: Option<u8>,
    /// Whether the image data was stored interlaced
    pub interlaced:   bool
}

/// Fields of the last seen graphic control extension; bound to the next
/// image descriptor and reset once consumed.
#[derive(Copy, Clone)]
struct GraphicControl {
    delay:             u16,
    disposal:          DisposalMethod,
    user_input:        bool,
    transparent_index: Option<u8>
}

impl Default for GraphicControl {
    fn default() -> GraphicControl {
        GraphicControl {
            delay:             0,
            disposal:          DisposalMethod::None,
            user_input:        false,
            transparent_index: None
        }
    }
}

/// Disposal of the previous frame, applied when the caller asks for the
/// next one so the canvas stays inspectable in between.
enum PendingDisposal {
    None,
    Background { x: usize, y: usize, w: usize, h: usize },
    Previous { x: usize, y: usize, w: usize, patch: Vec<u8> }
}

/// An animated GIF decoder
///
/// Frames are pulled one at a time with [`next_frame`]; the decoder owns
/// the canvas (the logical screen) and composites each frame into it,
/// applying the previous frame's disposal first.
///
/// ## Extracting image metadata
/// - use [`decode_headers`] + utility functions to get information
/// ```no_run
/// use kolo_core::bytestream::KCursor;
/// use kolo_gif::GifDecoder;
///
/// fn main() -> Result<(), kolo_gif::GifDecoderErrors> {
///     let data = std::fs::read("image.gif").unwrap();
///     let mut decoder = GifDecoder::new(KCursor::new(&data));
///     decoder.decode_headers()?;
///     // after decoding headers, image metadata is accessible
///     let (w, h) = decoder.dimensions().unwrap();
///     println!("Logical screen: {w} x {h}");
///     Ok(())
/// }
/// ```
///
/// ## Iterating frames
/// ```no_run
/// use kolo_core::bytestream::KCursor;
/// use kolo_gif::GifDecoder;
///
/// fn main() -> Result<(), kolo_gif::GifDecoderErrors> {
///     let data = std::fs::read("image.gif").unwrap();
///     let mut decoder = GifDecoder::new(KCursor::new(&data));
///     while let Some(frame) = decoder.next_frame()? {
///         println!("frame at ({},{}) delay {}", frame.x, frame.y, frame.delay);
///     }
///     Ok(())
/// }
/// ```
///
/// [`next_frame`]: GifDecoder::next_frame
/// [`decode_headers`]: GifDecoder::decode_headers
pub struct GifDecoder<T>
where
    T: KByteReaderTrait
{
    stream:       KReader<T>,
    options:      DecoderOptions,
    width:        usize,
    height:       usize,
    flags:        u8,
    bg_index:     u8,
    ratio:        u8,
    read_headers: bool,
    finished:     bool,
    /// The composited logical screen, palette indices
    canvas:       Vec<u8>,
    global_pal:   [[u8; 3]; 256],
    global_len:   usize,
    local_pal:    [[u8; 3]; 256],
    local_len:    usize,
    /// Whether the last image carried its own palette
    local_active: bool,
    gce:          GraphicControl,
    pending:      PendingDisposal,
    loop_count:   Option<u16>
}

impl<T> GifDecoder<T>
where
    T: KByteReaderTrait
{
    /// Create a new GIF decoder reading from `data` with the default
    /// options
    pub fn new(data: T) -> GifDecoder<T> {
        GifDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new GIF decoder that obeys specified restrictions
    ///
    /// E.g can be used to set width and height limits to prevent OOM
    /// attacks, or to enable strict mode
    ///
    /// # Example
    /// ```
    /// use kolo_core::bytestream::KCursor;
    /// use kolo_core::options::DecoderOptions;
    /// use kolo_gif::GifDecoder;
    ///
    /// // only decode images less than 10 in both width and height
    /// let options = DecoderOptions::default().set_max_width(10).set_max_height(10);
    ///
    /// let mut decoder = GifDecoder::new_with_options(KCursor::new([]), options);
    /// ```
    pub fn new_with_options(data: T, options: DecoderOptions) -> GifDecoder<T> {
        GifDecoder {
            stream: KReader::new(data),
            options,
            width: 0,
            height: 0,
            flags: 0,
            bg_index: 0,
            ratio: 0,
            read_headers: false,
            finished: false,
            canvas: vec![],
            global_pal: [[0; 3]; 256],
            global_len: 0,
            local_pal: [[0; 3]; 256],
            local_len: 0,
            local_active: false,
            gce: GraphicControl::default(),
            pending: PendingDisposal::None,
            loop_count: None
        }
    }

    /// Decode the stream header and the global color table, storing the
    /// information in the decoder instance
    ///
    /// Calling it more than once is a no-op
    pub fn decode_headers(&mut self) -> Result<(), GifDecoderErrors> {
        if self.read_headers {
            return Ok(());
        }
        let signature = self.stream.read_fixed_bytes_or_error::<3>()?;
        if &signature != b"GIF" {
            return Err(GifDecoderErrors::NotAGif);
        }
        let version = self.stream.read_fixed_bytes_or_error::<3>()?;
        if &version != b"89a" {
            return Err(GifDecoderErrors::UnsupportedFormat(
                "only the 89a dialect is supported"
            ));
        }

        self.width = usize::from(self.stream.get_u16_le_err()?);
        self.height = usize::from(self.stream.get_u16_le_err()?);

        self.flags = self.stream.read_u8_err()?;
        self.bg_index = self.stream.read_u8_err()?;
        self.ratio = self.stream.read_u8_err()?;

        if self.width > self.options.max_width() {
            return Err(GifDecoderErrors::TooLargeDimensions(
                "width",
                self.options.max_width(),
                self.width
            ));
        }
        if self.height > self.options.max_height() {
            return Err(GifDecoderErrors::TooLargeDimensions(
                "height",
                self.options.max_height(),
                self.height
            ));
        }
        if (self.flags & 0x80) == 0 {
            return Err(GifDecoderErrors::UnsupportedFormat("no global color table"));
        }
        if ((self.flags >> 4) & 7) != 7 {
            return Err(GifDecoderErrors::UnsupportedFormat(
                "color depth is not 8 bits"
            ));
        }
        self.global_len = 2 << (self.flags & 7);
        self.parse_palette(self.global_len, false)?;

        self.canvas = vec![0; self.width * self.height];

        trace!("Image width  :{}", self.width);
        trace!("Image height :{}", self.height);
        trace!("Ratio: {}", self.ratio);
        trace!("Background index: {}", self.bg_index);
        self.read_headers = true;

        Ok(())
    }

    fn parse_palette(&mut self, num_entries: usize, local: bool) -> Result<(), GifDecoderErrors> {
        let mut rgb = [0_u8; 3 * 256];
        self.stream.read_exact_bytes(&mut rgb[..num_entries * 3])?;

        let pal = if local { &mut self.local_pal } else { &mut self.global_pal };
        for (color, bytes) in pal.iter_mut().zip(rgb[..num_entries * 3].chunks_exact(3)) {
            color.copy_from_slice(bytes);
        }
        Ok(())
    }

    /// Advance to the next frame
    ///
    /// Consumes extensions until an image descriptor is hit, then
    /// decompresses that image into the canvas. Returns the frame's
    /// metadata, or `None` once the stream trailer was seen; after that
    /// the source is not touched again.
    ///
    /// The previous frame's disposal is applied at the start of this
    /// call, so the canvas is stable for inspection between calls.
    pub fn next_frame(&mut self) -> Result<Option<FrameInfo>, GifDecoderErrors> {
        self.decode_headers()?;
        if self.finished {
            return Ok(None);
        }
        self.apply_pending_disposal();

        loop {
            let separator = self.stream.read_u8_err()?;
            match separator {
                IMAGE_SEPARATOR => return self.read_image().map(Some),
                EXTENSION_INTRODUCER => self.read_extension()?,
                TRAILER => {
                    trace!("Stream trailer reached");
                    self.finished = true;
                    return Ok(None);
                }
                _ => return Err(GifDecoderErrors::BadSeparator(separator))
            }
        }
    }

    /// Decode the first frame and return the canvas
    ///
    /// Convenience wrapper over [`next_frame`](Self::next_frame) for
    /// still images; errors if the stream holds no image at all.
    pub fn decode(&mut self) -> Result<Vec<u8>, GifDecoderErrors> {
        match self.next_frame()? {
            Some(_) => Ok(self.canvas.clone()),
            None => Err(GifDecoderErrors::MalformedStream("stream contains no image"))
        }
    }

    fn apply_pending_disposal(&mut self) {
        match core::mem::replace(&mut self.pending, PendingDisposal::None) {
            PendingDisposal::None => {}
            PendingDisposal::Background { x, y, w, h } => {
                for row in y..y + h {
                    let start = row * self.width + x;
                    self.canvas[start..start + w].fill(self.bg_index);
                }
            }
            PendingDisposal::Previous { x, y, w, patch } => {
                for (i, row_pixels) in patch.chunks_exact(w).enumerate() {
                    let start = (y + i) * self.width + x;
                    self.canvas[start..start + w].copy_from_slice(row_pixels);
                }
            }
        }
    }

    fn read_extension(&mut self) -> Result<(), GifDecoderErrors> {
        let label = self.stream.read_u8_err()?;

        match label {
            EXT_GRAPHIC_CONTROL => {
                // block size, always 4
                self.stream.skip(1)?;
                let packed = self.stream.read_u8_err()?;
                let delay = self.stream.get_u16_le_err()?;
                let tindex = self.stream.read_u8_err()?;
                // block terminator
                self.stream.skip(1)?;

                self.gce = GraphicControl {
                    delay,
                    disposal: DisposalMethod::from_flags((packed >> 2) & 7),
                    user_input: (packed & 2) != 0,
                    transparent_index: if (packed & 1) != 0 { Some(tindex) } else { None }
                };
            }
            EXT_APPLICATION => {
                // block size, always 11
                self.stream.skip(1)?;
                let app_id = self.stream.read_fixed_bytes_or_error::<8>()?;
                let _auth_code = self.stream.read_fixed_bytes_or_error::<3>()?;

                if &app_id == b"NETSCAPE" {
                    // sub-block size (3) and its constant first byte (1)
                    self.stream.skip(2)?;
                    let loops = self.stream.get_u16_le_err()?;
                    // block terminator
                    self.stream.skip(1)?;

                    self.loop_count = Some(loops);
                    trace!("Loop count: {loops}");
                } else {
                    warn!("ignoring application extension: {:?}", core::str::from_utf8(&app_id));
                    self.skip_sub_blocks()?;
                }
            }
            EXT_COMMENT => {
                trace!("skipping comment extension");
                self.skip_sub_blocks()?;
            }
            EXT_PLAIN_TEXT => {
                warn!("ignoring plain text extension");
                // fixed metadata: size byte plus twelve bytes of grid info
                self.stream.skip(13)?;
                self.skip_sub_blocks()?;
            }
            _ => {
                warn!("unknown extension label {label:#04X}, skipping its data");
                self.skip_sub_blocks()?;
            }
        }
        Ok(())
    }

    fn skip_sub_blocks(&mut self) -> Result<(), GifDecoderErrors> {
        loop {
            let len = self.stream.read_u8_err()?;
            if len == 0 {
                return Ok(());
            }
            self.stream.skip(usize::from(len))?;
        }
    }

    fn read_image(&mut self) -> Result<FrameInfo, GifDecoderErrors> {
        let x = usize::from(self.stream.get_u16_le_err()?);
        let y = usize::from(self.stream.get_u16_le_err()?);
        let w = usize::from(self.stream.get_u16_le_err()?);
        let h = usize::from(self.stream.get_u16_le_err()?);
        let fisrz = self.stream.read_u8_err()?;

        let interlaced = (fisrz & 0x40) != 0;
        if (fisrz & 0x80) != 0 {
            self.local_len = 2 << (fisrz & 7);
            self.parse_palette(self.local_len, true)?;
            self.local_active = true;
        } else {
            self.local_active = false;
        }

        if w == 0 || h == 0 {
            return Err(GifDecoderErrors::MalformedStream("empty frame rectangle"));
        }
        if x + w > self.width || y + h > self.height {
            return Err(GifDecoderErrors::MalformedStream(
                "frame rectangle outside the logical screen"
            ));
        }

        // this frame's graphic control binds to it alone; its disposal
        // runs when the caller asks for the frame after this one
        let gce = core::mem::replace(&mut self.gce, GraphicControl::default());
        self.pending = match gce.disposal {
            DisposalMethod::Background => PendingDisposal::Background { x, y, w, h },
            DisposalMethod::Previous => {
                PendingDisposal::Previous { x, y, w, patch: self.snapshot_rect(x, y, w, h) }
            }
            _ => PendingDisposal::None
        };

        let min_code_size = self.stream.read_u8_err()?;
        let placement = Placement::new(self.width, x, y, w, h, interlaced);
        let palette_size = if self.local_active { self.local_len } else { self.global_len };

        let mut lzw = LzwDecoder::new(min_code_size)?;
        lzw.decode_into(
            &mut self.stream,
            &placement,
            &mut self.canvas,
            palette_size,
            self.options.strict_mode()
        )?;

        Ok(FrameInfo {
            x,
            y,
            width: w,
            height: h,
            delay: gce.delay,
            disposal: gce.disposal,
            user_input: gce.user_input,
            transparency: gce.transparent_index,
            interlaced
        })
    }

    fn snapshot_rect(&self, x: usize, y: usize, w: usize, h: usize) -> Vec<u8> {
        let mut patch = Vec::with_capacity(w * h);
        for row in y..y + h {
            let start = row * self.width + x;
            patch.extend_from_slice(&self.canvas[start..start + w]);
        }
        patch
    }

    /// Return the logical screen width and height
    ///
    /// `None` if the headers haven't been decoded
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if self.read_headers {
            return Some((self.width, self.height));
        }
        None
    }

    /// Return the number of bytes needed for the canvas, i.e logical
    /// width times height
    ///
    /// `None` if the headers haven't been decoded
    pub fn output_buffer_size(&self) -> Option<usize> {
        if self.read_headers {
            return self.width.checked_mul(self.height);
        }
        None
    }

    /// The composited logical screen as palette indices
    ///
    /// Empty before the headers are decoded. After a successful
    /// [`next_frame`](Self::next_frame) it holds every frame decoded so
    /// far, composited under the stream's disposal instructions.
    pub fn canvas(&self) -> &[u8] {
        &self.canvas
    }

    /// The palette active for the most recent frame, RGB triplets
    ///
    /// This is the local color table when the frame carried one and the
    /// global table otherwise; it is invalidated by the next
    /// [`next_frame`](Self::next_frame) call.
    ///
    /// `None` if the headers haven't been decoded
    pub fn palette(&self) -> Option<&[[u8; 3]]> {
        if !self.read_headers {
            return None;
        }
        if self.local_active {
            Some(&self.local_pal[..self.local_len])
        } else {
            Some(&self.global_pal[..self.global_len])
        }
    }

    /// The global color table, RGB triplets
    ///
    /// `None` if the headers haven't been decoded
    pub fn global_palette(&self) -> Option<&[[u8; 3]]> {
        if self.read_headers {
            return Some(&self.global_pal[..self.global_len]);
        }
        None
    }

    /// Index into the global palette of the background color
    ///
    /// `None` if the headers haven't been decoded
    pub const fn background_index(&self) -> Option<u8> {
        if self.read_headers {
            return Some(self.bg_index);
        }
        None
    }

    /// Animation loop count from the Netscape application extension
    ///
    /// `None` until the extension is seen; `Some(0)` means loop forever
    pub const fn loop_count(&self) -> Option<u16> {
        self.loop_count
    }
}
