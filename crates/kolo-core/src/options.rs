/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Global decoder options

/// Decoder options
///
/// Options respected by the kolo decoders; construct with
/// [`DecoderOptions::default`] and chain the setters.
///
/// ```
/// use kolo_core::options::DecoderOptions;
///
/// let options = DecoderOptions::default()
///     .set_max_width(1024)
///     .set_max_height(1024)
///     .set_strict_mode(true);
///
/// assert!(options.strict_mode());
/// ```
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecoderOptions {
    /// Maximum width for which decoders will not try to decode images
    /// larger than the specified width.
    ///
    /// - Default value: 16384
    max_width:   usize,
    /// Maximum height for which decoders will not try to decode images
    /// larger than the specified height.
    ///
    /// - Default value: 16384
    max_height:  usize,
    /// Whether decoders should error out on streams that a lenient
    /// reader could still make sense of.
    ///
    /// - Default value: false
    strict_mode: bool
}

impl Default for DecoderOptions {
    fn default() -> DecoderOptions {
        DecoderOptions {
            max_width:   1 << 14,
            max_height:  1 << 14,
            strict_mode: false
        }
    }
}

impl DecoderOptions {
    /// Get the maximum width configured for which the decoder should
    /// not try to decode images greater than that width
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get the maximum height configured for which the decoder should
    /// not try to decode images greater than that height
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Return true whether the decoder should be in strict mode
    pub const fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Set the maximum width the decoder accepts, a guard against
    /// corrupt or malicious dimension fields causing huge allocations
    pub const fn set_max_width(mut self, width: usize) -> DecoderOptions {
        self.max_width = width;
        self
    }

    /// Set the maximum height the decoder accepts
    pub const fn set_max_height(mut self, height: usize) -> DecoderOptions {
        self.max_height = height;
        self
    }

    /// Set whether the decoder should error out on streams a lenient
    /// reader would accept with a diagnostic
    pub const fn set_strict_mode(mut self, strict: bool) -> DecoderOptions {
        self.strict_mode = strict;
        self
    }
}
