/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Mapping of decoded pixels onto the logical screen
//!
//! The LZW stage produces pixels as one linear run over the frame
//! rectangle. This module places run offsets onto the canvas, including
//! the four-pass row shuffle interlaced images use.

use alloc::vec::Vec;

/// Row starts and steps for the four interlace passes of 89a
const PASS_OFFSETS: [usize; 4] = [0, 4, 2, 1];
const PASS_STEPS: [usize; 4] = [8, 8, 4, 2];

/// Maps a linear decoded pixel offset to a canvas offset for one frame
/// rectangle.
pub(crate) struct Placement {
    canvas_width: usize,
    x:            usize,
    w:            usize,
    /// Canvas row for each rectangle row, in decode order
    rows:         Vec<usize>
}

impl Placement {
    /// Build the placement for a frame rectangle positioned at `(x, y)`
    /// inside a canvas `canvas_width` pixels wide.
    ///
    /// The caller has already validated that the rectangle lies inside
    /// the canvas.
    pub fn new(
        canvas_width: usize, x: usize, y: usize, w: usize, h: usize, interlaced: bool
    ) -> Placement {
        let mut rows = Vec::with_capacity(h);

        if interlaced {
            for (start, step) in PASS_OFFSETS.into_iter().zip(PASS_STEPS) {
                let mut row = start;
                while row < h {
                    rows.push(y + row);
                    row += step;
                }
            }
        } else {
            rows.extend(y..y + h);
        }
        debug_assert_eq!(rows.len(), h);

        Placement { canvas_width, x, w, rows }
    }

    /// Number of pixels the frame rectangle holds
    pub fn pixel_count(&self) -> usize {
        self.w * self.rows.len()
    }

    /// Canvas offset of the `p`-th decoded pixel, `p < pixel_count()`
    #[inline(always)]
    pub fn canvas_offset(&self, p: usize) -> usize {
        self.rows[p / self.w] * self.canvas_width + self.x + p % self.w
    }
}
