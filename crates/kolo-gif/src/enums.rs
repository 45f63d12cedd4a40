/*
 * Copyright (c) 2026.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// What happens to a frame's rectangle before the next frame is drawn
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DisposalMethod {
    /// The stream didn't say, treated like [`Keep`](Self::Keep)
    None       = 0,
    /// Leave the pixels in place
    Keep       = 1,
    /// Fill the rectangle with the background color index
    Background = 2,
    /// Restore the rectangle to what it held before the frame was drawn
    Previous   = 3
}

impl DisposalMethod {
    pub fn from_flags(value: u8) -> DisposalMethod {
        match value {
            1 => DisposalMethod::Keep,
            2 => DisposalMethod::Background,
            3 => DisposalMethod::Previous,
            _ => DisposalMethod::None
        }
    }
}
