//! Per-pixel opacity masks for precise collision tests.
//!
//! Sprites have wide transparent margins, so bounding boxes report hits
//! that never touch. A mask keeps one bit per pixel, packed row by row into
//! `u64` words (bit `i` of word `w` is column `w * 64 + i`). Padding bits past
//! the row width are always zero.

use glam::IVec2;
use thiserror::Error;

use crate::constants::*;

/// Asset problems caught at load time.
#[derive(Debug, Error, PartialEq)]
pub enum MaskError {
    #[error("mask dimensions must be non-zero, got {width}x{height}")]
    ZeroSized { width: u32, height: u32 },
    #[error("alpha buffer holds {actual} pixels, expected {expected}")]
    AlphaLength { expected: usize, actual: usize },
    #[error("agent sprite needs at least one frame")]
    NoFrames,
    #[error("agent frame {index} is {actual:?}, expected {expected:?}")]
    FrameSizeMismatch {
        index: usize,
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpacityMask {
    width: u32,
    height: u32,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl OpacityMask {
    /// Build a mask by asking `opaque(x, y)` for every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        opaque: impl Fn(u32, u32) -> bool,
    ) -> Result<Self, MaskError> {
        if width == 0 || height == 0 {
            return Err(MaskError::ZeroSized { width, height });
        }
        Ok(Self::build(width, height, opaque))
    }

    /// Caller guarantees non-zero dimensions.
    fn build(width: u32, height: u32, opaque: impl Fn(u32, u32) -> bool) -> Self {
        let words_per_row = (width as usize).div_ceil(64);
        let mut bits = vec![0u64; words_per_row * height as usize];
        for y in 0..height {
            let row = y as usize * words_per_row;
            for x in 0..width {
                if opaque(x, y) {
                    bits[row + x as usize / 64] |= 1u64 << (x % 64);
                }
            }
        }
        Self {
            width,
            height,
            words_per_row,
            bits,
        }
    }

    /// Build a mask from a row-major alpha channel. Pixels with alpha strictly
    /// above `threshold` are opaque.
    pub fn from_alpha(
        width: u32,
        height: u32,
        alpha: &[u8],
        threshold: u8,
    ) -> Result<Self, MaskError> {
        let expected = width as usize * height as usize;
        if alpha.len() != expected {
            return Err(MaskError::AlphaLength {
                expected,
                actual: alpha.len(),
            });
        }
        Self::from_fn(width, height, |x, y| {
            alpha[y as usize * width as usize + x as usize] > threshold
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Opacity at `(x, y)`; anything outside the mask is transparent.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        let word = self.bits[y as usize * self.words_per_row + x as usize / 64];
        word & (1u64 << (x as u32 % 64)) != 0
    }

    /// Number of opaque pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Mirror top to bottom.
    pub fn flip_vertical(&self) -> Self {
        let mut bits = Vec::with_capacity(self.bits.len());
        for row in self.bits.chunks(self.words_per_row).rev() {
            bits.extend_from_slice(row);
        }
        Self {
            width: self.width,
            height: self.height,
            words_per_row: self.words_per_row,
            bits,
        }
    }

    /// First pixel (row-major, in `self` coordinates) where both masks are
    /// opaque, with `other`'s origin placed at `offset` relative to ours.
    pub fn overlap(&self, other: &OpacityMask, offset: IVec2) -> Option<IVec2> {
        let x_start = offset.x.max(0);
        let x_end = (offset.x + other.width as i32).min(self.width as i32);
        let y_start = offset.y.max(0);
        let y_end = (offset.y + other.height as i32).min(self.height as i32);
        if x_start >= x_end || y_start >= y_end {
            return None;
        }

        for y in y_start..y_end {
            let mut x = x_start;
            while x < x_end {
                let len = (x_end - x).min(64) as u32;
                let keep = if len == 64 { u64::MAX } else { (1u64 << len) - 1 };
                let ours = self.row_window(y, x) & keep;
                if ours != 0 {
                    let theirs = other.row_window(y - offset.y, x - offset.x);
                    let hit = ours & theirs;
                    if hit != 0 {
                        return Some(IVec2::new(x + hit.trailing_zeros() as i32, y));
                    }
                }
                x += 64;
            }
        }
        None
    }

    /// Whether the masks share any opaque pixel at `offset`.
    pub fn overlaps(&self, other: &OpacityMask, offset: IVec2) -> bool {
        self.overlap(other, offset).is_some()
    }

    /// 64 pixels of row `y` starting at column `x`, bit 0 being column `x`.
    fn row_window(&self, y: i32, x: i32) -> u64 {
        if y < 0 || y >= self.height as i32 || x < 0 || x >= self.width as i32 {
            return 0;
        }
        let row = &self.bits[y as usize * self.words_per_row..][..self.words_per_row];
        let word = x as usize / 64;
        let shift = x as u32 % 64;
        let lo = row[word] >> shift;
        let hi = if shift > 0 && word + 1 < row.len() {
            row[word + 1] << (64 - shift)
        } else {
            0
        };
        lo | hi
    }
}

/// Every mask the collision engine needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSet {
    agent_frames: Vec<OpacityMask>,
    barrier_top: OpacityMask,
    barrier_bottom: OpacityMask,
}

impl SpriteSet {
    /// `barrier_bottom` has its open end at the top; the top barrier is its
    /// mirror image. All agent frames must share one size.
    pub fn new(
        agent_frames: Vec<OpacityMask>,
        barrier_bottom: OpacityMask,
    ) -> Result<Self, MaskError> {
        let first = agent_frames.first().ok_or(MaskError::NoFrames)?;
        let expected = (first.width, first.height);
        for (index, frame) in agent_frames.iter().enumerate() {
            let actual = (frame.width, frame.height);
            if actual != expected {
                return Err(MaskError::FrameSizeMismatch {
                    index,
                    expected,
                    actual,
                });
            }
        }
        Ok(Self {
            agent_frames,
            barrier_top: barrier_bottom.flip_vertical(),
            barrier_bottom,
        })
    }

    /// Stand-in silhouettes with the proportions of the stock art: a 68x48
    /// bird with three wing poses and a 104x640 pipe with a lip.
    pub fn procedural() -> Self {
        let frames = (0..AGENT_FRAME_COUNT as u32)
            .map(|i| procedural_agent(10 + 10 * i))
            .collect();
        Self {
            agent_frames: frames,
            barrier_top: procedural_barrier().flip_vertical(),
            barrier_bottom: procedural_barrier(),
        }
    }

    /// Mask of wing frame `frame`, wrapping past the last one.
    pub fn agent_frame(&self, frame: usize) -> &OpacityMask {
        &self.agent_frames[frame % self.agent_frames.len()]
    }

    pub fn frame_count(&self) -> usize {
        self.agent_frames.len()
    }

    pub fn agent_width(&self) -> u32 {
        self.agent_frames[0].width
    }

    pub fn agent_height(&self) -> u32 {
        self.agent_frames[0].height
    }

    pub fn barrier_top(&self) -> &OpacityMask {
        &self.barrier_top
    }

    pub fn barrier_bottom(&self) -> &OpacityMask {
        &self.barrier_bottom
    }

    pub fn barrier_width(&self) -> u32 {
        self.barrier_bottom.width
    }

    pub fn barrier_height(&self) -> u32 {
        self.barrier_bottom.height
    }
}

impl Default for SpriteSet {
    fn default() -> Self {
        Self::procedural()
    }
}

fn inside_ellipse(x: u32, y: u32, cx: f64, cy: f64, rx: f64, ry: f64) -> bool {
    let dx = (x as f64 + 0.5 - cx) / rx;
    let dy = (y as f64 + 0.5 - cy) / ry;
    dx * dx + dy * dy <= 1.0
}

fn procedural_agent(wing_y: u32) -> OpacityMask {
    let w = AGENT_SPRITE_WIDTH;
    let h = AGENT_SPRITE_HEIGHT;
    OpacityMask::build(w, h, |x, y| {
        let body = inside_ellipse(x, y, 32.0, 24.0, 26.0, 18.0);
        let beak = (56..66).contains(&x) && (22..32).contains(&y);
        let wing = inside_ellipse(x, y, 16.0, wing_y as f64, 12.0, 6.0);
        body || beak || wing
    })
}

fn procedural_barrier() -> OpacityMask {
    OpacityMask::build(BARRIER_SPRITE_WIDTH, BARRIER_SPRITE_HEIGHT, |x, y| {
        y < BARRIER_CAP_HEIGHT
            || (BARRIER_SHAFT_INSET..BARRIER_SPRITE_WIDTH - BARRIER_SHAFT_INSET).contains(&x)
    })
}
