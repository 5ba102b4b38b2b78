// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PolarError, PolarResult};

/// Ground-motion channel of a three-component recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Vertical,
    X,
    Y,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Vertical => write!(f, "vertical"),
            Channel::X => write!(f, "x"),
            Channel::Y => write!(f, "y"),
        }
    }
}

/// Orientation of the vertical channel relative to "up".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalPolarity {
    /// Samples are used as recorded.
    #[default]
    AsRecorded,
    /// The vertical channel is negated before analysis.
    Inverted,
}

impl VerticalPolarity {
    /// Maps the integer polarity flag used by header-driven callers: any
    /// positive value keeps the recorded sign, zero or negative inverts it.
    pub fn from_flag(flag: i32) -> Self {
        if flag > 0 {
            Self::AsRecorded
        } else {
            Self::Inverted
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            Self::AsRecorded => 1.0,
            Self::Inverted => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::AsRecorded => Self::Inverted,
            Self::Inverted => Self::AsRecorded,
        }
    }
}

/// Borrowed vertical and horizontal traces of one station.
///
/// The horizontal channels are called `x` and `y` (typically east and north);
/// the naming is a convention of the caller and is not enforced here.
#[derive(Clone, Copy, Debug)]
pub struct ThreeComponent<'a, T = f64> {
    z: &'a [T],
    x: &'a [T],
    y: &'a [T],
}

impl<'a, T> ThreeComponent<'a, T>
where
    T: Copy + Into<f64>,
{
    pub fn new(z: &'a [T], x: &'a [T], y: &'a [T]) -> Self {
        Self { z, x, y }
    }

    pub fn z(&self) -> &'a [T] {
        self.z
    }

    pub fn x(&self) -> &'a [T] {
        self.x
    }

    pub fn y(&self) -> &'a [T] {
        self.y
    }

    /// Length shared by all three channels, or an error when they differ.
    pub fn common_len(&self) -> PolarResult<usize> {
        let (x, y, z) = (self.x.len(), self.y.len(), self.z.len());
        if x == y && y == z {
            Ok(z)
        } else {
            Err(PolarError::ChannelLengthMismatch { x, y, z })
        }
    }

    /// Selects `[start, start + count)` after checking every channel covers it.
    pub fn window(&self, start: usize, count: usize) -> PolarResult<SampleWindow<'a, T>> {
        if count == 0 {
            return Err(PolarError::EmptyWindow);
        }
        let channels = [
            (Channel::Vertical, self.z),
            (Channel::X, self.x),
            (Channel::Y, self.y),
        ];
        for (channel, data) in channels {
            let fits = start
                .checked_add(count)
                .map(|end| end <= data.len())
                .unwrap_or(false);
            if !fits {
                return Err(PolarError::WindowOutOfBounds {
                    channel,
                    start,
                    count,
                    len: data.len(),
                });
            }
        }
        let end = start + count;
        Ok(SampleWindow {
            start,
            z: &self.z[start..end],
            x: &self.x[start..end],
            y: &self.y[start..end],
        })
    }
}

/// A validated, non-empty slice of a [`ThreeComponent`] recording.
#[derive(Clone, Copy, Debug)]
pub struct SampleWindow<'a, T = f64> {
    start: usize,
    z: &'a [T],
    x: &'a [T],
    y: &'a [T],
}

impl<'a, T> SampleWindow<'a, T>
where
    T: Copy + Into<f64>,
{
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.z.len()
    }

    /// Always false: windows are validated to hold at least one sample.
    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    /// Samples in `(x, y, z)` axis order, widened to `f64`.
    pub fn samples(&self) -> impl Iterator<Item = [f64; 3]> + 'a {
        let (x, y, z) = (self.x, self.y, self.z);
        x.iter()
            .zip(y.iter())
            .zip(z.iter())
            .map(|((&u, &v), &w)| [u.into(), v.into(), w.into()])
    }
}
