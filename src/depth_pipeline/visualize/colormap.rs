//! Colormap lookup tables
//!
//! Each perceptual map is four linear segments with breakpoints at 0.25, 0.5 and
//! 0.75. A segment stores its start colour and the change across the segment, so
//! the start of every segment is reproduced exactly.

use std::fmt;
use std::str::FromStr;

use crate::depth_pipeline::common::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMapKind {
    #[default]
    Grayscale,
    Jet,
    Viridis,
    Plasma,
    Inferno,
}

/// `(start, delta)` per segment, RGB in [0, 1]
type Segments = [([f32; 3], [f32; 3]); 4];

const JET: Segments = [
    ([0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 1.0], [0.0, 0.0, -1.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
    ([1.0, 1.0, 0.0], [0.0, -1.0, 0.0]),
];

const VIRIDIS: Segments = [
    ([0.004, 0.005, 0.329], [0.267, 0.222, 0.344]),
    ([0.267, 0.227, 0.673], [0.097, 0.319, 0.047]),
    ([0.364, 0.546, 0.720], [0.373, 0.290, -0.204]),
    ([0.737, 0.836, 0.516], [0.216, 0.122, -0.207]),
];

const PLASMA: Segments = [
    ([0.050, 0.029, 0.527], [0.298, 0.076, 0.135]),
    ([0.348, 0.105, 0.662], [0.252, 0.163, 0.043]),
    ([0.600, 0.268, 0.705], [0.239, 0.329, -0.149]),
    ([0.839, 0.597, 0.556], [0.101, 0.312, -0.168]),
];

const INFERNO: Segments = [
    ([0.001, 0.004, 0.013], [0.258, 0.024, 0.100]),
    ([0.259, 0.028, 0.113], [0.340, 0.121, 0.113]),
    ([0.599, 0.149, 0.226], [0.258, 0.364, -0.019]),
    ([0.857, 0.513, 0.207], [0.119, 0.415, 0.571]),
];

const SEGMENT_WIDTH: f32 = 0.25;

impl ColorMapKind {
    pub const ALL: [ColorMapKind; 5] = [
        ColorMapKind::Grayscale,
        ColorMapKind::Jet,
        ColorMapKind::Viridis,
        ColorMapKind::Plasma,
        ColorMapKind::Inferno,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ColorMapKind::Grayscale => "grayscale",
            ColorMapKind::Jet => "jet",
            ColorMapKind::Viridis => "viridis",
            ColorMapKind::Plasma => "plasma",
            ColorMapKind::Inferno => "inferno",
        }
    }

    fn segments(&self) -> Option<&'static Segments> {
        match self {
            ColorMapKind::Grayscale => None,
            ColorMapKind::Jet => Some(&JET),
            ColorMapKind::Viridis => Some(&VIRIDIS),
            ColorMapKind::Plasma => Some(&PLASMA),
            ColorMapKind::Inferno => Some(&INFERNO),
        }
    }

    /// Maps a normalised depth onto RGB. Input is clamped to [0, 1] (NaN maps to 0)
    /// and channels truncate.
    pub fn map(&self, value: f32) -> [u8; 3] {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };

        let Some(segments) = self.segments() else {
            let gray = to_channel(value);
            return [gray, gray, gray];
        };

        let index = if value < 0.25 {
            0
        } else if value < 0.5 {
            1
        } else if value < 0.75 {
            2
        } else {
            3
        };
        let t = (value - SEGMENT_WIDTH * index as f32) / SEGMENT_WIDTH;
        let (start, delta) = &segments[index];

        [
            to_channel(start[0] + delta[0] * t),
            to_channel(start[1] + delta[1] * t),
            to_channel(start[2] + delta[2] * t),
        ]
    }
}

#[inline]
fn to_channel(value: f32) -> u8 {
    (value * 255.0).clamp(0.0, 255.0) as u8
}

impl fmt::Display for ColorMapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorMapKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorMapKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PipelineError::UnsupportedFormat(format!("unknown colormap '{}'", s)))
    }
}
