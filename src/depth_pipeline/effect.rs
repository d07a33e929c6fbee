//! Chromostereopsis effect
//!
//! Near samples trend red and far samples trend blue, with a logistic transition
//! around the depth threshold.

mod composer;
mod params;

pub use composer::{apply_effect, compose, CompositionCoefficients};
pub use params::{EffectParams, EffectParamsBuilder};
