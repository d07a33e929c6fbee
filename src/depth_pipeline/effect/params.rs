//! Effect tuning knobs

/// Percentage-scaled effect parameters, 0-100 by convention
///
/// Out-of-range and NaN values are accepted here; stages read them through
/// [`EffectParams::sanitized`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectParams {
    /// Depth (in percent of the normalised range) where red and blue balance
    pub threshold: f32,
    /// Steepness of the logistic transition
    pub depth_scale: f32,
    /// Widens the transition by dividing the steepness
    pub feather: f32,
    /// 50 leaves the red channel as is, 100 doubles it
    pub red_brightness: f32,
    /// 50 leaves the blue channel as is, 100 doubles it
    pub blue_brightness: f32,
    /// Maps onto a gamma exponent in [0.1, 3.0]
    pub gamma: f32,
    pub black_level: f32,
    pub white_level: f32,
    /// Edge-aware smoothing strength; 0 disables smoothing
    pub smoothing: f32,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            threshold: 50.0,
            depth_scale: 50.0,
            feather: 10.0,
            red_brightness: 50.0,
            blue_brightness: 50.0,
            gamma: 50.0,
            black_level: 0.0,
            white_level: 100.0,
            smoothing: 0.0,
        }
    }
}

fn percent(value: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(0.0, 100.0)
    }
}

impl EffectParams {
    pub fn builder() -> EffectParamsBuilder {
        EffectParamsBuilder::default()
    }

    /// Every knob clamped to [0, 100], NaN replaced by the field's default.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        Self {
            threshold: percent(self.threshold, d.threshold),
            depth_scale: percent(self.depth_scale, d.depth_scale),
            feather: percent(self.feather, d.feather),
            red_brightness: percent(self.red_brightness, d.red_brightness),
            blue_brightness: percent(self.blue_brightness, d.blue_brightness),
            gamma: percent(self.gamma, d.gamma),
            black_level: percent(self.black_level, d.black_level),
            white_level: percent(self.white_level, d.white_level),
            smoothing: percent(self.smoothing, d.smoothing),
        }
    }
}

/// Builder for EffectParams
#[derive(Default)]
pub struct EffectParamsBuilder {
    threshold: Option<f32>,
    depth_scale: Option<f32>,
    feather: Option<f32>,
    red_brightness: Option<f32>,
    blue_brightness: Option<f32>,
    gamma: Option<f32>,
    black_level: Option<f32>,
    white_level: Option<f32>,
    smoothing: Option<f32>,
}

impl EffectParamsBuilder {
    pub fn threshold(mut self, value: f32) -> Self {
        self.threshold = Some(value);
        self
    }

    pub fn depth_scale(mut self, value: f32) -> Self {
        self.depth_scale = Some(value);
        self
    }

    pub fn feather(mut self, value: f32) -> Self {
        self.feather = Some(value);
        self
    }

    pub fn red_brightness(mut self, value: f32) -> Self {
        self.red_brightness = Some(value);
        self
    }

    pub fn blue_brightness(mut self, value: f32) -> Self {
        self.blue_brightness = Some(value);
        self
    }

    pub fn gamma(mut self, value: f32) -> Self {
        self.gamma = Some(value);
        self
    }

    pub fn black_level(mut self, value: f32) -> Self {
        self.black_level = Some(value);
        self
    }

    pub fn white_level(mut self, value: f32) -> Self {
        self.white_level = Some(value);
        self
    }

    pub fn smoothing(mut self, value: f32) -> Self {
        self.smoothing = Some(value);
        self
    }

    pub fn build(self) -> EffectParams {
        let default = EffectParams::default();
        EffectParams {
            threshold: self.threshold.unwrap_or(default.threshold),
            depth_scale: self.depth_scale.unwrap_or(default.depth_scale),
            feather: self.feather.unwrap_or(default.feather),
            red_brightness: self.red_brightness.unwrap_or(default.red_brightness),
            blue_brightness: self.blue_brightness.unwrap_or(default.blue_brightness),
            gamma: self.gamma.unwrap_or(default.gamma),
            black_level: self.black_level.unwrap_or(default.black_level),
            white_level: self.white_level.unwrap_or(default.white_level),
            smoothing: self.smoothing.unwrap_or(default.smoothing),
        }
    }
}
