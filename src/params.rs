//! Source-mechanism parameters and the model feature vector built from them.

use std::ops::RangeInclusive;

/// Number of model input features.
pub const FEATURE_COUNT: usize = 4;

/// Slider domain, default and help text for one source parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamSpec {
    pub label: &'static str,
    pub min: i32,
    pub max: i32,
    pub default: i32,
    pub help: &'static str,
}

impl ParamSpec {
    pub fn range(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

pub const DEPTH: ParamSpec = ParamSpec {
    label: "Depth (km)",
    min: 0,
    max: 700,
    default: 50,
    help: "How deep below the surface the rupture starts (0-700 km).",
};

pub const STRIKE: ParamSpec = ParamSpec {
    label: "Strike (°)",
    min: 0,
    max: 360,
    default: 180,
    help: "Orientation of the fault trace measured clockwise from north (0-360°).",
};

pub const DIP: ParamSpec = ParamSpec {
    label: "Dip (°)",
    min: 0,
    max: 90,
    default: 30,
    help: "Inclination of the fault plane below horizontal (0-90°).",
};

pub const RAKE: ParamSpec = ParamSpec {
    label: "Rake (°)",
    min: -180,
    max: 180,
    default: 90,
    help: "Direction of slip along the fault plane (-180° to 180°).",
};

/// All parameter specs in feature order.
pub const PARAM_SPECS: [ParamSpec; FEATURE_COUNT] = [DEPTH, STRIKE, DIP, RAKE];

/// Fault-mechanism inputs collected by the form.
///
/// Fields are independent; no cross-field plausibility checks are applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceParameters {
    pub depth: i32,
    pub strike: i32,
    pub dip: i32,
    pub rake: i32,
}

impl Default for SourceParameters {
    fn default() -> Self {
        Self {
            depth: DEPTH.default,
            strike: STRIKE.default,
            dip: DIP.default,
            rake: RAKE.default,
        }
    }
}

impl SourceParameters {
    /// Build parameters, clamping each value into its slider domain.
    pub fn clamped(depth: i32, strike: i32, dip: i32, rake: i32) -> Self {
        Self {
            depth: DEPTH.clamp(depth),
            strike: STRIKE.clamp(strike),
            dip: DIP.clamp(dip),
            rake: RAKE.clamp(rake),
        }
    }

    /// Mutable access to each field paired with its spec, in feature order.
    pub fn fields_mut(&mut self) -> [(&'static ParamSpec, &mut i32); FEATURE_COUNT] {
        [
            (&DEPTH, &mut self.depth),
            (&STRIKE, &mut self.strike),
            (&DIP, &mut self.dip),
            (&RAKE, &mut self.rake),
        ]
    }

    /// Model input in `[depth, strike, dip, rake]` order.
    pub fn feature_vector(&self) -> FeatureVector {
        FeatureVector([
            f64::from(self.depth),
            f64::from(self.strike),
            f64::from(self.dip),
            f64::from(self.rake),
        ])
    }
}

/// Numeric model input. Location is deliberately not part of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}
