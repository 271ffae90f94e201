//! Display-ready projection of the stored prediction.
//!
//! Two selection rules live here and are intentionally not unified:
//! [`mitigation_for`] matches the category exactly and has no fallback, while
//! [`marker_color`] cascades and gives every unrecognized category the yellow
//! marker. An unrecognized label therefore shows a marker but no guidance.

use crate::config::MapSettings;
use crate::prediction::{Category, PredictionResult};

/// Fixed magnitude gauge axis.
pub const GAUGE_AXIS: (f64, f64) = (0.0, 10.0);

/// Static impact and mitigation text for one severity tier.
#[derive(Debug, PartialEq, Eq)]
pub struct MitigationGuide {
    pub tier: &'static str,
    pub magnitude_range: &'static str,
    pub impact: &'static str,
    pub actions: &'static [&'static str],
}

pub const LIGHT_GUIDE: MitigationGuide = MitigationGuide {
    tier: "Light",
    magnitude_range: "Magnitude < 4.0",
    impact: "Usually harmless; only light shaking is felt.",
    actions: &[
        "Stay calm and avoid panic.",
        "Have building structures evaluated if tremors recur often.",
        "Teach the community basic evacuation steps.",
    ],
};

pub const MODERATE_GUIDE: MitigationGuide = MitigationGuide {
    tier: "Moderate",
    magnitude_range: "4.0 ≤ Magnitude < 6.0",
    impact: "Can cause light damage to older buildings.",
    actions: &[
        "Inspect building structures, especially older ones.",
        "Prepare evacuation routes and an emergency bag.",
        "Run regular evacuation drills at schools and offices.",
    ],
};

pub const STRONG_GUIDE: MitigationGuide = MitigationGuide {
    tier: "Strong",
    magnitude_range: "Magnitude ≥ 6.0",
    impact: "Potential for serious damage and casualties.",
    actions: &[
        "Watch for aftershocks.",
        "Reinforce buildings to earthquake-resistant standards.",
        "Prepare shelters and logistics; coordinate with disaster management agencies.",
    ],
};

/// Marker fill tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerColor {
    Yellow,
    Orange,
    Red,
}

impl MarkerColor {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Self::Yellow => [255, 215, 0],
            Self::Orange => [255, 140, 0],
            Self::Red => [220, 20, 60],
        }
    }
}

/// Guidance block for exactly `Light`, `Moderate` or `Strong`; nothing otherwise.
pub fn mitigation_for(category: &Category) -> Option<&'static MitigationGuide> {
    match category {
        Category::Light => Some(&LIGHT_GUIDE),
        Category::Moderate => Some(&MODERATE_GUIDE),
        Category::Strong => Some(&STRONG_GUIDE),
        Category::Unrecognized(_) => None,
    }
}

/// `Strong` is red, else `Moderate` is orange, else yellow.
pub fn marker_color(category: &Category) -> MarkerColor {
    if *category == Category::Strong {
        MarkerColor::Red
    } else if *category == Category::Moderate {
        MarkerColor::Orange
    } else {
        MarkerColor::Yellow
    }
}

pub fn format_magnitude(magnitude: f64) -> String {
    format!("{magnitude:.2}")
}

/// Horizontal bar over [`GAUGE_AXIS`].
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeView {
    pub value: f64,
    /// Bar length as a share of the axis, clamped to `[0, 1]`.
    pub fill_fraction: f32,
}

impl GaugeView {
    pub fn new(value: f64) -> Self {
        let (min, max) = GAUGE_AXIS;
        let fraction = if value.is_finite() {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            value,
            fill_fraction: fraction as f32,
        }
    }
}

/// Single map marker plus the view it sits in.
#[derive(Clone, Debug, PartialEq)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    pub radius: f32,
    pub fill_opacity: f32,
    pub color: MarkerColor,
    pub popup_lines: Vec<String>,
}

/// Everything the results panel draws.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultView {
    pub category_text: String,
    pub magnitude_text: String,
    pub gauge: GaugeView,
    pub mitigation: Option<&'static MitigationGuide>,
    pub marker: MapMarker,
}

pub fn result_view(result: &PredictionResult, map: &MapSettings) -> ResultView {
    let magnitude_text = format_magnitude(result.magnitude);
    ResultView {
        category_text: result.category.label().to_string(),
        gauge: GaugeView::new(result.magnitude),
        mitigation: mitigation_for(&result.category),
        marker: MapMarker {
            latitude: result.latitude,
            longitude: result.longitude,
            zoom: map.zoom,
            radius: map.marker_radius,
            fill_opacity: map.marker_fill_opacity,
            color: marker_color(&result.category),
            popup_lines: vec![
                "Quake".to_string(),
                format!("Category: {}", result.category),
                format!("Magnitude: {magnitude_text}"),
            ],
        },
        magnitude_text,
    }
}
