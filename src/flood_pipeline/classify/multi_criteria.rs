//! Muddy flood water heuristic.
//!
//! Sediment-laden water is brown, tan or ochre rather than blue, so a single
//! HSV box misses it. Three rules target different brightness and turbidity
//! regimes; a pixel is water if any one of them holds. The constants are
//! calibrated and must stay as they are to reproduce historical counts.

use serde::{Deserialize, Serialize};

use crate::flood_pipeline::classify::classifier::{PixelClassifier, PixelSample};

/// The individual muddy-water rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MuddyRule {
    /// Brown/tan with restrained blue.
    BrightMuddy,
    /// Darker, sediment-heavy water.
    SedimentHeavy,
    /// Lighter beige/tan water.
    BeigeTan,
}

impl MuddyRule {
    pub const ALL: [MuddyRule; 3] = [Self::BrightMuddy, Self::SedimentHeavy, Self::BeigeTan];

    pub fn matches(self, sample: &PixelSample) -> bool {
        match self {
            Self::BrightMuddy => bright_muddy(sample),
            Self::SedimentHeavy => sediment_heavy(sample),
            Self::BeigeTan => beige_tan(sample),
        }
    }
}

fn bright_muddy(p: &PixelSample) -> bool {
    let hsv = p.hsv;
    hsv.h >= 0.02
        && hsv.h <= 0.20
        && hsv.s >= 0.08
        && hsv.v >= 0.15
        && hsv.v <= 0.95
        && p.rb_diff() >= 15
        && p.gb_diff() >= 10
        && p.rg_diff() <= 50
        && p.b <= 140
        && p.chrominance() >= 15.0
}

fn sediment_heavy(p: &PixelSample) -> bool {
    let hsv = p.hsv;
    hsv.h >= 0.0
        && hsv.h <= 0.25
        && hsv.v >= 0.10
        && hsv.v <= 0.60
        && p.r >= 60
        && p.g >= 50
        && (p.b as f64) <= p.r.max(p.g) as f64 * 0.7
        && p.rb_diff() >= 10
        && p.gb_diff() >= 5
        && hsv.s >= 0.05
}

fn beige_tan(p: &PixelSample) -> bool {
    let hsv = p.hsv;
    hsv.h >= 0.05
        && hsv.h <= 0.15
        && hsv.s >= 0.12
        && hsv.v >= 0.40
        && hsv.v <= 0.90
        && p.r >= 100
        && p.g >= 90
        && p.b <= 110
        && p.rb_diff() >= 20
        && p.gb_diff() >= 15
}

/// Multi-criteria classifier combining the [`MuddyRule`]s with logical OR.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MultiCriteria;

impl MultiCriteria {
    /// First rule (in declaration order) that accepts the sample.
    pub fn matched_rule(&self, sample: &PixelSample) -> Option<MuddyRule> {
        MuddyRule::ALL.into_iter().find(|rule| rule.matches(sample))
    }
}

impl PixelClassifier for MultiCriteria {
    #[inline]
    fn is_water(&self, sample: &PixelSample) -> bool {
        bright_muddy(sample) || sediment_heavy(sample) || beige_tan(sample)
    }
}
