//! Prediction shaping
//!
//! Turns the model's two-class probability vector into the confidence
//! percentages and label the dashboard renders.

use serde::Serialize;

/// Two-class probability output, `[p_benign, p_attack]` summing to 1
#[derive(Debug, Clone, Copy)]
pub struct ClassProbs {
    pub benign: f32,
    pub attack: f32,
}

/// Ground-truth class attached to test-set rows (0 = Benign, 1 = Attack)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Benign,
    Attack,
}

impl Label {
    pub fn from_value(value: f32) -> Self {
        if value == 1.0 {
            Label::Attack
        } else {
            Label::Benign
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Benign => "Benign",
            Label::Attack => "Attack",
        }
    }
}

/// Prediction payload for the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub class: &'static str,
    pub attack_confidence: f64,
    pub benign_confidence: f64,
}

impl Prediction {
    /// Scale probabilities to percentages and apply the 50% decision
    /// threshold. The comparison is strict: exactly 50% is "Benign".
    pub fn from_probs(probs: ClassProbs) -> Self {
        let attack = f64::from(probs.attack) * 100.0;
        let benign = f64::from(probs.benign) * 100.0;

        Self {
            class: if attack > 50.0 { "Attack" } else { "Benign" },
            attack_confidence: round2(attack),
            benign_confidence: round2(benign),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
