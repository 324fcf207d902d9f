//! Facial profile storage format and descriptor similarity, matching what
//! the backend computes at login.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Descriptor dimensionality produced by the capture pipeline.
pub const DESCRIPTOR_LEN: usize = 128;

/// Upper bound on the Euclidean distance between two normalized descriptors.
pub const MAX_DESCRIPTOR_DISTANCE: f64 = std::f64::consts::SQRT_2;

/// Similarity above this value counts as the same face at login.
pub const SIMILARITY_THRESHOLD: f64 = 0.7;

const DEFAULT_DESCRIPTOR_VALUE: f64 = 0.5;
const PROFILE_VERSION: &str = "1.0";

/// JSON payload stored in `users.facial_data`. Every field except the
/// descriptor is optional; rows written by different backend versions carry
/// different subsets.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FacialProfile {
    pub descriptor: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expressions: Option<BTreeMap<String, f64>>,
    #[serde(rename = "capturedAt", skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Similarity in [0, 1] between two descriptors: 1 minus the normalized
/// Euclidean distance, clamped. Descriptors of the wrong length never match.
pub fn descriptor_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != DESCRIPTOR_LEN || b.len() != DESCRIPTOR_LEN {
        return 0.0;
    }
    let sum_sq: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
    let distance = sum_sq.sqrt();
    (1.0 - distance / MAX_DESCRIPTOR_DISTANCE).clamp(0.0, 1.0)
}

/// True when the backend would accept `a` as the same face as `b`.
pub fn descriptors_match(a: &[f64], b: &[f64]) -> bool {
    descriptor_similarity(a, b) > SIMILARITY_THRESHOLD
}

/// Profile the seeding flow stores until a real capture replaces it:
/// a flat mid-range descriptor plus nominal attributes.
pub fn default_profile() -> FacialProfile {
    FacialProfile {
        descriptor: vec![DEFAULT_DESCRIPTOR_VALUE; DESCRIPTOR_LEN],
        age: Some(20),
        gender: Some("male".to_string()),
        expressions: Some(BTreeMap::from([("neutral".to_string(), 0.9)])),
        ..Default::default()
    }
}

/// Fresh random profile: descriptor values uniform in [0, 1), stamped with
/// the current time and format version.
pub fn random_profile<R: Rng + ?Sized>(rng: &mut R) -> FacialProfile {
    let descriptor = (0..DESCRIPTOR_LEN).map(|_| rng.random::<f64>()).collect();
    FacialProfile {
        descriptor,
        timestamp: Some(chrono::Utc::now().to_rfc3339()),
        version: Some(PROFILE_VERSION.to_string()),
        ..Default::default()
    }
}
