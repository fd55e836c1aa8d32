//! Keyframed easing curves.
//!
//! An [`EasingCurve`] maps normalized input time to an output value through an
//! ordered list of keys. Segment timing between two keys is a cubic-bezier
//! determined by the left key's `out` handle and the right key's `in` handle;
//! segments without handles are linear. Input outside the key range holds the
//! end values.

use serde::{Deserialize, Serialize};

use crate::interp::{cubic_bezier, lerp_f32};

/// 2D control point for segment timing (normalized 0..1 domain).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ControlPoint {
    pub x: f32,
    pub y: f32,
}

/// Per-key timing handles: `in` shapes the arrival at this key, `out` the
/// departure from it.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Timing {
    #[serde(default)]
    #[serde(rename = "in")]
    pub r#in: Option<ControlPoint>,
    #[serde(default)]
    #[serde(rename = "out")]
    pub r#out: Option<ControlPoint>,
}

/// A single curve key at normalized input `stamp`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct CurveKey {
    pub stamp: f32,
    pub value: f32,
    #[serde(default)]
    pub timing: Option<Timing>,
}

impl CurveKey {
    #[inline]
    pub fn new(stamp: f32, value: f32) -> Self {
        Self {
            stamp,
            value,
            timing: None,
        }
    }
}

// Handles used when a key declares no timing: the (0,0)/(1,1) pair is the
// exactly-linear fast path of the bezier ease.
const LINEAR_OUT: (f32, f32) = (0.0, 0.0);
const LINEAR_IN: (f32, f32) = (1.0, 1.0);

const EASE_OUT_X: f32 = 0.42;
const EASE_OUT_Y: f32 = 0.0;
const EASE_IN_X: f32 = 0.58;
const EASE_IN_Y: f32 = 1.0;

/// Reparameterization curve: ordered keys, sampled as value-over-input.
///
/// `Clone` deep-copies the key list, so a copied curve never aliases the
/// original.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EasingCurve {
    keys: Vec<CurveKey>,
}

impl Default for EasingCurve {
    fn default() -> Self {
        Self::linear()
    }
}

impl EasingCurve {
    /// The identity curve 0 -> 1.
    pub fn linear() -> Self {
        Self {
            keys: vec![CurveKey::new(0.0, 0.0), CurveKey::new(1.0, 1.0)],
        }
    }

    /// Symmetric slow-in/slow-out curve 0 -> 1 (CSS `ease-in-out` handles).
    pub fn ease_in_out() -> Self {
        Self {
            keys: vec![
                CurveKey {
                    stamp: 0.0,
                    value: 0.0,
                    timing: Some(Timing {
                        r#in: None,
                        r#out: Some(ControlPoint {
                            x: EASE_OUT_X,
                            y: EASE_OUT_Y,
                        }),
                    }),
                },
                CurveKey {
                    stamp: 1.0,
                    value: 1.0,
                    timing: Some(Timing {
                        r#in: Some(ControlPoint {
                            x: EASE_IN_X,
                            y: EASE_IN_Y,
                        }),
                        r#out: None,
                    }),
                },
            ],
        }
    }

    /// Build a curve from arbitrary keys. Keys are sorted by stamp; an empty
    /// list falls back to the linear curve.
    pub fn from_keys(mut keys: Vec<CurveKey>) -> Self {
        if keys.is_empty() {
            return Self::linear();
        }
        keys.sort_by(|a, b| {
            a.stamp
                .partial_cmp(&b.stamp)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self { keys }
    }

    #[inline]
    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// Sample the curve at input `t`. Input outside the key range holds the
    /// first/last key value.
    pub fn evaluate(&self, t: f32) -> f32 {
        let keys = &self.keys;
        let n = keys.len();
        if n == 0 {
            // Only reachable through a hand-built serialized form; behave
            // like the linear fallback of `from_keys`.
            return t;
        }
        if n == 1 || t <= keys[0].stamp {
            return keys[0].value;
        }
        if t >= keys[n - 1].stamp {
            return keys[n - 1].value;
        }
        for i in 0..(n - 1) {
            let t0 = keys[i].stamp;
            let t1 = keys[i + 1].stamp;
            if t >= t0 && t <= t1 {
                let denom = (t1 - t0).max(f32::EPSILON);
                let lt = ((t - t0) / denom).clamp(0.0, 1.0);

                let (x1, y1) = keys[i]
                    .timing
                    .as_ref()
                    .and_then(|h| h.r#out.as_ref())
                    .map(|c| (c.x, c.y))
                    .unwrap_or(LINEAR_OUT);
                let (x2, y2) = keys[i + 1]
                    .timing
                    .as_ref()
                    .and_then(|h| h.r#in.as_ref())
                    .map(|c| (c.x, c.y))
                    .unwrap_or(LINEAR_IN);

                let eased = bezier_ease_t(lt, x1, y1, x2, y2);
                return lerp_f32(keys[i].value, keys[i + 1].value, eased);
            }
        }
        keys[n - 1].value
    }
}

/// Given timing handles (x1, y1, x2, y2) and an input t in [0,1], compute the
/// eased fraction by inverting the x bezier via binary search.
#[inline]
fn bezier_ease_t(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    // Fast path: Bezier(0,0,1,1) is exactly linear -> eased t == t
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    // Monotonic X in [0,1] assumed for x1/x2 in [0,1]
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}
