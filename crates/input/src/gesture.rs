//! Landmark classifier: one snapshot in, one discrete gesture out.
//!
//! Each finger is judged "extended" when its tip sits clearly farther from
//! the wrist than its knuckle. The resulting five-bit mask is mapped to a
//! gesture in a fixed priority order:
//! open palm > thumb up > three fingers > two fingers > one finger > none.

use serde::{Deserialize, Serialize};

use crate::landmark::{
    INDEX_PIP, INDEX_TIP, LandmarkSnapshot, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP,
    RING_TIP, THUMB_MCP, THUMB_TIP, WRIST,
};

/// Discrete hand pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gesture {
    /// No hand, or no recognized pose.
    #[default]
    None,
    /// All or nearly all fingers extended.
    OpenPalm,
    /// Index finger extended.
    OneFinger,
    /// Index and middle extended.
    TwoFingers,
    /// Index, middle and ring extended.
    ThreeFingers,
    /// Thumb extended upward, other four folded.
    ThumbUp,
}

impl Gesture {
    pub const ALL: [Gesture; 6] = [
        Self::None,
        Self::OpenPalm,
        Self::OneFinger,
        Self::TwoFingers,
        Self::ThreeFingers,
        Self::ThumbUp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::OpenPalm => "OPEN_PALM",
            Self::OneFinger => "ONE_FINGER",
            Self::TwoFingers => "TWO_FINGERS",
            Self::ThreeFingers => "THREE_FINGERS",
            Self::ThumbUp => "THUMB_UP",
        }
    }
}

impl std::fmt::Display for Gesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Self::Thumb,
        Self::Index,
        Self::Middle,
        Self::Ring,
        Self::Pinky,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }

    /// (tip, knuckle) joint indices compared against the wrist.
    fn joints(self) -> (usize, usize) {
        match self {
            Self::Thumb => (THUMB_TIP, THUMB_MCP),
            Self::Index => (INDEX_TIP, INDEX_PIP),
            Self::Middle => (MIDDLE_TIP, MIDDLE_PIP),
            Self::Ring => (RING_TIP, RING_PIP),
            Self::Pinky => (PINKY_TIP, PINKY_PIP),
        }
    }
}

/// Five-bit extended-finger mask, bit 0 = thumb .. bit 4 = pinky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FingerMask(u8);

impl FingerMask {
    pub const EMPTY: FingerMask = FingerMask(0);
    pub const ALL: FingerMask = FingerMask(0b1_1111);

    pub fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub fn of(fingers: &[Finger]) -> Self {
        Self(fingers.iter().fold(0, |acc, f| acc | f.bit()))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, finger: Finger) -> bool {
        self.0 & finger.bit() != 0
    }

    pub fn with(self, finger: Finger) -> Self {
        Self(self.0 | finger.bit())
    }

    pub fn without(self, finger: Finger) -> Self {
        Self(self.0 & !finger.bit())
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }
}

impl std::fmt::Display for FingerMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (finger, c) in Finger::ALL.iter().zip(['T', 'I', 'M', 'R', 'P']) {
            let ch = if self.contains(*finger) { c } else { '-' };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

/// Thresholds for the extended-finger test and the gesture mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Minimum tip/knuckle wrist-distance ratio for index..pinky.
    pub finger_extension_ratio: f32,
    /// Minimum tip/knuckle wrist-distance ratio for the thumb. A folded thumb
    /// still reaches across the palm, so it needs a wider margin.
    pub thumb_extension_ratio: f32,
    /// How far (image units) the thumb tip must sit above its knuckle to
    /// count as pointing up.
    pub thumb_up_margin: f32,
    /// Extended-finger count at or above which the pose is an open palm.
    pub open_palm_min_fingers: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            finger_extension_ratio: 1.2,
            thumb_extension_ratio: 1.7,
            thumb_up_margin: 0.02,
            open_palm_min_fingers: 4,
        }
    }
}

/// Stateless snapshot classifier.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    pub config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify one snapshot. Absent or partial snapshots yield [`Gesture::None`].
    pub fn classify(&self, snapshot: Option<&LandmarkSnapshot>) -> Gesture {
        match snapshot {
            Some(snap) if snap.is_complete() => {
                let mask = self.extended_fingers(snap);
                self.gesture_for(mask, self.thumb_points_up(snap))
            }
            _ => Gesture::None,
        }
    }

    /// Extended-finger mask of a complete snapshot.
    pub fn extended_fingers(&self, snap: &LandmarkSnapshot) -> FingerMask {
        let pts = snap.points();
        let wrist = pts[WRIST];
        Finger::ALL
            .iter()
            .filter(|finger| {
                let (tip, knuckle) = finger.joints();
                let ratio = match finger {
                    Finger::Thumb => self.config.thumb_extension_ratio,
                    _ => self.config.finger_extension_ratio,
                };
                let tip_dist = pts[tip].distance(wrist);
                let knuckle_dist = pts[knuckle].distance(wrist);
                // Multiplying avoids dividing by a zero knuckle distance.
                tip_dist > knuckle_dist * ratio
            })
            .fold(FingerMask::EMPTY, |mask, finger| mask.with(*finger))
    }

    /// Image y grows downward, so "up" means a smaller y than the knuckle.
    fn thumb_points_up(&self, snap: &LandmarkSnapshot) -> bool {
        let pts = snap.points();
        pts[THUMB_TIP].y + self.config.thumb_up_margin < pts[THUMB_MCP].y
    }

    /// Map a mask to a gesture using the fixed priority order.
    pub fn gesture_for(&self, mask: FingerMask, thumb_up: bool) -> Gesture {
        if mask.count() >= self.config.open_palm_min_fingers {
            return Gesture::OpenPalm;
        }
        if mask == FingerMask::of(&[Finger::Thumb]) && thumb_up {
            return Gesture::ThumbUp;
        }
        let fingers = mask.without(Finger::Thumb);
        if fingers == FingerMask::of(&[Finger::Index, Finger::Middle, Finger::Ring]) {
            Gesture::ThreeFingers
        } else if fingers == FingerMask::of(&[Finger::Index, Finger::Middle]) {
            Gesture::TwoFingers
        } else if fingers == FingerMask::of(&[Finger::Index]) {
            Gesture::OneFinger
        } else {
            Gesture::None
        }
    }
}

/// Classify with the default thresholds.
pub fn classify(snapshot: Option<&LandmarkSnapshot>) -> Gesture {
    Classifier::default().classify(snapshot)
}
