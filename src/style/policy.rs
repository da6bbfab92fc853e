use std::fmt;
use std::str::FromStr;

use crate::foundation::core::{Canvas, Rgb8};

/// Deployment-wide rendering profile, chosen once at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Profile {
    /// 450x120 gradient background with rounded digit boxes, up to 60 frames.
    #[default]
    Gradient,
    /// 360x96 flat or transparent background without boxes, up to 10 frames.
    Compact,
    /// Gradient look, always one non-looping frame.
    Still,
}

impl Profile {
    /// All profiles, in declaration order.
    pub const ALL: [Profile; 3] = [Profile::Gradient, Profile::Compact, Profile::Still];

    /// Stable lowercase name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Profile::Gradient => "gradient",
            Profile::Compact => "compact",
            Profile::Still => "still",
        }
    }

    /// Expand the profile into its full policy set.
    pub fn policy(self) -> RenderPolicy {
        RenderPolicy::for_profile(self)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profile::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown profile \"{s}\" (expected gradient, compact or still)"))
    }
}

/// How the background is chosen for a profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundPolicy {
    /// Two-stop vertical gradient from `bg1` to `bg2`.
    Gradient {
        /// Default top color.
        start: Rgb8,
        /// Default bottom color.
        end: Rgb8,
    },
    /// Flat `bg` color when valid, otherwise fully transparent.
    FlatOrTransparent,
}

/// Frame-count policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramePolicy {
    /// Inclusive ceiling for the requested duration.
    pub max: u32,
    /// Used when the duration is absent, non-numeric or below one.
    pub default: u32,
    /// When `true` the duration parameter is ignored and exactly one frame is produced.
    pub single: bool,
    /// Whether the animation repeats forever.
    pub looping: bool,
}

/// Fixed layout constants for the four digit cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellLayout {
    /// Cell width in pixels.
    pub width: f64,
    /// Cell height in pixels.
    pub height: f64,
    /// Horizontal gap between cells.
    pub gap: f64,
    /// Corner radius of the box backdrop.
    pub corner_radius: f64,
    /// Value font size in pixels (bold face).
    pub value_size: f32,
    /// Offset of the value's vertical center from the cell center.
    pub value_dy: f64,
    /// Label font size in pixels (regular face).
    pub label_size: f32,
    /// Offset of the label's vertical center from the cell center.
    pub label_dy: f64,
}

impl CellLayout {
    const STANDARD: CellLayout = CellLayout {
        width: 80.0,
        height: 80.0,
        gap: 20.0,
        corner_radius: 10.0,
        value_size: 36.0,
        value_dy: -10.0,
        label_size: 14.0,
        label_dy: 25.0,
    };

    const COMPACT: CellLayout = CellLayout {
        width: 64.0,
        height: 64.0,
        gap: 16.0,
        corner_radius: 8.0,
        value_size: 29.0,
        value_dy: -8.0,
        label_size: 11.0,
        label_dy: 20.0,
    };
}

/// Every fixed default and bound a profile applies while resolving a request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderPolicy {
    /// Profile this policy was built from.
    pub profile: Profile,
    /// Output size.
    pub canvas: Canvas,
    /// Background selection rule.
    pub background: BackgroundPolicy,
    /// Default box fill; `None` when the profile draws no boxes.
    pub box_default: Option<Rgb8>,
    /// Default value text color.
    pub text_default: Rgb8,
    /// Default unit label color.
    pub label_default: Rgb8,
    /// Cell geometry.
    pub cells: CellLayout,
    /// Frame-count bounds and looping.
    pub frames: FramePolicy,
}

const BG_START: Rgb8 = Rgb8::new(0x0b, 0x12, 0x26);
const BG_END: Rgb8 = Rgb8::new(0x1e, 0x30, 0x50);
const BOX: Rgb8 = Rgb8::new(0x13, 0x40, 0x74);
const TEXT: Rgb8 = Rgb8::new(0xff, 0xff, 0xff);
const LABEL: Rgb8 = Rgb8::new(0xa9, 0xc1, 0xe1);

impl RenderPolicy {
    /// Build the policy for `profile`.
    pub fn for_profile(profile: Profile) -> Self {
        let gradient = BackgroundPolicy::Gradient {
            start: BG_START,
            end: BG_END,
        };
        match profile {
            Profile::Gradient => Self {
                profile,
                canvas: Canvas::new(450, 120),
                background: gradient,
                box_default: Some(BOX),
                text_default: TEXT,
                label_default: LABEL,
                cells: CellLayout::STANDARD,
                frames: FramePolicy {
                    max: 60,
                    default: 5,
                    single: false,
                    looping: true,
                },
            },
            Profile::Compact => Self {
                profile,
                canvas: Canvas::new(360, 96),
                background: BackgroundPolicy::FlatOrTransparent,
                box_default: None,
                text_default: TEXT,
                label_default: LABEL,
                cells: CellLayout::COMPACT,
                frames: FramePolicy {
                    max: 10,
                    default: 5,
                    single: false,
                    looping: true,
                },
            },
            Profile::Still => Self {
                profile,
                canvas: Canvas::new(450, 120),
                background: gradient,
                box_default: Some(BOX),
                text_default: TEXT,
                label_default: LABEL,
                cells: CellLayout::STANDARD,
                frames: FramePolicy {
                    max: 1,
                    default: 1,
                    single: true,
                    looping: false,
                },
            },
        }
    }
}

impl Default for RenderPolicy {
    fn default() -> Self {
        Profile::default().policy()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/policy.rs"]
mod tests;
