// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use std::fmt::{self, Display};

use crate::{RefreshRate, Resolution};

/// Placement of an output relative to an anchor output.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    LeftOf,
    RightOf,
    Above,
    Below,
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::LeftOf => "left-of",
            Direction::RightOf => "right-of",
            Direction::Above => "above",
            Direction::Below => "below",
        })
    }
}

/// A single configuration step, issued to the display subsystem on its own.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigAction {
    Disable {
        output: String,
    },
    SetMode {
        output: String,
        resolution: Resolution,
        refresh_rate: RefreshRate,
    },
    SetPrimary {
        output: String,
    },
    SetRelativePosition {
        output: String,
        anchor: String,
        direction: Direction,
    },
    SetAbsolutePosition {
        output: String,
        x: i32,
        y: i32,
    },
    /// Resizes the framebuffer of the first screen.
    SetFramebuffer {
        resolution: Resolution,
    },
}

impl ConfigAction {
    /// The output this action configures, if it targets one.
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        match self {
            ConfigAction::Disable { output }
            | ConfigAction::SetMode { output, .. }
            | ConfigAction::SetPrimary { output }
            | ConfigAction::SetRelativePosition { output, .. }
            | ConfigAction::SetAbsolutePosition { output, .. } => Some(output),
            ConfigAction::SetFramebuffer { .. } => None,
        }
    }
}

impl Display for ConfigAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigAction::Disable { output } => write!(f, "disable {output}"),
            ConfigAction::SetMode {
                output,
                resolution,
                refresh_rate,
            } => write!(f, "set {output} to {resolution} @ {refresh_rate} Hz"),
            ConfigAction::SetPrimary { output } => write!(f, "make {output} primary"),
            ConfigAction::SetRelativePosition {
                output,
                anchor,
                direction,
            } => write!(f, "place {output} {direction} {anchor}"),
            ConfigAction::SetAbsolutePosition { output, x, y } => {
                write!(f, "move {output} to {x},{y}")
            }
            ConfigAction::SetFramebuffer { resolution } => {
                write!(f, "resize framebuffer to {resolution}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_readable() {
        let action = ConfigAction::SetRelativePosition {
            output: "HDMI1".into(),
            anchor: "LVDS1".into(),
            direction: Direction::RightOf,
        };

        assert_eq!(action.to_string(), "place HDMI1 right-of LVDS1");
        assert_eq!(action.output(), Some("HDMI1"));

        let action = ConfigAction::SetFramebuffer {
            resolution: Resolution::new(1366, 768),
        };

        assert_eq!(action.to_string(), "resize framebuffer to 1366x768");
        assert_eq!(action.output(), None);
    }
}
