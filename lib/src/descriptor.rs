// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::ConfigError;

/// Width and height of an output picture, in pixels.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = || ConfigError::Resolution(value.to_owned());

        let (width, height) = value
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(malformed)?;

        let parse = |dimension: &str| {
            dimension
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|&pixels| pixels > 0)
                .ok_or_else(malformed)
        };

        Ok(Self {
            width: parse(width)?,
            height: parse(height)?,
        })
    }
}

/// Refresh rate in Hz.
///
/// Always positive and finite once parsed.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct RefreshRate(f64);

impl RefreshRate {
    /// Returns `None` unless the rate is positive and finite.
    #[must_use]
    pub fn new(hertz: f64) -> Option<Self> {
        (hertz.is_finite() && hertz > 0.0).then_some(Self(hertz))
    }

    #[must_use]
    pub const fn hertz(self) -> f64 {
        self.0
    }
}

impl Display for RefreshRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `60.0` prints as `60`, which is what `xrandr --rate` expects.
        write!(f, "{}", self.0)
    }
}

impl FromStr for RefreshRate {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| ConfigError::RefreshRate(value.to_owned()))
    }
}

/// How a single output should be driven.
///
/// Parsed from `NAME;WIDTHxHEIGHT;RATE`. The mode fields may be left out when
/// the output is only going to be switched off.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayDescriptor {
    pub name: String,
    pub resolution: Option<Resolution>,
    pub refresh_rate: Option<RefreshRate>,
}

impl DisplayDescriptor {
    /// A descriptor that only names an output.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolution: None,
            refresh_rate: None,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.resolution.is_some() && self.refresh_rate.is_some()
    }

    /// Returns the resolution and refresh rate, or the first missing field.
    pub fn mode(&self) -> Result<(Resolution, RefreshRate), ConfigError> {
        let incomplete = |field| ConfigError::Incomplete {
            output: self.name.clone(),
            field,
        };

        let resolution = self.resolution.ok_or_else(|| incomplete("resolution"))?;
        let refresh_rate = self.refresh_rate.ok_or_else(|| incomplete("refresh rate"))?;

        Ok((resolution, refresh_rate))
    }
}

impl Display for DisplayDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;

        if let Some(resolution) = self.resolution {
            write!(f, ";{resolution}")?;
        }

        if let Some(rate) = self.refresh_rate {
            write!(f, ";{rate}")?;
        }

        Ok(())
    }
}

impl FromStr for DisplayDescriptor {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().is_empty() {
            return Err(ConfigError::EmptyDescriptor);
        }

        let fields = value.split(';').map(str::trim).collect::<Vec<_>>();

        let (name, resolution, refresh_rate) = match fields.as_slice() {
            [name] => (*name, None, None),
            [name, resolution] => (*name, Some(resolution.parse::<Resolution>()?), None),
            [name, resolution, rate] => (
                *name,
                Some(resolution.parse::<Resolution>()?),
                Some(rate.parse::<RefreshRate>()?),
            ),
            _ => return Err(ConfigError::TooManyFields(value.to_owned())),
        };

        if name.is_empty() {
            return Err(ConfigError::MissingName(value.to_owned()));
        }

        Ok(Self {
            name: name.to_owned(),
            resolution,
            refresh_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_descriptor() {
        let descriptor: DisplayDescriptor = "HDMI1;1920x1080;60".parse().unwrap();

        assert_eq!(descriptor.name, "HDMI1");
        assert_eq!(descriptor.resolution, Some(Resolution::new(1920, 1080)));
        assert_eq!(descriptor.refresh_rate.map(RefreshRate::hertz), Some(60.0));
        assert!(descriptor.is_complete());
    }

    #[test]
    fn parses_name_only_descriptor() {
        let descriptor: DisplayDescriptor = "HDMI1".parse().unwrap();

        assert_eq!(descriptor, DisplayDescriptor::named("HDMI1"));
        assert!(!descriptor.is_complete());
    }

    #[test]
    fn parses_descriptor_without_rate() {
        let descriptor: DisplayDescriptor = "DP-1;2560x1440".parse().unwrap();

        assert_eq!(descriptor.resolution, Some(Resolution::new(2560, 1440)));
        assert_eq!(descriptor.refresh_rate, None);
        assert_eq!(
            descriptor.mode(),
            Err(ConfigError::Incomplete {
                output: "DP-1".into(),
                field: "refresh rate"
            })
        );
    }

    #[test]
    fn tolerates_whitespace_and_uppercase_separator() {
        let descriptor: DisplayDescriptor = " eDP-1 ; 1366 X 768 ; 59.94 ".parse().unwrap();

        assert_eq!(descriptor.name, "eDP-1");
        assert_eq!(descriptor.resolution, Some(Resolution::new(1366, 768)));
        assert_eq!(descriptor.to_string(), "eDP-1;1366x768;59.94");
    }

    #[test]
    fn rejects_malformed_descriptors() {
        assert_eq!("".parse::<DisplayDescriptor>(), Err(ConfigError::EmptyDescriptor));
        assert_eq!(
            ";1920x1080;60".parse::<DisplayDescriptor>(),
            Err(ConfigError::MissingName(";1920x1080;60".into()))
        );
        assert_eq!(
            "HDMI1;1920x1080;60;1".parse::<DisplayDescriptor>(),
            Err(ConfigError::TooManyFields("HDMI1;1920x1080;60;1".into()))
        );
        assert_eq!(
            "HDMI1;1920;60".parse::<DisplayDescriptor>(),
            Err(ConfigError::Resolution("1920".into()))
        );
        assert_eq!(
            "HDMI1;1920x1080;fast".parse::<DisplayDescriptor>(),
            Err(ConfigError::RefreshRate("fast".into()))
        );
    }

    #[test]
    fn rejects_non_positive_values() {
        assert!("0x1080".parse::<Resolution>().is_err());
        assert!("1920x-1".parse::<Resolution>().is_err());
        assert!("0".parse::<RefreshRate>().is_err());
        assert!("-60".parse::<RefreshRate>().is_err());
        assert!("inf".parse::<RefreshRate>().is_err());
        assert!("NaN".parse::<RefreshRate>().is_err());
    }

    #[test]
    fn refresh_rate_displays_without_trailing_zero() {
        assert_eq!("60".parse::<RefreshRate>().unwrap().to_string(), "60");
        assert_eq!("75.0".parse::<RefreshRate>().unwrap().to_string(), "75");
        assert_eq!("59.94".parse::<RefreshRate>().unwrap().to_string(), "59.94");
    }
}
