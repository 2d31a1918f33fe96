// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::{ConfigError, DisplayDescriptor};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LayoutMode {
    /// Internal display only; the external output is switched off.
    #[default]
    Single,
    /// Internal and external displays side by side.
    Dual,
}

impl Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LayoutMode::Single => "single",
            LayoutMode::Dual => "dual",
        })
    }
}

impl FromStr for LayoutMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.trim().to_ascii_lowercase().as_str() {
            "single" => LayoutMode::Single,
            "dual" => LayoutMode::Dual,
            _ => return Err(ConfigError::Mode(value.to_owned())),
        })
    }
}

/// Left-to-right order of the two displays.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Order {
    #[default]
    InternalLeftOfExternal,
    ExternalLeftOfInternal,
}

impl Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Order::InternalLeftOfExternal => "IE",
            Order::ExternalLeftOfInternal => "EI",
        })
    }
}

impl FromStr for Order {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.trim().to_ascii_uppercase().as_str() {
            "IE" => Order::InternalLeftOfExternal,
            "EI" => Order::ExternalLeftOfInternal,
            _ => return Err(ConfigError::Order(value.to_owned())),
        })
    }
}

/// The requested display topology. Read-only once built.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub mode: LayoutMode,
    pub internal: DisplayDescriptor,
    pub external: Option<DisplayDescriptor>,
    /// Name of the primary output. Falls back to the internal output.
    pub primary: Option<String>,
    pub order: Order,
}

impl LayoutConfig {
    #[must_use]
    pub fn single(internal: DisplayDescriptor, external: DisplayDescriptor) -> Self {
        Self {
            mode: LayoutMode::Single,
            internal,
            external: Some(external),
            primary: None,
            order: Order::default(),
        }
    }

    #[must_use]
    pub fn dual(internal: DisplayDescriptor, external: DisplayDescriptor) -> Self {
        Self {
            mode: LayoutMode::Dual,
            ..Self::single(internal, external)
        }
    }

    #[must_use]
    pub fn with_primary(mut self, primary: impl Into<String>) -> Self {
        self.primary = Some(primary.into());
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// The output that should become primary in a dual layout.
    #[must_use]
    pub fn primary_name(&self) -> &str {
        self.primary.as_deref().unwrap_or(&self.internal.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_and_order_are_case_insensitive() {
        assert_eq!("Dual".parse::<LayoutMode>(), Ok(LayoutMode::Dual));
        assert_eq!("SINGLE".parse::<LayoutMode>(), Ok(LayoutMode::Single));
        assert_eq!("ei".parse::<Order>(), Ok(Order::ExternalLeftOfInternal));
        assert_eq!("Ie".parse::<Order>(), Ok(Order::InternalLeftOfExternal));
    }

    #[test]
    fn unknown_mode_and_order_are_rejected() {
        assert_eq!(
            "triple".parse::<LayoutMode>(),
            Err(ConfigError::Mode("triple".into()))
        );
        assert_eq!("LR".parse::<Order>(), Err(ConfigError::Order("LR".into())));
    }

    #[test]
    fn defaults_follow_internal_display() {
        let config = LayoutConfig::single(
            DisplayDescriptor::named("LVDS1"),
            DisplayDescriptor::named("HDMI1"),
        );

        assert_eq!(config.mode, LayoutMode::Single);
        assert_eq!(config.order, Order::InternalLeftOfExternal);
        assert_eq!(config.primary_name(), "LVDS1");
        assert_eq!(config.with_primary("HDMI1").primary_name(), "HDMI1");
    }
}
