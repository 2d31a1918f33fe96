// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

//! Turns a [`LayoutConfig`] into the ordered actions that realize it.
//!
//! Planning is pure. Every precondition is checked before the first action is
//! built, so a failed plan never yields a partial action list.

use crate::{
    ConfigAction, ConfigError, Direction, DisplayDescriptor, LayoutConfig, LayoutMode, Order,
    Resolution,
};

/// Plans the layout for whichever mode the config selects.
///
/// # Errors
///
/// Returns a [`ConfigError`] if a descriptor needed by the mode is incomplete.
pub fn plan(config: &LayoutConfig) -> Result<Vec<ConfigAction>, ConfigError> {
    match config.mode {
        LayoutMode::Single => plan_single(config),
        LayoutMode::Dual => plan_dual(config),
    }
}

/// Switches the external output off and resets the internal one to the origin.
///
/// # Errors
///
/// - The internal descriptor lacks a resolution or refresh rate.
/// - No external output was given.
pub fn plan_single(config: &LayoutConfig) -> Result<Vec<ConfigAction>, ConfigError> {
    let internal = &config.internal;
    let (resolution, refresh_rate) = internal.mode()?;
    let external = config.external.as_ref().ok_or(ConfigError::MissingExternal)?;

    if let Some(primary) = &config.primary {
        tracing::debug!(primary = %primary, "primary output is ignored in single display mode");
    }

    Ok(vec![
        ConfigAction::Disable {
            output: external.name.clone(),
        },
        ConfigAction::SetMode {
            output: internal.name.clone(),
            resolution,
            refresh_rate,
        },
        ConfigAction::SetAbsolutePosition {
            output: internal.name.clone(),
            x: 0,
            y: 0,
        },
        ConfigAction::SetFramebuffer { resolution },
    ])
}

/// Extends the desktop across both outputs.
///
/// The relative placement establishes which side each output sits on, and the
/// absolute position that follows overrides it to bottom-align a shorter
/// internal display with the external one.
///
/// # Errors
///
/// - Either descriptor lacks a resolution or refresh rate.
/// - No external output was given.
/// - The primary output names neither display.
pub fn plan_dual(config: &LayoutConfig) -> Result<Vec<ConfigAction>, ConfigError> {
    let internal = &config.internal;
    let external = config.external.as_ref().ok_or(ConfigError::MissingExternal)?;

    let (external_resolution, external_rate) = external.mode()?;
    let (internal_resolution, internal_rate) = internal.mode()?;

    let primary = config.primary_name();
    if primary != internal.name && primary != external.name {
        return Err(ConfigError::UnknownPrimary(primary.to_owned()));
    }

    let (x, y) = internal_offset(internal_resolution, external_resolution, config.order);

    if y > 0 {
        tracing::debug!(output = %internal.name, "move internal to the bottom by {y}px");
    }

    Ok(vec![
        ConfigAction::SetMode {
            output: external.name.clone(),
            resolution: external_resolution,
            refresh_rate: external_rate,
        },
        ConfigAction::SetMode {
            output: internal.name.clone(),
            resolution: internal_resolution,
            refresh_rate: internal_rate,
        },
        ConfigAction::SetPrimary {
            output: primary.to_owned(),
        },
        relative_placement(internal, external, config.order),
        ConfigAction::SetAbsolutePosition {
            output: internal.name.clone(),
            x,
            y,
        },
    ])
}

/// Absolute position of the internal display in a dual layout.
///
/// The internal display is pushed down by however much taller the external
/// display is, and to the right of the external display when it sits second.
#[must_use]
pub fn internal_offset(internal: Resolution, external: Resolution, order: Order) -> (i32, i32) {
    let vertical = external.height.saturating_sub(internal.height);

    let horizontal = match order {
        Order::InternalLeftOfExternal => 0,
        Order::ExternalLeftOfInternal => external.width,
    };

    (clamp_to_i32(horizontal), clamp_to_i32(vertical))
}

fn relative_placement(
    internal: &DisplayDescriptor,
    external: &DisplayDescriptor,
    order: Order,
) -> ConfigAction {
    let (output, anchor) = match order {
        Order::InternalLeftOfExternal => (external, internal),
        Order::ExternalLeftOfInternal => (internal, external),
    };

    ConfigAction::SetRelativePosition {
        output: output.name.clone(),
        anchor: anchor.name.clone(),
        direction: Direction::RightOf,
    }
}

fn clamp_to_i32(pixels: u32) -> i32 {
    i32::try_from(pixels).unwrap_or(i32::MAX)
}
