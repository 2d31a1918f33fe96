// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

pub mod action;
pub use action::{ConfigAction, Direction};

pub mod descriptor;
pub use descriptor::{DisplayDescriptor, RefreshRate, Resolution};

pub mod executor;
pub use executor::{Executor, Outcome};

pub mod layout;
pub use layout::{LayoutConfig, LayoutMode, Order};

pub mod planner;
pub use planner::plan;

pub mod session;
pub use session::{Report, Session, State};

/// Problems with the requested layout, detected before anything is dispatched.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("output descriptor is empty")]
    EmptyDescriptor,
    #[error("output name missing in descriptor `{0}`")]
    MissingName(String),
    #[error("too many fields in descriptor `{0}`, expected NAME;WIDTHxHEIGHT;RATE")]
    TooManyFields(String),
    #[error("malformed resolution `{0}`, expected WIDTHxHEIGHT")]
    Resolution(String),
    #[error("malformed refresh rate `{0}`")]
    RefreshRate(String),
    #[error("unknown layout mode `{0}`, expected `single` or `dual`")]
    Mode(String),
    #[error("unknown output order `{0}`, expected `IE` or `EI`")]
    Order(String),
    #[error("output `{output}` has no {field}")]
    Incomplete { output: String, field: &'static str },
    #[error("no external output given")]
    MissingExternal,
    #[error("primary output `{0}` is neither the internal nor the external output")]
    UnknownPrimary(String),
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid layout configuration")]
    Config(#[from] ConfigError),
    #[error("could not exec `{program}`")]
    ExecutorUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
