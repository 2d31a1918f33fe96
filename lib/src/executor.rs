// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use crate::{ConfigAction, Error};

/// What happened to a single dispatched action.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Applied,
    /// The display subsystem rejected the action.
    Failed {
        status: Option<i32>,
        stderr: String,
    },
    /// Not dispatched because of a dry run.
    Skipped,
}

impl Outcome {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

/// Issues configuration actions to the display subsystem.
#[allow(async_fn_in_trait)]
pub trait Executor {
    /// Applies one action, returning once its effect is in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExecutorUnavailable`] if the executor cannot run at all.
    /// A rejected action is reported as [`Outcome::Failed`] instead.
    async fn dispatch(&mut self, action: &ConfigAction) -> Result<Outcome, Error>;

    /// How `action` is issued, for logs. Dry runs describe without dispatching.
    fn describe(&self, action: &ConfigAction) -> String {
        action.to_string()
    }
}

impl<E: Executor + ?Sized> Executor for &mut E {
    async fn dispatch(&mut self, action: &ConfigAction) -> Result<Outcome, Error> {
        (**self).dispatch(action).await
    }

    fn describe(&self, action: &ConfigAction) -> String {
        (**self).describe(action)
    }
}
