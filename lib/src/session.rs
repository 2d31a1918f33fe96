// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use crate::{ConfigAction, Error, Executor, LayoutConfig, Outcome};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum State {
    #[default]
    Idle,
    Planning,
    Executing,
    Done,
    Failed,
}

/// Actions of a completed run and what became of each, in dispatch order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    pub entries: Vec<(ConfigAction, Outcome)>,
}

impl Report {
    pub fn actions(&self) -> impl Iterator<Item = &ConfigAction> {
        self.entries.iter().map(|(action, _)| action)
    }

    pub fn failures(&self) -> impl Iterator<Item = (&ConfigAction, &Outcome)> {
        self.entries
            .iter()
            .filter(|(_, outcome)| outcome.is_failure())
            .map(|(action, outcome)| (action, outcome))
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Plans a layout and feeds its actions to an executor one at a time.
#[derive(Debug)]
pub struct Session<E> {
    executor: E,
    dry_run: bool,
    state: State,
}

impl<E: Executor> Session<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            dry_run: false,
            state: State::Idle,
        }
    }

    /// Plan and log every action without dispatching any of them.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Runs the whole layout, stopping early only if the executor is unusable.
    ///
    /// Actions rejected by the display subsystem are logged and recorded in
    /// the report; the remaining actions are still dispatched.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the layout cannot be planned. Nothing is dispatched.
    /// - [`Error::ExecutorUnavailable`] if the executor cannot be invoked.
    pub async fn run(&mut self, config: &LayoutConfig) -> Result<Report, Error> {
        if self.dry_run {
            tracing::info!("----- PERFORMING DRY RUN! -----");
        }

        self.transition(State::Planning);

        let actions = match crate::plan(config) {
            Ok(actions) => actions,
            Err(why) => {
                self.transition(State::Failed);
                return Err(why.into());
            }
        };

        self.transition(State::Executing);

        let mut report = Report::default();

        for action in actions {
            tracing::debug!(%action, "computed action");
            tracing::debug!(command = %self.executor.describe(&action), "calling");

            let outcome = if self.dry_run {
                Outcome::Skipped
            } else {
                match self.executor.dispatch(&action).await {
                    Ok(outcome) => outcome,
                    Err(why) => {
                        self.transition(State::Failed);
                        return Err(why);
                    }
                }
            };

            if let Outcome::Failed { status, stderr } = &outcome {
                tracing::warn!(%action, ?status, stderr = %stderr, "action failed");
            }

            report.entries.push((action, outcome));
        }

        self.transition(State::Done);

        Ok(report)
    }

    fn transition(&mut self, next: State) {
        tracing::debug!(from = ?self.state, to = ?next, "session state");
        self.state = next;
    }
}
