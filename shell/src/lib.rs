// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use std::process::Stdio;

use duolayout::{ConfigAction, Error, Executor, Outcome};
use tokio::process::Command;

/// Issues configuration actions by invoking `xrandr` once per action.
#[derive(Clone, Debug)]
pub struct XrandrExecutor {
    program: String,
    screen: u32,
}

impl Default for XrandrExecutor {
    fn default() -> Self {
        Self {
            program: String::from("xrandr"),
            screen: 0,
        }
    }
}

impl XrandrExecutor {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Screen whose framebuffer is resized by [`ConfigAction::SetFramebuffer`].
    #[must_use]
    pub fn screen(mut self, screen: u32) -> Self {
        self.screen = screen;
        self
    }

    /// Arguments of the single `xrandr` invocation that applies `action`.
    #[must_use]
    pub fn arguments(&self, action: &ConfigAction) -> Vec<String> {
        let output = |name: &str| vec![String::from("--output"), name.to_owned()];

        match action {
            ConfigAction::Disable { output: name } => {
                let mut args = output(name);
                args.push("--off".into());
                args
            }

            ConfigAction::SetMode {
                output: name,
                resolution,
                refresh_rate,
            } => {
                let mut args = output(name);
                args.extend([
                    "--mode".into(),
                    resolution.to_string(),
                    "--rate".into(),
                    refresh_rate.to_string(),
                ]);
                args
            }

            ConfigAction::SetPrimary { output: name } => {
                let mut args = output(name);
                args.push("--primary".into());
                args
            }

            ConfigAction::SetRelativePosition {
                output: name,
                anchor,
                direction,
            } => {
                let mut args = output(name);
                args.extend([format!("--{direction}"), anchor.clone()]);
                args
            }

            ConfigAction::SetAbsolutePosition { output: name, x, y } => {
                let mut args = output(name);
                args.extend(["--pos".into(), format!("{x}x{y}")]);
                args
            }

            ConfigAction::SetFramebuffer { resolution } => vec![
                "--screen".into(),
                self.screen.to_string(),
                "--fb".into(),
                resolution.to_string(),
            ],
        }
    }

    /// The full command line for `action`, as it would be typed in a shell.
    #[must_use]
    pub fn command_line(&self, action: &ConfigAction) -> String {
        let mut line = self.program.clone();

        for arg in self.arguments(action) {
            line.push(' ');
            line.push_str(&arg);
        }

        line
    }
}

impl Executor for XrandrExecutor {
    async fn dispatch(&mut self, action: &ConfigAction) -> Result<Outcome, Error> {
        let output = Command::new(&self.program)
            .args(self.arguments(action))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| Error::ExecutorUnavailable {
                program: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            return Ok(Outcome::Applied);
        }

        Ok(Outcome::Failed {
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        })
    }

    fn describe(&self, action: &ConfigAction) -> String {
        self.command_line(action)
    }
}

#[cfg(test)]
mod tests {
    use duolayout::{Direction, RefreshRate, Resolution};

    use super::*;

    fn args(action: &ConfigAction) -> Vec<String> {
        XrandrExecutor::default().arguments(action)
    }

    #[test]
    fn translates_every_action() {
        assert_eq!(
            args(&ConfigAction::Disable {
                output: "HDMI1".into()
            }),
            ["--output", "HDMI1", "--off"]
        );

        assert_eq!(
            args(&ConfigAction::SetMode {
                output: "LVDS1".into(),
                resolution: Resolution::new(1366, 768),
                refresh_rate: RefreshRate::new(60.0).unwrap(),
            }),
            ["--output", "LVDS1", "--mode", "1366x768", "--rate", "60"]
        );

        assert_eq!(
            args(&ConfigAction::SetPrimary {
                output: "LVDS1".into()
            }),
            ["--output", "LVDS1", "--primary"]
        );

        assert_eq!(
            args(&ConfigAction::SetRelativePosition {
                output: "HDMI1".into(),
                anchor: "LVDS1".into(),
                direction: Direction::RightOf,
            }),
            ["--output", "HDMI1", "--right-of", "LVDS1"]
        );

        assert_eq!(
            args(&ConfigAction::SetAbsolutePosition {
                output: "LVDS1".into(),
                x: 1920,
                y: 312
            }),
            ["--output", "LVDS1", "--pos", "1920x312"]
        );

        assert_eq!(
            args(&ConfigAction::SetFramebuffer {
                resolution: Resolution::new(1366, 768)
            }),
            ["--screen", "0", "--fb", "1366x768"]
        );
    }

    #[test]
    fn relative_directions_map_to_flags() {
        for (direction, flag) in [
            (Direction::LeftOf, "--left-of"),
            (Direction::RightOf, "--right-of"),
            (Direction::Above, "--above"),
            (Direction::Below, "--below"),
        ] {
            let action = ConfigAction::SetRelativePosition {
                output: "DP-1".into(),
                anchor: "eDP-1".into(),
                direction,
            };

            assert_eq!(args(&action)[2], flag);
        }
    }

    #[test]
    fn framebuffer_uses_configured_screen() {
        let executor = XrandrExecutor::new("/usr/bin/xrandr").screen(1);
        let action = ConfigAction::SetFramebuffer {
            resolution: Resolution::new(1920, 1080),
        };

        assert_eq!(
            executor.command_line(&action),
            "/usr/bin/xrandr --screen 1 --fb 1920x1080"
        );
    }

    #[test]
    fn describes_actions_as_command_lines() {
        let executor = XrandrExecutor::new("xrandr");
        let action = ConfigAction::SetPrimary { output: "HDMI1".into() };

        assert_eq!(Executor::describe(&executor, &action), "xrandr --output HDMI1 --primary");
    }

    #[tokio::test]
    async fn missing_program_is_unavailable() {
        let mut executor = XrandrExecutor::new("duolayout-test-no-such-program");
        let action = ConfigAction::SetPrimary {
            output: "LVDS1".into(),
        };

        let result = executor.dispatch(&action).await;

        assert!(matches!(
            result,
            Err(Error::ExecutorUnavailable { program, .. }) if program == "duolayout-test-no-such-program"
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exit_status_decides_outcome() {
        let action = ConfigAction::Disable {
            output: "HDMI1".into(),
        };

        let outcome = XrandrExecutor::new("true").dispatch(&action).await.unwrap();
        assert_eq!(outcome, Outcome::Applied);

        let outcome = XrandrExecutor::new("false").dispatch(&action).await.unwrap();
        assert_eq!(
            outcome,
            Outcome::Failed {
                status: Some(1),
                stderr: String::new()
            }
        );
    }
}
