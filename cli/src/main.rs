// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use clap::Parser;
use duolayout::{DisplayDescriptor, Error, LayoutConfig, LayoutMode, Order, Outcome, Report, Session};
use duolayout_xrandr::XrandrExecutor;
use nu_ansi_term::{Color, Style};
use std::fmt::Write as FmtWrite;
use std::io::Write;
use std::process::ExitCode;
use tracing::Level;

/// Extend the desktop to an external display with xrandr
#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Display configuration: single or dual.
    #[arg(short, long, env = "DUOLAYOUT_MODE", default_value = "single")]
    mode: LayoutMode,
    /// Internal display, for example `LVDS1;1366x768;60`.
    #[arg(short, long, env = "DUOLAYOUT_INTERNAL", value_name = "NAME;WxH;RATE")]
    internal_output: DisplayDescriptor,
    /// External display, in the same format. Only the name is needed to switch it off.
    #[arg(short, long, env = "DUOLAYOUT_EXTERNAL", value_name = "NAME[;WxH;RATE]")]
    external_output: Option<DisplayDescriptor>,
    /// Output to make primary in dual mode. Defaults to the internal display.
    #[arg(short, long, env = "DUOLAYOUT_PRIMARY")]
    primary: Option<String>,
    /// Left-to-right order of the displays: IE (internal first) or EI.
    #[arg(short, long, env = "DUOLAYOUT_ORDER", default_value = "IE")]
    order: Order,
    /// Log every planned action and command. Logging is at INFO otherwise.
    #[arg(short, long)]
    verbose: bool,
    /// Make a dry run, without applying changes.
    #[arg(long = "dryrun", visible_alias = "dry-run")]
    dry_run: bool,
    /// Print the xrandr commands and their outcomes once finished.
    #[arg(long)]
    print: bool,
    /// The xrandr program to invoke.
    #[arg(long = "xrandr", env = "DUOLAYOUT_XRANDR", value_name = "PATH", default_value = "xrandr")]
    program: String,
    /// Screen whose framebuffer is resized in single mode.
    #[arg(long, default_value_t = 0)]
    screen: u32,
}

impl Cli {
    fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            mode: self.mode,
            internal: self.internal_output.clone(),
            external: self.external_output.clone(),
            primary: self.primary.clone(),
            order: self.order,
        }
    }

    fn log_options(&self) {
        let describe = |descriptor: Option<&DisplayDescriptor>| {
            descriptor.map_or_else(|| String::from("none"), ToString::to_string)
        };

        let options = [
            ("mode", self.mode.to_string()),
            ("internal_output", self.internal_output.to_string()),
            ("external_output", describe(self.external_output.as_ref())),
            ("primary", self.primary.clone().unwrap_or_else(|| "none".into())),
            ("order", self.order.to_string()),
            ("dryrun", self.dry_run.to_string()),
            ("xrandr", self.program.clone()),
            ("screen", self.screen.to_string()),
        ];

        for (option, value) in options {
            tracing::debug!(option, value = %value, "parsed option");
        }

        if self.external_output.as_ref().is_some_and(DisplayDescriptor::is_complete) {
            tracing::debug!("external output fully specified");
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    if cli.verbose {
        tracing::info!("verbosity set to DEBUG");
    }

    cli.log_options();

    let config = cli.layout_config();

    match config.mode {
        LayoutMode::Single => tracing::info!("single display mode selected"),
        LayoutMode::Dual => tracing::info!("dual display mode selected"),
    }

    let executor = XrandrExecutor::new(&cli.program).screen(cli.screen);
    let mut session = Session::new(executor).dry_run(cli.dry_run);

    let report = match session.run(&config).await {
        Ok(report) => report,

        Err(Error::Config(why)) => {
            tracing::error!("{why}");
            return Ok(ExitCode::FAILURE);
        }

        Err(why @ Error::ExecutorUnavailable { .. }) => {
            let cause = std::error::Error::source(&why).map(ToString::to_string);
            tracing::error!(cause = ?cause, "{why}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.print {
        print_report(session.executor(), &report);
    }

    let failed = report.failures().count();
    if failed > 0 {
        tracing::warn!("{failed} of {} actions failed", report.entries.len());
    }

    tracing::info!("done");

    Ok(ExitCode::SUCCESS)
}

/// Installs the log subscriber at the level chosen by `--verbose`.
fn init_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|why| why as Box<dyn std::error::Error>)?;

    Ok(())
}

fn print_report(executor: &XrandrExecutor, report: &Report) {
    let mut output = String::new();

    for (action, outcome) in &report.entries {
        let label = match outcome {
            Outcome::Applied => Color::Green.bold().paint(format!("{:>8}", "applied")),
            Outcome::Failed { .. } => Color::Red.bold().paint(format!("{:>8}", "failed")),
            Outcome::Skipped => Color::Yellow.bold().paint(format!("{:>8}", "skipped")),
        };

        #[allow(clippy::ignored_unit_patterns)]
        let _res = fomat_macros::witeln!(
            &mut output,
            (label) "  " (Style::new().bold().paint(executor.command_line(action)))
            if let Outcome::Failed { status, stderr } = outcome {
                if let Some(code) = status {
                    (Color::Red.paint(format!(" (exit status {code})")))
                }
                if !stderr.is_empty() {
                    "\n          " (Color::Red.paint(stderr.as_str()))
                }
            }
        );
    }

    let mut stdout = std::io::stdout().lock();
    let _res = stdout.write_all(output.as_bytes());
    let _res = stdout.flush();
}
