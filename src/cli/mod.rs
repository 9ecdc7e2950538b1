//! CLI parsing, run context and error reporting.

use crate::constants;
use crate::core::config;
use crate::core::error::RotateError;
use crate::device::jsonrpc::JsonRpcDevice;
use crate::util::console::TerminalConsole;
use crate::util::logging;
use crate::util::terminal::TtyState;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

pub mod rotate;

/// Program identity used when reporting terminal errors.
pub struct CliContext {
    /// Program name prefixed to every diagnostic.
    pub progname: String,
}

impl CliContext {
    pub fn new(progname: impl Into<String>) -> Self {
        Self {
            progname: progname.into(),
        }
    }

    /// Context named after the invoked binary.
    pub fn from_env() -> Self {
        let progname = std::env::args_os()
            .next()
            .as_deref()
            .and_then(|arg0| Path::new(arg0).file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
        Self::new(progname)
    }

    /// Render a terminal error as diagnostic lines for stderr.
    pub fn render(&self, err: &anyhow::Error) -> Vec<String> {
        let indent = " ".repeat(self.progname.len());
        let Some(rotate_err) = err.downcast_ref::<RotateError>() else {
            return vec![format!("{}: {:#}", self.progname, err)];
        };

        let mut lines = vec![format!("{}: {}", self.progname, rotate_err)];
        if let Some(detail) = rotate_err.detail() {
            lines.push(format!("{}  {}", indent, detail));
        }
        if let Some((changed, remaining)) = rotate_err.partial_progress() {
            lines.push(format!(
                "{}  {} host(s) already changed and not rolled back, {} host(s) left unchanged",
                indent, changed, remaining
            ));
        }
        lines
    }

    pub fn report(&self, err: &anyhow::Error) {
        for line in self.render(err) {
            eprintln!("{}", line);
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "pdu-passwd",
    version,
    about = "Verify and change a user's password on a fleet of PDUs"
)]
pub struct Cli {
    /// File listing the PDU hostnames to operate on
    #[arg(long, value_name = "PATH", env = "PDU_PASSWD_HOSTFILE", default_value = constants::DEFAULT_HOSTFILE)]
    pub hostfile: PathBuf,

    /// TOML file with device access settings
    #[arg(long, value_name = "PATH", env = constants::CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Username to login as and whose password is changed
    pub username: String,
}

impl Cli {
    pub fn run(self) -> ExitCode {
        logging::init(self.verbose);
        let ctx = CliContext::from_env();
        install_interrupt_handler(TtyState::capture());

        match self.execute() {
            Ok(outcome) => {
                tracing::debug!(?outcome, "run finished");
                ExitCode::SUCCESS
            }
            Err(err) => {
                ctx.report(&err);
                ExitCode::FAILURE
            }
        }
    }

    fn execute(self) -> Result<rotate::RunOutcome> {
        rotate::reject_protected_account(&self.username)?;
        let tool_config = config::load_optional(self.config.as_deref())?;
        let device = JsonRpcDevice::new(&tool_config.device).context("create device client")?;
        let request = rotate::RotationRequest {
            hostfile: self.hostfile,
            username: self.username,
        };
        let outcome = rotate::run_rotation(&request, &device, &mut TerminalConsole)?;
        Ok(outcome)
    }
}

/// Ctrl-C puts the terminal back as it was at startup, then exits with 1.
fn install_interrupt_handler(tty: TtyState) {
    let result = ctrlc::set_handler(move || {
        tty.restore();
        eprintln!();
        eprintln!("{}", constants::INTERRUPT_BANNER);
        std::process::exit(1);
    });
    if let Err(e) = result {
        tracing::warn!("cannot install interrupt handler: {}", e);
    }
}
