//! Phase driver: roster, verification, operator confirmation, rotation.

use crate::constants;
use crate::core::error::RotateError;
use crate::core::prompt::SecurePrompt;
use crate::core::roster;
use crate::core::rotate::FleetRotator;
use crate::core::verify::{FleetVerifier, VerificationReport};
use crate::device::DeviceApi;
use crate::util::console::Console;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};
use std::path::PathBuf;

/// What the operator asked for on the command line.
#[derive(Debug, Clone)]
pub struct RotationRequest {
    pub hostfile: PathBuf,
    pub username: String,
}

/// How a run ended without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Rotated { hosts: usize },
    /// Operator answered anything but yes at the confirmation gate.
    Declined,
}

const CONFIRM_PROMPT: &str = "Would you like to proceed and change passwords (y/n)?";

pub fn run_rotation<D: DeviceApi + ?Sized>(
    request: &RotationRequest,
    device: &D,
    console: &mut dyn Console,
) -> Result<RunOutcome, RotateError> {
    let username = request.username.as_str();
    reject_protected_account(username)?;

    let roster = roster::load_roster(&request.hostfile)?;
    console.say(&format!(
        "{} in host file \"{}\"",
        roster.count_phrase(),
        roster.source().display()
    ));

    let current = SecurePrompt::current(username).obtain(console)?;

    console.say("Checking username and password works on all hosts");
    let report =
        FleetVerifier::new(device, username).verify(&roster, &current, |entry| {
            console.say(&entry.hostname)
        })?;
    console.say(&summary_table(&report).to_string());
    let verified = report.host_count();
    console.say(&format!(
        "All {} host{} ok.",
        verified,
        if verified == 1 { "" } else { "s" }
    ));

    let answer = console
        .read_line(CONFIRM_PROMPT)
        .map_err(RotateError::Console)?;
    if !is_affirmative(&answer) {
        tracing::info!("operator declined rotation");
        console.say("OK, maybe later.  Program stopped by user");
        return Ok(RunOutcome::Declined);
    }

    let replacement = SecurePrompt::replacement(username).obtain(console)?;

    let hosts = FleetRotator::new(device, username).rotate(
        &roster,
        &current,
        &replacement,
        |entry| console.say(&entry.hostname),
    )?;
    console.say(&format!(
        "Password for user {} changed on {} host{}",
        username,
        hosts,
        if hosts == 1 { "" } else { "s" }
    ));
    Ok(RunOutcome::Rotated { hosts })
}

/// The administrative account is never touched, whatever its case.
pub fn reject_protected_account(username: &str) -> Result<(), RotateError> {
    if username.to_lowercase() == constants::ADMIN_USERNAME.to_lowercase() {
        return Err(RotateError::AdminAccountRejected {
            username: username.to_string(),
        });
    }
    Ok(())
}

/// `y` or `yes`, any case.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer == "y" || answer == "yes"
}

fn summary_table(report: &VerificationReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Host").add_attribute(Attribute::Bold),
        Cell::new("Line").add_attribute(Attribute::Bold),
        Cell::new("Serial number").add_attribute(Attribute::Bold),
    ]);
    for host in &report.hosts {
        table.add_row(vec![
            host.entry.hostname.clone(),
            host.entry.source_line.to_string(),
            host.identity.serial_number.clone(),
        ]);
    }
    table
}
