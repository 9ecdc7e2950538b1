use pdu_passwd::cli::rotate::{run_rotation, RotationRequest, RunOutcome};
use pdu_passwd::core::error::RotateError;
use pdu_passwd::core::roster::parse_roster_content;
use pdu_passwd::core::rotate::FleetRotator;
use pdu_passwd::core::verify::FleetVerifier;
use pdu_passwd::device::{DeviceApi, DeviceFailure, DeviceIdentity, FailureKind};
use pdu_passwd::models::credential::Credential;
use pdu_passwd::models::host::Roster;
use pdu_passwd::util::console::Console;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io::{self, Write};
use std::path::Path;
use zeroize::Zeroizing;

/// A lab of PDUs keyed by hostname; several names may share one unit.
#[derive(Default)]
struct Lab {
    aliases: HashMap<String, usize>,
    units: RefCell<Vec<Unit>>,
    broken: Option<String>,
    contacted: RefCell<Vec<String>>,
}

struct Unit {
    serial: String,
    password: String,
}

impl Lab {
    fn unit(mut self, names: &[&str], serial: &str, password: &str) -> Self {
        let idx = self.units.borrow().len();
        self.units.borrow_mut().push(Unit {
            serial: serial.into(),
            password: password.into(),
        });
        for name in names {
            self.aliases.insert(name.to_string(), idx);
        }
        self
    }

    fn broken_at(mut self, host: &str) -> Self {
        self.broken = Some(host.to_string());
        self
    }

    fn password(&self, host: &str) -> String {
        self.units.borrow()[self.aliases[host]].password.clone()
    }

    fn authenticate(&self, host: &str, secret: &str) -> Result<usize, DeviceFailure> {
        self.contacted.borrow_mut().push(host.to_string());
        let idx = *self
            .aliases
            .get(host)
            .ok_or_else(|| DeviceFailure::new(FailureKind::Transport, "no route to host"))?;
        if self.units.borrow()[idx].password != secret {
            return Err(DeviceFailure::new(
                FailureKind::Http,
                "HTTP 401 Unauthorized: <html><body>\n<h1>Unauthorized</h1></body></html>",
            ));
        }
        Ok(idx)
    }
}

impl DeviceApi for Lab {
    fn get_identity(
        &self,
        host: &str,
        _username: &str,
        secret: &str,
    ) -> Result<DeviceIdentity, DeviceFailure> {
        let idx = self.authenticate(host, secret)?;
        Ok(DeviceIdentity {
            serial_number: self.units.borrow()[idx].serial.clone(),
        })
    }

    fn change_credential(
        &self,
        host: &str,
        _username: &str,
        secret: &str,
        new_secret: &str,
    ) -> Result<i64, DeviceFailure> {
        let idx = self.authenticate(host, secret)?;
        if self.broken.as_deref() == Some(host) {
            return Err(DeviceFailure::new(FailureKind::Transport, "operation timed out"));
        }
        self.units.borrow_mut()[idx].password = new_secret.to_string();
        Ok(0)
    }
}

struct Script {
    inputs: VecDeque<String>,
    output: Vec<String>,
}

impl Script {
    fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            output: Vec::new(),
        }
    }

    fn next(&mut self) -> io::Result<String> {
        self.inputs
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more input"))
    }
}

impl Console for Script {
    fn read_secret(&mut self, _prompt: &str) -> io::Result<Zeroizing<String>> {
        self.next().map(Zeroizing::new)
    }

    fn read_line(&mut self, _prompt: &str) -> io::Result<String> {
        self.next()
    }

    fn say(&mut self, message: &str) {
        self.output.push(message.to_string());
    }
}

fn roster(content: &str) -> Roster {
    parse_roster_content(content, Path::new("hosts.txt")).unwrap()
}

fn five_unit_lab() -> Lab {
    Lab::default()
        .unit(&["pdu1"], "SN1", "P")
        .unit(&["pdu2"], "SN2", "P")
        .unit(&["pdu3"], "SN3", "P")
        .unit(&["pdu4"], "SN4", "P")
        .unit(&["pdu5"], "SN5", "P")
}

#[test]
fn test_failure_at_host_k_keeps_earlier_hosts_rotated() {
    let lab = five_unit_lab().broken_at("pdu3");
    let roster = roster("pdu1 pdu2\npdu3\npdu4 pdu5\n");
    let err = FleetRotator::new(&lab, "ops")
        .rotate(&roster, &Credential::new("P"), &Credential::new("Q"), |_| {})
        .unwrap_err();

    match &err {
        RotateError::ChangeTransport { host, detail, .. } => {
            assert_eq!(host, "pdu3");
            assert_eq!(detail, "operation timed out");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.partial_progress(), Some((2, 3)));
    assert_eq!(lab.password("pdu1"), "Q");
    assert_eq!(lab.password("pdu2"), "Q");
    // The failing unit accepted the login but never applied the change.
    assert_eq!(lab.password("pdu3"), "P");
    assert_eq!(lab.password("pdu4"), "P");
    assert_eq!(lab.password("pdu5"), "P");
    assert!(!lab.contacted.borrow().contains(&"pdu4".to_string()));
}

#[test]
fn test_round_trip_old_password_stops_working() {
    let lab = five_unit_lab();
    let roster = roster("pdu1\npdu2\npdu3\npdu4\npdu5\n");
    let (p, q) = (Credential::new("P"), Credential::new("Q"));

    FleetRotator::new(&lab, "ops").rotate(&roster, &p, &q, |_| {}).unwrap();

    let verifier = FleetVerifier::new(&lab, "ops");
    let report = verifier.verify(&roster, &q, |_| {}).unwrap();
    assert_eq!(report.host_count(), 5);

    let err = verifier.verify(&roster, &p, |_| {}).unwrap_err();
    match err {
        RotateError::IdentityQuery { host, detail, .. } => {
            assert_eq!(host, "pdu1");
            assert_eq!(detail, "HTTP 401 Unauthorized:  Unauthorized");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_two_names_for_one_unit_collide() {
    let lab = Lab::default()
        .unit(&["pdu1"], "SN1", "P")
        .unit(&["rack7-pdu", "10.0.7.20"], "SN7", "P")
        .unit(&["pdu9"], "SN9", "P");
    let roster = roster("pdu1\nrack7-pdu\n\n10.0.7.20\npdu9\n");
    let err = FleetVerifier::new(&lab, "ops")
        .verify(&roster, &Credential::new("P"), |_| {})
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "line 4 in host file \"hosts.txt\" points to a PDU with the same serial number \"SN7\" - see previous line 2"
    );
    assert_eq!(*lab.contacted.borrow(), vec!["pdu1", "rack7-pdu", "10.0.7.20"]);
}

#[test]
fn test_same_password_rejected_before_any_contact() {
    let lab = five_unit_lab();
    let err = FleetRotator::new(&lab, "ops")
        .rotate(
            &roster("pdu1\n"),
            &Credential::new("P"),
            &Credential::new("P"),
            |_| {},
        )
        .unwrap_err();
    assert!(matches!(err, RotateError::SameCredential));
    assert!(lab.contacted.borrow().is_empty());
}

#[test]
fn test_driver_rejects_admin_without_reading_roster() {
    let lab = five_unit_lab();
    let mut script = Script::new(&[]);
    let request = RotationRequest {
        hostfile: "/definitely/not/here.txt".into(),
        username: "ADMIN".into(),
    };
    let err = run_rotation(&request, &lab, &mut script).unwrap_err();
    assert!(matches!(err, RotateError::AdminAccountRejected { .. }));
    assert!(lab.contacted.borrow().is_empty());
}

#[test]
fn test_driver_end_to_end() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# lab PDUs").unwrap();
    writeln!(file, "pdu1 pdu2 pdu3").unwrap();
    let lab = five_unit_lab();
    let request = RotationRequest {
        hostfile: file.path().to_path_buf(),
        username: "ops".into(),
    };
    let mut script = Script::new(&["P", "P", "y", "", "Q", "x", "Q", "Q"]);

    let outcome = run_rotation(&request, &lab, &mut script).unwrap();

    assert_eq!(outcome, RunOutcome::Rotated { hosts: 3 });
    for host in ["pdu1", "pdu2", "pdu3"] {
        assert_eq!(lab.password(host), "Q");
    }
    assert_eq!(lab.password("pdu4"), "P");
    assert!(script
        .output
        .contains(&"Password cannot be null - try again".to_string()));
    assert!(script
        .output
        .contains(&"Passwords do not match - try again".to_string()));
}

#[test]
fn test_driver_stops_when_new_password_prompt_exhausted() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "pdu1").unwrap();
    let lab = five_unit_lab();
    let request = RotationRequest {
        hostfile: file.path().to_path_buf(),
        username: "ops".into(),
    };
    let mut script = Script::new(&["P", "P", "yes", "", "", "", "Q", "Q"]);

    let err = run_rotation(&request, &lab, &mut script).unwrap_err();

    assert!(matches!(err, RotateError::PromptExhausted));
    assert_eq!(lab.password("pdu1"), "P");
}
