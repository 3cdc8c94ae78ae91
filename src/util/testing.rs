//! Test support: one-time tracing setup and a scripted command runner.

use std::collections::HashMap;
use std::env;
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Output};
use std::sync::{Mutex, Once};

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::infrastructure::traits::CommandRunner;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else if let Err(e) = subscriber.try_init() {
        eprintln!("Error: Failed to set up logging: {}", e);
    }
    debug!("RUST_LOG={:?}", env::var("RUST_LOG").ok());
}

/// Build a process result with exit `code`.
pub fn output(code: i32, stdout: &str, stderr: &str) -> Output {
    Output {
        status: ExitStatus::from_raw(code << 8),
        stdout: stdout.as_bytes().to_vec(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// Command runner answering from a script keyed by the full command line.
///
/// Every call is recorded; unscripted command lines fail with `NotFound`, as
/// a missing binary would.
#[derive(Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, (i32, String, String)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `cmdline` (program and arguments joined by spaces) with stdout.
    pub fn on(mut self, cmdline: &str, stdout: &str) -> Self {
        self.responses
            .insert(cmdline.to_string(), (0, stdout.to_string(), String::new()));
        self
    }

    /// Answer `cmdline` with a failing exit code and stderr.
    pub fn failing(mut self, cmdline: &str, code: i32, stderr: &str) -> Self {
        self.responses
            .insert(cmdline.to_string(), (code, String::new(), stderr.to_string()));
        self
    }

    /// Command lines run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        let cmdline = std::iter::once(cmd)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(cmdline.clone());
        }
        match self.responses.get(&cmdline) {
            Some((code, stdout, stderr)) => Ok(output(*code, stdout, stderr)),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("not scripted: {}", cmdline),
            )),
        }
    }
}
