//! Shared helpers for CLI integration tests.
//!
//! - [`TempEnvVar`] sets or clears a variable and restores it on drop.
//! - [`clean_env`] clears every `CHROMATIC_*` variable the CLI reads.
//! - [`run_cli`] calls [`chromatic_cli::run`] and captures both streams.
//!
//! Tests touching the environment must be `#[serial]`.

#![allow(dead_code)]

pub const CONFIG_VARS: &[&str] = &[
    "CHROMATIC_CONFIG",
    "CHROMATIC_SEED",
    "CHROMATIC_HAND_SIZE",
    "CHROMATIC_DICE",
    "CHROMATIC_DICE_SIDES",
    "CHROMATIC_DATA_DIR",
];

pub struct TempEnvVar {
    key: &'static str,
    previous: Option<String>,
}

impl TempEnvVar {
    pub fn set(key: &'static str, value: &str) -> Self {
        let previous = std::env::var(key).ok();
        // SAFETY: callers hold the serial_test lock, so no other test thread
        // reads or writes the environment concurrently.
        unsafe { std::env::set_var(key, value) };
        Self { key, previous }
    }

    pub fn unset(key: &'static str) -> Self {
        let previous = std::env::var(key).ok();
        // SAFETY: see `set`.
        unsafe { std::env::remove_var(key) };
        Self { key, previous }
    }
}

impl Drop for TempEnvVar {
    fn drop(&mut self) {
        // SAFETY: see `set`.
        unsafe {
            match &self.previous {
                Some(prev) => std::env::set_var(self.key, prev),
                None => std::env::remove_var(self.key),
            }
        }
    }
}

/// Clears every configuration variable until the guards drop.
pub fn clean_env() -> Vec<TempEnvVar> {
    CONFIG_VARS.iter().map(|&k| TempEnvVar::unset(k)).collect()
}

pub struct CliOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str]) -> CliOutput {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let mut argv = vec!["chromatic"];
    argv.extend_from_slice(args);
    let code = chromatic_cli::run(argv, &mut out, &mut err);
    CliOutput {
        code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}
