//! Host identification.
//!
//! The kernel and machine names are read once per run with `uname`. When
//! `uname` cannot be executed the compile-time target is used instead.

use serde::Serialize;

use super::arch::Arch;
use super::os::Os;
use crate::shell::CommandRunner;

/// What the run knows about the machine it is bootstrapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostInfo {
    /// Raw kernel name (`uname -s`).
    pub kernel: String,
    /// Raw machine name (`uname -m`).
    pub machine: String,
}

impl HostInfo {
    /// Build from raw `uname` values.
    pub fn new(kernel: &str, machine: &str) -> Self {
        Self {
            kernel: kernel.trim().to_string(),
            machine: machine.trim().to_string(),
        }
    }

    /// Detect the host through `uname`, falling back to the build target.
    pub fn detect(runner: &dyn CommandRunner) -> Self {
        let kernel = read_uname(runner, "-s").unwrap_or_else(|| fallback_kernel().to_string());
        let machine =
            read_uname(runner, "-m").unwrap_or_else(|| std::env::consts::ARCH.to_string());
        tracing::debug!("Detected host: kernel={} machine={}", kernel, machine);
        Self::new(&kernel, &machine)
    }

    /// Operating system classification.
    pub fn os(&self) -> Os {
        Os::from_uname(&self.kernel)
    }

    /// CPU architecture classification.
    pub fn arch(&self) -> Arch {
        Arch::from_uname(&self.machine)
    }
}

fn read_uname(runner: &dyn CommandRunner, flag: &str) -> Option<String> {
    let result = runner.probe(&format!("uname {}", flag)).ok()?;
    let value = result.stdout.trim();
    if result.success && !value.is_empty() {
        Some(value.to_string())
    } else {
        None
    }
}

fn fallback_kernel() -> &'static str {
    match std::env::consts::OS {
        "macos" => "Darwin",
        "linux" => "Linux",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::os::Os;
    use crate::shell::RecordingRunner;

    #[test]
    fn detect_reads_uname() {
        let runner = RecordingRunner::new();
        runner.respond("uname -s", "Linux\n");
        runner.respond("uname -m", "aarch64\n");

        let host = HostInfo::detect(&runner);

        assert_eq!(host.os(), Os::Linux);
        assert_eq!(host.arch(), Arch::Aarch64);
        assert_eq!(runner.probes(), vec!["uname -s", "uname -m"]);
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn detect_falls_back_when_uname_fails() {
        let runner = RecordingRunner::new();

        let host = HostInfo::detect(&runner);

        assert_eq!(host.kernel, fallback_kernel());
        assert_eq!(host.machine, std::env::consts::ARCH);
    }

    #[test]
    fn new_trims_whitespace() {
        let host = HostInfo::new("Darwin\n", " arm64 ");
        assert_eq!(host.os(), Os::MacOS);
        assert_eq!(host.machine, "arm64");
    }
}
