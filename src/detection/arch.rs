//! CPU architecture classification.

use std::fmt;

/// CPU architecture as reported by `uname -m`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arch {
    /// `x86_64` / `amd64`.
    X86_64,
    /// `aarch64` / `arm64`.
    Aarch64,
    /// 32-bit ARM (`armv6l`, `armv7l`).
    Arm,
    /// 32-bit x86 (`i386`, `i686`).
    X86,
    /// Anything else, kept verbatim for diagnostics.
    Other(String),
}

impl Arch {
    /// Classify a machine name.
    pub fn from_uname(machine: &str) -> Self {
        match machine.trim() {
            "x86_64" | "amd64" => Arch::X86_64,
            "aarch64" | "arm64" => Arch::Aarch64,
            "armv6l" | "armv7l" => Arch::Arm,
            "i386" | "i686" => Arch::X86,
            other => Arch::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arch::X86_64 => write!(f, "x86_64"),
            Arch::Aarch64 => write!(f, "aarch64"),
            Arch::Arm => write!(f, "arm"),
            Arch::X86 => write!(f, "x86"),
            Arch::Other(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_map_to_same_arch() {
        assert_eq!(Arch::from_uname("x86_64"), Arch::from_uname("amd64"));
        assert_eq!(Arch::from_uname("aarch64"), Arch::from_uname("arm64"));
        assert_eq!(Arch::from_uname("armv6l"), Arch::from_uname("armv7l"));
        assert_eq!(Arch::from_uname("i386"), Arch::from_uname("i686"));
    }

    #[test]
    fn unknown_arch_is_kept_verbatim() {
        assert_eq!(Arch::from_uname("riscv64\n"), Arch::Other("riscv64".into()));
        assert_eq!(Arch::from_uname("s390x").to_string(), "s390x");
    }
}
