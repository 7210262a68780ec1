//! Host detection: operating system, CPU architecture and `uname` probing.

pub mod arch;
pub mod host;
pub mod os;

pub use arch::Arch;
pub use host::HostInfo;
pub use os::{Os, SupportedOs};
