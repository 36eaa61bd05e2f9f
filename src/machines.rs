//! Descriptions of the build, host and target machines.
//!
//! Build definitions query the machines they compile on and for (`host_machine.cpu_family()`
//! and friends); the machine-lowering pass answers those queries from the tables in this
//! module. The build machine is detected from the running platform; host and target
//! descriptions come from machine files and fall back down the chain the way the surface
//! language specifies: an absent target means "same as host", an absent host means "same as
//! build".

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::Result;

/// The role a machine plays in a compilation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Machine {
    /// The machine the build tooling runs on.
    Build,
    /// The machine the built artifacts run on.
    Host,
    /// The machine the built artifacts generate code for (compilers and similar).
    Target,
}

/// Operating-system kernels the toolchain layer distinguishes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Kernel {
    /// Linux.
    Linux,
    /// Apple XNU.
    Darwin,
    /// Microsoft Windows.
    Windows,
    /// FreeBSD.
    Freebsd,
    /// NetBSD.
    Netbsd,
    /// OpenBSD.
    Openbsd,
    /// Anything this library has no special handling for.
    Unknown,
}

/// Byte order of a machine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Endian {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

/// A full machine description.
///
/// # Examples
///
/// ```rust
/// use mortar::machines::{Endian, Info, Kernel, Machine};
///
/// let info = Info::new(Machine::Build, Kernel::Linux, Endian::Little, "x86_64");
/// assert_eq!(info.system(), "linux");
/// assert_eq!(info.cpu(), "x86_64");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// The role this description fills.
    pub machine: Machine,

    /// The kernel of the operating system.
    pub kernel: Kernel,

    /// Byte order.
    pub endian: Endian,

    /// The processor family, e.g. `x86_64` or `aarch64`.
    pub cpu_family: String,

    /// The exact processor, when known. Defaults to the family.
    #[serde(default)]
    pub cpu: String,
}

impl Info {
    /// Creates a description whose exact cpu equals its family.
    #[must_use]
    pub fn new(
        machine: Machine,
        kernel: Kernel,
        endian: Endian,
        cpu_family: impl Into<String>,
    ) -> Self {
        let cpu_family = cpu_family.into();
        Self {
            machine,
            kernel,
            endian,
            cpu: cpu_family.clone(),
            cpu_family,
        }
    }

    /// Sets the exact cpu, builder style.
    #[must_use]
    pub fn with_cpu(mut self, cpu: impl Into<String>) -> Self {
        self.cpu = cpu.into();
        self
    }

    /// The exact cpu, falling back to the family when unset.
    #[must_use]
    pub fn cpu(&self) -> &str {
        if self.cpu.is_empty() {
            &self.cpu_family
        } else {
            &self.cpu
        }
    }

    /// The operating-system name as the surface language reports it.
    #[must_use]
    pub fn system(&self) -> String {
        self.kernel.to_string()
    }
}

/// Per-role machine tables with the surface language's fallback chain.
///
/// Only the build machine is mandatory: `host` falls back to `build`, and `target` falls back
/// to `host` (and transitively to `build`). This matches a native build, where all three are
/// the same machine.
#[derive(Debug, Clone, PartialEq)]
pub struct PerMachine<T> {
    build: T,
    host: Option<T>,
    target: Option<T>,
}

impl<T> PerMachine<T> {
    /// Creates tables for a native build: host and target fall back to `build`.
    #[must_use]
    pub fn new(build: T) -> Self {
        Self {
            build,
            host: None,
            target: None,
        }
    }

    /// Sets a distinct host description (a cross build).
    pub fn set_host(&mut self, host: T) {
        self.host = Some(host);
    }

    /// Sets a distinct target description (a cross compiler build).
    pub fn set_target(&mut self, target: T) {
        self.target = Some(target);
    }

    /// Looks up the description for a role, walking the fallback chain.
    #[must_use]
    pub fn get(&self, machine: Machine) -> &T {
        match machine {
            Machine::Build => &self.build,
            Machine::Host => self.host.as_ref().unwrap_or(&self.build),
            Machine::Target => self
                .target
                .as_ref()
                .or(self.host.as_ref())
                .unwrap_or(&self.build),
        }
    }
}

/// Detects the machine this process is running on.
///
/// The kernel and cpu family come from the compile-time platform constants, which is accurate
/// because the build tooling always runs natively.
#[must_use]
pub fn detect_build() -> Info {
    let kernel = match std::env::consts::OS {
        "linux" => Kernel::Linux,
        "macos" => Kernel::Darwin,
        "windows" => Kernel::Windows,
        "freebsd" => Kernel::Freebsd,
        "netbsd" => Kernel::Netbsd,
        "openbsd" => Kernel::Openbsd,
        _ => Kernel::Unknown,
    };
    let endian = if cfg!(target_endian = "big") {
        Endian::Big
    } else {
        Endian::Little
    };
    Info::new(Machine::Build, kernel, endian, std::env::consts::ARCH)
}

/// One machine entry in a machine file; the role is implied by the key it sits under.
#[derive(Debug, Deserialize)]
struct MachineFileEntry {
    kernel: Kernel,
    endian: Endian,
    cpu_family: String,
    #[serde(default)]
    cpu: String,
}

impl MachineFileEntry {
    fn into_info(self, machine: Machine) -> Info {
        let mut info = Info::new(machine, self.kernel, self.endian, self.cpu_family);
        if !self.cpu.is_empty() {
            info.cpu = self.cpu;
        }
        info
    }
}

#[derive(Debug, Deserialize)]
struct MachineFile {
    host: Option<MachineFileEntry>,
    target: Option<MachineFileEntry>,
}

/// Loads host/target overrides from a machine file on top of the detected build machine.
///
/// The file is JSON with optional `host` and `target` objects:
///
/// ```json
/// { "host": { "kernel": "linux", "endian": "little", "cpu_family": "aarch64" } }
/// ```
///
/// # Errors
///
/// Returns [`crate::Error::FileError`] if the file cannot be read and
/// [`crate::Error::ParseError`] if it is not valid.
pub fn load_machine_file(path: &Path) -> Result<PerMachine<Info>> {
    let content = fs::read_to_string(path)?;
    let file: MachineFile = serde_json::from_str(&content)?;

    let mut machines = PerMachine::new(detect_build());
    if let Some(host) = file.host {
        machines.set_host(host.into_info(Machine::Host));
    }
    if let Some(target) = file.target {
        machines.set_target(target.into_info(Machine::Target));
    }
    Ok(machines)
}
