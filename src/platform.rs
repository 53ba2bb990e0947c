//! Platform detection and the per-platform tool table.
//!
//! Every platform-dependent choice (ping count flag, trace utility, package
//! manager) is an exhaustive match on [`PlatformKind`], so adding a platform
//! is a compile error until each table entry is filled in.

/// Operating system families conncheck distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    Linux,
    Windows,
    /// Anything else (macOS, BSDs, ...). Uses Unix tool conventions but has
    /// no supported package manager.
    Other,
}

/// How the traceroute operation picks its executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceStrategy {
    /// A utility shipped with the OS, run unconditionally.
    Builtin(&'static str),
    /// Try `primary` first; fall back to `secondary` when it is missing or fails.
    Fallback {
        primary: &'static str,
        secondary: &'static str,
    },
}

/// Package managers used by the install routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Apt,
    Chocolatey,
}

impl PackageManager {
    /// Executable name of the package manager.
    pub fn program(self) -> &'static str {
        match self {
            PackageManager::Apt => "apt",
            PackageManager::Chocolatey => "choco",
        }
    }

    /// Arguments that install `package` non-interactively.
    pub fn install_args(self, package: &str) -> Vec<String> {
        match self {
            PackageManager::Apt => vec!["install".into(), "-y".into(), package.into()],
            PackageManager::Chocolatey => vec!["install".into(), package.into(), "-y".into()],
        }
    }

    /// Whether installs need elevated privileges through `sudo`.
    pub fn needs_sudo(self) -> bool {
        match self {
            PackageManager::Apt => true,
            PackageManager::Chocolatey => false,
        }
    }
}

impl PlatformKind {
    /// Classify the platform this binary was built for.
    pub fn detect() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Classify an OS name such as `std::env::consts::OS` returns.
    pub fn from_os_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "linux" => PlatformKind::Linux,
            "windows" => PlatformKind::Windows,
            _ => PlatformKind::Other,
        }
    }

    /// Flag that sets the number of echo requests sent by `ping`.
    pub fn ping_count_flag(self) -> &'static str {
        match self {
            PlatformKind::Windows => "-n",
            PlatformKind::Linux | PlatformKind::Other => "-c",
        }
    }

    pub fn trace_strategy(self) -> TraceStrategy {
        match self {
            PlatformKind::Windows => TraceStrategy::Builtin("tracert"),
            PlatformKind::Linux | PlatformKind::Other => TraceStrategy::Fallback {
                primary: "tracepath",
                secondary: "traceroute",
            },
        }
    }

    pub fn package_manager(self) -> Option<PackageManager> {
        match self {
            PlatformKind::Linux => Some(PackageManager::Apt),
            PlatformKind::Windows => Some(PackageManager::Chocolatey),
            PlatformKind::Other => None,
        }
    }

    /// Python interpreter used to install the speed-test module.
    pub fn python(self) -> &'static str {
        match self {
            PlatformKind::Windows => "python",
            PlatformKind::Linux | PlatformKind::Other => "python3",
        }
    }
}

impl std::fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformKind::Linux => write!(f, "linux"),
            PlatformKind::Windows => write!(f, "windows"),
            PlatformKind::Other => write!(f, "other"),
        }
    }
}
