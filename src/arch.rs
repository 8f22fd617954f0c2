//! Architecture family detection and compiler flag selection.
//!
//! The family ("barch") is simply the first three characters of the full
//! architecture name: `x86_64` -> `x86`, `ppc64le` -> `ppc`, `armv7l` -> `arm`.

use std::fmt;

use crate::error::{ConfigError, Result};

/// Architecture families we know how to compile for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchFamily {
    X86,
    Ppc,
    Arm,
}

impl ArchFamily {
    /// Validate a full architecture name and return its family.
    pub fn from_arch(arch: &str) -> Result<Self> {
        match barch(arch).as_str() {
            "x86" => Ok(ArchFamily::X86),
            "ppc" => Ok(ArchFamily::Ppc),
            "arm" => Ok(ArchFamily::Arm),
            other => Err(ConfigError::UnknownArch {
                barch: other.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArchFamily::X86 => "x86",
            ArchFamily::Ppc => "ppc",
            ArchFamily::Arm => "arm",
        }
    }
}

impl fmt::Display for ArchFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First three characters of `arch` (fewer if `arch` is shorter).
pub fn barch(arch: &str) -> String {
    arch.chars().take(3).collect()
}

/// Compiler and linker flags contributed by the target architecture.
///
/// Values keep their leading separator so they can be appended as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchFlags {
    pub cflags: String,
    pub ldflags: String,
    pub sldflags: String,
}

impl ArchFlags {
    /// Select the flag set for `target_arch`.
    ///
    /// x86 and ppc pick `-m64` or `-m32` depending on whether the name
    /// contains "64"; arm has no word size flag.
    pub fn for_target(target_arch: &str) -> Result<Self> {
        let family = ArchFamily::from_arch(target_arch)?;

        let word = match family {
            ArchFamily::X86 | ArchFamily::Ppc if target_arch.contains("64") => " -m64",
            ArchFamily::X86 | ArchFamily::Ppc => " -m32",
            ArchFamily::Arm => "",
        };

        Ok(Self {
            cflags: format!(" -Wall{} -fPIC", word),
            ldflags: format!("{} -fPIC", word),
            sldflags: format!(" -shared{} -fPIC", word),
        })
    }
}

/// Machine name of the running host, in `uname -m` style.
pub fn host_machine() -> String {
    match std::env::consts::ARCH {
        "powerpc64" if cfg!(target_endian = "little") => "ppc64le".to_string(),
        "powerpc64" => "ppc64".to_string(),
        "powerpc" => "ppc".to_string(),
        "x86" => "i686".to_string(),
        "arm" => "armv7l".to_string(),
        other => other.to_string(),
    }
}
