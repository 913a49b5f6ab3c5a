//! CPU architecture tokens found in package file names.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// CPU architecture types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X86,
    X86_64,
    ARM,
    ARM64,
    Unknown,
}

impl Arch {
    /// Display label used in the download table.
    pub fn label(self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86_64",
            Arch::ARM => "arm",
            Arch::ARM64 => "arm64",
            Arch::Unknown => "unknown",
        }
    }

    /// Guess the architecture from the tokens of a file name.
    ///
    /// The name is split on `.`, `-` and `_`; the last recognized token wins
    /// since packagers put the architecture next to the extension.
    pub fn guess(filename: &str) -> Arch {
        // the only token that itself contains a separator
        if filename.to_ascii_lowercase().contains("x86_64") {
            return Arch::X86_64;
        }
        filename
            .split(['.', '-', '_'])
            .filter_map(|token| token.parse::<Arch>().ok())
            .last()
            .unwrap_or(Arch::Unknown)
    }
}

impl FromStr for Arch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "i386" | "i686" | "x86" => Ok(Arch::X86),
            "x86_64" | "amd64" => Ok(Arch::X86_64),
            "arm" | "armv7l" | "armhf" => Ok(Arch::ARM),
            "aarch64" | "arm64" => Ok(Arch::ARM64),
            _ => Err(Error::UnknownArch(s.to_string())),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}
