use serde::{Deserialize, Deserializer};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

const KILO: u64 = 1000;
const KIBI: u64 = 1024;

/// A unit in which rates and totals are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Unit {
    B,
    #[default]
    KB,
    KiB,
    MB,
    MiB,
    GB,
    GiB,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown unit \"{0}\", options are B, KB, KiB, MB, MiB, GB, GiB")]
pub(crate) struct UnitError(String);

impl Unit {
    /// The number of bytes in one of this unit
    pub(crate) fn size(self) -> u64 {
        match self {
            Unit::B => 1,
            Unit::KB => KILO,
            Unit::KiB => KIBI,
            Unit::MB => KILO.pow(2),
            Unit::MiB => KIBI.pow(2),
            Unit::GB => KILO.pow(3),
            Unit::GiB => KIBI.pow(3),
        }
    }

    /// Returns `true` for the powers of 1024
    pub(crate) fn is_binary(self) -> bool {
        matches!(self, Unit::KiB | Unit::MiB | Unit::GiB)
    }

    /// Pick the largest unit of the same family as `self`, which is not larger than `bytes`
    ///
    /// [`Unit::B`] counts as a decimal unit.
    pub(crate) fn scale_for(self, bytes: u64) -> Unit {
        let family = if self.is_binary() {
            [Unit::GiB, Unit::MiB, Unit::KiB]
        } else {
            [Unit::GB, Unit::MB, Unit::KB]
        };

        family
            .into_iter()
            .find(|unit| bytes >= unit.size())
            .unwrap_or(Unit::B)
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(Unit::B),
            "KB" => Ok(Unit::KB),
            "KiB" => Ok(Unit::KiB),
            "MB" => Ok(Unit::MB),
            "MiB" => Ok(Unit::MiB),
            "GB" => Ok(Unit::GB),
            "GiB" => Ok(Unit::GiB),
            x => Err(UnitError(x.to_string())),
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Unit::B => "B",
            Unit::KB => "KB",
            Unit::KiB => "KiB",
            Unit::MB => "MB",
            Unit::MiB => "MiB",
            Unit::GB => "GB",
            Unit::GiB => "GiB",
        };
        f.write_str(name)
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let unit = String::deserialize(deserializer)?;
        unit.parse().map_err(serde::de::Error::custom)
    }
}

/// Format a rate given in bytes per second
pub(crate) fn format_rate(bytes_per_sec: f64, unit: Unit) -> String {
    format!("{:8.4} {unit}/s", bytes_per_sec / unit.size() as f64)
}

/// Format a byte total, scaled within the family of `unit`
pub(crate) fn format_total(total: u64, unit: Unit) -> String {
    let scale = unit.scale_for(total);
    format!("{:.4} {scale} total", total as f64 / scale.size() as f64)
}
