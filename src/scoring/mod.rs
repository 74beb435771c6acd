// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Accuracy and letter grades.
//!
//! Two score representations coexist:
//!
//! - the legacy scheme, six fixed judgement counts stored in every replay
//!   header ([`LegacyStatistics`])
//! - the open scheme, a judgement-name to count map carried by newer
//!   replays (see [`crate::replay::score_info`])
//!
//! Each has its own accuracy formula and grade ladder.

pub mod accuracy;
pub mod grade;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::DecodeError;

pub use accuracy::{legacy_accuracy, open_accuracy};
pub use grade::{legacy_grade, open_grade};

/// Letter grade, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    /// Silver SS.
    XH,
    X,
    /// Silver S.
    SH,
    S,
    A,
    B,
    C,
    D,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::XH => "XH",
            Grade::X => "X",
            Grade::SH => "SH",
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }

    /// X becomes XH and S becomes SH; other grades are unchanged.
    pub fn silver(self) -> Grade {
        match self {
            Grade::X => Grade::XH,
            Grade::S => Grade::SH,
            other => other,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "XH" => Grade::XH,
            "X" => Grade::X,
            "SH" => Grade::SH,
            "S" => Grade::S,
            "A" => Grade::A,
            "B" => Grade::B,
            "C" => Grade::C,
            "D" => Grade::D,
            other => return Err(DecodeError::invalid_enum("grade", other)),
        })
    }
}

/// The six judgement counts of the legacy scheme.
///
/// `geki` and `katu` are the rulesets' extra tiers: in mania they are the
/// MAX and 200 judgements, in catch `katu` counts missed droplets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegacyStatistics {
    pub count_300: u16,
    pub count_100: u16,
    pub count_50: u16,
    pub count_geki: u16,
    pub count_katu: u16,
    pub count_miss: u16,
}

impl LegacyStatistics {
    /// Hits plus misses over the 300/100/50 tiers.
    pub fn total_hits(&self) -> u32 {
        u32::from(self.count_300)
            + u32::from(self.count_100)
            + u32::from(self.count_50)
            + u32::from(self.count_miss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silver() {
        assert_eq!(Grade::X.silver(), Grade::XH);
        assert_eq!(Grade::S.silver(), Grade::SH);
        assert_eq!(Grade::A.silver(), Grade::A);
        assert_eq!(Grade::XH.silver(), Grade::XH);
    }

    #[test]
    fn test_grade_names() {
        for grade in [Grade::XH, Grade::X, Grade::SH, Grade::S, Grade::D] {
            assert_eq!(grade.as_str().parse::<Grade>().unwrap(), grade);
        }
        assert!(matches!(
            "F".parse::<Grade>(),
            Err(DecodeError::InvalidEnumValue { .. })
        ));
        assert!(Grade::XH < Grade::D);
    }

    #[test]
    fn test_total_hits() {
        let stats = LegacyStatistics {
            count_300: 10,
            count_100: 2,
            count_50: 1,
            count_geki: 5,
            count_katu: 3,
            count_miss: 1,
        };
        assert_eq!(stats.total_hits(), 14);
    }
}
