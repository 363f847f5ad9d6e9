use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::defs::{ABYSS, DEEP, MIDDLE, SHALLOW};
use crate::die::Die;
use crate::{Error, Result};

/// Depth class of a treasure token. Its point value stays unknown until the round ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tier {
    Shallow = 1,
    Middle = 2,
    Deep = 3,
    Abyss = 4,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Shallow, Tier::Middle, Tier::Deep, Tier::Abyss];

    /// Equally likely resolved values.
    #[must_use]
    pub fn die(self) -> &'static Die {
        match self {
            Tier::Shallow => &SHALLOW,
            Tier::Middle => &MIDDLE,
            Tier::Deep => &DEEP,
            Tier::Abyss => &ABYSS,
        }
    }

    #[must_use]
    pub fn depth(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Tier {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Tier::Shallow),
            2 => Ok(Tier::Middle),
            3 => Ok(Tier::Deep),
            4 => Ok(Tier::Abyss),
            x => Err(Error::Tier(x)),
        }
    }
}

impl From<Tier> for u8 {
    fn from(value: Tier) -> Self {
        value.depth()
    }
}

impl FromStr for Tier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let depth: u8 = s.trim().parse().map_err(|_| Error::Hold(s.to_string()))?;
        Tier::try_from(depth)
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.depth())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depths_round_trip() {
        for tier in Tier::ALL {
            assert_eq!(Tier::try_from(tier.depth()).unwrap(), tier);
        }
    }

    #[test]
    fn out_of_range_depth_is_rejected() {
        assert!(matches!(Tier::try_from(0), Err(Error::Tier(0))));
        assert!(matches!(Tier::try_from(5), Err(Error::Tier(5))));
        assert!(matches!("7".parse::<Tier>(), Err(Error::Tier(7))));
        assert!(matches!("x".parse::<Tier>(), Err(Error::Hold(_))));
    }

    #[test]
    fn value_sets() {
        assert_eq!(Tier::Shallow.die().values(), &[0, 1, 2, 3]);
        assert_eq!(Tier::Middle.die().values(), &[4, 5, 6, 7]);
        assert_eq!(Tier::Deep.die().values(), &[8, 9, 10, 11]);
        assert_eq!(Tier::Abyss.die().values(), &[11, 12, 13, 14]);
    }

    #[test]
    fn ordered_by_depth() {
        assert!(Tier::Shallow < Tier::Middle);
        assert!(Tier::Deep < Tier::Abyss);
    }

    #[test]
    fn serializes_as_depth() {
        assert_eq!(serde_json::to_string(&Tier::Deep).unwrap(), "3");
        assert_eq!(serde_json::from_str::<Tier>("2").unwrap(), Tier::Middle);
        assert!(serde_json::from_str::<Tier>("9").is_err());
    }
}
