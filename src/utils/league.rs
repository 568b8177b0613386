// league.rs - Ranked Ladder Enums
// Ordered tier and division enums for ranked-ladder display. Comparisons go
// from worst to best so `max` picks the higher rank.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LeagueTier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl fmt::Display for LeagueTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LeagueTier::Iron => "Iron",
            LeagueTier::Bronze => "Bronze",
            LeagueTier::Silver => "Silver",
            LeagueTier::Gold => "Gold",
            LeagueTier::Platinum => "Platinum",
            LeagueTier::Diamond => "Diamond",
            LeagueTier::Master => "Master",
            LeagueTier::Grandmaster => "Grandmaster",
            LeagueTier::Challenger => "Challenger",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for LeagueTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "IRON" => Ok(LeagueTier::Iron),
            "BRONZE" => Ok(LeagueTier::Bronze),
            "SILVER" => Ok(LeagueTier::Silver),
            "GOLD" => Ok(LeagueTier::Gold),
            "PLATINUM" => Ok(LeagueTier::Platinum),
            "DIAMOND" => Ok(LeagueTier::Diamond),
            "MASTER" => Ok(LeagueTier::Master),
            "GRANDMASTER" => Ok(LeagueTier::Grandmaster),
            "CHALLENGER" => Ok(LeagueTier::Challenger),
            other => Err(format!("unknown league tier: {}", other)),
        }
    }
}

/// Division within a tier. IV is the lowest, so ordering is reversed relative
/// to the numeral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LeagueRank {
    IV,
    III,
    II,
    I,
}

impl fmt::Display for LeagueRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LeagueRank::IV => "IV",
            LeagueRank::III => "III",
            LeagueRank::II => "II",
            LeagueRank::I => "I",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for LeagueRank {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "I" => Ok(LeagueRank::I),
            "II" => Ok(LeagueRank::II),
            "III" => Ok(LeagueRank::III),
            "IV" => Ok(LeagueRank::IV),
            other => Err(format!("unknown league rank: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(LeagueTier::Challenger > LeagueTier::Iron);
        assert!(LeagueTier::Gold > LeagueTier::Silver);
        assert_eq!(
            LeagueTier::Gold.max(LeagueTier::Diamond),
            LeagueTier::Diamond
        );
    }

    #[test]
    fn test_rank_iv_is_lowest() {
        assert!(LeagueRank::I > LeagueRank::IV);
        let mut ranks = vec![LeagueRank::I, LeagueRank::IV, LeagueRank::II, LeagueRank::III];
        ranks.sort();
        assert_eq!(
            ranks,
            vec![LeagueRank::IV, LeagueRank::III, LeagueRank::II, LeagueRank::I]
        );
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        assert_eq!("gold".parse::<LeagueTier>().unwrap(), LeagueTier::Gold);
        assert_eq!(LeagueTier::Grandmaster.to_string(), "Grandmaster");
        assert_eq!("iii".parse::<LeagueRank>().unwrap(), LeagueRank::III);
        assert!("V".parse::<LeagueRank>().is_err());
    }
}
