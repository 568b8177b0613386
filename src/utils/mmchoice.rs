// mmchoice.rs - Matchmaking Choice
// The four answers a user can give to a matchmaking poll, ordered from most to
// least committed so attendee lists sort nicely.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MMChoice {
    Yes,
    Maybe,
    Late,
    No,
}

impl MMChoice {
    pub const ALL: [MMChoice; 4] = [MMChoice::Yes, MMChoice::Maybe, MMChoice::Late, MMChoice::No];

    /// The reaction emoji standing for this answer.
    pub fn emoji(self) -> &'static str {
        match self {
            MMChoice::Yes => "✅",
            MMChoice::Maybe => "❓",
            MMChoice::Late => "🕒",
            MMChoice::No => "❌",
        }
    }

    pub fn from_emoji(emoji: &str) -> Option<MMChoice> {
        MMChoice::ALL.into_iter().find(|c| c.emoji() == emoji)
    }
}

impl fmt::Display for MMChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MMChoice::Yes => "yes",
            MMChoice::Maybe => "maybe",
            MMChoice::Late => "late",
            MMChoice::No => "no",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for MMChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yes" => Ok(MMChoice::Yes),
            "maybe" => Ok(MMChoice::Maybe),
            "late" => Ok(MMChoice::Late),
            "no" => Ok(MMChoice::No),
            other => Err(format!("unknown matchmaking choice: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_most_committed_first() {
        let mut choices = vec![MMChoice::No, MMChoice::Yes, MMChoice::Late, MMChoice::Maybe];
        choices.sort();
        assert_eq!(
            choices,
            vec![MMChoice::Yes, MMChoice::Maybe, MMChoice::Late, MMChoice::No]
        );
    }

    #[test]
    fn test_emoji_round_trip() {
        for choice in MMChoice::ALL {
            assert_eq!(MMChoice::from_emoji(choice.emoji()), Some(choice));
        }
        assert_eq!(MMChoice::from_emoji("🍕"), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("YES".parse::<MMChoice>().unwrap(), MMChoice::Yes);
        assert!("perhaps".parse::<MMChoice>().is_err());
    }
}
