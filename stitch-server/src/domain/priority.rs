//! Optimization priority chosen by the traveller.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an unknown priority.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid priority {0:?}: expected time, cost, co2 or reliability")]
pub struct InvalidPriority(pub String);

/// The scoring dimension that receives the priority bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    #[default]
    Time,
    Cost,
    Co2,
    Reliability,
}

impl Priority {
    pub fn parse(s: &str) -> Result<Self, InvalidPriority> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" => Ok(Priority::Time),
            "cost" => Ok(Priority::Cost),
            "co2" => Ok(Priority::Co2),
            "reliability" => Ok(Priority::Reliability),
            _ => Err(InvalidPriority(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Time => "time",
            Priority::Cost => "cost",
            Priority::Co2 => "co2",
            Priority::Reliability => "reliability",
        }
    }
}

impl FromStr for Priority {
    type Err = InvalidPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_time() {
        assert_eq!(Priority::default(), Priority::Time);
    }

    #[test]
    fn parse_known() {
        assert_eq!(Priority::parse("time"), Ok(Priority::Time));
        assert_eq!(Priority::parse("COST"), Ok(Priority::Cost));
        assert_eq!(Priority::parse("Co2"), Ok(Priority::Co2));
        assert_eq!("reliability".parse(), Ok(Priority::Reliability));
    }

    #[test]
    fn parse_unknown() {
        let err = Priority::parse("comfort").unwrap_err();
        assert!(err.to_string().contains("comfort"));
    }
}
