//! Travel modes.
//!
//! Connector modes cover the short trips to and from hubs; the trunk is
//! the single opaque hub-to-hub segment.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an unknown travel mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown connector mode {0:?}: expected driving, walking or bicycling")]
pub struct InvalidMode(pub String);

/// Mode of a connector leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorMode {
    Driving,
    Walking,
    Bicycling,
}

impl ConnectorMode {
    /// All connector modes, in default enumeration order.
    pub const ALL: [ConnectorMode; 3] = [
        ConnectorMode::Driving,
        ConnectorMode::Walking,
        ConnectorMode::Bicycling,
    ];

    /// Parse a mode name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidMode> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driving" => Ok(ConnectorMode::Driving),
            "walking" => Ok(ConnectorMode::Walking),
            "bicycling" => Ok(ConnectorMode::Bicycling),
            _ => Err(InvalidMode(s.to_string())),
        }
    }

    /// Provider-facing name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectorMode::Driving => "driving",
            ConnectorMode::Walking => "walking",
            ConnectorMode::Bicycling => "bicycling",
        }
    }
}

impl FromStr for ConnectorMode {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ConnectorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mode of any leg: a connector mode or the trunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegMode {
    Connector(ConnectorMode),
    Trunk,
}

impl LegMode {
    /// Provider-facing name. The trunk is requested as `transit`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LegMode::Connector(mode) => mode.as_str(),
            LegMode::Trunk => "transit",
        }
    }

    pub fn is_trunk(&self) -> bool {
        matches!(self, LegMode::Trunk)
    }
}

impl From<ConnectorMode> for LegMode {
    fn from(mode: ConnectorMode) -> Self {
        LegMode::Connector(mode)
    }
}

impl fmt::Display for LegMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
