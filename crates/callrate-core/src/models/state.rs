//! Billing jurisdiction model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RatingError;

/// Billing jurisdiction of a call
///
/// The set is closed. Names match exactly as written (`"New York"` with a
/// space); there is no case folding and no aliasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    Texas,
    California,
    #[serde(rename = "New York")]
    NewYork,
    Florida,
    Illinois,
    Michigan,
}

impl State {
    /// Every supported state, in reference order
    pub const ALL: [State; 6] = [
        State::Texas,
        State::California,
        State::NewYork,
        State::Florida,
        State::Illinois,
        State::Michigan,
    ];

    /// Display name, as it appears on call records
    pub const fn name(self) -> &'static str {
        match self {
            State::Texas => "Texas",
            State::California => "California",
            State::NewYork => "New York",
            State::Florida => "Florida",
            State::Illinois => "Illinois",
            State::Michigan => "Michigan",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for State {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        State::ALL
            .into_iter()
            .find(|state| state.name() == s)
            .ok_or_else(|| RatingError::UnrecognizedState(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_names() {
        for state in State::ALL {
            assert_eq!(state.name().parse::<State>().unwrap(), state);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            "texas".parse::<State>(),
            Err(RatingError::UnrecognizedState("texas".to_string()))
        );
        assert!("NewYork".parse::<State>().is_err());
        assert!(" Texas".parse::<State>().is_err());
    }

    #[test]
    fn test_unknown_state() {
        assert_eq!(
            "Nevada".parse::<State>(),
            Err(RatingError::UnrecognizedState("Nevada".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&State::NewYork).unwrap();
        assert_eq!(json, "\"New York\"");
        let state: State = serde_json::from_str("\"Illinois\"").unwrap();
        assert_eq!(state, State::Illinois);
    }
}
