use serde::{Deserialize, Serialize};

/// Which lineup slots a player may fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EligibilityClass {
    Guard,
    /// Forward or center
    Forward,
    Flex,
    /// No usable position label; solved as Flex
    Unknown,
}

impl EligibilityClass {
    #[inline]
    pub fn can_play_guard(self) -> bool {
        !matches!(self, EligibilityClass::Forward)
    }

    #[inline]
    pub fn can_play_forward(self) -> bool {
        !matches!(self, EligibilityClass::Guard)
    }
}

/// Map a position label ("G", "PG", "F-C", "G/F", ...) to its class
pub fn classify(position: &str) -> EligibilityClass {
    let label: String =
        position.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_uppercase).collect();

    let guard = label.contains('G');
    let frontcourt = label.contains('F') || label.contains('C');

    match (guard, frontcourt) {
        (true, true) => EligibilityClass::Flex,
        (true, false) => EligibilityClass::Guard,
        (false, true) => EligibilityClass::Forward,
        (false, false) => EligibilityClass::Unknown,
    }
}
