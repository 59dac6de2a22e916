//! Player Registry - canonical identities for the league
//!
//! Resolves free-text player names into stable lookup keys, maps legacy owner
//! labels to their current team names (and back), and holds the closed set of
//! rostered players that lineup solving works against.

pub mod normalize;
pub mod registry;
pub mod teams;
pub mod types;

pub use normalize::normalize_player_name;
pub use registry::RosterRegistry;
pub use teams::{TeamNamePair, TeamResolver, UNDRAFTED};
pub use types::{PlayerKey, RegistryError, RosterEntry, RosterFile};
