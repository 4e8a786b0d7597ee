//! Card system: definitions, deployed instances, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `Card`: Character, Item or Battlefield definition (read-only)
//! - `CardKind`: The declared shape of a card
//! - `DeployedCharacter`: A character on the battlefield with live defense
//! - `CardRegistry`: Definition lookup and per-user collections

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{BattlefieldCard, Card, CardId, CardKind, CharacterCard, ItemCard};
pub use instance::DeployedCharacter;
pub use registry::CardRegistry;
