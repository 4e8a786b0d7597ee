//! Card definitions - static catalog data.
//!
//! A `Card` is read-only reference data supplied by the catalog. The engine
//! moves copies between a player's deck, hand and deployed zones but never
//! edits the definition itself. Mutable combat state for deployed characters
//! lives in `DeployedCharacter`.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The three card shapes a catalog can supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Character,
    Item,
    Battlefield,
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CardKind::Character => "Character",
            CardKind::Item => "Item",
            CardKind::Battlefield => "Battlefield",
        };
        write!(f, "{}", label)
    }
}

/// A fighter that can be deployed and attack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterCard {
    pub id: CardId,
    pub name: String,
    pub rarity: String,
    pub franchise: String,
    pub image_url: String,

    /// Damage dealt when attacking.
    pub power: i64,

    /// Starting defense when deployed.
    pub defense: i64,

    /// Used to order turns.
    pub speed: i64,

    /// Flavor ability text. Not interpreted by the engine.
    pub ability: Option<String>,
}

impl CharacterCard {
    /// Create a character with the given combat stats.
    ///
    /// ```
    /// use clash_engine::cards::CharacterCard;
    ///
    /// let knight = CharacterCard::new("c1", "Knight", 50, 30, 4)
    ///     .with_rarity("Rare")
    ///     .with_ability("Shield wall");
    ///
    /// assert_eq!(knight.power, 50);
    /// assert_eq!(knight.ability.as_deref(), Some("Shield wall"));
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, power: i64, defense: i64, speed: i64) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            rarity: "Common".to_string(),
            franchise: String::new(),
            image_url: String::new(),
            power,
            defense,
            speed,
            ability: None,
        }
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = rarity.into();
        self
    }

    #[must_use]
    pub fn with_franchise(mut self, franchise: impl Into<String>) -> Self {
        self.franchise = franchise.into();
        self
    }

    #[must_use]
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = Some(ability.into());
        self
    }
}

/// An equipment card. The effect descriptor is opaque to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCard {
    pub id: CardId,
    pub name: String,
    pub rarity: String,
    pub franchise: String,
    pub image_url: String,
    pub effect: String,
}

impl ItemCard {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, effect: impl Into<String>) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            rarity: "Common".to_string(),
            franchise: String::new(),
            image_url: String::new(),
            effect: effect.into(),
        }
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = rarity.into();
        self
    }

    #[must_use]
    pub fn with_franchise(mut self, franchise: impl Into<String>) -> Self {
        self.franchise = franchise.into();
        self
    }
}

/// A match-wide modifier card held in the shared battlefield slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattlefieldCard {
    pub id: CardId,
    pub name: String,
    pub rarity: String,
    pub franchise: String,
    pub image_url: String,
    pub effect: String,
}

impl BattlefieldCard {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, effect: impl Into<String>) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            rarity: "Common".to_string(),
            franchise: String::new(),
            image_url: String::new(),
            effect: effect.into(),
        }
    }
}

/// Any card a player can hold.
///
/// Serialized externally tagged so the persisted form stays readable by
/// non-self-describing codecs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Card {
    Character(CharacterCard),
    Item(ItemCard),
    Battlefield(BattlefieldCard),
}

impl Card {
    #[must_use]
    pub fn id(&self) -> &CardId {
        match self {
            Card::Character(c) => &c.id,
            Card::Item(c) => &c.id,
            Card::Battlefield(c) => &c.id,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Card::Character(c) => &c.name,
            Card::Item(c) => &c.name,
            Card::Battlefield(c) => &c.name,
        }
    }

    /// The card's actual shape.
    #[must_use]
    pub fn kind(&self) -> CardKind {
        match self {
            Card::Character(_) => CardKind::Character,
            Card::Item(_) => CardKind::Item,
            Card::Battlefield(_) => CardKind::Battlefield,
        }
    }

    #[must_use]
    pub fn as_character(&self) -> Option<&CharacterCard> {
        match self {
            Card::Character(c) => Some(c),
            _ => None,
        }
    }
}

impl From<CharacterCard> for Card {
    fn from(card: CharacterCard) -> Self {
        Card::Character(card)
    }
}

impl From<ItemCard> for Card {
    fn from(card: ItemCard) -> Self {
        Card::Item(card)
    }
}

impl From<BattlefieldCard> for Card {
    fn from(card: BattlefieldCard) -> Self {
        Card::Battlefield(card)
    }
}
