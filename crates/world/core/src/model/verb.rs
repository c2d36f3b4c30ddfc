//! Interaction verbs offered by world entities.
//!
//! Verbs form a closed set. Each verb maps to the entity kinds it can be
//! issued against, so an "Attack" aimed at a bank booth is rejected before
//! anything is sent to the world.

use super::EntityKind;

/// A named interaction action ("Bank", "Talk-to", "Attack", ...).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Verb {
    // creatures
    Attack,
    #[strum(serialize = "Talk-to")]
    TalkTo,
    Exchange,
    Trade,
    Pickpocket,
    Collect,

    // creatures and objects (bankers and booths)
    Bank,

    // objects
    Open,
    Close,
    Search,
    Enter,
    Climb,
    #[strum(serialize = "Climb-up")]
    ClimbUp,
    #[strum(serialize = "Climb-down")]
    ClimbDown,
    Pray,
    #[strum(serialize = "Pray-at")]
    PrayAt,
    Mine,
    Chop,
    Operate,

    // ground items
    Take,

    // carried and worn items
    Wear,
    Wield,
    Remove,
    Eat,
    Drink,
    Read,
    Drop,

    // objects and carried items
    Use,
}

impl Verb {
    /// Returns true if this verb can be issued against an entity of `kind`.
    pub fn applies_to(self, kind: EntityKind) -> bool {
        use EntityKind::*;
        use Verb::*;
        match self {
            Attack | TalkTo | Exchange | Trade | Pickpocket | Collect => kind == Creature,
            Bank => matches!(kind, Creature | WorldObject),
            Open | Close | Search | Enter | Climb | ClimbUp | ClimbDown | Pray | PrayAt | Mine
            | Chop | Operate => kind == WorldObject,
            Take => kind == GroundItem,
            Wear | Wield | Eat | Drink | Read | Drop => kind == CarriedItem,
            Remove => kind == WornItem,
            Use => matches!(kind, WorldObject | CarriedItem),
        }
    }

    /// Validates that `verb` may be issued against `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`VerbError::NotApplicable`] for pairs such as `Take` on a creature.
    pub fn for_kind(kind: EntityKind, verb: Verb) -> Result<Verb, VerbError> {
        if verb.applies_to(kind) {
            Ok(verb)
        } else {
            Err(VerbError::NotApplicable { verb, kind })
        }
    }

    /// Parses a host-supplied verb label and validates it against `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`VerbError::Unknown`] for labels outside the closed set.
    pub fn parse_for(kind: EntityKind, label: &str) -> Result<Verb, VerbError> {
        let verb: Verb = label
            .parse()
            .map_err(|_| VerbError::Unknown(label.to_owned()))?;
        Self::for_kind(kind, verb)
    }

    /// Verbs that move a carried item into an equipment slot.
    pub fn is_equip(self) -> bool {
        matches!(self, Verb::Wear | Verb::Wield)
    }
}

/// Verb validation failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VerbError {
    #[error("unknown verb '{0}'")]
    Unknown(String),

    #[error("verb '{verb}' cannot be used on a {kind}")]
    NotApplicable { verb: Verb, kind: EntityKind },
}

impl crate::error::WorldError for VerbError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            VerbError::Unknown(_) => "VERB_UNKNOWN",
            VerbError::NotApplicable { .. } => "VERB_NOT_APPLICABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_strum() {
        assert_eq!(Verb::TalkTo.to_string(), "Talk-to");
        assert_eq!("talk-to".parse::<Verb>().ok(), Some(Verb::TalkTo));
        assert_eq!("Climb-up".parse::<Verb>().ok(), Some(Verb::ClimbUp));
        assert_eq!("bank".parse::<Verb>().ok(), Some(Verb::Bank));
    }

    #[test]
    fn bank_applies_to_bankers_and_booths() {
        assert!(Verb::Bank.applies_to(EntityKind::Creature));
        assert!(Verb::Bank.applies_to(EntityKind::WorldObject));
        assert!(!Verb::Bank.applies_to(EntityKind::GroundItem));
    }

    #[test]
    fn invalid_pairs_are_rejected_up_front() {
        assert_eq!(
            Verb::for_kind(EntityKind::WorldObject, Verb::Attack),
            Err(VerbError::NotApplicable {
                verb: Verb::Attack,
                kind: EntityKind::WorldObject
            })
        );
        assert!(Verb::for_kind(EntityKind::Creature, Verb::Attack).is_ok());
    }

    #[test]
    fn typos_are_unknown() {
        assert_eq!(
            Verb::parse_for(EntityKind::Creature, "Atack"),
            Err(VerbError::Unknown("Atack".to_owned()))
        );
    }
}
