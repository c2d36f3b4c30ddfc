//! State of the locally controlled actor.

use std::collections::BTreeMap;

use super::{ActorRef, EntityId, Position};

/// Trainable skills.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Skill {
    Attack,
    Defence,
    Strength,
    Hitpoints,
    Ranged,
    Prayer,
    Magic,
    Cooking,
    Woodcutting,
    Fletching,
    Fishing,
    Firemaking,
    Crafting,
    Smithing,
    Mining,
    Herblore,
    Agility,
    Thieving,
    Slayer,
    Farming,
    Runecraft,
    Hunter,
    Construction,
}

/// Base and boosted/drained level of one skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Level {
    pub base: u32,
    pub current: u32,
}

impl Level {
    pub const fn new(base: u32, current: u32) -> Self {
        Self { base, current }
    }

    pub const fn is_drained(&self) -> bool {
        self.current < self.base
    }
}

/// Skill levels of the local actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillLevels {
    levels: BTreeMap<Skill, Level>,
}

impl SkillLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, skill: Skill, level: Level) -> Self {
        self.levels.insert(skill, level);
        self
    }

    pub fn set(&mut self, skill: Skill, level: Level) {
        self.levels.insert(skill, level);
    }

    /// Level of `skill`; untrained skills read as 1/1.
    pub fn get(&self, skill: Skill) -> Level {
        self.levels.get(&skill).copied().unwrap_or(Level::new(1, 1))
    }

    pub fn base(&self, skill: Skill) -> u32 {
        self.get(skill).base
    }

    pub fn current(&self, skill: Skill) -> u32 {
        self.get(skill).current
    }
}

/// The actor the script controls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalActor {
    pub handle: EntityId,
    pub name: String,
    pub position: Position,
    /// Actor currently being fought, if any.
    pub target: Option<ActorRef>,
    /// Current animation id; `None` while idle.
    pub animation: Option<u32>,
    pub levels: SkillLevels,
}

impl LocalActor {
    pub fn actor_ref(&self) -> ActorRef {
        ActorRef::Player(self.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untrained_skills_default_to_one() {
        let levels = SkillLevels::new().with(Skill::Attack, Level::new(40, 35));
        assert_eq!(levels.base(Skill::Attack), 40);
        assert!(levels.get(Skill::Attack).is_drained());
        assert_eq!(levels.get(Skill::Hunter), Level::new(1, 1));
    }

    #[test]
    fn skill_names_parse_case_insensitively() {
        assert_eq!("Defence".parse::<Skill>().ok(), Some(Skill::Defence));
        assert_eq!(Skill::Woodcutting.to_string(), "woodcutting");
    }
}
