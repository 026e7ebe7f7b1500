//! Entry requirements evaluated against player state.

use serde::{Deserialize, Serialize};

use crate::id::ItemId;
use crate::player::Player;

/// A predicate over [`Player`] that must hold to enter a scene.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    /// The player carries the item.
    HasItem(ItemId),
    /// The player does not carry the item.
    LacksItem(ItemId),
    /// The flag is present and truthy.
    FlagSet(String),
    /// Health is at least this value.
    MinHealth(i32),
    /// Logical NOT.
    Not(Box<Requirement>),
    /// Logical AND.
    All(Vec<Requirement>),
    /// Logical OR.
    Any(Vec<Requirement>),
    /// Always true.
    #[default]
    Always,
}

impl Requirement {
    /// Evaluate against the current player state.
    pub fn is_met(&self, player: &Player) -> bool {
        match self {
            Requirement::HasItem(item) => player.has_item(item.as_str()),
            Requirement::LacksItem(item) => !player.has_item(item.as_str()),
            Requirement::FlagSet(key) => player.flag(key).is_some_and(|v| v.is_truthy()),
            Requirement::MinHealth(min) => player.health() >= *min,
            Requirement::Not(inner) => !inner.is_met(player),
            Requirement::All(reqs) => reqs.iter().all(|r| r.is_met(player)),
            Requirement::Any(reqs) => reqs.iter().any(|r| r.is_met(player)),
            Requirement::Always => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::FlagValue;

    fn player() -> Player {
        Player::new("start")
    }

    #[test]
    fn has_and_lacks_item() {
        let mut p = player();
        let has = Requirement::HasItem("手电筒".into());
        let lacks = Requirement::LacksItem("手电筒".into());
        assert!(!has.is_met(&p));
        assert!(lacks.is_met(&p));

        p.grant_item("手电筒");
        assert!(has.is_met(&p));
        assert!(!lacks.is_met(&p));
    }

    #[test]
    fn flag_set() {
        let mut p = player();
        let req = Requirement::FlagSet("met_wolf".to_string());
        assert!(!req.is_met(&p));

        p.set_flag("met_wolf", FlagValue::Bool(false));
        assert!(!req.is_met(&p));

        p.set_flag("met_wolf", FlagValue::Bool(true));
        assert!(req.is_met(&p));
    }

    #[test]
    fn min_health() {
        let mut p = player();
        let req = Requirement::MinHealth(50);
        assert!(req.is_met(&p));
        p.damage(51);
        assert!(!req.is_met(&p));
    }

    #[test]
    fn combinators() {
        let mut p = player();
        p.grant_item("a");

        let all = Requirement::All(vec![
            Requirement::HasItem("a".into()),
            Requirement::HasItem("b".into()),
        ]);
        let any = Requirement::Any(vec![
            Requirement::HasItem("a".into()),
            Requirement::HasItem("b".into()),
        ]);
        assert!(!all.is_met(&p));
        assert!(any.is_met(&p));
        assert!(Requirement::Not(Box::new(all)).is_met(&p));
        assert!(Requirement::Always.is_met(&p));
    }
}
