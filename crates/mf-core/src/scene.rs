use serde::{Deserialize, Serialize};

use crate::id::{ItemId, SceneId};
use crate::player::Player;
use crate::requirement::Requirement;

/// A labeled edge from one scene to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Text shown on the choice button.
    pub label: String,
    /// Scene the choice leads to. May be unauthored; the engine then
    /// routes to the bad ending.
    pub target: SceneId,
}

impl Choice {
    /// Create a choice.
    pub fn new(label: impl Into<String>, target: impl Into<SceneId>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
        }
    }
}

/// A node in the narrative graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Unique identifier.
    pub id: SceneId,
    /// Heading shown above the description.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Outgoing choices in display order. Empty for terminal scenes.
    pub choices: Vec<Choice>,
    /// Items granted on entry unless already held.
    pub grants: Vec<ItemId>,
    /// Conditions gating entry. Empty in all shipped content.
    pub requirements: Vec<Requirement>,
}

impl Scene {
    /// Create a scene with no choices, grants, or requirements.
    pub fn new(
        id: impl Into<SceneId>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            choices: Vec::new(),
            grants: Vec::new(),
            requirements: Vec::new(),
        }
    }

    /// Append a choice.
    pub fn with_choice(mut self, label: impl Into<String>, target: impl Into<SceneId>) -> Self {
        self.choices.push(Choice::new(label, target));
        self
    }

    /// Append an item grant.
    pub fn with_grant(mut self, item: impl Into<ItemId>) -> Self {
        self.grants.push(item.into());
        self
    }

    /// Append an entry requirement.
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// A scene with no outgoing choices ends the game.
    pub fn is_terminal(&self) -> bool {
        self.choices.is_empty()
    }

    /// Whether every entry requirement holds for `player`.
    pub fn admits(&self, player: &Player) -> bool {
        self.requirements.iter().all(|r| r.is_met(player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_when_no_choices() {
        let ending = Scene::new("end", "The End", "Fin.");
        assert!(ending.is_terminal());

        let open = Scene::new("start", "Start", "").with_choice("go", "end");
        assert!(!open.is_terminal());
    }

    #[test]
    fn admits_without_requirements() {
        let scene = Scene::new("start", "Start", "");
        assert!(scene.admits(&Player::new("start")));
    }

    #[test]
    fn admits_checks_every_requirement() {
        let scene = Scene::new("vault", "Vault", "")
            .with_requirement(Requirement::HasItem("key".into()))
            .with_requirement(Requirement::MinHealth(50));

        let mut player = Player::new("start");
        assert!(!scene.admits(&player));

        player.grant_item("key");
        assert!(scene.admits(&player));

        player.damage(60);
        assert!(!scene.admits(&player));
    }
}
