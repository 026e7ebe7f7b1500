//! Narrative shortcuts applied before a choice is routed.

use mf_core::{ContentCatalog, IntegrityIssue, SceneId, Severity, Subject};

/// One `(current_scene, chosen_target) -> replacement` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    /// Scene the player must be in.
    pub from: SceneId,
    /// Target the player picked.
    pub chosen: SceneId,
    /// Where the player actually goes.
    pub to: SceneId,
}

/// Table of narrative overrides, consulted before generic routing.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: Vec<Override>,
}

impl OverrideTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The two shortcuts of the shipped story: following the wolf leads
    /// straight to the deep cave, and taking the treasure wins the game.
    pub fn mystic_forest(catalog: &ContentCatalog) -> Self {
        Self::new()
            .with("help_wolf", "follow_wolf", "cave_deep")
            .with("swim_to_island", "take_treasure", catalog.good_ending().clone())
    }

    /// Add a rule. A later rule for the same pair replaces the earlier one.
    pub fn with(
        mut self,
        from: impl Into<SceneId>,
        chosen: impl Into<SceneId>,
        to: impl Into<SceneId>,
    ) -> Self {
        let rule = Override {
            from: from.into(),
            chosen: chosen.into(),
            to: to.into(),
        };
        self.entries
            .retain(|e| !(e.from == rule.from && e.chosen == rule.chosen));
        self.entries.push(rule);
        self
    }

    /// The replacement target for this pair, if any.
    pub fn lookup(&self, current: &str, chosen: &str) -> Option<&SceneId> {
        self.entries
            .iter()
            .find(|e| e.from == current && e.chosen == chosen)
            .map(|e| &e.to)
    }

    /// All rules, in insertion order.
    pub fn entries(&self) -> &[Override] {
        &self.entries
    }

    /// `(from, to)` graph edges the rules add, for integrity checks.
    pub fn edges(&self) -> Vec<(SceneId, SceneId)> {
        self.entries
            .iter()
            .map(|e| (e.from.clone(), e.to.clone()))
            .collect()
    }

    /// Check that every rule names real scenes.
    ///
    /// A replacement target that does not exist would silently send the
    /// player to the bad ending, so it is an error. An unknown source scene
    /// only makes the rule dead.
    pub fn validate(&self, catalog: &ContentCatalog) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();
        for rule in &self.entries {
            if !catalog.has_scene(rule.to.as_str()) {
                issues.push(IntegrityIssue {
                    subject: Subject::Scene(rule.from.clone()),
                    message: format!(
                        "override for \"{}\" targets unknown scene \"{}\"",
                        rule.chosen, rule.to
                    ),
                    severity: Severity::Error,
                });
            }
            if !catalog.has_scene(rule.from.as_str()) {
                issues.push(IntegrityIssue {
                    subject: Subject::Scene(rule.from.clone()),
                    message: "override source scene is not defined".to_string(),
                    severity: Severity::Warning,
                });
            }
        }
        issues
    }
}
