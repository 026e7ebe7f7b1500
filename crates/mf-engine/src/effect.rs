//! Item-use effects.
//!
//! The mapping from item to effect is a closed table: new usable content
//! needs a new entry here, not new branches in the engine.

use std::collections::HashMap;

use mf_core::{ContentCatalog, IntegrityIssue, ItemId, Severity, Subject};

/// What using an item does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemEffect {
    /// Restore health and consume the item.
    Heal {
        /// Nominal amount restored (before clamping).
        amount: i32,
        /// Message shown to the player.
        message: String,
    },
    /// Show a message; the item is kept and nothing changes.
    Inspect {
        /// Message shown to the player.
        message: String,
    },
}

impl ItemEffect {
    /// A healing effect.
    pub fn heal(amount: i32, message: impl Into<String>) -> Self {
        Self::Heal {
            amount,
            message: message.into(),
        }
    }

    /// A flavor-only effect.
    pub fn inspect(message: impl Into<String>) -> Self {
        Self::Inspect {
            message: message.into(),
        }
    }

    /// The message shown when the effect fires.
    pub fn message(&self) -> &str {
        match self {
            Self::Heal { message, .. } | Self::Inspect { message } => message,
        }
    }
}

/// Item id to effect.
#[derive(Debug, Clone, Default)]
pub struct ItemEffects {
    effects: HashMap<ItemId, ItemEffect>,
}

impl ItemEffects {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Effects for the shipped items.
    pub fn mystic_forest() -> Self {
        Self::new()
            .with("急救包", ItemEffect::heal(30, "使用了急救包，恢复了 30 点生命值！"))
            .with("罐头食品", ItemEffect::heal(10, "吃了罐头食品，恢复了 10 点生命值！"))
            .with(
                "手电筒",
                ItemEffect::inspect("手电筒照亮了周围的环境，你可以看得更清楚了。"),
            )
            .with(
                "露营刀",
                ItemEffect::inspect("这把露营刀很锋利，可能在关键时刻有用。"),
            )
            .with(
                "树枝",
                ItemEffect::inspect("这是一根结实的树枝，可以作为简单的武器。"),
            )
            .with(
                "生锈的钥匙",
                ItemEffect::inspect("这把钥匙看起来很古老，也许能打开某个重要的门。"),
            )
    }

    /// Add or replace an entry.
    pub fn with(mut self, item: impl Into<ItemId>, effect: ItemEffect) -> Self {
        self.effects.insert(item.into(), effect);
        self
    }

    /// The effect for an item.
    pub fn get(&self, item: &str) -> Option<&ItemEffect> {
        self.effects.get(item)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Cross-check the table against the catalog's `usable` flags.
    pub fn validate(&self, catalog: &ContentCatalog) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();
        for item in catalog.items() {
            if item.usable && self.get(item.id.as_str()).is_none() {
                issues.push(IntegrityIssue {
                    subject: Subject::Item(item.id.clone()),
                    message: "usable but has no effect".to_string(),
                    severity: Severity::Warning,
                });
            }
        }
        let mut orphans: Vec<_> = self
            .effects
            .keys()
            .filter(|id| catalog.get_item(id.as_str()).is_none())
            .collect();
        orphans.sort();
        for id in orphans {
            issues.push(IntegrityIssue {
                subject: Subject::Item(id.clone()),
                message: "effect defined for an item the catalog does not know".to_string(),
                severity: Severity::Warning,
            });
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_table_covers_usable_items() {
        let catalog = ContentCatalog::mystic_forest().unwrap();
        let effects = ItemEffects::mystic_forest();
        assert_eq!(effects.len(), 6);
        assert!(effects.validate(&catalog).is_empty());
    }

    #[test]
    fn healing_items() {
        let effects = ItemEffects::mystic_forest();
        assert!(matches!(
            effects.get("急救包"),
            Some(ItemEffect::Heal { amount: 30, .. })
        ));
        assert!(matches!(
            effects.get("罐头食品"),
            Some(ItemEffect::Heal { amount: 10, .. })
        ));
        assert!(matches!(effects.get("手电筒"), Some(ItemEffect::Inspect { .. })));
        assert!(effects.get("地图碎片").is_none());
    }

    #[test]
    fn validate_reports_gaps() {
        let catalog = ContentCatalog::mystic_forest().unwrap();
        let effects = ItemEffects::new().with("魔法棒", ItemEffect::inspect("..."));
        let issues = effects.validate(&catalog);
        // 6 usable items without effects, plus one orphan effect
        assert_eq!(issues.len(), 7);
        assert!(issues.iter().all(|i| !i.is_error()));
        assert_eq!(issues[0].subject, Subject::Item("树枝".into()));
        assert_eq!(issues[0].to_string(), "warning: item 树枝: usable but has no effect");
        assert_eq!(issues[6].subject, Subject::Item("魔法棒".into()));
    }
}
