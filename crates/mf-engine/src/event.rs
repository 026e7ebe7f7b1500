//! Events emitted to presentation layers.
//!
//! Observers are notified synchronously after the engine has finished
//! mutating state. They only see `&GameEvent` and cannot touch the player.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use mf_core::{ItemId, SceneId};

/// Which designated ending was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The winning ending.
    Good,
    /// The losing ending.
    Bad,
}

impl Ending {
    /// Closing line shown under the ending scene.
    pub fn message(self) -> &'static str {
        match self {
            Self::Good => "恭喜你完成了冒险！你找到了传说中的宝藏，成为了森林的传奇。",
            Self::Bad => "很遗憾，这次冒险失败了。也许下次会有更好的结果...",
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "完美结局"),
            Self::Bad => write!(f, "悲剧结局"),
        }
    }
}

/// Something that happened during a session.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The player entered a scene.
    SceneEntered {
        /// The scene entered.
        scene: SceneId,
        /// Its title.
        title: String,
    },
    /// An unknown target was replaced by the bad ending.
    Redirected {
        /// The target that did not resolve.
        from: SceneId,
        /// The scene actually entered.
        to: SceneId,
    },
    /// An item was added to the inventory for the first time.
    ItemAcquired(ItemId),
    /// An item was used.
    ItemUsed {
        /// The item.
        item: ItemId,
        /// Whether it left the inventory.
        consumed: bool,
    },
    /// Health changed.
    HealthChanged {
        /// Before.
        from: i32,
        /// After.
        to: i32,
    },
    /// A designated ending was reached.
    EndingReached(Ending),
    /// The save slot was written.
    GameSaved,
    /// The save slot was read into the session.
    GameLoaded,
    /// A fresh player replaced the current one.
    GameRestarted,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SceneEntered { title, .. } => write!(f, "当前位置: {title}"),
            Self::Redirected { from, to } => write!(f, "{from} 不存在，前往 {to}"),
            Self::ItemAcquired(item) => write!(f, "获得物品: {item}"),
            Self::ItemUsed { item, .. } => write!(f, "使用了{item}"),
            Self::HealthChanged { from, to } => write!(f, "生命值: {from} → {to}"),
            Self::EndingReached(ending) => write!(f, "{ending}"),
            Self::GameSaved => write!(f, "游戏已保存！"),
            Self::GameLoaded => write!(f, "游戏已加载！"),
            Self::GameRestarted => write!(f, "重新开始游戏"),
        }
    }
}

/// A sink for [`GameEvent`]s.
pub trait GameObserver {
    /// Called once per event, in emission order.
    fn notify(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> GameObserver for F {
    fn notify(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// A recording observer. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything recorded so far.
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl GameObserver for EventLog {
    fn notify(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
