//! Application state and key handling.
//!
//! Everything here is terminal-independent so key flows can be tested
//! without a screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mf_engine::{EngineError, EventLog, GameEvent, GameSession, SceneEnterResult};

use crate::shared::{OutputLine, OutputStyle};

/// Messages kept in the log panel.
const MAX_MESSAGES: usize = 200;

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The scene text and its choices.
    Story,
    /// The inventory list.
    Inventory,
}

/// An action waiting for a yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    /// Throw away the current game and start over.
    Restart,
    /// Leave the program.
    Quit,
}

impl Confirm {
    /// Popup title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Restart => "确认",
            Self::Quit => "退出",
        }
    }

    /// The question shown in the popup.
    pub fn question(self) -> &'static str {
        match self {
            Self::Restart => "确定要重新开始游戏吗？当前进度将会丢失。",
            Self::Quit => "确定要退出游戏吗？",
        }
    }
}

/// Main application state.
pub struct TuiApp {
    session: GameSession,
    log: EventLog,
    /// The scene on screen.
    pub scene: SceneEnterResult,
    /// Panel receiving navigation keys.
    pub focus: Focus,
    /// Selected inventory row.
    pub inventory_cursor: usize,
    /// Scene text scroll offset, in lines.
    pub story_scroll: u16,
    /// Feedback shown in the message panel, oldest first.
    pub messages: Vec<OutputLine>,
    /// Whether to show the help popup.
    pub show_help: bool,
    /// Pending confirmation, shown as a popup.
    pub confirm: Option<Confirm>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl TuiApp {
    /// Take over a session and enter its start scene.
    pub fn new(mut session: GameSession) -> Self {
        let log = EventLog::new();
        session.subscribe(Box::new(log.clone()));
        let scene = session.start();
        let mut app = Self {
            session,
            log,
            scene,
            focus: Focus::Story,
            inventory_cursor: 0,
            story_scroll: 0,
            messages: Vec::new(),
            show_help: false,
            confirm: None,
            should_quit: false,
        };
        app.push(OutputStyle::System, "欢迎来到神秘森林！按 ? 查看帮助。");
        app.drain_events();
        app
    }

    /// The underlying session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if let Some(action) = self.confirm {
            match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                    self.confirm = None;
                    match action {
                        Confirm::Restart => self.restart(),
                        Confirm::Quit => self.should_quit = true,
                    }
                }
                KeyCode::Char('n' | 'N') | KeyCode::Esc => self.confirm = None,
                _ => {}
            }
            return;
        }
        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.confirm = Some(Confirm::Quit),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(n) = c.to_digit(10) {
                    self.choose(n as usize);
                }
            }
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            KeyCode::Esc => self.focus = Focus::Story,
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Char('u') => self.use_selected(),
            KeyCode::Enter if self.focus == Focus::Inventory => self.use_selected(),
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('l') => self.load(),
            KeyCode::Char('r') => self.confirm = Some(Confirm::Restart),
            _ => {}
        }
    }

    /// Pick the `n`-th (one-based) choice.
    pub fn choose(&mut self, n: usize) {
        let result = match n.checked_sub(1) {
            Some(index) => self.session.choose(index),
            None => Err(EngineError::InvalidChoice(n)),
        };
        match result {
            Ok(scene) => self.show(scene),
            Err(EngineError::InvalidChoice(_)) => {
                self.push(OutputStyle::Error, format!("无效的选择: {n}"));
            }
            Err(EngineError::GameOver) => {
                self.push(OutputStyle::Error, "游戏已经结束。按 r 重新开始，或 l 读档。");
            }
            Err(e) => self.push(OutputStyle::Error, e.to_string()),
        }
    }

    /// Use the selected inventory item.
    pub fn use_selected(&mut self) {
        let Some(entry) = self.session.inventory().into_iter().nth(self.inventory_cursor) else {
            self.push(OutputStyle::Error, "背包是空的。");
            return;
        };
        match self.session.use_item(entry.id.as_str()) {
            Ok(used) => {
                self.push(OutputStyle::Info, used.message);
                self.drain_events();
                self.clamp_cursor();
            }
            Err(e) => self.push(OutputStyle::Error, e.to_string()),
        }
    }

    /// Write the save slot.
    pub fn save(&mut self) {
        match self.session.save() {
            Ok(()) => self.drain_events(),
            Err(e) => self.push(OutputStyle::Error, format!("保存失败: {e}")),
        }
    }

    /// Replace the game with the save slot.
    pub fn load(&mut self) {
        match self.session.load() {
            Ok(scene) => {
                self.inventory_cursor = 0;
                self.show(scene);
            }
            Err(e) => self.push(OutputStyle::Error, e.to_string()),
        }
    }

    /// Start over.
    pub fn restart(&mut self) {
        let scene = self.session.restart();
        self.inventory_cursor = 0;
        self.focus = Focus::Story;
        self.show(scene);
    }

    fn show(&mut self, scene: SceneEnterResult) {
        self.scene = scene;
        self.story_scroll = 0;
        self.drain_events();
        if let Some(ending) = self.scene.ending {
            self.push(OutputStyle::System, ending.message());
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Story => Focus::Inventory,
            Focus::Inventory => Focus::Story,
        };
        self.clamp_cursor();
    }

    fn move_down(&mut self) {
        match self.focus {
            Focus::Story => self.story_scroll = self.story_scroll.saturating_add(1),
            Focus::Inventory => {
                let len = self.session.player().inventory().len();
                if self.inventory_cursor + 1 < len {
                    self.inventory_cursor += 1;
                }
            }
        }
    }

    fn move_up(&mut self) {
        match self.focus {
            Focus::Story => self.story_scroll = self.story_scroll.saturating_sub(1),
            Focus::Inventory => self.inventory_cursor = self.inventory_cursor.saturating_sub(1),
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.session.player().inventory().len();
        self.inventory_cursor = self.inventory_cursor.min(len.saturating_sub(1));
    }

    /// Turn session events into log lines.
    fn drain_events(&mut self) {
        for event in self.log.take() {
            let style = match &event {
                GameEvent::ItemAcquired(_) | GameEvent::GameSaved => OutputStyle::Gain,
                GameEvent::GameLoaded | GameEvent::GameRestarted => OutputStyle::System,
                GameEvent::HealthChanged { .. } => OutputStyle::Info,
                _ => continue,
            };
            self.push(style, event.to_string());
        }
    }

    fn push(&mut self, style: OutputStyle, text: impl Into<String>) {
        self.messages.push(OutputLine::new(style, text));
        if self.messages.len() > MAX_MESSAGES {
            let excess = self.messages.len() - MAX_MESSAGES;
            self.messages.drain(..excess);
        }
    }
}
