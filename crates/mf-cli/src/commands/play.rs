//! Line-mode play on stdin/stdout.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use mf_core::ItemId;
use mf_engine::{
    EngineError, EventLog, GameConfig, GameEvent, GameSession, SceneEnterResult,
};

/// One line of player input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Choice(usize),
    Use(String),
    Inventory,
    Save,
    Load,
    Restart,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        if let Ok(n) = line.parse::<usize>() {
            return Self::Choice(n);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        match word.to_lowercase().as_str() {
            "use" | "u" | "使用" if !rest.is_empty() => Self::Use(rest.to_string()),
            "inv" | "i" | "inventory" | "背包" => Self::Inventory,
            "save" | "保存" => Self::Save,
            "load" | "加载" => Self::Load,
            "restart" | "重新开始" => Self::Restart,
            "help" | "h" | "?" | "帮助" => Self::Help,
            "quit" | "q" | "exit" | "退出" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

const HELP: &str = "\
  数字      选择对应的选项
  use 物品  使用物品 (也可以用物品编号)
  inv       查看背包
  save      保存游戏
  load      加载游戏
  restart   重新开始
  help      显示帮助
  quit      退出游戏";

pub fn run(config: GameConfig, resume: bool) -> Result<(), String> {
    let catalog = super::load_catalog()?;
    let mut session = GameSession::new(catalog, config);
    let log = EventLog::new();
    session.subscribe(Box::new(log.clone()));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut game = LineGame {
        session: &mut session,
        log,
        out: stdout.lock(),
    };
    game.play(stdin.lock(), resume).map_err(|e| e.to_string())
}

struct LineGame<'a, W> {
    session: &'a mut GameSession,
    log: EventLog,
    out: W,
}

impl<W: Write> LineGame<'_, W> {
    fn play(&mut self, input: impl BufRead, resume: bool) -> io::Result<()> {
        writeln!(self.out, "{}", "欢迎来到神秘森林！输入 help 查看帮助。".bold())?;
        let resumed = if resume && self.session.has_save() {
            self.load()?
        } else {
            false
        };
        if !resumed {
            let scene = self.session.start();
            self.show_scene(&scene)?;
        }
        self.prompt()?;

        for line in input.lines() {
            match Input::parse(&line?) {
                Input::Choice(n) => self.choose(n)?,
                Input::Use(query) => self.use_item(&query)?,
                Input::Inventory => self.inventory()?,
                Input::Save => match self.session.save() {
                    Ok(()) => {
                        self.flush_events()?;
                        let location = self.session.save_location();
                        writeln!(self.out, "{}", format!("存档位置: {location}").dimmed())?;
                    }
                    Err(e) => writeln!(self.out, "保存失败: {e}")?,
                },
                Input::Load => {
                    self.load()?;
                }
                Input::Restart => {
                    let scene = self.session.restart();
                    self.flush_events()?;
                    self.show_scene(&scene)?;
                }
                Input::Help => writeln!(self.out, "{HELP}")?,
                Input::Quit => {
                    writeln!(self.out, "再见！")?;
                    return Ok(());
                }
                Input::Empty => {}
                Input::Unknown(text) => {
                    writeln!(self.out, "不明白 \"{text}\"。输入 help 查看帮助。")?;
                }
            }
            self.prompt()?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn choose(&mut self, n: usize) -> io::Result<()> {
        let result = match n.checked_sub(1) {
            Some(index) => self.session.choose(index),
            None => Err(EngineError::InvalidChoice(n)),
        };
        match result {
            Ok(scene) => {
                self.show_scene(&scene)?;
            }
            Err(EngineError::InvalidChoice(_)) => writeln!(self.out, "无效的选择: {n}")?,
            Err(EngineError::GameOver) => {
                writeln!(self.out, "游戏已经结束。输入 restart 重新开始，或 quit 退出。")?;
            }
            Err(e) => writeln!(self.out, "{e}")?,
        }
        Ok(())
    }

    fn use_item(&mut self, query: &str) -> io::Result<()> {
        let item = self.resolve_item(query);
        match self.session.use_item(item.as_str()) {
            Ok(used) => {
                self.log.take();
                writeln!(self.out, "{}", used.message)?;
                if used.consumed {
                    writeln!(
                        self.out,
                        "生命值: {}/{}",
                        used.health,
                        self.session.player().max_health()
                    )?;
                }
            }
            Err(e) => writeln!(self.out, "{e}")?,
        }
        Ok(())
    }

    /// Match a typed item against the inventory: inventory number, exact
    /// id or name, then the closest name.
    fn resolve_item(&self, query: &str) -> ItemId {
        let inventory = self.session.inventory();
        if let Ok(n) = query.parse::<usize>()
            && let Some(entry) = n.checked_sub(1).and_then(|i| inventory.get(i))
        {
            return entry.id.clone();
        }
        if let Some(entry) = inventory
            .iter()
            .find(|e| e.id == query || e.name == query)
        {
            return entry.id.clone();
        }
        inventory
            .iter()
            .map(|e| (strsim::normalized_levenshtein(query, &e.name), e))
            .filter(|(score, _)| *score >= 0.5)
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, e)| e.id.clone())
            .unwrap_or_else(|| ItemId::from(query))
    }

    fn inventory(&mut self) -> io::Result<()> {
        let inventory = self.session.inventory();
        let player = self.session.player();
        writeln!(self.out, "生命值: {}/{}", player.health(), player.max_health())?;
        if inventory.is_empty() {
            writeln!(self.out, "背包是空的。")?;
            return Ok(());
        }
        writeln!(self.out, "背包:")?;
        for (i, entry) in inventory.iter().enumerate() {
            let marker = if entry.usable { "*" } else { " " };
            writeln!(
                self.out,
                "  {}. {}{marker} - {}",
                i + 1,
                entry.name,
                entry.description
            )?;
        }
        Ok(())
    }

    /// Returns whether a save was loaded.
    fn load(&mut self) -> io::Result<bool> {
        match self.session.load() {
            Ok(scene) => {
                self.flush_events()?;
                self.show_scene(&scene)?;
                Ok(true)
            }
            Err(e) => {
                writeln!(self.out, "{e}")?;
                Ok(false)
            }
        }
    }

    fn show_scene(&mut self, scene: &SceneEnterResult) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "== {} ==", scene.title.bold())?;
        writeln!(self.out, "{}", scene.description)?;
        self.flush_events()?;

        if let Some(ending) = scene.ending {
            writeln!(self.out)?;
            writeln!(self.out, "{}", ending.message().bold())?;
        }
        if scene.terminal {
            writeln!(self.out, "输入 restart 重新开始，或 quit 退出。")?;
            return Ok(());
        }

        writeln!(self.out)?;
        for (i, choice) in scene.choices.iter().enumerate() {
            writeln!(self.out, "  {}. {}", i + 1, choice.label)?;
        }
        Ok(())
    }

    /// Print the events worth telling the player about.
    fn flush_events(&mut self) -> io::Result<()> {
        for event in self.log.take() {
            match event {
                GameEvent::ItemAcquired(_) | GameEvent::GameSaved | GameEvent::GameLoaded => {
                    writeln!(self.out, "{}", event.to_string().green())?;
                }
                GameEvent::HealthChanged { .. } => writeln!(self.out, "{event}")?,
                _ => {}
            }
        }
        Ok(())
    }

    fn prompt(&mut self) -> io::Result<()> {
        let player = self.session.player();
        write!(self.out, "[{}/{}] > ", player.health(), player.max_health())?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_core::ContentCatalog;
    use mf_engine::MemoryStore;
    use std::sync::Arc;

    fn play(script: &str) -> String {
        let catalog = Arc::new(ContentCatalog::mystic_forest().unwrap());
        let mut session = GameSession::new(catalog, GameConfig::default())
            .with_store(Box::new(MemoryStore::new()));
        let log = EventLog::new();
        session.subscribe(Box::new(log.clone()));

        let mut out = Vec::new();
        let mut game = LineGame {
            session: &mut session,
            log,
            out: &mut out,
        };
        game.play(script.as_bytes(), false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_commands() {
        assert_eq!(Input::parse(" 2 "), Input::Choice(2));
        assert_eq!(Input::parse("use 急救包"), Input::Use("急救包".to_string()));
        assert_eq!(Input::parse("使用 手电筒"), Input::Use("手电筒".to_string()));
        assert_eq!(Input::parse("INV"), Input::Inventory);
        assert_eq!(Input::parse("背包"), Input::Inventory);
        assert_eq!(Input::parse("q"), Input::Quit);
        assert_eq!(Input::parse(""), Input::Empty);
        assert_eq!(Input::parse("use"), Input::Unknown("use".to_string()));
        assert_eq!(Input::parse("dance"), Input::Unknown("dance".to_string()));
    }

    #[test]
    fn first_choice_enters_forest_path() {
        let out = play("1\nquit\n");
        assert!(out.contains("森林小径"));
        assert!(out.contains("获得物品: 树枝"));
        assert!(out.contains("再见！"));
    }

    #[test]
    fn invalid_choice_is_reported() {
        let out = play("0\n7\n");
        assert!(out.contains("无效的选择: 0"));
        assert!(out.contains("无效的选择: 7"));
    }

    #[test]
    fn use_by_fuzzy_name_and_number() {
        let out = play("1\nuse 树\nuse 1\n");
        assert_eq!(out.matches("这是一根结实的树枝，可以作为简单的武器。").count(), 2);
    }

    #[test]
    fn non_usable_item() {
        let out = play("2\nuse 地图碎片\n");
        assert!(out.contains("这个物品不能使用。"));
    }

    #[test]
    fn good_ending_route() {
        let out = play("2\n2\n1\n1\n1\n1\n1\n");
        assert!(out.contains("完美结局"));
        assert!(out.contains("恭喜你完成了冒险！你找到了传说中的宝藏，成为了森林的传奇。"));
        assert!(out.contains("游戏已经结束。"));
    }

    #[test]
    fn save_and_load() {
        let out = play("load\n1\nsave\n1\nload\ninv\n");
        assert!(out.contains("没有找到存档文件！"));
        assert!(out.contains("游戏已保存！"));
        assert!(out.contains("存档位置: memory"));
        assert!(out.contains("游戏已加载！"));
        assert!(out.contains("1. 树枝*"));
    }
}
