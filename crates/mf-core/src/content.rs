//! The shipped Mystic Forest story.
//!
//! Several choices point at scenes that were never written. They are kept
//! as authored: the engine routes them to the bad ending.

use crate::catalog::ContentCatalog;
use crate::error::CoreResult;
use crate::item::Item;
use crate::scene::Scene;

impl ContentCatalog {
    /// Build the catalog for the shipped story.
    pub fn mystic_forest() -> CoreResult<Self> {
        let mut builder = ContentCatalog::builder()
            .start("start")
            .good_ending("ending_good")
            .bad_ending("ending_bad");
        for scene in scenes() {
            builder = builder.scene(scene);
        }
        for item in items() {
            builder = builder.item(item);
        }
        builder.build()
    }
}

fn scenes() -> Vec<Scene> {
    vec![
        Scene::new(
            "start",
            "神秘森林",
            "你醒来时发现自己身处一片神秘的森林中。四周弥漫着薄雾，远处传来奇怪的声音。你感到有些迷茫，但必须找到出路。",
        )
        .with_choice("沿着小径向前走", "forest_path")
        .with_choice("检查周围的环境", "examine_area")
        .with_choice("大声呼救", "call_for_help"),
        Scene::new(
            "forest_path",
            "森林小径",
            "你沿着一条蜿蜒的小径前进。路两旁的树木越来越密集，阳光透过树叶的缝隙洒下斑驳的光影。",
        )
        .with_choice("继续前进", "deep_forest")
        .with_choice("返回起点", "start")
        .with_choice("仔细观察路边", "check_roadside")
        .with_grant("树枝"),
        Scene::new(
            "examine_area",
            "仔细观察",
            "你仔细观察周围，发现了一些有趣的细节。地上有一些奇怪的脚印，不远处似乎有一个山洞。",
        )
        .with_choice("跟随脚印", "follow_tracks")
        .with_choice("探索山洞", "cave_entrance")
        .with_choice("回到原点", "start")
        .with_grant("地图碎片"),
        Scene::new(
            "call_for_help",
            "呼救",
            "你大声呼救，声音在森林中回荡。突然，你听到了回应声，但似乎不是人类的声音...",
        )
        .with_choice("朝着声音方向前进", "mysterious_sound")
        .with_choice("保持安静等待", "wait_quietly")
        .with_choice("逃离这个方向", "run_away"),
        Scene::new(
            "deep_forest",
            "森林深处",
            "你来到了森林深处，这里更加阴暗。前方有一座古老的小屋，看起来已经废弃很久了。",
        )
        .with_choice("进入小屋", "old_house")
        .with_choice("绕过小屋继续前进", "bypass_house")
        .with_choice("返回", "forest_path")
        .with_grant("生锈的钥匙"),
        Scene::new(
            "check_roadside",
            "路边发现",
            "在路边，你发现了一个破旧的背包，里面有一些有用的物品。",
        )
        .with_choice("拿走背包", "take_backpack")
        .with_choice("继续前进", "deep_forest")
        .with_choice("返回", "forest_path")
        .with_grant("急救包")
        .with_grant("手电筒"),
        Scene::new(
            "follow_tracks",
            "跟随脚印",
            "你跟着脚印前进，发现它们通向一个隐藏的营地。营地里有篝火的痕迹和一些生活用品。",
        )
        .with_choice("搜查营地", "search_camp")
        .with_choice("继续跟踪脚印", "continue_tracking")
        .with_choice("返回", "examine_area")
        .with_grant("露营刀")
        .with_grant("罐头食品"),
        Scene::new(
            "cave_entrance",
            "山洞入口",
            "你站在山洞入口，里面传来阵阵寒意。洞口有一些奇怪的符号，似乎在警告着什么。",
        )
        .with_choice("勇敢地进入", "inside_cave")
        .with_choice("先在外面准备", "prepare_outside")
        .with_choice("放弃探索", "examine_area"),
        Scene::new(
            "mysterious_sound",
            "神秘声音",
            "你朝着声音的方向前进，发现了一只受伤的狼。它看起来很痛苦，但眼神中透露出一丝友善。",
        )
        .with_choice("帮助狼", "help_wolf")
        .with_choice("小心地绕过", "avoid_wolf")
        .with_choice("慢慢后退", "back_away")
        .with_grant("狼牙项链"),
        Scene::new(
            "old_house",
            "古老小屋",
            "你推开门进入小屋。里面布满灰尘，但似乎有人居住的痕迹。桌上有一本日记。",
        )
        .with_choice("阅读日记", "read_diary")
        .with_choice("搜查房间", "search_room")
        .with_choice("离开小屋", "deep_forest")
        .with_grant("神秘日记")
        .with_grant("古老护身符"),
        Scene::new(
            "inside_cave",
            "山洞内部",
            "山洞内部比想象的要明亮，墙壁上有发光的苔藓。深处传来水滴声，似乎有地下河。",
        )
        .with_choice("探索深处", "cave_deep")
        .with_choice("检查发光苔藓", "examine_moss")
        .with_choice("离开山洞", "cave_entrance")
        .with_grant("发光苔藓")
        .with_grant("水晶碎片"),
        Scene::new(
            "help_wolf",
            "帮助狼",
            "你小心翼翼地接近狼，用急救包为它处理伤口。狼感激地看着你，然后起身引你走向一个隐藏的地方。",
        )
        .with_choice("跟随狼", "follow_wolf")
        .with_choice("感谢后离开", "thank_and_leave")
        .with_choice("询问更多信息", "ask_wolf")
        .with_grant("狼的友谊"),
        Scene::new(
            "cave_deep",
            "山洞深处",
            "在山洞深处，你发现了一个地下湖泊。湖水清澈见底，湖中央有一个小岛，岛上有一座古老的祭坛。",
        )
        .with_choice("游向小岛", "swim_to_island")
        .with_choice("在湖边搜索", "search_lakeside")
        .with_choice("返回", "inside_cave")
        .with_grant("古老符文"),
        Scene::new(
            "swim_to_island",
            "祭坛小岛",
            "你游到小岛上，发现祭坛上有一个发光的宝箱。当你靠近时，宝箱自动打开了。",
        )
        .with_choice("拿取宝物", "take_treasure")
        .with_choice("研究祭坛", "study_altar")
        .with_choice("返回", "cave_deep")
        .with_grant("神秘宝物"),
        Scene::new(
            "ending_good",
            "完美结局",
            "恭喜你！你成功解开了森林的秘密，找到了传说中的宝藏。狼成为了你的忠实伙伴，你带着丰富的收获离开了这片神秘森林。",
        ),
        Scene::new(
            "ending_bad",
            "悲剧结局",
            "很遗憾，你在森林中迷失了方向，最终成为了森林的一部分。也许下一个冒险者会发现你的故事...",
        ),
    ]
}

fn items() -> Vec<Item> {
    vec![
        Item::new("树枝", "一根结实的树枝，可以用作武器或工具").usable(),
        Item::new("地图碎片", "一张古老的地图碎片，似乎指向某个重要地点"),
        Item::new("生锈的钥匙", "一把古老的钥匙，不知道能打开什么").usable(),
        Item::new("急救包", "可以恢复生命值的医疗用品").usable(),
        Item::new("手电筒", "可以在黑暗中照明的工具").usable(),
        Item::new("露营刀", "一把锋利的露营刀，很有用").usable(),
        Item::new("罐头食品", "可以充饥的食物").usable(),
        Item::new("狼牙项链", "一个神秘的狼牙项链，似乎有特殊力量"),
        Item::new("神秘日记", "记录着森林秘密的古老日记"),
        Item::new("古老护身符", "一个提供保护的神秘护身符"),
        Item::new("发光苔藓", "可以在黑暗中发光的特殊苔藓"),
        Item::new("水晶碎片", "美丽的水晶碎片，蕴含着神秘力量"),
        Item::new("狼的友谊", "与狼建立的友谊，这是最珍贵的宝物"),
        Item::new("古老符文", "记录着古老智慧的神秘符文"),
        Item::new("神秘宝物", "传说中的神秘宝物，拥有无穷的力量"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds() {
        let catalog = ContentCatalog::mystic_forest().unwrap();
        assert_eq!(catalog.scene_count(), 16);
        assert_eq!(catalog.item_count(), 15);
        assert_eq!(catalog.start(), "start");
        assert_eq!(catalog.good_ending(), "ending_good");
        assert_eq!(catalog.bad_ending(), "ending_bad");
    }

    #[test]
    fn exactly_two_terminal_scenes() {
        let catalog = ContentCatalog::mystic_forest().unwrap();
        let terminals: Vec<_> = catalog
            .scenes()
            .filter(|s| s.is_terminal())
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(terminals, ["ending_good", "ending_bad"]);
    }

    #[test]
    fn no_shipped_requirements() {
        let catalog = ContentCatalog::mystic_forest().unwrap();
        assert!(catalog.scenes().all(|s| s.requirements.is_empty()));
    }

    #[test]
    fn forest_path_grants_branch() {
        let catalog = ContentCatalog::mystic_forest().unwrap();
        let scene = catalog.get_scene("forest_path").unwrap();
        assert_eq!(scene.title, "森林小径");
        assert_eq!(scene.grants, [crate::id::ItemId::from("树枝")]);
    }
}
