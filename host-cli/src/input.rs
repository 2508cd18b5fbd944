//! # Input 模块
//!
//! 把终端里输入的一行文本翻译为玩家意图。
//!
//! | 输入 | 意图 |
//! |------|------|
//! | 空行 / `n` | `Next` |
//! | `1`..`N` | 选择第 N 个选项 |
//! | `r` | `Restart` |
//! | `goto <id>` | `GoToScene` |
//! | `q` | 退出 |

use story_runtime::StoryInput;

/// 终端指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// 交给 Runtime 的意图
    Story(StoryInput),
    /// 退出程序
    Quit,
}

/// 解析一行输入，无法识别时返回 `None`
pub fn parse_command(line: &str) -> Option<PlayerCommand> {
    let line = line.trim();

    let input = match line {
        "" | "n" | "next" => StoryInput::Next,
        "r" | "restart" => StoryInput::Restart,
        "q" | "quit" => return Some(PlayerCommand::Quit),
        _ => {
            if let Some(scene_id) = line.strip_prefix("goto ") {
                let scene_id = scene_id.trim();
                if scene_id.is_empty() {
                    return None;
                }
                StoryInput::go_to(scene_id)
            } else {
                // 屏幕上的选项从 1 开始编号
                let number: usize = line.parse().ok()?;
                StoryInput::choose(number.checked_sub(1)?)
            }
        }
    };

    Some(PlayerCommand::Story(input))
}
