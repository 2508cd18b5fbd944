//! # Executor 模块
//!
//! 将一行对话（或一个终止原因）转换为 Command。
//!
//! ## 职责
//!
//! - 读取 DialogueLine
//! - 产生对应的 Command
//! - 决定执行后停在哪个阶段（等待 Next 还是等待选择）

use crate::command::{ChoiceView, Command};
use crate::runtime::focus::focus_policy;
use crate::scene::{DialogueLine, Scene};
use crate::state::{FinishReason, StoryPhase};

/// 执行结果
#[derive(Debug)]
pub struct ExecuteResult {
    /// 产生的命令
    pub commands: Vec<Command>,
    /// 执行后所处的阶段
    pub phase: StoryPhase,
}

/// 把当前对话行转换为 Command
///
/// 顺序固定：说话者、文本、左右立绘、背景（若场景有），
/// 最后是选项或"下一句"控件。
pub fn execute_line(scene: &Scene, line: &DialogueLine) -> ExecuteResult {
    let mut commands = vec![
        Command::SetSpeakerName {
            name: line.character_name.clone(),
        },
        Command::SetDialogueText {
            text: line.text.clone(),
        },
    ];
    commands.extend(focus_policy(line).into_commands());

    if let Some(background) = scene.background() {
        commands.push(Command::SetBackground {
            image: Some(background.to_string()),
        });
    }

    if line.has_choices() {
        commands.push(Command::HideNextControl);
        commands.push(Command::ShowChoices {
            choices: line
                .choices
                .iter()
                .map(|c| ChoiceView {
                    text: c.choice_text.clone(),
                    target_scene_id: c.next_scene_id.clone(),
                })
                .collect(),
        });
        ExecuteResult {
            commands,
            phase: StoryPhase::AwaitingChoice {
                choice_count: line.choices.len(),
            },
        }
    } else {
        commands.push(Command::ShowNextControl);
        ExecuteResult {
            commands,
            phase: StoryPhase::DisplayingLine,
        }
    }
}

/// 终止时的 Command
pub fn execute_finish(reason: &FinishReason) -> Vec<Command> {
    let banner = match reason {
        FinishReason::TheEnd => Command::ShowTheEnd,
        FinishReason::UnknownScene { scene_id } => Command::ShowGameOverUnknownScene {
            scene_id: scene_id.clone(),
        },
    };
    vec![banner, Command::HideNextControl, Command::ShowRestartOption]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{SpriteFocus, SpriteSlot};
    use crate::scene::{Choice, Talking};

    #[test]
    fn test_execute_plain_line() {
        let scene = Scene::new("s", vec![]).with_background("bg.png");
        let line = DialogueLine {
            character1_image: Some("alice.png".to_string()),
            currently_talking: Some(Talking::Character1),
            ..DialogueLine::new("Alice", "你好")
        };

        let result = execute_line(&scene, &line);
        assert_eq!(result.phase, StoryPhase::DisplayingLine);
        assert_eq!(
            result.commands,
            vec![
                Command::SetSpeakerName {
                    name: "Alice".to_string()
                },
                Command::SetDialogueText {
                    text: "你好".to_string()
                },
                Command::SetSprite {
                    slot: SpriteSlot::Left,
                    image: Some("alice.png".to_string()),
                    focus: SpriteFocus::Active,
                },
                Command::SetSprite {
                    slot: SpriteSlot::Right,
                    image: None,
                    focus: SpriteFocus::None,
                },
                Command::SetBackground {
                    image: Some("bg.png".to_string())
                },
                Command::ShowNextControl,
            ]
        );
    }

    #[test]
    fn test_execute_line_with_choices() {
        let scene = Scene::new("s", vec![]);
        let line = DialogueLine {
            choices: vec![
                Choice {
                    choice_text: "A".to_string(),
                    next_scene_id: "a".to_string(),
                },
                Choice {
                    choice_text: "B".to_string(),
                    next_scene_id: "b".to_string(),
                },
            ],
            ..DialogueLine::new("Narrator", "选一个")
        };

        let result = execute_line(&scene, &line);
        assert_eq!(result.phase, StoryPhase::AwaitingChoice { choice_count: 2 });
        assert!(!result.commands.contains(&Command::ShowNextControl));
        assert!(!result
            .commands
            .iter()
            .any(|c| matches!(c, Command::SetBackground { .. })));
        assert!(matches!(
            result.commands.last(),
            Some(Command::ShowChoices { choices }) if choices.len() == 2 && choices[0].text == "A"
        ));
    }

    #[test]
    fn test_execute_finish() {
        let cmds = execute_finish(&FinishReason::TheEnd);
        assert_eq!(
            cmds,
            vec![
                Command::ShowTheEnd,
                Command::HideNextControl,
                Command::ShowRestartOption
            ]
        );

        let cmds = execute_finish(&FinishReason::UnknownScene {
            scene_id: "missing".to_string(),
        });
        assert_eq!(
            cmds[0],
            Command::ShowGameOverUnknownScene {
                scene_id: "missing".to_string()
            }
        );
    }
}
