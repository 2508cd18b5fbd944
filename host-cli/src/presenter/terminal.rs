//! 终端文本绘制

use std::fmt::Write;

use story_runtime::SpriteFocus;

use super::{SpriteView, StageState};

fn sprite_label(view: &SpriteView) -> String {
    match (&view.image, view.focus) {
        (None, _) => "-".to_string(),
        (Some(image), SpriteFocus::Active) => format!("{image} *"),
        (Some(image), SpriteFocus::Inactive) => format!("({image})"),
        (Some(image), SpriteFocus::None) => image.clone(),
    }
}

/// 把舞台状态绘制为一屏文本
///
/// 说话中的立绘带 `*`，变暗的立绘用括号包起来。
pub fn draw_stage(stage: &StageState) -> String {
    let mut out = String::new();

    if let Some(background) = &stage.background {
        let _ = writeln!(out, "[背景] {background}");
    }
    if stage.left.image.is_some() || stage.right.image.is_some() {
        let _ = writeln!(
            out,
            "[左] {}    [右] {}",
            sprite_label(&stage.left),
            sprite_label(&stage.right)
        );
    }

    let _ = writeln!(out, "{}", stage.speaker);
    let _ = writeln!(out, "  {}", stage.text);

    for (i, choice) in stage.choices.iter().enumerate() {
        let _ = writeln!(out, "  {}) {}", i + 1, choice.text);
    }

    let mut hints = Vec::new();
    if stage.advance_disabled {
        hints.push("已禁用");
    } else {
        if stage.next_visible {
            hints.push("回车 继续");
        }
        if !stage.choices.is_empty() {
            hints.push("输入编号 选择");
        }
        if stage.restart_visible {
            hints.push("r 重新开始");
        }
    }
    hints.push("q 退出");
    let _ = writeln!(out, "[{}]", hints.join(" | "));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::Presenter;
    use story_runtime::{ChoiceView, SpriteSlot};

    #[test]
    fn test_draw_line_with_sprites() {
        let mut stage = StageState::new();
        stage.set_background(Some("room.png"));
        stage.set_sprite(SpriteSlot::Left, Some("alice.png"), SpriteFocus::Active);
        stage.set_sprite(SpriteSlot::Right, Some("bob.png"), SpriteFocus::Inactive);
        stage.set_speaker_name("Alice");
        stage.set_dialogue_text("你好");
        stage.show_next_control(true);

        let text = draw_stage(&stage);
        assert!(text.contains("[背景] room.png"));
        assert!(text.contains("alice.png *"));
        assert!(text.contains("(bob.png)"));
        assert!(text.contains("回车 继续"));
    }

    #[test]
    fn test_draw_choices_numbered_from_one() {
        let mut stage = StageState::new();
        stage.show_choices(&[
            ChoiceView {
                text: "左".to_string(),
                target_scene_id: "left".to_string(),
            },
            ChoiceView {
                text: "右".to_string(),
                target_scene_id: "right".to_string(),
            },
        ]);

        let text = draw_stage(&stage);
        assert!(text.contains("1) 左"));
        assert!(text.contains("2) 右"));
        assert!(!text.contains("[左]"));
    }

    #[test]
    fn test_draw_disabled() {
        let mut stage = StageState::new();
        stage.disable_advance(true);
        stage.show_restart_control(true);
        let text = draw_stage(&stage);
        assert!(text.contains("已禁用"));
        assert!(!text.contains("重新开始"));
    }
}
