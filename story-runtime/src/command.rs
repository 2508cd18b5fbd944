//! # Command 模块
//!
//! 定义 Runtime 向 Host 发出的所有渲染指令。
//! Command 是 Runtime 与 Host 之间的**唯一通信方式**。
//!
//! ## 设计原则
//!
//! - **声明式**：Command 描述"显示什么"，不描述"怎么显示"
//! - **无副作用**：Command 本身不执行任何操作
//! - **批量应用**：一次 `advance` 返回的 Command 应被 Host 整批应用后再绘制，
//!   避免出现上一行立绘与新对话混合的中间帧

use serde::{Deserialize, Serialize};

/// 立绘槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteSlot {
    /// 左侧（`character1`）
    Left,
    /// 右侧（`character2`）
    Right,
}

/// 立绘焦点样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpriteFocus {
    /// 无样式（槽位不可见）
    #[default]
    None,
    /// 正在说话（高亮）
    Active,
    /// 未说话（变暗）
    Inactive,
}

/// 展示给玩家的选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceView {
    /// 选项显示文本
    pub text: String,
    /// 目标场景 ID
    pub target_scene_id: String,
}

/// Runtime 向 Host 发出的指令
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// 设置说话者名称
    SetSpeakerName { name: String },

    /// 设置对话文本
    SetDialogueText { text: String },

    /// 设置某个槽位的立绘
    ///
    /// `image` 为 `None` 时清空图片并设为完全透明。
    SetSprite {
        slot: SpriteSlot,
        image: Option<String>,
        focus: SpriteFocus,
    },

    /// 设置背景（纯覆盖，可重复发出）
    SetBackground { image: Option<String> },

    /// 显示"下一句"控件
    ShowNextControl,

    /// 隐藏"下一句"控件
    HideNextControl,

    /// 显示选项（按原始顺序）
    ShowChoices { choices: Vec<ChoiceView> },

    /// 清除屏幕上的选项
    ClearChoices,

    /// 故事结束
    ShowTheEnd,

    /// 跳转到不存在的场景，游戏结束
    ShowGameOverUnknownScene { scene_id: String },

    /// 显示重新开始选项
    ShowRestartOption,

    /// 隐藏重新开始选项
    HideRestartOption,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serialization() {
        let cmd = Command::SetSprite {
            slot: SpriteSlot::Left,
            image: Some("alice.png".to_string()),
            focus: SpriteFocus::Active,
        };

        let json = serde_json::to_string(&cmd).unwrap();
        let deserialized: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, deserialized);
    }
}
