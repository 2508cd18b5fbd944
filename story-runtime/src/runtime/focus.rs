//! # Focus 模块
//!
//! 立绘可见性与焦点策略。
//!
//! 每行对话都从零重新计算两个槽位的状态，不继承上一行的高亮/变暗。

use serde::{Deserialize, Serialize};

use crate::command::{Command, SpriteFocus, SpriteSlot};
use crate::scene::{DialogueLine, Talking};

/// 单个槽位的状态
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotState {
    /// 立绘图片，`None` 表示不可见
    pub image: Option<String>,
    /// 焦点样式
    pub focus: SpriteFocus,
}

impl SlotState {
    fn from_image(image: Option<&str>) -> Self {
        Self {
            image: image.map(str::to_string),
            focus: SpriteFocus::None,
        }
    }

    /// 是否可见
    pub fn is_visible(&self) -> bool {
        self.image.is_some()
    }
}

/// 一行对话对应的左右立绘布局
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpriteLayout {
    /// 左侧槽位（`character1`）
    pub left: SlotState,
    /// 右侧槽位（`character2`）
    pub right: SlotState,
}

impl SpriteLayout {
    /// 获取槽位状态
    pub fn slot(&self, slot: SpriteSlot) -> &SlotState {
        match slot {
            SpriteSlot::Left => &self.left,
            SpriteSlot::Right => &self.right,
        }
    }

    /// 转换为左右两条 `SetSprite` 指令
    pub fn into_commands(self) -> [Command; 2] {
        [
            Command::SetSprite {
                slot: SpriteSlot::Left,
                image: self.left.image,
                focus: self.left.focus,
            },
            Command::SetSprite {
                slot: SpriteSlot::Right,
                image: self.right.image,
                focus: self.right.focus,
            },
        ]
    }

    fn slot_mut(&mut self, slot: SpriteSlot) -> &mut SlotState {
        match slot {
            SpriteSlot::Left => &mut self.left,
            SpriteSlot::Right => &mut self.right,
        }
    }

    fn dim_visible(&mut self) {
        for slot in [&mut self.left, &mut self.right] {
            if slot.is_visible() {
                slot.focus = SpriteFocus::Inactive;
            }
        }
    }
}

fn talking_slot(talking: Talking) -> SpriteSlot {
    match talking {
        Talking::Character1 => SpriteSlot::Left,
        Talking::Character2 => SpriteSlot::Right,
    }
}

/// 计算一行对话的立绘布局
///
/// - 旁白：所有可见槽位变暗，不高亮任何槽位
/// - 其他说话者：`currently_talking` 指向的可见槽位高亮，另一个可见槽位变暗
/// - `currently_talking` 缺省或指向不可见槽位时按旁白处理
pub fn focus_policy(line: &DialogueLine) -> SpriteLayout {
    let mut layout = SpriteLayout {
        left: SlotState::from_image(line.left_image()),
        right: SlotState::from_image(line.right_image()),
    };

    let speaking = line
        .currently_talking
        .filter(|_| !line.is_narrator())
        .map(talking_slot)
        .filter(|&slot| layout.slot(slot).is_visible());

    layout.dim_visible();
    if let Some(slot) = speaking {
        layout.slot_mut(slot).focus = SpriteFocus::Active;
    }
    layout
}
