//! # Stage 模块
//!
//! 无头舞台状态，记录当前需要显示的所有元素。

use serde::Serialize;
use story_runtime::{ChoiceView, SpriteFocus, SpriteSlot};

use super::Presenter;

/// 单个立绘槽位的显示状态
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SpriteView {
    /// 图片
    pub image: Option<String>,
    /// 焦点样式
    pub focus: SpriteFocus,
    /// 透明度（0.0 = 完全透明，1.0 = 完全不透明）
    pub opacity: f32,
}

/// 舞台状态
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageState {
    pub speaker: String,
    pub text: String,
    pub left: SpriteView,
    pub right: SpriteView,
    pub background: Option<String>,
    /// "下一句"控件是否可见
    pub next_visible: bool,
    pub choices: Vec<ChoiceView>,
    /// 重新开始控件是否可见
    pub restart_visible: bool,
    /// 推进控件是否被禁用
    pub advance_disabled: bool,
}

impl StageState {
    pub fn new() -> Self {
        Self {
            speaker: String::new(),
            text: String::new(),
            left: SpriteView::default(),
            right: SpriteView::default(),
            background: None,
            next_visible: false,
            choices: Vec::new(),
            restart_visible: false,
            advance_disabled: false,
        }
    }

    /// 获取槽位
    pub fn sprite(&self, slot: SpriteSlot) -> &SpriteView {
        match slot {
            SpriteSlot::Left => &self.left,
            SpriteSlot::Right => &self.right,
        }
    }
}

impl Default for StageState {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for StageState {
    fn set_speaker_name(&mut self, name: &str) {
        self.speaker = name.to_string();
    }

    fn set_dialogue_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_sprite(&mut self, slot: SpriteSlot, image: Option<&str>, focus: SpriteFocus) {
        let sprite = match slot {
            SpriteSlot::Left => &mut self.left,
            SpriteSlot::Right => &mut self.right,
        };
        *sprite = match image {
            Some(image) => SpriteView {
                image: Some(image.to_string()),
                focus,
                opacity: 1.0,
            },
            None => SpriteView::default(),
        };
    }

    fn set_background(&mut self, image: Option<&str>) {
        self.background = image.map(str::to_string);
    }

    fn show_next_control(&mut self, visible: bool) {
        self.next_visible = visible;
    }

    fn show_choices(&mut self, choices: &[ChoiceView]) {
        self.choices = choices.to_vec();
    }

    fn show_restart_control(&mut self, visible: bool) {
        self.restart_visible = visible;
    }

    fn disable_advance(&mut self, disabled: bool) {
        self.advance_disabled = disabled;
    }
}
