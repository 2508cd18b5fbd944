//! # Presenter 模块
//!
//! 表现层边界：把 Runtime 发出的 Command 落到具体的显示元素上。
//!
//! ## 设计说明
//!
//! - [`Presenter`] 是表现层需要提供的最小接口
//! - [`apply_batch`] 负责 Command → Presenter 调用的映射
//! - 一次 `advance` 的整批 Command 先应用到 [`StageState`]，再整体绘制，
//!   因此不会出现旧立绘配新台词的中间帧
//!
//! ## 模块结构
//!
//! - `stage`: 无头舞台状态（同时也是测试用的 Presenter）
//! - `terminal`: 终端文本绘制

mod stage;
mod terminal;

pub use stage::{SpriteView, StageState};
pub use terminal::draw_stage;

use story_runtime::{ChoiceView, Command, SpriteFocus, SpriteSlot};

/// 结束画面的标题
pub const THE_END_TITLE: &str = "The End";
/// 结束画面的文本
pub const THE_END_TEXT: &str = "Thank you for playing this game!";
/// 场景不存在时的标题
pub const GAME_OVER_TITLE: &str = "Game Over";
/// 加载失败时的标题
pub const LOAD_ERROR_TITLE: &str = "Error";
/// 加载失败时的文本
pub const LOAD_ERROR_TEXT: &str = "Failed to load story data. Check console for details.";

/// 表现层接口
pub trait Presenter {
    fn set_speaker_name(&mut self, name: &str);
    fn set_dialogue_text(&mut self, text: &str);
    /// `image` 为 `None` 时清空图片并设为完全透明
    fn set_sprite(&mut self, slot: SpriteSlot, image: Option<&str>, focus: SpriteFocus);
    fn set_background(&mut self, image: Option<&str>);
    fn show_next_control(&mut self, visible: bool);
    /// 空列表表示撤下所有选项
    fn show_choices(&mut self, choices: &[ChoiceView]);
    fn show_restart_control(&mut self, visible: bool);
    /// 加载期间与加载失败后禁用推进
    fn disable_advance(&mut self, disabled: bool);
}

/// 执行单个 Command
pub fn apply_command(presenter: &mut impl Presenter, command: &Command) {
    match command {
        Command::SetSpeakerName { name } => presenter.set_speaker_name(name),
        Command::SetDialogueText { text } => presenter.set_dialogue_text(text),
        Command::SetSprite { slot, image, focus } => {
            presenter.set_sprite(*slot, image.as_deref(), *focus)
        }
        Command::SetBackground { image } => presenter.set_background(image.as_deref()),
        Command::ShowNextControl => presenter.show_next_control(true),
        Command::HideNextControl => presenter.show_next_control(false),
        Command::ShowChoices { choices } => presenter.show_choices(choices),
        Command::ClearChoices => presenter.show_choices(&[]),
        Command::ShowTheEnd => {
            presenter.set_speaker_name(THE_END_TITLE);
            presenter.set_dialogue_text(THE_END_TEXT);
        }
        Command::ShowGameOverUnknownScene { scene_id } => {
            presenter.set_speaker_name(GAME_OVER_TITLE);
            presenter.set_dialogue_text(&format!("The scene ID '{scene_id}' was not found."));
        }
        Command::ShowRestartOption => presenter.show_restart_control(true),
        Command::HideRestartOption => presenter.show_restart_control(false),
    }
}

/// 批量执行 Commands
pub fn apply_batch(presenter: &mut impl Presenter, commands: &[Command]) {
    for command in commands {
        apply_command(presenter, command);
    }
}

/// 进入永久的加载失败显示
pub fn show_load_error(presenter: &mut impl Presenter) {
    presenter.set_speaker_name(LOAD_ERROR_TITLE);
    presenter.set_dialogue_text(LOAD_ERROR_TEXT);
    presenter.show_next_control(false);
    presenter.disable_advance(true);
}
