//! # State 模块
//!
//! 定义故事位置和状态机阶段。
//!
//! ## 设计原则
//!
//! - 所有状态必须**显式建模**，由 [`StoryEngine`](crate::StoryEngine) 独占
//! - 不允许隐式全局状态

use serde::{Deserialize, Serialize};

/// 默认起始场景
pub const DEFAULT_START_SCENE: &str = "introduction";

/// 故事结束的原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    /// 正常结束（场景对话耗尽且没有默认下一场景）
    TheEnd,
    /// 跳转到了不存在的场景
    UnknownScene { scene_id: String },
}

/// 状态机阶段
///
/// # 状态转换
///
/// ```text
/// AwaitingScene  -> 解析场景 ID（瞬时）
/// DisplayingLine -> 显示了一行无选项对话，等待 Next
/// AwaitingChoice -> 显示了选项，等待 ChooseOption
/// SceneExhausted -> 场景对话已耗尽（瞬时）
/// Finished       -> 终止，只能通过 Restart 离开
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoryPhase {
    /// 位置指向一个场景，尚未解析到具体对话行
    AwaitingScene,
    /// 当前对话行已显示
    DisplayingLine,
    /// 等待玩家选择
    ///
    /// `choice_count` 记录选项数量，用于验证输入合法性
    AwaitingChoice { choice_count: usize },
    /// 对话索引已越过最后一行
    SceneExhausted,
    /// 终止
    Finished(FinishReason),
}

impl StoryPhase {
    /// 是否处于终止状态
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }

    /// 是否在等待选择
    pub fn is_awaiting_choice(&self) -> bool {
        matches!(self, Self::AwaitingChoice { .. })
    }
}

/// 故事位置
///
/// 这是故事推进的**唯一可变状态**。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPosition {
    /// 当前场景 ID
    pub scene_id: String,
    /// 当前对话索引（`== len` 表示场景已耗尽）
    pub dialogue_index: usize,
    /// 终止标记
    pub finished: bool,
}

impl StoryPosition {
    /// 创建指向场景开头的位置
    pub fn start(scene_id: impl Into<String>) -> Self {
        Self {
            scene_id: scene_id.into(),
            dialogue_index: 0,
            finished: false,
        }
    }

    /// 进入场景：切换场景 ID 并把索引归零
    pub fn enter(&mut self, scene_id: impl Into<String>) {
        self.scene_id = scene_id.into();
        self.dialogue_index = 0;
    }

    /// 前进到下一行
    pub fn advance(&mut self) {
        self.dialogue_index += 1;
    }

    /// 回到起始位置并清除终止标记
    pub fn reset(&mut self, start_scene_id: &str) {
        self.enter(start_scene_id);
        self.finished = false;
    }
}
