//! # Input 模块
//!
//! 定义 Host 向 Runtime 传递的玩家意图。
//!
//! ## 设计说明
//!
//! - `StoryInput` 是 Host 采集用户操作后，传递给 Runtime 的抽象输入
//! - Runtime 不直接处理鼠标/键盘事件，只处理语义化的输入

use serde::{Deserialize, Serialize};

/// Host 向 Runtime 传递的输入
///
/// - `Next`：点击"下一句"
/// - `ChooseOption`：选择当前选项中的第 `index` 个（从 0 开始）
/// - `GoToScene`：直接进入指定场景
/// - `Restart`：回到起始场景重新开始
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoryInput {
    /// 推进到下一句
    Next,

    /// 选择选项
    ChooseOption { index: usize },

    /// 进入指定场景
    GoToScene { scene_id: String },

    /// 重新开始
    Restart,
}

impl StoryInput {
    /// 创建推进输入
    pub fn next() -> Self {
        Self::Next
    }

    /// 创建选择输入
    pub fn choose(index: usize) -> Self {
        Self::ChooseOption { index }
    }

    /// 创建场景跳转输入
    pub fn go_to(scene_id: impl Into<String>) -> Self {
        Self::GoToScene {
            scene_id: scene_id.into(),
        }
    }

    /// 创建重新开始输入
    pub fn restart() -> Self {
        Self::Restart
    }
}
