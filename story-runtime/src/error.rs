//! # Error 模块
//!
//! 定义 story-runtime 中使用的错误类型。

use thiserror::Error;

/// 场景数据错误
///
/// 加载/校验场景图时产生，全部在进入游戏前暴露。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    /// JSON 文本无法解析
    #[error("场景数据不是合法的 JSON: {message}")]
    Json { message: String },

    /// 顶层不是数组
    #[error("场景数据必须是场景记录的数组")]
    NotASequence,

    /// 单条场景记录结构错误
    #[error("第 {index} 个场景记录无效 - {message}")]
    InvalidRecord { index: usize, message: String },

    /// 场景缺少 sceneId
    #[error("第 {index} 个场景缺少非空的 sceneId")]
    MissingSceneId { index: usize },

    /// sceneId 重复
    #[error("场景 '{id}' 重复定义")]
    DuplicateSceneId { id: String },

    /// 空场景通过 nextSceneId 形成闭环
    #[error("无对话场景 '{id}' 的 nextSceneId 链形成了循环")]
    EmptySceneCycle { id: String },

    /// 起始场景不存在
    #[error("起始场景 '{id}' 不存在")]
    MissingStartScene { id: String },
}

/// 运行时错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// 无效的选择索引
    #[error("无效的选择索引 {index}，有效范围是 0..{max}")]
    InvalidChoiceIndex { index: usize, max: usize },

    /// 状态不匹配
    #[error("当前状态不允许此操作：期望 {expected}，实际 {actual}")]
    StateMismatch { expected: String, actual: String },
}
