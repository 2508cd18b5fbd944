//! # Runtime 模块
//!
//! 故事推进核心，负责状态机和指令生成。
//!
//! ## 模块结构
//!
//! - [`engine`]：故事推进状态机
//! - [`executor`]：对话行到 Command 的转换
//! - [`focus`]：立绘可见性与焦点策略

pub mod engine;
pub mod executor;
pub mod focus;

pub use engine::StoryEngine;
pub use focus::{SlotState, SpriteLayout, focus_policy};
