//! # Story Runtime
//!
//! 分支对话式视觉小说的核心运行时库。
//!
//! ## 架构概述
//!
//! `story-runtime` 是纯逻辑核心，不依赖任何 IO 或渲染引擎。
//! 它通过 **命令驱动模式** 与宿主层（Host）通信：
//!
//! ```text
//! Host                          Runtime
//!   │                              │
//!   │──── StoryInput ────────────►│
//!   │                              │ advance()
//!   │◄─── Vec<Command> ───────────│
//!   │                              │
//! ```
//!
//! 场景数据由 Host 一次性读取后交给 [`SceneStore`]，此后 Runtime 只由玩家意图驱动。
//!
//! ## 核心类型
//!
//! - [`SceneStore`]：已加载的场景图
//! - [`StoryEngine`]：故事推进状态机
//! - [`Command`]：Runtime 向 Host 发出的渲染指令
//! - [`StoryInput`]：Host 向 Runtime 传递的玩家意图
//! - [`StoryPosition`] / [`StoryPhase`]：位置与状态机阶段
//!
//! ## 模块结构
//!
//! - [`command`]：Command 定义
//! - [`input`]：StoryInput 定义
//! - [`scene`]：场景数据模型与 SceneStore
//! - [`state`]：StoryPosition 和 StoryPhase 定义
//! - [`error`]：错误类型定义
//! - [`runtime`]：状态机与焦点策略

pub mod command;
pub mod error;
pub mod input;
pub mod runtime;
pub mod scene;
pub mod state;

// 重导出核心类型
pub use command::{ChoiceView, Command, SpriteFocus, SpriteSlot};
pub use error::{DataError, RuntimeError};
pub use input::StoryInput;
pub use runtime::{SlotState, SpriteLayout, StoryEngine, focus_policy};
pub use scene::{Choice, DialogueLine, NARRATOR, Scene, SceneStore, Talking};
pub use state::{DEFAULT_START_SCENE, FinishReason, StoryPhase, StoryPosition};
