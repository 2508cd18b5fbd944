//! # Host CLI
//!
//! 终端宿主：加载场景数据、驱动 story-runtime、把 Command 绘制成文本画面。
//!
//! ## 模块结构
//!
//! - [`config`]：配置文件与默认值
//! - [`loader`]：场景数据的一次性异步加载
//! - [`presenter`]：表现层接口、舞台状态与终端绘制
//! - [`input`]：终端输入解析
//! - [`app`]：把以上部分串起来

pub mod app;
pub mod config;
pub mod input;
pub mod loader;
pub mod presenter;

pub use app::App;
pub use config::{AppConfig, ConfigError, OutputConfig};
pub use input::{PlayerCommand, parse_command};
pub use loader::{FsSceneSource, LoadError, LoadOutcome, SceneLoader, SceneSource};
pub use presenter::{Presenter, StageState, apply_batch, apply_command, draw_stage};
