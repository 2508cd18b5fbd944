//! # Config 模块
//!
//! 运行时配置管理。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// 应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 场景数据文件
    #[serde(default = "default_scenes_path")]
    pub scenes_path: PathBuf,

    /// 起始场景 ID（Restart 的目标）
    #[serde(default = "default_start_scene_id")]
    pub start_scene_id: String,

    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
}

/// 输出配置
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 每次操作后以 JSON 行输出舞台状态，而不是文本画面
    #[serde(default)]
    pub json: bool,
}

fn default_scenes_path() -> PathBuf {
    PathBuf::from("assets/scenes.json")
}

fn default_start_scene_id() -> String {
    story_runtime::DEFAULT_START_SCENE.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scenes_path: default_scenes_path(),
            start_scene_id: default_start_scene_id(),
            output: OutputConfig::default(),
        }
    }
}

impl AppConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并记录警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!(path = ?path, "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match Self::try_load(path) {
            Ok(config) => {
                info!(path = ?path, "配置文件加载成功");
                config
            }
            Err(e) => {
                warn!(path = ?path, error = %e, "配置文件无效，使用默认配置");
                Self::default()
            }
        }
    }

    /// 读取并解析配置文件
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scenes_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "必须配置 scenes_path（场景数据文件）".to_string(),
            ));
        }

        if self.start_scene_id.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "start_scene_id 不能为空".to_string(),
            ));
        }

        Ok(())
    }
}

/// 配置错误
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    IoError(String),
    /// 解析失败
    #[error("配置解析失败: {0}")]
    ParseFailed(String),
    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}
