//! # Loader 模块
//!
//! 场景数据的一次性异步加载。
//!
//! ## 设计说明
//!
//! - 整个系统只有这一处异步操作，加载期间 Host 禁用推进控件
//! - 同一时间最多一次加载在进行，重复触发直接返回 [`LoadOutcome::AlreadyLoading`]
//! - 失败不重试，由上层进入永久错误显示

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use story_runtime::{DataError, SceneStore};
use thiserror::Error;
use tracing::{debug, info};

/// 场景数据加载错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    /// 读取失败
    #[error("读取场景数据失败: {path} - {message}")]
    Io { path: String, message: String },

    /// 数据无效
    #[error("场景数据无效: {0}")]
    Data(#[from] DataError),
}

/// 场景数据来源
///
/// 抽象读取接口，生产环境从文件系统读取，测试中可以替换。
pub trait SceneSource {
    /// 读取完整的场景数据文本
    fn read_text(&self) -> impl Future<Output = Result<String, LoadError>> + Send;

    /// 用于日志的来源描述
    fn describe(&self) -> String;
}

/// 文件系统场景来源
#[derive(Debug, Clone)]
pub struct FsSceneSource {
    path: PathBuf,
}

impl FsSceneSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SceneSource for FsSceneSource {
    async fn read_text(&self) -> Result<String, LoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| LoadError::Io {
                path: self.path.to_string_lossy().to_string(),
                message: e.to_string(),
            })
    }

    fn describe(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}

/// 加载结果
#[derive(Debug)]
pub enum LoadOutcome {
    /// 加载完成
    Loaded(SceneStore),
    /// 已有加载在进行，本次调用被合并为空操作
    AlreadyLoading,
}

/// 场景加载器
#[derive(Debug)]
pub struct SceneLoader<S> {
    source: S,
    in_flight: AtomicBool,
}

/// 离开作用域时清除进行中标记
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: SceneSource> SceneLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            in_flight: AtomicBool::new(false),
        }
    }

    /// 读取并解析场景数据
    pub async fn load(&self) -> Result<LoadOutcome, LoadError> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            debug!(source = %self.source.describe(), "场景数据正在加载，忽略重复请求");
            return Ok(LoadOutcome::AlreadyLoading);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let text = self.source.read_text().await?;
        let store = SceneStore::from_json(&text)?;
        info!(source = %self.source.describe(), scenes = store.len(), "场景数据加载完成");
        debug!(ids = ?store.scene_ids().collect::<Vec<_>>(), "已加载的场景");
        Ok(LoadOutcome::Loaded(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokio::sync::Notify;

    /// 直到收到通知才返回数据的来源
    struct GatedSource {
        gate: Notify,
        text: String,
    }

    impl SceneSource for GatedSource {
        async fn read_text(&self) -> Result<String, LoadError> {
            self.gate.notified().await;
            Ok(self.text.clone())
        }

        fn describe(&self) -> String {
            "gated".to_string()
        }
    }

    const SCENES: &str = r#"[{ "sceneId": "introduction", "dialogue": [] }]"#;

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{SCENES}").unwrap();

        let loader = SceneLoader::new(FsSceneSource::new(file.path()));
        let outcome = loader.load().await.unwrap();
        assert!(matches!(outcome, LoadOutcome::Loaded(store) if store.contains("introduction")));
        assert!(!loader.in_flight.load(Ordering::Acquire));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = SceneLoader::new(FsSceneSource::new(dir.path().join("scenes.json")));
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(!loader.in_flight.load(Ordering::Acquire));
    }

    #[tokio::test]
    async fn test_invalid_data_is_data_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "sceneId": "introduction" }}"#).unwrap();

        let loader = SceneLoader::new(FsSceneSource::new(file.path()));
        let err = loader.load().await.unwrap_err();
        assert_eq!(err, LoadError::Data(DataError::NotASequence));
    }

    #[tokio::test]
    async fn test_duplicate_load_is_coalesced() {
        let loader = SceneLoader::new(GatedSource {
            gate: Notify::new(),
            text: SCENES.to_string(),
        });

        let (first, second) = tokio::join!(loader.load(), async {
            let outcome = loader.load().await;
            loader.source.gate.notify_one();
            outcome
        });

        assert!(matches!(first, Ok(LoadOutcome::Loaded(_))));
        assert!(matches!(second, Ok(LoadOutcome::AlreadyLoading)));
        assert!(!loader.in_flight.load(Ordering::Acquire));
    }
}
