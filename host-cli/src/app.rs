//! # App 模块
//!
//! 把加载器、故事引擎和舞台状态串起来。
//!
//! ```text
//! boot():   禁用推进 → 加载场景数据 → 创建引擎 → 解除禁用 → 第一屏
//! handle(): StoryInput → StoryEngine::advance → 整批应用到 StageState
//! ```

use story_runtime::{Command, StoryEngine, StoryInput};
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::loader::{LoadError, LoadOutcome, SceneLoader, SceneSource};
use crate::presenter::{Presenter, StageState, apply_batch, show_load_error};

/// 应用状态
#[derive(Debug)]
pub struct App<S> {
    config: AppConfig,
    loader: SceneLoader<S>,
    engine: Option<StoryEngine>,
    stage: StageState,
}

impl<S: SceneSource> App<S> {
    pub fn new(config: AppConfig, source: S) -> Self {
        Self {
            config,
            loader: SceneLoader::new(source),
            engine: None,
            stage: StageState::new(),
        }
    }

    /// 加载场景数据并进入起始场景
    ///
    /// 失败时进入永久错误显示，推进控件保持禁用，不重试。
    pub async fn boot(&mut self) -> Result<(), LoadError> {
        if self.engine.is_some() {
            debug!("场景数据已加载，忽略重复启动");
            return Ok(());
        }

        self.stage.disable_advance(true);

        let store = match self.loader.load().await {
            Ok(LoadOutcome::Loaded(store)) => store,
            Ok(LoadOutcome::AlreadyLoading) => return Ok(()),
            Err(e) => {
                show_load_error(&mut self.stage);
                return Err(e);
            }
        };

        let mut engine = match StoryEngine::with_start(store, self.config.start_scene_id.as_str()) {
            Ok(engine) => engine,
            Err(e) => {
                show_load_error(&mut self.stage);
                return Err(e.into());
            }
        };

        info!(start = %engine.start_scene_id(), "进入起始场景");
        self.stage.disable_advance(false);
        let commands = engine.start();
        apply_batch(&mut self.stage, &commands);
        self.engine = Some(engine);
        Ok(())
    }

    /// 处理一次玩家意图，返回本次应用的 Command
    pub fn handle(&mut self, input: StoryInput) -> Vec<Command> {
        if self.stage.advance_disabled {
            warn!(?input, "推进已禁用，忽略输入");
            return Vec::new();
        }
        let Some(engine) = self.engine.as_mut() else {
            warn!(?input, "场景数据尚未加载，忽略输入");
            return Vec::new();
        };

        match engine.advance(input) {
            Ok(commands) => {
                debug!(
                    scene = %engine.position().scene_id,
                    index = engine.position().dialogue_index,
                    count = commands.len(),
                    "故事推进"
                );
                apply_batch(&mut self.stage, &commands);
                commands
            }
            Err(e) => {
                // 选项与 Command 一一对应，走到这里说明 Host 侧发错了输入
                error!(error = %e, "无效的玩家输入");
                Vec::new()
            }
        }
    }

    /// 当前舞台
    pub fn stage(&self) -> &StageState {
        &self.stage
    }

    /// 故事引擎（加载完成前为 `None`）
    pub fn engine(&self) -> Option<&StoryEngine> {
        self.engine.as_ref()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
