//! # Engine 模块
//!
//! 故事推进状态机。
//!
//! ## 执行模型
//!
//! ```text
//! advance(input) -> Vec<Command>
//! ```
//!
//! 1. 根据 input 修改位置（场景进入、重新开始）或直接忽略
//! 2. 从当前位置解析场景，必要时沿 nextSceneId 自动进入下一场景
//! 3. 停在下一个阻塞点（显示了一行、等待选择、终止）
//! 4. 返回期间产生的全部 Command

use crate::command::Command;
use crate::error::{DataError, RuntimeError};
use crate::input::StoryInput;
use crate::runtime::executor::{execute_finish, execute_line};
use crate::scene::{Scene, SceneStore};
use crate::state::{DEFAULT_START_SCENE, FinishReason, StoryPhase, StoryPosition};

/// 故事引擎
///
/// 独占 [`StoryPosition`]，只通过 [`advance`](Self::advance) 修改。
///
/// # 使用示例
///
/// ```ignore
/// let store = SceneStore::from_json(text)?;
/// let mut engine = StoryEngine::new(store)?;
///
/// host.apply(engine.start());
/// loop {
///     let commands = engine.advance(host.next_input())?;
///     host.apply(commands);
/// }
/// ```
#[derive(Debug)]
pub struct StoryEngine {
    /// 场景图
    store: SceneStore,
    /// 起始场景（Restart 的目标）
    start_scene_id: String,
    /// 当前位置
    position: StoryPosition,
    /// 状态机阶段
    phase: StoryPhase,
}

impl StoryEngine {
    /// 以 `"introduction"` 为起始场景创建引擎
    pub fn new(store: SceneStore) -> Result<Self, DataError> {
        Self::with_start(store, DEFAULT_START_SCENE)
    }

    /// 以指定起始场景创建引擎
    ///
    /// 起始场景不存在时 Restart 也无法恢复，因此在这里直接拒绝。
    pub fn with_start(
        store: SceneStore,
        start_scene_id: impl Into<String>,
    ) -> Result<Self, DataError> {
        let start_scene_id = start_scene_id.into();
        if !store.contains(&start_scene_id) {
            return Err(DataError::MissingStartScene { id: start_scene_id });
        }

        Ok(Self {
            position: StoryPosition::start(start_scene_id.as_str()),
            phase: StoryPhase::AwaitingScene,
            store,
            start_scene_id,
        })
    }

    /// 进入起始场景，返回第一屏的 Command
    pub fn start(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        self.reset_to_start(&mut commands);
        self.run(&mut commands);
        commands
    }

    /// 核心驱动函数
    ///
    /// - `Next`：等待选择或已终止时为空操作
    /// - `ChooseOption`：只在等待选择时有效
    /// - `GoToScene`：已终止时为空操作
    /// - `Restart`：任何时候都回到起始场景
    pub fn advance(&mut self, input: StoryInput) -> Result<Vec<Command>, RuntimeError> {
        let mut commands = Vec::new();

        match input {
            StoryInput::Next => {
                if self.phase.is_finished() || self.phase.is_awaiting_choice() {
                    return Ok(commands);
                }
                self.phase = StoryPhase::AwaitingScene;
            }

            StoryInput::ChooseOption { index } => {
                let target = self.choice_target(index)?;
                self.enter_scene(target, &mut commands);
            }

            StoryInput::GoToScene { scene_id } => {
                if self.phase.is_finished() {
                    return Ok(commands);
                }
                self.enter_scene(scene_id, &mut commands);
            }

            StoryInput::Restart => {
                commands.push(Command::HideRestartOption);
                commands.push(Command::SetBackground { image: None });
                self.reset_to_start(&mut commands);
            }
        }

        self.run(&mut commands);
        Ok(commands)
    }

    /// 场景进入：切换场景、索引归零、撤下屏幕上的选项
    fn enter_scene(&mut self, scene_id: String, commands: &mut Vec<Command>) {
        self.clear_pending_choices(commands);
        self.position.enter(scene_id);
        self.phase = StoryPhase::AwaitingScene;
    }

    /// 回到 (起始场景, 0) 并清除终止标记
    fn reset_to_start(&mut self, commands: &mut Vec<Command>) {
        self.clear_pending_choices(commands);
        self.position.reset(&self.start_scene_id);
        self.phase = StoryPhase::AwaitingScene;
    }

    fn clear_pending_choices(&self, commands: &mut Vec<Command>) {
        if self.phase.is_awaiting_choice() {
            commands.push(Command::ClearChoices);
        }
    }

    /// 读取选项目标
    fn choice_target(&self, index: usize) -> Result<String, RuntimeError> {
        let StoryPhase::AwaitingChoice { choice_count } = self.phase else {
            return Err(RuntimeError::StateMismatch {
                expected: "AwaitingChoice".to_string(),
                actual: format!("{:?}", self.phase),
            });
        };
        if index >= choice_count {
            return Err(RuntimeError::InvalidChoiceIndex {
                index,
                max: choice_count,
            });
        }

        self.current_scene()
            .and_then(|scene| scene.line(self.position.dialogue_index))
            .and_then(|line| line.choices.get(index))
            .map(|choice| choice.next_scene_id.clone())
            .ok_or(RuntimeError::InvalidChoiceIndex {
                index,
                max: choice_count,
            })
    }

    /// 从当前位置执行到下一个阻塞点
    fn run(&mut self, commands: &mut Vec<Command>) {
        loop {
            match self.phase {
                StoryPhase::AwaitingScene => {
                    let Some(scene) = self.store.lookup(&self.position.scene_id) else {
                        let reason = FinishReason::UnknownScene {
                            scene_id: self.position.scene_id.clone(),
                        };
                        self.finish(reason, commands);
                        return;
                    };

                    let Some(line) = scene.line(self.position.dialogue_index) else {
                        self.phase = StoryPhase::SceneExhausted;
                        continue;
                    };

                    let result = execute_line(scene, line);
                    commands.extend(result.commands);
                    self.phase = result.phase;

                    // 有选项时索引不前进，选项会自己完成场景进入
                    if self.phase == StoryPhase::DisplayingLine {
                        self.position.advance();
                    }
                    return;
                }

                StoryPhase::SceneExhausted => {
                    let next = self
                        .current_scene()
                        .and_then(Scene::default_next)
                        .map(str::to_string);
                    match next {
                        Some(next) => self.enter_scene(next, commands),
                        None => {
                            self.finish(FinishReason::TheEnd, commands);
                            return;
                        }
                    }
                }

                StoryPhase::DisplayingLine
                | StoryPhase::AwaitingChoice { .. }
                | StoryPhase::Finished(_) => return,
            }
        }
    }

    fn finish(&mut self, reason: FinishReason, commands: &mut Vec<Command>) {
        commands.extend(execute_finish(&reason));
        self.position.finished = true;
        self.phase = StoryPhase::Finished(reason);
    }

    /// 当前位置
    pub fn position(&self) -> &StoryPosition {
        &self.position
    }

    /// 当前阶段
    pub fn phase(&self) -> &StoryPhase {
        &self.phase
    }

    /// 是否已终止
    pub fn is_finished(&self) -> bool {
        self.position.finished
    }

    /// 起始场景 ID
    pub fn start_scene_id(&self) -> &str {
        &self.start_scene_id
    }

    /// 当前场景（"场景不存在"终止状态下为 `None`）
    pub fn current_scene(&self) -> Option<&Scene> {
        self.store.lookup(&self.position.scene_id)
    }

    /// 场景图
    pub fn store(&self) -> &SceneStore {
        &self.store
    }
}
