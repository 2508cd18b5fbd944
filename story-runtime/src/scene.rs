//! # Scene 模块
//!
//! 场景图的数据模型与 [`SceneStore`]。
//!
//! ## 数据格式
//!
//! 场景数据是一个 JSON 数组，每个元素是一条场景记录：
//!
//! ```text
//! [
//!   {
//!     "sceneId": "introduction",
//!     "backgroundImage": "bg/room.png",
//!     "nextSceneId": "ch1",
//!     "dialogue": [
//!       {
//!         "characterName": "Alice",
//!         "text": "你好",
//!         "character1Image": "alice.png",
//!         "currentlyTalking": "character1",
//!         "choices": [{ "choiceText": "继续", "nextSceneId": "ch1" }]
//!       }
//!     ]
//!   }
//! ]
//! ```
//!
//! 加载后场景图不可变。

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::DataError;

/// 旁白的保留说话者名称，表示"当前没有说话的角色"
pub const NARRATOR: &str = "Narrator";

/// 当前说话者所在的立绘槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Talking {
    /// 左侧立绘（`character1`）
    Character1,
    /// 右侧立绘（`character2`）
    Character2,
}

impl Talking {
    /// 从数据中的标签解析，未知值返回 `None`
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "character1" => Some(Self::Character1),
            "character2" => Some(Self::Character2),
            _ => None,
        }
    }
}

fn talking_tag<'de, D>(deserializer: D) -> Result<Option<Talking>, D::Error>
where
    D: Deserializer<'de>,
{
    let tag: Option<String> = Option::deserialize(deserializer)?;
    Ok(tag.as_deref().and_then(Talking::parse))
}

fn choice_list<'de, D>(deserializer: D) -> Result<Vec<Choice>, D::Error>
where
    D: Deserializer<'de>,
{
    let choices: Option<Vec<Choice>> = Option::deserialize(deserializer)?;
    Ok(choices.unwrap_or_default())
}

/// 选择项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// 选项显示文本
    pub choice_text: String,
    /// 目标场景 ID
    pub next_scene_id: String,
}

/// 一行对话
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueLine {
    /// 说话者名称（[`NARRATOR`] 表示旁白）
    pub character_name: String,
    /// 对话文本
    pub text: String,
    /// 左侧立绘
    #[serde(default)]
    pub character1_image: Option<String>,
    /// 右侧立绘
    #[serde(default)]
    pub character2_image: Option<String>,
    /// 当前说话者槽位
    #[serde(default, deserialize_with = "talking_tag")]
    pub currently_talking: Option<Talking>,
    /// 选择分支（`null` 与缺省都视为没有）
    #[serde(default, deserialize_with = "choice_list")]
    pub choices: Vec<Choice>,
}

impl DialogueLine {
    /// 创建没有立绘和选项的对话行
    pub fn new(character_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            character_name: character_name.into(),
            text: text.into(),
            character1_image: None,
            character2_image: None,
            currently_talking: None,
            choices: Vec::new(),
        }
    }

    /// 左侧立绘（空字符串视为没有）
    pub fn left_image(&self) -> Option<&str> {
        non_empty(self.character1_image.as_deref())
    }

    /// 右侧立绘（空字符串视为没有）
    pub fn right_image(&self) -> Option<&str> {
        non_empty(self.character2_image.as_deref())
    }

    /// 是否为旁白
    pub fn is_narrator(&self) -> bool {
        self.character_name == NARRATOR
    }

    /// 是否带有选择分支
    pub fn has_choices(&self) -> bool {
        !self.choices.is_empty()
    }
}

/// 场景
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// 场景 ID（全局唯一）
    #[serde(default)]
    pub scene_id: String,
    /// 对话行（可为空）
    pub dialogue: Vec<DialogueLine>,
    /// 对话结束后自动进入的场景
    #[serde(default)]
    pub next_scene_id: Option<String>,
    /// 背景图片
    #[serde(default)]
    pub background_image: Option<String>,
}

impl Scene {
    /// 创建场景
    pub fn new(scene_id: impl Into<String>, dialogue: Vec<DialogueLine>) -> Self {
        Self {
            scene_id: scene_id.into(),
            dialogue,
            next_scene_id: None,
            background_image: None,
        }
    }

    /// 设置默认下一场景
    pub fn with_next(mut self, next_scene_id: impl Into<String>) -> Self {
        self.next_scene_id = Some(next_scene_id.into());
        self
    }

    /// 设置背景图片
    pub fn with_background(mut self, image: impl Into<String>) -> Self {
        self.background_image = Some(image.into());
        self
    }

    /// 默认下一场景
    ///
    /// 缺省与空字符串都视为"没有默认场景"。
    pub fn default_next(&self) -> Option<&str> {
        non_empty(self.next_scene_id.as_deref())
    }

    /// 背景图片（空字符串视为没有）
    pub fn background(&self) -> Option<&str> {
        non_empty(self.background_image.as_deref())
    }

    /// 获取指定索引的对话行
    pub fn line(&self, index: usize) -> Option<&DialogueLine> {
        self.dialogue.get(index)
    }

    /// 对话行数
    pub fn len(&self) -> usize {
        self.dialogue.len()
    }

    /// 是否没有对话
    pub fn is_empty(&self) -> bool {
        self.dialogue.is_empty()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// 场景仓库
///
/// 持有已加载的场景图，按场景 ID 查找。加载后只读。
#[derive(Debug, Clone, Default)]
pub struct SceneStore {
    scenes: Vec<Scene>,
    index: HashMap<String, usize>,
}

impl SceneStore {
    /// 从已解析的 JSON 值加载场景图
    pub fn load(raw: serde_json::Value) -> Result<Self, DataError> {
        let serde_json::Value::Array(records) = raw else {
            return Err(DataError::NotASequence);
        };

        let mut scenes = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let scene: Scene =
                serde_json::from_value(record).map_err(|e| DataError::InvalidRecord {
                    index,
                    message: e.to_string(),
                })?;
            if scene.scene_id.is_empty() {
                return Err(DataError::MissingSceneId { index });
            }
            scenes.push(scene);
        }

        Self::from_scenes(scenes)
    }

    /// 从 JSON 文本加载场景图
    pub fn from_json(text: &str) -> Result<Self, DataError> {
        let raw: serde_json::Value = serde_json::from_str(text).map_err(|e| DataError::Json {
            message: e.to_string(),
        })?;
        Self::load(raw)
    }

    /// 从场景列表构建
    pub fn from_scenes(scenes: Vec<Scene>) -> Result<Self, DataError> {
        let mut index = HashMap::with_capacity(scenes.len());
        for (i, scene) in scenes.iter().enumerate() {
            if scene.scene_id.is_empty() {
                return Err(DataError::MissingSceneId { index: i });
            }
            if index.insert(scene.scene_id.clone(), i).is_some() {
                return Err(DataError::DuplicateSceneId {
                    id: scene.scene_id.clone(),
                });
            }
        }

        let store = Self { scenes, index };
        store.check_empty_chains()?;
        Ok(store)
    }

    /// 按 ID 查找场景
    pub fn lookup(&self, scene_id: &str) -> Option<&Scene> {
        self.index.get(scene_id).map(|&i| &self.scenes[i])
    }

    /// 是否包含指定场景
    pub fn contains(&self, scene_id: &str) -> bool {
        self.index.contains_key(scene_id)
    }

    /// 按加载顺序列出所有场景 ID
    pub fn scene_ids(&self) -> impl Iterator<Item = &str> {
        self.scenes.iter().map(|s| s.scene_id.as_str())
    }

    /// 场景数量
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// 无对话场景会立即跳到 nextSceneId，这样的链不能成环
    fn check_empty_chains(&self) -> Result<(), DataError> {
        for scene in self.scenes.iter().filter(|s| s.is_empty()) {
            let mut visited = HashSet::new();
            let mut current = scene;
            while current.is_empty() {
                if !visited.insert(current.scene_id.as_str()) {
                    return Err(DataError::EmptySceneCycle {
                        id: current.scene_id.clone(),
                    });
                }
                match current.default_next().and_then(|id| self.lookup(id)) {
                    Some(next) => current = next,
                    None => break,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_scene_records() {
        let store = SceneStore::load(json!([
            {
                "sceneId": "introduction",
                "backgroundImage": "bg/room.png",
                "nextSceneId": "ch1",
                "dialogue": [
                    {
                        "characterName": "Alice",
                        "text": "你好",
                        "character1Image": "alice.png",
                        "currentlyTalking": "character1"
                    }
                ]
            },
            {
                "sceneId": "ch1",
                "dialogue": [
                    {
                        "characterName": "Narrator",
                        "text": "要去哪里？",
                        "choices": [
                            { "choiceText": "左", "nextSceneId": "left" },
                            { "choiceText": "右", "nextSceneId": "right" }
                        ]
                    }
                ]
            }
        ]))
        .unwrap();

        assert_eq!(store.len(), 2);
        let intro = store.lookup("introduction").unwrap();
        assert_eq!(intro.default_next(), Some("ch1"));
        assert_eq!(intro.background(), Some("bg/room.png"));
        assert_eq!(intro.dialogue[0].left_image(), Some("alice.png"));
        assert_eq!(intro.dialogue[0].right_image(), None);
        assert_eq!(
            intro.dialogue[0].currently_talking,
            Some(Talking::Character1)
        );

        let ch1 = store.lookup("ch1").unwrap();
        assert!(ch1.dialogue[0].is_narrator());
        assert_eq!(ch1.dialogue[0].choices.len(), 2);
        assert_eq!(ch1.dialogue[0].choices[1].next_scene_id, "right");
        assert!(store.lookup("missing").is_none());
        assert_eq!(store.scene_ids().collect::<Vec<_>>(), ["introduction", "ch1"]);
    }

    #[test]
    fn test_load_rejects_non_sequence() {
        let err = SceneStore::load(json!({ "sceneId": "introduction" })).unwrap_err();
        assert_eq!(err, DataError::NotASequence);
    }

    #[test]
    fn test_load_rejects_missing_or_empty_id() {
        let err = SceneStore::load(json!([{ "dialogue": [] }])).unwrap_err();
        assert_eq!(err, DataError::MissingSceneId { index: 0 });

        let err = SceneStore::load(json!([
            { "sceneId": "a", "dialogue": [] },
            { "sceneId": "", "dialogue": [] }
        ]))
        .unwrap_err();
        assert_eq!(err, DataError::MissingSceneId { index: 1 });
    }

    #[test]
    fn test_load_rejects_duplicate_id() {
        let err = SceneStore::load(json!([
            { "sceneId": "a", "dialogue": [] },
            { "sceneId": "a", "dialogue": [] }
        ]))
        .unwrap_err();
        assert_eq!(err, DataError::DuplicateSceneId { id: "a".to_string() });
    }

    #[test]
    fn test_load_rejects_malformed_record() {
        let err = SceneStore::load(json!([{ "sceneId": "a" }])).unwrap_err();
        assert!(matches!(err, DataError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn test_from_json_reports_syntax_error() {
        let err = SceneStore::from_json("[{").unwrap_err();
        assert!(matches!(err, DataError::Json { .. }));
    }

    #[test]
    fn test_empty_next_scene_id_means_none() {
        let store = SceneStore::load(json!([
            { "sceneId": "a", "dialogue": [], "nextSceneId": "" },
            { "sceneId": "b", "dialogue": [] }
        ]))
        .unwrap();
        assert_eq!(store.lookup("a").unwrap().default_next(), None);
        assert_eq!(store.lookup("b").unwrap().default_next(), None);
    }

    #[test]
    fn test_unknown_talking_tag_is_none() {
        let store = SceneStore::load(json!([{
            "sceneId": "a",
            "dialogue": [{ "characterName": "Bob", "text": "...", "currentlyTalking": "character3" }]
        }]))
        .unwrap();
        assert_eq!(store.lookup("a").unwrap().dialogue[0].currently_talking, None);
    }

    #[test]
    fn test_null_choices_is_empty() {
        let store = SceneStore::load(json!([{
            "sceneId": "introduction",
            "dialogue": [
                { "characterName": "Bob", "text": "hi", "choices": null },
                { "characterName": "Bob", "text": "bye" }
            ]
        }]))
        .unwrap();
        let scene = store.lookup("introduction").unwrap();
        assert!(scene.dialogue[0].choices.is_empty());
        assert!(!scene.dialogue[0].has_choices());
        assert!(!scene.dialogue[1].has_choices());
    }

    #[test]
    fn test_empty_scene_cycle_rejected() {
        let err = SceneStore::from_scenes(vec![
            Scene::new("a", vec![]).with_next("b"),
            Scene::new("b", vec![]).with_next("a"),
        ])
        .unwrap_err();
        assert!(matches!(err, DataError::EmptySceneCycle { .. }));

        let err = SceneStore::from_scenes(vec![Scene::new("loop", vec![]).with_next("loop")])
            .unwrap_err();
        assert_eq!(err, DataError::EmptySceneCycle { id: "loop".to_string() });
    }

    #[test]
    fn test_cycle_through_dialogue_is_allowed() {
        let store = SceneStore::from_scenes(vec![
            Scene::new("a", vec![]).with_next("b"),
            Scene::new("b", vec![DialogueLine::new("Bob", "hi")]).with_next("a"),
        ]);
        assert!(store.is_ok());
    }

    #[test]
    fn test_talking_serializes_as_data_tag() {
        let line = DialogueLine {
            currently_talking: Some(Talking::Character2),
            ..DialogueLine::new("Bob", "...")
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["currentlyTalking"], "character2");

        let back: DialogueLine = serde_json::from_value(json).unwrap();
        assert_eq!(back, line);
    }
}
