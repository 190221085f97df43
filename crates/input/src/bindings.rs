use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::action::Action;

/// How far one object-move key press shifts the selection.
const NUDGE: f32 = 0.5;

/// Errors from loading key bindings.
#[derive(Debug, thiserror::Error)]
pub enum BindingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Key name to action map. Key names are case-insensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    keys: BTreeMap<String, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut b = Self::empty();
        b.bind("w", Action::MoveCamera { delta: Vec3::Z });
        b.bind("s", Action::MoveCamera { delta: Vec3::NEG_Z });
        b.bind("a", Action::MoveCamera { delta: Vec3::NEG_X });
        b.bind("d", Action::MoveCamera { delta: Vec3::X });
        b.bind("space", Action::MoveCamera { delta: Vec3::Y });
        b.bind("shift", Action::MoveCamera { delta: Vec3::NEG_Y });
        b.bind("tab", Action::ChooseNext);
        b.bind("escape", Action::Deselect);
        b.bind("up", Action::MoveObject { delta: Vec3::NEG_Z * NUDGE });
        b.bind("down", Action::MoveObject { delta: Vec3::Z * NUDGE });
        b.bind("left", Action::MoveObject { delta: Vec3::NEG_X * NUDGE });
        b.bind("right", Action::MoveObject { delta: Vec3::X * NUDGE });
        b.bind("page_up", Action::MoveObject { delta: Vec3::Y * NUDGE });
        b.bind("page_down", Action::MoveObject { delta: Vec3::NEG_Y * NUDGE });
        b.bind("1", Action::AddObject { kind: 0 });
        b.bind("2", Action::AddObject { kind: 1 });
        b.bind("3", Action::AddObject { kind: 2 });
        b.bind("delete", Action::RemoveObject);
        b.bind("ctrl+z", Action::Undo);
        b.bind("ctrl+y", Action::Redo);
        b.bind("enter", Action::Step);
        b
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, BindingsError> {
        let parsed: Self = serde_yaml::from_str(s)?;
        // Normalize key case.
        let mut bindings = Self::empty();
        for (key, action) in parsed.keys {
            bindings.bind(&key, action);
        }
        Ok(bindings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BindingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| BindingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Bind a key, returning the action it was previously bound to.
    pub fn bind(&mut self, key: &str, action: Action) -> Option<Action> {
        self.keys.insert(key.to_lowercase(), action)
    }

    pub fn unbind(&mut self, key: &str) -> Option<Action> {
        self.keys.remove(&key.to_lowercase())
    }

    /// The action for a key; unbound keys resolve to `Action::Noop`.
    pub fn resolve(&self, key: &str) -> Action {
        self.keys
            .get(&key.to_lowercase())
            .cloned()
            .unwrap_or(Action::Noop)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Bound keys in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Action)> {
        self.keys.iter().map(|(k, a)| (k.as_str(), a))
    }
}
