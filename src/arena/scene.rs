use tracing::debug;

/// Which view the presentation layer should switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTransition {
    Battle,
    Roam,
}

/// Callbacks into whatever renders the arena.
///
/// `ids` on a transition lists the combatants involved: both fighters when
/// entering a battle, the survivors when returning to roam.
pub trait SceneObserver {
    fn notify_entity_added(&mut self, id: u32, x: f32, y: f32);
    fn notify_entity_removed(&mut self, id: u32);
    fn notify_scene_transition(&mut self, kind: SceneTransition, ids: &[u32]);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SceneObserver for NoopObserver {
    fn notify_entity_added(&mut self, id: u32, x: f32, y: f32) {
        debug!(id, x, y, "entity added");
    }

    fn notify_entity_removed(&mut self, id: u32) {
        debug!(id, "entity removed");
    }

    fn notify_scene_transition(&mut self, kind: SceneTransition, ids: &[u32]) {
        debug!(?kind, ?ids, "scene transition");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneNotification {
    Added { id: u32, x: f32, y: f32 },
    Removed { id: u32 },
    Transition { kind: SceneTransition, ids: Vec<u32> },
}

/// Keeps every notification in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingObserver {
    pub notifications: Vec<SceneNotification>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn removed_ids(&self) -> Vec<u32> {
        self.notifications
            .iter()
            .filter_map(|notification| match notification {
                SceneNotification::Removed { id } => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn transitions(&self) -> Vec<SceneTransition> {
        self.notifications
            .iter()
            .filter_map(|notification| match notification {
                SceneNotification::Transition { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.notifications.clear();
    }
}

impl SceneObserver for RecordingObserver {
    fn notify_entity_added(&mut self, id: u32, x: f32, y: f32) {
        self.notifications.push(SceneNotification::Added { id, x, y });
    }

    fn notify_entity_removed(&mut self, id: u32) {
        self.notifications.push(SceneNotification::Removed { id });
    }

    fn notify_scene_transition(&mut self, kind: SceneTransition, ids: &[u32]) {
        self.notifications.push(SceneNotification::Transition {
            kind,
            ids: ids.to_vec(),
        });
    }
}
