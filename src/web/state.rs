use crate::model::{ModelManager, ProgressTracker};

#[derive(Debug, Clone)]
pub struct AppState {
    mm: ModelManager,
    tracker: ProgressTracker<ModelManager>,
}

impl AppState {
    pub fn new(mm: ModelManager) -> Self {
        let tracker = ProgressTracker::new(mm.clone());
        Self { mm, tracker }
    }

    pub fn pool(&self) -> &ModelManager {
        &self.mm
    }

    pub fn tracker(&self) -> &ProgressTracker<ModelManager> {
        &self.tracker
    }
}
