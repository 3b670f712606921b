use serde::{Deserialize, Serialize};

/// A sprint/iteration as reported by the platform's team settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Iteration {
    pub id: String,
    pub name: String,
    pub path: Option<String>,
    pub url: Option<String>,
    pub start_date: Option<String>,
    pub finish_date: Option<String>,
    /// "past", "current" or "future".
    pub time_frame: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IterationsList {
    pub count: usize,
    pub iterations: Vec<Iteration>,
    pub current_iteration_id: Option<String>,
}
