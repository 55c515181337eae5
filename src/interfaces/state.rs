use std::sync::{Arc, Mutex};

use crate::application::SkillDispatcher;
use crate::interfaces::http::LogEntry;

pub struct AppState {
    pub dispatcher: SkillDispatcher,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

impl AppState {
    pub fn new(dispatcher: SkillDispatcher, logs: Arc<Mutex<Vec<LogEntry>>>) -> Self {
        Self { dispatcher, logs }
    }
}
