use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use bmongo_core::catalog::{self, ActionModule, OperationDescriptor};

/// Ordered view of the backend's progress log.
///
/// Lines live in two segments: the one-time historical pull and the live
/// push stream. Rendering always shows history first, then live lines in
/// receipt order, so the display is stable no matter how the history fetch
/// interleaves with early pushes. The operator can clear the visible buffer;
/// the backend's own record is untouched and the subscription stays up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogBuffer {
    history: Vec<String>,
    history_loaded: bool,
    live: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: Vec::new(),
            history_loaded: false,
            live: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn append_live(&mut self, line: impl Into<String>) {
        self.live.push_back(line.into());
        while self.live.len() > self.capacity {
            self.live.pop_front();
        }
    }

    /// Install the historical prefix. Only the first load wins; the fetch
    /// happens once per process.
    pub fn load_history(&mut self, lines: Vec<String>) {
        if self.history_loaded {
            return;
        }
        self.history = lines;
        self.history_loaded = true;
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.live.clear();
    }

    pub fn len(&self) -> usize {
        self.history.len() + self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn lines(&self) -> Vec<&str> {
        self.history
            .iter()
            .map(String::as_str)
            .chain(self.live.iter().map(String::as_str))
            .collect()
    }

    /// Window of lines ending `scroll_back` lines from the bottom.
    pub fn window(&self, max_lines: usize, scroll_back: usize) -> Vec<&str> {
        let all = self.lines();
        let len = all.len();
        let max_back = len.saturating_sub(max_lines.min(len));
        let clamped = scroll_back.min(max_back);
        let end = len - clamped;
        let start = end.saturating_sub(max_lines);
        all[start..end].to_vec()
    }
}

/// Everything the main screen renders outside of overlays and toasts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleState {
    pub connected: bool,
    pub status_line: String,
    pub logs: LogBuffer,
    pub modules: Vec<ActionModule>,
    pub selected_module: usize,
    pub selected_item: usize,
    /// Lines scrolled back from the bottom of the log panel. 0 = latest.
    pub scroll_back: usize,
}

impl ConsoleState {
    pub fn new(log_capacity: usize) -> Self {
        Self {
            connected: false,
            status_line: "pronto".to_string(),
            logs: LogBuffer::new(log_capacity),
            modules: catalog::modules(),
            selected_module: 0,
            selected_item: 0,
            scroll_back: 0,
        }
    }

    pub fn selected_descriptor(&self) -> Option<OperationDescriptor> {
        self.modules
            .get(self.selected_module)
            .and_then(|module| module.items.get(self.selected_item))
            .copied()
    }

    pub fn move_module_selection_next(&mut self) {
        if self.modules.is_empty() {
            return;
        }
        self.selected_module = (self.selected_module + 1) % self.modules.len();
        self.selected_item = 0;
    }

    pub fn move_module_selection_previous(&mut self) {
        if self.modules.is_empty() {
            return;
        }
        self.selected_module = if self.selected_module == 0 {
            self.modules.len() - 1
        } else {
            self.selected_module - 1
        };
        self.selected_item = 0;
    }

    pub fn move_item_selection_next(&mut self) {
        let Some(module) = self.modules.get(self.selected_module) else {
            return;
        };
        if module.items.is_empty() {
            return;
        }
        self.selected_item = (self.selected_item + 1) % module.items.len();
    }

    pub fn move_item_selection_previous(&mut self) {
        let Some(module) = self.modules.get(self.selected_module) else {
            return;
        };
        if module.items.is_empty() {
            return;
        }
        self.selected_item = if self.selected_item == 0 {
            module.items.len() - 1
        } else {
            self.selected_item - 1
        };
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll_back = (self.scroll_back + amount).min(self.logs.len());
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(amount);
    }
}
