use pending_releases::prelude::*;
use std::sync::{Arc, Mutex};

/// One call made on the reporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Message(String),
    Step {
        current: usize,
        total: usize,
        product: Option<String>,
    },
    Error(String),
    Completion(String),
}

/// Mock ProgressReporter recording every call in order
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

#[allow(dead_code)]
impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Products stepped through, one list per instance pass.
    ///
    /// The use case restarts the count at 1 for every instance, so a step
    /// with `current == 1` opens a new pass.
    pub fn passes(&self) -> Vec<Vec<String>> {
        let mut passes: Vec<Vec<String>> = Vec::new();
        for event in self.events() {
            if let ProgressEvent::Step {
                current, product, ..
            } = event
            {
                if current == 1 || passes.is_empty() {
                    passes.push(Vec::new());
                }
                if let (Some(pass), Some(product)) = (passes.last_mut(), product) {
                    pass.push(product);
                }
            }
        }
        passes
    }

    pub fn messages(&self) -> Vec<String> {
        self.filter(|event| match event {
            ProgressEvent::Message(m) => Some(m),
            _ => None,
        })
    }

    pub fn errors(&self) -> Vec<String> {
        self.filter(|event| match event {
            ProgressEvent::Error(m) => Some(m),
            _ => None,
        })
    }

    fn filter(&self, pick: impl Fn(ProgressEvent) -> Option<String>) -> Vec<String> {
        self.events().into_iter().filter_map(pick).collect()
    }

    fn push(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.push(ProgressEvent::Message(message.to_string()));
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        self.push(ProgressEvent::Step {
            current,
            total,
            product: message.map(str::to_string),
        });
    }

    fn report_error(&self, message: &str) {
        self.push(ProgressEvent::Error(message.to_string()));
    }

    fn report_completion(&self, message: &str) {
        self.push(ProgressEvent::Completion(message.to_string()));
    }
}
