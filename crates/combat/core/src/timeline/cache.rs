use std::collections::BTreeMap;

use crate::engine::StepResult;

/// Step results keyed by 0-based executed step index.
#[derive(Clone, Debug, Default)]
pub struct SimulationCache {
    entries: BTreeMap<usize, StepResult>,
}

impl SimulationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, index: usize, result: StepResult) {
        self.entries.insert(index, result);
    }

    pub fn get(&self, index: usize) -> Option<&StepResult> {
        self.entries.get(&index)
    }

    /// Removes every entry with key `>= index`.
    pub fn trim_to_step(&mut self, index: usize) {
        self.entries.split_off(&index);
    }

    pub fn results(&self) -> impl Iterator<Item = &StepResult> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SimulationContext;

    fn result(index: usize) -> StepResult {
        StepResult {
            step_index: index,
            step_id: format!("s{index}"),
            outcomes: Vec::new(),
            context_after: SimulationContext::default(),
            regenerations: Vec::new(),
            success: true,
            failure: None,
        }
    }

    #[test]
    fn trim_removes_index_and_beyond() {
        let mut cache = SimulationCache::new();
        for index in 0..5 {
            cache.put(index, result(index));
        }

        cache.trim_to_step(2);

        assert_eq!(cache.len(), 2);
        assert!(cache.get(1).is_some());
        for index in 2..5 {
            assert!(cache.get(index).is_none());
        }
    }

    #[test]
    fn trim_past_end_is_noop() {
        let mut cache = SimulationCache::new();
        cache.put(0, result(0));
        cache.trim_to_step(10);
        assert_eq!(cache.len(), 1);
    }
}
