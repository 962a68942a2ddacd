use crate::config::ExportConfig;
use crate::utils::error::{ExportError, Result};
use std::collections::HashSet;

/// State shared by one top-level export: configuration, current depth and
/// the shared containers currently being exported.
#[derive(Debug)]
pub struct ExportContext<'c> {
    config: &'c ExportConfig,
    depth: usize,
    in_progress: HashSet<usize>,
}

impl<'c> ExportContext<'c> {
    pub fn new(config: &'c ExportConfig) -> Self {
        Self {
            config,
            depth: 0,
            in_progress: HashSet::new(),
        }
    }

    pub fn config(&self) -> &'c ExportConfig {
        self.config
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Runs `f` one nesting level deeper, enforcing `max_depth`.
    pub fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if let Some(limit) = self.config.max_depth {
            if self.depth >= limit {
                tracing::warn!("Export aborted at depth {} (limit {})", self.depth, limit);
                return Err(ExportError::DepthLimitExceeded { limit });
            }
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Runs `f` while the shared container at `address` is marked in progress.
    /// Reaching the same container again before `f` returns is a cycle.
    pub fn shared<T>(
        &mut self,
        address: usize,
        type_name: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        if !self.in_progress.insert(address) {
            tracing::warn!("Cycle detected at {}", type_name);
            return Err(ExportError::CyclicStructure { type_name });
        }

        let result = f(self);
        self.in_progress.remove(&address);
        result
    }
}
