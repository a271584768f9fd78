//! Stage chain
//!
//! A straight line of stages with one entry and one terminal point. The chain
//! is checked once when it is built; after that the orchestrator can walk it
//! without re-checking wiring.

use std::collections::HashSet;

use crate::error::ChainError;
use crate::stage::StageId;
use crate::state::Field;

/// Validated, ordered list of stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    stages: Vec<StageId>,
}

impl Chain {
    /// Build a chain, rejecting any ordering that breaks the data flow
    ///
    /// Rules:
    /// - at least one stage
    /// - no stage twice
    /// - every dependency produced by an earlier stage
    /// - ends with the html stage
    pub fn new(stages: Vec<StageId>) -> Result<Self, ChainError> {
        let last = *stages.last().ok_or(ChainError::Empty)?;

        let mut seen = HashSet::new();
        let mut produced: HashSet<Field> = HashSet::new();

        for stage in &stages {
            if !seen.insert(*stage) {
                return Err(ChainError::Duplicate(*stage));
            }

            if let Some(field) = stage
                .dependencies()
                .iter()
                .find(|field| !produced.contains(*field))
            {
                return Err(ChainError::UnmetDependency {
                    stage: *stage,
                    field: *field,
                });
            }

            produced.insert(stage.output_field());
        }

        if last != StageId::Html {
            return Err(ChainError::NotTerminal(last));
        }

        Ok(Self { stages })
    }

    /// structure → content → design → html
    pub fn standard() -> Self {
        Self {
            stages: StageId::ALL.to_vec(),
        }
    }

    pub fn stages(&self) -> &[StageId] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::standard()
    }
}
