// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario loading and validation.

use crate::barcode::is_likely_valid_barcode;
use crate::config::{ConfigError, ScannerConfig, ScenarioConfig, StepSpec};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a scenario
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scanner settings: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Validated scenario ready for replay
#[derive(Clone, Debug)]
pub struct Scenario {
    config: ScenarioConfig,
}

impl Scenario {
    /// Load a scenario from a TOML or JSON file
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path)?;
        let config: ScenarioConfig = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        Self::from_config(config)
    }

    /// Create a scenario from a config object
    pub fn from_config(config: ScenarioConfig) -> Result<Self, ScenarioError> {
        config.scanner.validate()?;

        let mut seen = HashSet::new();
        for case in &config.cases {
            check_fixture_code("case", &case.code)?;
            if !seen.insert(case.code.trim()) {
                return Err(ScenarioError::Validation(format!(
                    "Duplicate case code '{}'",
                    case.code
                )));
            }
        }

        seen.clear();
        for item in &config.items {
            check_fixture_code("item", &item.code)?;
            if !seen.insert(item.code.trim()) {
                return Err(ScenarioError::Validation(format!(
                    "Duplicate item code '{}'",
                    item.code
                )));
            }
        }

        for (i, step) in config.steps.iter().enumerate() {
            match step {
                StepSpec::Keys { keys, .. } if keys.is_empty() => {
                    return Err(ScenarioError::Validation(format!(
                        "Step {}: keys step has no keys",
                        i + 1
                    )));
                }
                StepSpec::Catalog { item, .. } if item.trim().is_empty() => {
                    return Err(ScenarioError::Validation(format!(
                        "Step {}: catalog step has an empty item id",
                        i + 1
                    )));
                }
                _ => {}
            }
        }

        Ok(Self { config })
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn scanner(&self) -> &ScannerConfig {
        &self.config.scanner
    }

    pub fn steps(&self) -> &[StepSpec] {
        &self.config.steps
    }
}

fn check_fixture_code(kind: &str, code: &str) -> Result<(), ScenarioError> {
    if is_likely_valid_barcode(code) {
        Ok(())
    } else {
        Err(ScenarioError::Validation(format!(
            "Invalid {} code '{}': must be at least 3 of [A-Za-z0-9-_.]",
            kind, code
        )))
    }
}

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod tests;
