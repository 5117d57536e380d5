//! Prompt loader for YAML prompt definitions.
//!
//! The research pipeline's prompts ship embedded in this crate so the CLI
//! works with zero setup. A definition with the same ID placed in an
//! override directory takes precedence.

use crate::types::PromptDefinition;
use scout_core::{AppError, AppResult};
use std::path::Path;

/// Built-in prompt definitions, embedded at compile time.
const BUILTIN_PROMPTS: &[(&str, &str)] = &[
    (
        "research.classify",
        include_str!("../prompts/research.classify.yml"),
    ),
    (
        "research.analyze",
        include_str!("../prompts/research.analyze.yml"),
    ),
    (
        "research.curate",
        include_str!("../prompts/research.curate.yml"),
    ),
];

/// Load a prompt definition by ID.
///
/// Resolution order:
/// 1. `<override_dir>/<id>.yml` if an override directory is given
/// 2. the built-in definition embedded in this crate
///
/// # Example
/// ```
/// use scout_prompt::load_prompt;
///
/// let prompt = load_prompt(None, "research.classify").unwrap();
/// assert_eq!(prompt.id, "research.classify");
/// ```
pub fn load_prompt(override_dir: Option<&Path>, prompt_id: &str) -> AppResult<PromptDefinition> {
    if let Some(dir) = override_dir {
        let prompt_file = dir.join(format!("{}.yml", prompt_id));
        if prompt_file.exists() {
            tracing::debug!("Loading prompt override from: {:?}", prompt_file);

            let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
                AppError::Prompt(format!(
                    "Failed to read prompt file {:?}: {}",
                    prompt_file, e
                ))
            })?;

            return parse_prompt(&contents, prompt_id);
        }
    }

    let builtin = BUILTIN_PROMPTS
        .iter()
        .find(|(id, _)| *id == prompt_id)
        .map(|(_, contents)| contents)
        .ok_or_else(|| AppError::Prompt(format!("Unknown prompt: {}", prompt_id)))?;

    parse_prompt(builtin, prompt_id)
}

/// List all available prompt IDs (built-ins plus overrides).
pub fn list_prompts(override_dir: Option<&Path>) -> AppResult<Vec<String>> {
    let mut prompt_ids: Vec<String> = BUILTIN_PROMPTS
        .iter()
        .map(|(id, _)| id.to_string())
        .collect();

    if let Some(dir) = override_dir {
        if dir.exists() {
            for entry in std::fs::read_dir(dir)? {
                let path = entry?.path();
                if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("yml") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        if !prompt_ids.iter().any(|id| id == stem) {
                            prompt_ids.push(stem.to_string());
                        }
                    }
                }
            }
        }
    }

    prompt_ids.sort();
    Ok(prompt_ids)
}

/// Parse and validate a prompt definition.
fn parse_prompt(contents: &str, prompt_id: &str) -> AppResult<PromptDefinition> {
    let definition: PromptDefinition = serde_yaml::from_str(contents).map_err(|e| {
        AppError::Prompt(format!("Failed to parse prompt YAML '{}': {}", prompt_id, e))
    })?;

    validate_prompt(&definition)?;

    tracing::debug!("Loaded prompt: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// Validate a prompt definition.
fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if def.template.is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    if !matches!(def.output.format.as_str(), "text" | "json") {
        return Err(AppError::Prompt(format!(
            "Unknown output format: {}",
            def.output.format
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_builtin_prompts() {
        for id in ["research.classify", "research.analyze", "research.curate"] {
            let prompt = load_prompt(None, id).unwrap();
            assert_eq!(prompt.id, id);
            assert!(!prompt.template.is_empty());
        }
    }

    #[test]
    fn test_builtin_structured_prompts_declare_json() {
        assert!(load_prompt(None, "research.classify")
            .unwrap()
            .output
            .is_json());
        assert!(load_prompt(None, "research.curate")
            .unwrap()
            .output
            .is_json());
        assert!(!load_prompt(None, "research.analyze")
            .unwrap()
            .output
            .is_json());
    }

    #[test]
    fn test_load_unknown_prompt() {
        let result = load_prompt(None, "nonexistent");
        assert!(result.is_err());
    }

    #[test]
    fn test_override_takes_precedence() {
        let temp_dir = TempDir::new().unwrap();
        let content = r#"
id: research.classify
title: "Custom Classifier"
apiVersion: "1.0"
template: "classify: {{question}}"
output:
  format: json
"#;
        fs::write(temp_dir.path().join("research.classify.yml"), content).unwrap();

        let prompt = load_prompt(Some(temp_dir.path()), "research.classify").unwrap();
        assert_eq!(prompt.title, "Custom Classifier");
    }

    #[test]
    fn test_load_invalid_override_yaml() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("research.classify.yml"),
            "invalid: yaml: content:",
        )
        .unwrap();

        let result = load_prompt(Some(temp_dir.path()), "research.classify");
        assert!(result.is_err());
    }

    #[test]
    fn test_list_prompts_includes_builtins_and_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let content = r#"
id: custom.prompt
title: "Custom"
apiVersion: "1.0"
template: "{{question}}"
output:
  format: text
"#;
        fs::write(temp_dir.path().join("custom.prompt.yml"), content).unwrap();

        let prompts = list_prompts(Some(temp_dir.path())).unwrap();
        assert!(prompts.contains(&"research.classify".to_string()));
        assert!(prompts.contains(&"custom.prompt".to_string()));
        assert_eq!(prompts.len(), 4);
    }
}
