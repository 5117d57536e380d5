//! Prompt builder for rendering templates.

use crate::types::{BuiltPrompt, PromptDefinition};
use scout_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Build a prompt from a definition and input variables.
///
/// Renders the system and user templates using Handlebars with the
/// provided variables and returns a `BuiltPrompt` ready for LLM execution.
///
/// # Example
/// ```no_run
/// use scout_prompt::{build_prompt, load_prompt};
/// use std::collections::HashMap;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let def = load_prompt(None, "research.classify")?;
/// let mut vars = HashMap::new();
/// vars.insert("question".to_string(), "What is Rust?".to_string());
///
/// let built = build_prompt(&def, vars)?;
/// println!("User prompt: {}", built.user);
/// # Ok(())
/// # }
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    variables: HashMap<String, String>,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    let system = match &definition.system {
        Some(template) => Some(render_template(template, &variables)?),
        None => None,
    };

    let user = render_template(&definition.template, &variables)?;

    Ok(BuiltPrompt {
        system,
        user,
        source_prompt_id: definition.id.clone(),
        resolved_variables: variables,
    })
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PromptOutputSpec;

    fn create_test_definition() -> PromptDefinition {
        PromptDefinition {
            id: "test.prompt".to_string(),
            title: "Test".to_string(),
            api_version: "1.0".to_string(),
            system: Some("You are {{role}}.".to_string()),
            template: "Question: {{question}}".to_string(),
            output: PromptOutputSpec {
                format: "text".to_string(),
            },
        }
    }

    #[test]
    fn test_render_simple_template() {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "Hello, world!".to_string());

        let result = render_template("Question: {{question}}", &vars);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Question: Hello, world!");
    }

    #[test]
    fn test_build_prompt_renders_both_sections() {
        let def = create_test_definition();
        let mut vars = HashMap::new();
        vars.insert("role".to_string(), "a researcher".to_string());
        vars.insert("question".to_string(), "Why is the sky blue?".to_string());

        let built = build_prompt(&def, vars).unwrap();
        assert_eq!(built.system.as_deref(), Some("You are a researcher."));
        assert_eq!(built.user, "Question: Why is the sky blue?");
        assert_eq!(built.source_prompt_id, "test.prompt");
    }

    #[test]
    fn test_no_html_escaping() {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "a < b && c > d".to_string());

        let rendered = render_template("{{question}}", &vars).unwrap();
        assert_eq!(rendered, "a < b && c > d");
    }

    #[test]
    fn test_render_template_missing_variable() {
        let vars = HashMap::new();
        let result = render_template("Question: {{missing}}", &vars);
        // Handlebars renders missing variables as empty string
        assert!(result.is_ok());
    }
}
