//! Instruction text sent to the schema source.

use sprout_codegen::STYLE_TABLE;
use sprout_core::ComponentKind;

/// Build the instruction asking a text-generation service for a component
/// tree describing `request`. The request is passed through verbatim.
pub fn build_instruction(request: &str) -> String {
    let kinds = ComponentKind::ALL
        .iter()
        .map(|kind| kind.name())
        .collect::<Vec<_>>()
        .join(", ");
    let styles = STYLE_TABLE
        .iter()
        .map(|entry| entry.name)
        .collect::<Vec<_>>()
        .join(", ");

    [
        format!("Generate a React Native UI schema in JSON for: \"{request}\"."),
        "Rules:".to_string(),
        format!("- Use ONLY these components: {kinds}."),
        "- Every component is an object with \"kind\", \"properties\" and optional \"children\".".to_string(),
        format!("- To style a component, set its \"style\" property to one of: {styles}."),
        "- Return ONLY valid JSON, without additional text or comments.".to_string(),
        "Example: {\"components\": [{\"kind\": \"Container\", \"properties\": {\"style\": \"container\"}, \"children\": []}]}".to_string(),
    ]
    .join("\n")
}
