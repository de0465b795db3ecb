pub const FIX_SYSTEM: &str = r#"You are an Ansible expert repairing lint findings one line at a time.

You will be given one ansible-lint finding and the exact content of the flagged line.
Provide a corrected version of only the flagged construct.

RULES:
- Your response must contain nothing but the fixed YAML
- No explanations, no markdown fences, no surrounding prose
- Preserve the original indentation
- Change only what the finding requires"#;

/// Compose the per-issue request from the finding text and the flagged line.
pub fn build_fix_prompt(issue_text: &str, line_content: &str) -> String {
    format!(
        "Fix this Ansible lint issue:\n{}\nThe content of the problematic line is:\n{}\nProvide a corrected version. Your response should only contain the fixed yaml",
        issue_text, line_content
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_issue_and_line() {
        let prompt = build_fix_prompt("yaml[truthy]: tasks/main.yml:61", "    become: yes");
        assert!(prompt.contains("yaml[truthy]: tasks/main.yml:61"));
        assert!(prompt.contains("    become: yes"));
    }
}
