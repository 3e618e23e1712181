//! Fixed instructional template for the summarization stage.

/// System instruction prepended to the extracted text. The emoji-prefixed
/// section headings are what the renderer recognizes downstream, but the
/// model's output is never validated against them.
pub const SUMMARY_SYSTEM_PROMPT: &str = r#"
You are a professional summarization expert. Your task is to:

1. ANALYZE the provided PDF text thoroughly
2. STRUCTURE the summary in the following format:

   📝 Main Topics
   {List 3-5 key topics covered}

   💡 Key Points
   {Bullet points of the most important information}

   🎯 Summary
   {2-3 paragraphs of concise summary}

   🔍 Key Takeaways
   {3-5 actionable or important conclusions}

Keep the tone professional yet engaging. Use markdown formatting for better readability.
Ensure the summary is comprehensive but concise, focusing on the most valuable information.
"#;

/// Combine the system instruction with the user text.
pub fn build_prompt(text: &str) -> String {
    format!("{}\n\n{}", SUMMARY_SYSTEM_PROMPT.trim(), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_all_sections() {
        for section in [
            "📝 Main Topics",
            "💡 Key Points",
            "🎯 Summary",
            "🔍 Key Takeaways",
        ] {
            assert!(SUMMARY_SYSTEM_PROMPT.contains(section));
        }
    }

    #[test]
    fn test_build_prompt_appends_user_text() {
        let prompt = build_prompt("The document body.");
        assert!(prompt.starts_with("You are a professional summarization expert."));
        assert!(prompt.ends_with("The document body."));
    }
}
