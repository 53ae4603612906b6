// Prompts for the enhancement gateway.
// Each builder interpolates its arguments in a single `format!` pass, so
// user text that looks like a placeholder is sent verbatim.

/// System prompt shared by every enhancement call: plain text out, nothing else.
pub const ENHANCE_SYSTEM: &str = "You are an expert career coach and resume writer. \
    Respond with the requested text only. \
    Do NOT wrap the answer in quotes. \
    Do NOT use markdown. \
    Do NOT include explanations or apologies.";

/// Rewrite one bullet or paragraph.
pub fn enhance_text_prompt(context: &str, text: &str) -> String {
    format!(
        "Rewrite the following resume bullet point to be more professional, action-oriented, \
         and impactful. Keep it concise.\n\
         \n\
         Context (Job Title/Field): {context}\n\
         Original Text: \"{text}\"\n\
         \n\
         Return ONLY the rewritten text. Do not add quotes or explanations."
    )
}

/// Summary from the whole document.
pub fn summary_prompt(job_title: &str, experience: &str, skills: &str) -> String {
    format!(
        "Write a compelling, professional resume summary (3-4 sentences max) for a {job_title}.\n\
         \n\
         Key Experience: {experience}\n\
         Key Skills: {skills}\n\
         \n\
         The summary should highlight expertise and career goals. Return ONLY the summary text."
    )
}

pub fn suggest_skills_prompt(job_title: &str) -> String {
    format!(
        "List 10 relevant hard and soft skills for a \"{job_title}\" role. \
         Return the result as a comma-separated list of strings only. No bullets, no numbering."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_lookalikes_are_sent_verbatim() {
        let prompt = enhance_text_prompt("{text}", "Shipped v2");
        assert!(prompt.contains("Context (Job Title/Field): {text}\n"));
        assert_eq!(prompt.matches("Shipped v2").count(), 1);

        let prompt = summary_prompt("Dev {skills}", "{experience}", "Rust");
        assert!(prompt.contains("for a Dev {skills}."));
        assert!(prompt.contains("Key Experience: {experience}\n"));
        assert_eq!(prompt.matches("Rust").count(), 1);
    }
}
