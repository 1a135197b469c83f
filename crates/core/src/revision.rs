//! Rules for the prompt-driven revision workflow.
//!
//! Provides the credit cost, request validation, oracle instructions,
//! conversation narration, and sanitizing of generated HTML documents.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Credits debited for every revision attempt.
pub const REVISION_CREDIT_COST: i32 = 5;

/// Description stored on every version produced by a revision.
pub const REVISION_VERSION_DESCRIPTION: &str = "Changes made";

/// Output bound for the prompt-enhancement call, in tokens.
pub const ENHANCE_MAX_TOKENS: u32 = 150;

/// Output bound for the code-generation call, in tokens.
pub const GENERATE_MAX_TOKENS: u32 = 4000;

/// Matches an opening or closing markdown code fence with an optional
/// language tag, e.g. "```html\n" or a bare "```".
static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```[a-z]*\n?").expect("valid regex"));

// ---------------------------------------------------------------------------
// Oracle instructions
// ---------------------------------------------------------------------------

/// System instruction for the prompt-enhancement capability.
pub const ENHANCE_SYSTEM_PROMPT: &str = "You are a prompt enhancement specialist. \
The user wants to make changes to their website. Enhance their request to be more \
specific and actionable for a web developer.

Enhance this by:
1. Being specific about what elements to change
2. Mentioning design details (colors, spacing, sizes)
3. Clarifying the desired outcome
4. Using clear technical terms

Return ONLY the enhanced request, nothing else. Keep it concise (1-2 sentences).";

/// System instruction for the code-generation capability.
pub const GENERATE_SYSTEM_PROMPT: &str = "You are an expert web developer.

CRITICAL REQUIREMENTS:
- Return ONLY the complete updated HTML code with the requested changes.
- Use Tailwind CSS utility classes for ALL styling (NO custom CSS, no separate stylesheet).
- Include all JavaScript in <script> tags before the closing </body> tag.
- Make sure it is a complete, standalone HTML document.
- Return the HTML markup only: no explanations, no markdown fences.

Apply the requested changes while keeping the Tailwind CSS styling approach.";

/// Build the user turn for the prompt-enhancement call.
pub fn enhance_user_prompt(message: &str) -> String {
    format!("User's request: \"{message}\"")
}

/// Build the user turn for the code-generation call.
pub fn generate_user_prompt(current_code: &str, instruction: &str) -> String {
    format!(
        "Here is the current website code: \"{current_code}\" \
         The user wants this change: \"{instruction}\""
    )
}

// ---------------------------------------------------------------------------
// Conversation narration
// ---------------------------------------------------------------------------

/// Narration appended after the prompt has been enhanced.
pub fn enhanced_prompt_note(enhanced: &str) -> String {
    format!("I've enhanced your prompt to: \"{enhanced}\"")
}

/// Narration appended right before code generation starts.
pub const GENERATION_STARTED_NOTE: &str = "Now making changes to your website...";

/// Narration appended after a revision has been committed.
pub const REVISION_SUCCEEDED_NOTE: &str =
    "I've made the changes to your website! You can now preview it.";

/// Narration appended when a revision could not produce a document.
pub const REVISION_FAILED_NOTE: &str = "Unable to generate the code, please try again.";

/// Narration appended after a rollback.
pub const ROLLBACK_NOTE: &str =
    "I've rolled back your website to the selected version. You can now preview it.";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// The error for a user whose balance cannot cover a revision.
pub fn insufficient_credits(available: i32) -> CoreError {
    CoreError::InsufficientCredits {
        required: REVISION_CREDIT_COST,
        available,
    }
}

/// Ensure the user can afford a revision.
pub fn ensure_credits(available: i32) -> Result<(), CoreError> {
    if available < REVISION_CREDIT_COST {
        return Err(insufficient_credits(available));
    }
    Ok(())
}

/// Validate a change request. Blank-after-trim is rejected; the message
/// itself is returned untouched.
pub fn validate_change_request(message: Option<&str>) -> Result<&str, CoreError> {
    match message {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(CoreError::Validation(
            "Please enter a valid prompt".to_string(),
        )),
    }
}

/// Validate a manually saved document. Must be present and non-empty.
pub fn validate_saved_code(code: Option<&str>) -> Result<&str, CoreError> {
    match code {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(CoreError::Validation("Code is required".to_string())),
    }
}

// ---------------------------------------------------------------------------
// Sanitizing
// ---------------------------------------------------------------------------

/// Strip markdown code-fence markers from oracle output and trim it.
///
/// Returns `None` when nothing but whitespace remains.
pub fn sanitize_generated_code(raw: &str) -> Option<String> {
    let stripped = CODE_FENCE_RE.replace_all(raw, "");
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_language_tagged_fence() {
        let raw = "```html\n<!DOCTYPE html><html><body></body></html>\n```";
        assert_eq!(
            sanitize_generated_code(raw).as_deref(),
            Some("<!DOCTYPE html><html><body></body></html>")
        );
    }

    #[test]
    fn sanitize_strips_uppercase_tag() {
        let raw = "```HTML\n<html></html>```";
        assert_eq!(sanitize_generated_code(raw).as_deref(), Some("<html></html>"));
    }

    #[test]
    fn sanitize_leaves_plain_markup_untouched() {
        let raw = "  <html><body class=\"bg-blue-600\"></body></html>\n";
        assert_eq!(
            sanitize_generated_code(raw).as_deref(),
            Some("<html><body class=\"bg-blue-600\"></body></html>")
        );
    }

    #[test]
    fn sanitize_rejects_fence_only_output() {
        assert_eq!(sanitize_generated_code("```html\n```"), None);
        assert_eq!(sanitize_generated_code("   "), None);
        assert_eq!(sanitize_generated_code(""), None);
    }

    #[test]
    fn credits_below_cost_rejected() {
        let err = ensure_credits(4).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientCredits {
                required: 5,
                available: 4
            }
        ));
    }

    #[test]
    fn shortfall_reports_balance_read() {
        assert!(matches!(
            ensure_credits(3),
            Err(CoreError::InsufficientCredits { required: 5, available: 3 })
        ));
        assert!(matches!(
            insufficient_credits(12),
            CoreError::InsufficientCredits { required: 5, available: 12 }
        ));
    }

    #[test]
    fn credits_at_cost_accepted() {
        assert!(ensure_credits(REVISION_CREDIT_COST).is_ok());
    }

    #[test]
    fn change_request_returned_raw() {
        assert_eq!(
            validate_change_request(Some("  make the header blue \n")).unwrap(),
            "  make the header blue \n"
        );
    }

    #[test]
    fn blank_change_request_rejected() {
        assert!(validate_change_request(Some("   ")).is_err());
        assert!(validate_change_request(None).is_err());
    }

    #[test]
    fn empty_saved_code_rejected() {
        assert!(validate_saved_code(Some("")).is_err());
        assert!(validate_saved_code(None).is_err());
        assert_eq!(validate_saved_code(Some("<html></html>")).unwrap(), "<html></html>");
    }

    #[test]
    fn generate_prompt_embeds_code_and_instruction() {
        let prompt = generate_user_prompt("<html></html>", "Make it blue");
        assert!(prompt.contains("<html></html>"));
        assert!(prompt.contains("Make it blue"));
    }

    #[test]
    fn enhanced_note_quotes_prompt() {
        assert_eq!(
            enhanced_prompt_note("Use #2563eb"),
            "I've enhanced your prompt to: \"Use #2563eb\""
        );
    }
}
