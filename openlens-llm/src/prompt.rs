//! Prompt construction for the description request

use openlens_core::LabelSequence;

/// Returned verbatim when nothing was detected; the description service
/// is never contacted in that case and the caller displays this directly.
pub const NO_OBJECTS_MESSAGE: &str = "No objects detected.";

/// Persona for the system message in live mode.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that provides concise and interesting information about objects detected by a computer vision system.";

/// Build the user prompt for a label sequence.
///
/// Every label appears exactly once, in sequence order, joined with
/// `", "`. An empty sequence short-circuits to [`NO_OBJECTS_MESSAGE`].
pub fn build_prompt(labels: &LabelSequence) -> String {
    if labels.is_empty() {
        return NO_OBJECTS_MESSAGE.to_string();
    }

    format!(
        "I can see the following objects in my camera: {}. Please provide a brief description or interesting facts about these objects.",
        labels.join()
    )
}
