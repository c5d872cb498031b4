//! The fixed instructional prompt wrapped around user text.

/// Build the study-notes prompt for already-trimmed `text`.
pub fn build_prompt(text: &str) -> String {
    format!(
        "You are an assistant that creates concise study outputs for university students.\n\
         Input: {text}\n\
         \n\
         Output JSON with keys:\n\
         - \"summary\": a 2-3 sentence concise summary\n\
         - \"key_points\": 4 bullet points (short)\n\
         - \"quiz_questions\": 3 short multiple-choice or short-answer questions\n\
         \n\
         Return only valid JSON.\n"
    )
}
