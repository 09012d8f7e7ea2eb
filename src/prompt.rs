//! Prompt texts sent to the language model.

/// Label prefix for a partial summary in the merge pass.
pub const CHUNK_LABEL_PREFIX: &str = "Chunk";

/// Marker used in place of an empty transcript.
pub const EMPTY_TRANSCRIPT_MARKER: &str = "[no transcript]";

/// Instruction prepended to the labelled partial summaries before the merge pass.
pub const MERGE_PREAMBLE: &str = "Below are short summaries of consecutive parts of a set of notes. \
Combine them into one coherent, short summary and list the 5 most important observations or actions.\n\n";

/// Prompt for summarizing one chunk of notes (also used for the merge pass).
#[must_use]
pub fn build_summary_prompt(text: &str) -> String {
    format!(
        "Read the notes below and write a short summary (2-4 paragraphs) followed by 5 key observations:\n\n\
         {text}\n\n\
         Present the result in a clear, bulleted format."
    )
}

/// Label a partial summary with its 1-based chunk ordinal.
#[must_use]
pub fn label_partial_summary(ordinal: usize, summary: &str) -> String {
    format!("{CHUNK_LABEL_PREFIX} {ordinal} summary:\n{summary}")
}

/// Input for the merge pass: the preamble followed by the labelled partial
/// summaries, separated by blank lines.
#[must_use]
pub fn build_merge_input(labelled_summaries: &[String]) -> String {
    format!("{MERGE_PREAMBLE}{}", labelled_summaries.join("\n\n"))
}

/// Empathetic reflection on a single transcribed recording.
#[must_use]
pub fn build_reflection_prompt(transcript: &str) -> String {
    let transcript = if transcript.trim().is_empty() {
        EMPTY_TRANSCRIPT_MARKER
    } else {
        transcript
    };

    format!(
        "Imagine you are a psychologist listening to a recording of a person talking about their thoughts and emotions.\n\
         Your task is to:\n\
         - Gently and empathetically point out the most important themes and patterns in the recording.\n\
         - Share a reflection on the emotions, mood and possible psychological challenges that may affect the speaker's wellbeing.\n\
         - Ask reflective questions that help the person understand their thoughts, feelings and needs more deeply.\n\
         - Focus on support, understanding and a sense of safety, so the person feels heard and appreciated.\n\
         - Phrase your conclusions in a warm, friendly tone, as if talking to the person face to face, avoiding stiff academic language.\n\n\
         Recording: {transcript}\n\n\
         Please answer clearly, warmly and empathetically, in a way that encourages reflection and self-awareness."
    )
}

/// Follow-up analysis of a summary, addressed to the speaker.
#[must_use]
pub fn build_analysis_prompt(summary: &str) -> String {
    format!(
        "You are a psychologist. Read the notes below, which summarize a conversation with a client. \
         Prepare an analysis as clear bullet points, addressing the client directly as if discussing \
         their experiences and emotions. Offer guidance, reflections and possible questions for further \
         personal work.\n\n\
         {summary}\n\n\
         Present the result as a bulleted list in a friendly tone."
    )
}
