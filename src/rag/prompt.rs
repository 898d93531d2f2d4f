//! System-prompt assembly for retrieval-augmented answers.
//!
//! Pure string construction so the context placement is directly unit
//! testable. Retrieved texts are serialized as a JSON list between the
//! context markers; an empty retrieval leaves the section blank and the
//! model falls back to general knowledge.

pub const CONTEXT_START: &str = "START CONTEXT";
pub const CONTEXT_END: &str = "END CONTEXT";

/// Build the per-query system prompt from the retrieved texts and the latest
/// user question.
pub fn build_system_prompt(context_texts: &[String], question: &str) -> String {
    let doc_context = if context_texts.is_empty() {
        String::new()
    } else {
        serde_json::to_string(context_texts).unwrap_or_default()
    };

    format!(
        "You are an AI assistant who knows everything about football.\n\
         Use the below context to augment what you know about football.\n\
         The context will provide you with the most recent page data from Wikipedia, \
         news sites, official football websites, and other football-related websites.\n\
         If the context doesn't include the information you need to answer, use your \
         existing knowledge.\n\
         Do not mention the source of your information or what the context does or \
         doesn't include.\n\
         Format responses using markdown where applicable and do not return images.\n\
         \n\
         ---------------\n\
         {CONTEXT_START}\n\
         {doc_context}\n\
         {CONTEXT_END}\n\
         \n\
         --------------\n\
         QUESTION: {question}\n\
         \n\
         ______________\n"
    )
}
