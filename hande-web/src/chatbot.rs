//! Canned replies for the demo chatbot
//!
//! Deliberately trivial: the point of `/chat` is the metering around it.

/// Produce a deterministic reply to `message`
pub fn compose_reply(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return "Say something and I'll answer. Each message is metered as one chat_message unit."
            .to_string();
    }

    let lower = trimmed.to_lowercase();
    let first_word = lower
        .split(|c: char| !c.is_alphanumeric())
        .find(|w| !w.is_empty())
        .unwrap_or_default();

    if matches!(first_word, "hello" | "hi" | "hey" | "bonjour" | "salut") {
        return "Hello! I'm the Hand-E demo bot. Ask me anything.".to_string();
    }

    if ["price", "cost", "usage", "bill", "quota"]
        .iter()
        .any(|k| lower.contains(k))
    {
        return "Every message you send is reported to Hand-E as one chat_message unit, \
                attributed to you when you are signed in."
            .to_string();
    }

    format!("You said: {}", trimmed)
}
