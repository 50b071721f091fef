//! Conversational tutor: one turn per call, transcript persisted per session.

use serde_json::Value;
use studyhall_ai::{ChatMessage, Normalizer};
use studyhall_store::{ChatSession, Store};
use tracing::info;

use crate::{Error, UserContext, require_nonempty};

/// How much of the first message becomes a new session's title.
const TITLE_MAX_CHARS: usize = 60;

/// Send one message. With no `session_id` a new session is started, titled
/// from the message itself. The user turn and the tutor's reply are appended
/// to the transcript in a single write (last-write-wins across tabs).
pub async fn send_message(
    ctx: &UserContext,
    store: &Store,
    normalizer: &Normalizer,
    session_id: Option<&str>,
    message: &str,
) -> Result<ChatSession, Error> {
    let message = require_nonempty(message, "chat message")?;

    let existing = match session_id {
        Some(id) => Some(store.get_chat_session(&ctx.user_id, id)?),
        None => None,
    };
    let mut history: Vec<ChatMessage> = existing
        .as_ref()
        .map(|s| serde_json::from_value(s.messages.clone()).unwrap_or_default())
        .unwrap_or_default();

    let reply = normalizer.chat_reply(&history, &message).await?;
    info!(user = %ctx.user_id, new_session = existing.is_none(), "chat turn completed");

    history.push(ChatMessage::user(message.clone()));
    history.push(ChatMessage::assistant(reply));
    let transcript =
        serde_json::to_value(&history).unwrap_or_else(|_| Value::Array(Vec::new()));

    let session = match existing {
        Some(session) => store.update_chat_messages(&ctx.user_id, &session.id, &transcript)?,
        None => {
            let title = session_title(&message);
            store.create_chat_session(&ctx.user_id, &title, &transcript)?
        }
    };
    Ok(session)
}

pub fn list_sessions(ctx: &UserContext, store: &Store) -> Result<Vec<ChatSession>, Error> {
    Ok(store.list_chat_sessions(&ctx.user_id)?)
}

pub fn get_session(ctx: &UserContext, store: &Store, id: &str) -> Result<ChatSession, Error> {
    Ok(store.get_chat_session(&ctx.user_id, id)?)
}

pub fn delete_session(ctx: &UserContext, store: &Store, id: &str) -> Result<(), Error> {
    Ok(store.delete_chat_session(&ctx.user_id, id)?)
}

fn session_title(message: &str) -> String {
    let mut title: String = message.chars().take(TITLE_MAX_CHARS).collect();
    if message.chars().count() > TITLE_MAX_CHARS {
        title.push('…');
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_titles_are_kept_verbatim() {
        assert_eq!(session_title("What is osmosis?"), "What is osmosis?");
    }

    #[test]
    fn long_titles_are_truncated_on_char_boundaries() {
        let long = "ä".repeat(100);
        let title = session_title(&long);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + 1);
        assert!(title.ends_with('…'));
    }
}
