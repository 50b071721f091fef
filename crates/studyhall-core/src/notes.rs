//! Notes: study material in, AI summary/keywords/mindmap out, persisted.

use studyhall_ai::Normalizer;
use studyhall_store::{Note, NoteUpdate, Store};
use tracing::info;

use crate::ingest::DocumentSource;
use crate::{Error, UserContext, require_nonempty};

/// Create a note from pasted text or an uploaded document.
///
/// Extraction (if any) fully completes before normalization starts, which
/// fully completes before persistence starts. If persistence fails the
/// generated insights are discarded.
pub async fn create_note(
    ctx: &UserContext,
    store: &Store,
    normalizer: &Normalizer,
    title: &str,
    source: DocumentSource,
) -> Result<Note, Error> {
    let title = require_nonempty(title, "note title")?;
    let text = source.into_text()?;

    let insights = normalizer.process_note(&title, &text).await?;
    info!(
        user = %ctx.user_id,
        keywords = insights.keywords.len(),
        "note normalized"
    );

    Ok(store.create_note(
        &ctx.user_id,
        &title,
        &text,
        &insights.summary,
        &insights.keywords,
        &insights.mindmap,
    )?)
}

pub fn list_notes(ctx: &UserContext, store: &Store) -> Result<Vec<Note>, Error> {
    Ok(store.list_notes(&ctx.user_id)?)
}

pub fn get_note(ctx: &UserContext, store: &Store, id: &str) -> Result<Note, Error> {
    Ok(store.get_note(&ctx.user_id, id)?)
}

pub fn update_note(
    ctx: &UserContext,
    store: &Store,
    id: &str,
    update: &NoteUpdate,
) -> Result<Note, Error> {
    Ok(store.update_note(&ctx.user_id, id, update)?)
}

pub fn delete_note(ctx: &UserContext, store: &Store, id: &str) -> Result<(), Error> {
    Ok(store.delete_note(&ctx.user_id, id)?)
}
