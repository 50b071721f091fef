//! Past papers: uploaded exam paper in, topic/prediction analysis out.

use studyhall_ai::Normalizer;
use studyhall_store::{PastPaper, Store};
use tracing::info;

use crate::ingest::DocumentSource;
use crate::{Error, UserContext, require_nonempty};

pub async fn analyze_paper(
    ctx: &UserContext,
    store: &Store,
    normalizer: &Normalizer,
    title: &str,
    source: DocumentSource,
) -> Result<PastPaper, Error> {
    let title = require_nonempty(title, "paper title")?;
    let text = source.into_text()?;

    let analysis = normalizer.analyze_paper(&title, &text).await?;
    info!(
        user = %ctx.user_id,
        topics = analysis.topics.len(),
        "past paper analyzed"
    );

    Ok(store.create_paper(
        &ctx.user_id,
        &title,
        &analysis.topics,
        &analysis.predictions,
        &analysis.analysis,
    )?)
}

pub fn list_papers(ctx: &UserContext, store: &Store) -> Result<Vec<PastPaper>, Error> {
    Ok(store.list_papers(&ctx.user_id)?)
}

pub fn get_paper(ctx: &UserContext, store: &Store, id: &str) -> Result<PastPaper, Error> {
    Ok(store.get_paper(&ctx.user_id, id)?)
}

pub fn delete_paper(ctx: &UserContext, store: &Store, id: &str) -> Result<(), Error> {
    Ok(store.delete_paper(&ctx.user_id, id)?)
}
