//! CLI entry-point for seeding reference tables and the starter corpus.

use anyhow::Result;
use tracing::{info, instrument};

use crate::{config::Settings, data::corpus, data::store::DataStore};

#[instrument(skip(settings))]
pub async fn run(settings: Settings) -> Result<()> {
    let store = DataStore::load(&settings.data_dir)?;
    info!(
        cancer_types = store.cancer_types().len(),
        treatments = store.treatments().len(),
        side_effects = store.side_effects().len(),
        faq_categories = store.faq().len(),
        "reference tables ready"
    );
    corpus::write_starter_corpus(&settings.corpus_path())?;
    Ok(())
}
