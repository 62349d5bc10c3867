use tracing::{info, warn};

use crate::domain::entities::dataset::Mode;
use crate::domain::entities::summary::{DiffTable, SummarySnapshot};
use crate::usecase::ports::remote::{FetchError, RemoteClient};
use crate::usecase::services::dispatch::FetchPanel;

pub type DiffPanel = FetchPanel<DiffTable>;
pub type SummaryPanel = FetchPanel<SummarySnapshot>;

pub async fn fetch_summary<C: RemoteClient>(
    client: &C,
    mode: Mode,
) -> Result<SummarySnapshot, FetchError> {
    let params = [("mode", mode.as_str().to_string())];
    Ok(client
        .get_envelope::<SummarySnapshot>("/summary", &params)
        .await?
        .into_optional()?
        .unwrap_or_default())
}

/// Fetches the normal and prognosis summaries concurrently and differences
/// them. Either failure fails the whole operation.
pub async fn fetch_diff<C: RemoteClient>(client: &C) -> Result<DiffTable, FetchError> {
    let result = tokio::try_join!(
        fetch_summary(client, Mode::Normal),
        fetch_summary(client, Mode::Prognosis)
    );
    match result {
        Ok((normal, prognosis)) => {
            let table = DiffTable::between(&normal, &prognosis);
            info!(cells = table.len(), "statistics diff ready");
            Ok(table)
        }
        Err(err) => {
            warn!(error = %err, "statistics diff failed");
            Err(err)
        }
    }
}
