use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::entities::dataset::Mode;
use crate::domain::entities::row::CellValue;
use crate::domain::entities::summary::{ColumnStats, Quartiles, StatKind};
use crate::i18n::Language;
use crate::usecase::ports::remote::{FetchError, RemoteClient};
use crate::usecase::services::dispatch::FetchPanel;

pub type ColumnStatsPanel = FetchPanel<ColumnStats>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsQuery {
    pub column: String,
    pub language: Language,
    pub mode: Mode,
}

impl StatsQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("column_name", self.column.clone()),
            ("language", self.language.code().to_string()),
            ("mode", self.mode.as_str().to_string()),
        ]
    }
}

async fn fetch_stat<C, T>(
    client: &C,
    kind: StatKind,
    query: &StatsQuery,
) -> Result<Option<T>, FetchError>
where
    C: RemoteClient,
    T: DeserializeOwned,
{
    debug!(endpoint = kind.endpoint(), column = %query.column, "fetching statistic");
    client
        .get_envelope::<T>(kind.endpoint(), &query.params())
        .await
        .and_then(|envelope| envelope.into_optional())
        .inspect_err(|err| {
            warn!(
                endpoint = kind.endpoint(),
                column = %query.column,
                error = %err,
                "column statistic failed"
            )
        })
}

async fn fetch_required<C, T>(client: &C, kind: StatKind, query: &StatsQuery) -> Result<T, FetchError>
where
    C: RemoteClient,
    T: DeserializeOwned,
{
    fetch_stat(client, kind, query).await?.ok_or_else(|| {
        FetchError::Decode(format!("{} returned no value", kind.endpoint()))
    })
}

/// Fetches every statistic for one column in order. The first failure fails
/// the whole set. Only `mode` may be null.
pub async fn fetch_column_stats<C: RemoteClient>(
    client: &C,
    query: &StatsQuery,
) -> Result<ColumnStats, FetchError> {
    Ok(ColumnStats {
        mean: Some(fetch_required(client, StatKind::Mean, query).await?),
        median: Some(fetch_required(client, StatKind::Median, query).await?),
        mode: Some(
            fetch_stat::<C, CellValue>(client, StatKind::Mode, query)
                .await?
                .unwrap_or(CellValue::Null),
        ),
        sum: Some(fetch_required(client, StatKind::Sum, query).await?),
        deviation: Some(fetch_required(client, StatKind::Deviation, query).await?),
        skewness: Some(fetch_required(client, StatKind::Skewness, query).await?),
        kurtosis: Some(fetch_required(client, StatKind::Kurtosis, query).await?),
        quartiles: Some(fetch_required::<C, Quartiles>(client, StatKind::Quartiles, query).await?),
    })
}
