use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::entities::chart::{find_chart, ArtifactKind, ChartParams};
use crate::infra::images::object_url::{ObjectUrl, ObjectUrlRegistry};
use crate::usecase::ports::remote::{Binary, FetchError, RemoteClient};
use crate::usecase::services::dispatch::{FetchPanel, RequestTracker, Ticket};

pub type DescriptionPanel = FetchPanel<String>;

pub async fn fetch_artifact<C: RemoteClient>(
    client: &C,
    kind: ArtifactKind,
    params: &ChartParams,
) -> Result<Binary, FetchError> {
    let path = kind.path();
    debug!(path = %path, "fetching rendered artifact");
    client
        .get_binary(&path, &params.query())
        .await
        .inspect_err(|err| warn!(path = %path, error = %err, "artifact fetch failed"))
}

/// Unknown ids are rejected before any request is made.
pub async fn fetch_chart<C: RemoteClient>(
    client: &C,
    chart_id: &str,
    params: &ChartParams,
) -> Result<Binary, FetchError> {
    let Some(definition) = find_chart(chart_id) else {
        warn!(chart_id, "unknown chart requested");
        return Err(FetchError::UnknownChart(chart_id.to_string()));
    };
    fetch_artifact(client, ArtifactKind::Chart(definition), params).await
}

#[derive(Debug, Deserialize)]
struct ChartDescription {
    #[serde(default)]
    description: String,
}

pub async fn load_chart_description<C: RemoteClient>(
    client: &C,
    chart_id: &str,
    params: &ChartParams,
) -> Result<String, FetchError> {
    if find_chart(chart_id).is_none() {
        return Err(FetchError::UnknownChart(chart_id.to_string()));
    }
    let mut query = vec![
        ("chart", chart_id.to_string()),
        ("language", params.language.code().to_string()),
    ];
    if let Some(column) = params.column.as_ref().filter(|column| !column.is_empty()) {
        query.push(("column", column.clone()));
    }
    if let Some(compare) = params.compare {
        query.push(("compare", compare.to_string()));
    }
    Ok(client
        .get_envelope::<ChartDescription>("/chart-description", &query)
        .await?
        .into_optional()?
        .map(|body| body.description)
        .unwrap_or_default())
}

/// Image slot of a chart panel. Holds at most one live [`ObjectUrl`]; the
/// previous one is released when replaced, on failure, on `clear` and when
/// the panel is dropped.
#[derive(Debug, Default)]
pub struct ImagePanel {
    image: Option<ObjectUrl>,
    error: Option<FetchError>,
    loading: bool,
    tracker: RequestTracker,
}

impl ImagePanel {
    pub fn begin(&mut self) -> Ticket {
        self.loading = true;
        self.error = None;
        self.tracker.dispatch()
    }

    pub fn settle(
        &mut self,
        ticket: Ticket,
        result: Result<Binary, FetchError>,
        registry: &ObjectUrlRegistry,
    ) -> bool {
        if !self.tracker.is_current(ticket) {
            debug!("dropping superseded image response");
            return false;
        }
        self.loading = false;
        match result {
            Ok(binary) => {
                self.image = Some(registry.create(binary));
                self.error = None;
            }
            Err(err) => {
                self.image = None;
                self.error = Some(err);
            }
        }
        true
    }

    pub fn clear(&mut self) {
        self.tracker.invalidate();
        self.image = None;
        self.error = None;
        self.loading = false;
    }

    pub fn image(&self) -> Option<&ObjectUrl> {
        self.image.as_ref()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
