use crate::domain::entities::summary::PrognosisDetails;
use crate::i18n::Translator;
use crate::usecase::ports::remote::{FetchError, RemoteClient};
use crate::usecase::services::dispatch::FetchPanel;

pub type PrognosisPanel = FetchPanel<PrognosisDetails>;

pub async fn fetch_prognosis_process<C: RemoteClient>(
    client: &C,
) -> Result<PrognosisDetails, FetchError> {
    client
        .get_envelope::<PrognosisDetails>("/prognosis-process", &[])
        .await?
        .into_result()
}

pub fn process_summary(t: &Translator, details: &PrognosisDetails) -> String {
    t.t_or(
        "prognosis_process_summary",
        "Based on the first {rows} records.",
    )
    .replace("{rows}", &details.source_rows.to_string())
}
