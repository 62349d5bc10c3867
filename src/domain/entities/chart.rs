use crate::domain::entities::dataset::Mode;
use crate::i18n::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartDefinition {
    pub id: &'static str,
    pub label_key: &'static str,
    pub description_key: Option<&'static str>,
}

const fn chart(id: &'static str, label_key: &'static str) -> ChartDefinition {
    ChartDefinition {
        id,
        label_key,
        description_key: None,
    }
}

pub const CHARTS: [ChartDefinition; 22] = [
    ChartDefinition {
        id: "income-hist",
        label_key: "chart_income_hist_label",
        description_key: Some("chart_income_hist_description"),
    },
    chart("credit-vs-loan", "chart_credit_vs_loan_label"),
    chart("employment-box", "chart_employment_box_label"),
    chart("corr-heatmap", "chart_corr_heatmap_label"),
    chart("income-vs-score", "chart_income_vs_score_label"),
    chart("income-vs-years", "chart_income_vs_years_label"),
    chart("credit-violin", "chart_credit_violin_label"),
    chart("avg-income-by-city", "chart_avg_income_by_city_label"),
    chart("pairplot-main", "chart_pairplot_main_label"),
    chart("loan-amount-box", "chart_loan_amount_box_label"),
    chart("credit-score-hist", "chart_credit_score_hist_label"),
    chart("income-hist-density", "chart_income_hist_density_label"),
    chart("income-box", "chart_income_box_label"),
    chart("income-ecdf", "chart_income_ecdf_label"),
    chart("income-frequency", "chart_income_frequency_label"),
    chart(
        "income-relative-frequency",
        "chart_income_relative_frequency_label",
    ),
    chart("loan-pie", "chart_loan_pie_label"),
    chart("loan-group-means", "chart_loan_group_means_label"),
    chart("income-radar", "chart_income_radar_label"),
    chart("age-pyramid", "chart_age_pyramid_label"),
    chart("income-line", "chart_income_line_label"),
    chart("kurtosis-comparison", "chart_kurtosis_comparison_label"),
];

pub fn find_chart(id: &str) -> Option<&'static ChartDefinition> {
    CHARTS.iter().find(|chart| chart.id == id)
}

/// Rendered artifacts the backend can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Chart(&'static ChartDefinition),
    ChernoffFaces,
    ChernoffLegend,
    QuantilesDistance,
}

impl ArtifactKind {
    pub fn path(&self) -> String {
        match self {
            ArtifactKind::Chart(definition) => format!("/{}", definition.id),
            ArtifactKind::ChernoffFaces => "/chernoff-faces".to_string(),
            ArtifactKind::ChernoffLegend => "/chernoff-faces/legend".to_string(),
            ArtifactKind::QuantilesDistance => "/quantiles-distance".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChartParams {
    pub language: Language,
    pub mode: Option<Mode>,
    pub column: Option<String>,
    pub compare: Option<bool>,
    pub columns: Vec<String>,
    pub face: Option<String>,
}

impl ChartParams {
    pub fn for_language(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("language", self.language.code().to_string())];
        if let Some(mode) = self.mode {
            params.push(("mode", mode.as_str().to_string()));
        }
        if let Some(column) = self.column.as_ref().filter(|column| !column.is_empty()) {
            params.push(("column", column.clone()));
        }
        if let Some(compare) = self.compare {
            params.push(("compare", compare.to_string()));
        }
        if !self.columns.is_empty() {
            params.push(("columns", self.columns.join(",")));
        }
        if let Some(face) = self.face.as_ref().filter(|face| !face.is_empty()) {
            params.push(("face", face.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        for (idx, chart) in CHARTS.iter().enumerate() {
            assert!(
                CHARTS[idx + 1..].iter().all(|other| other.id != chart.id),
                "duplicate chart id {}",
                chart.id
            );
        }
    }

    #[test]
    fn params_only_include_set_values() {
        let params = ChartParams {
            language: Language::En,
            mode: Some(Mode::Merged),
            column: Some("income".to_string()),
            compare: Some(true),
            columns: vec!["income".to_string(), "points".to_string()],
            face: None,
        };

        assert_eq!(
            params.query(),
            vec![
                ("language", "en".to_string()),
                ("mode", "merged".to_string()),
                ("column", "income".to_string()),
                ("compare", "true".to_string()),
                ("columns", "income,points".to_string()),
            ]
        );
        assert_eq!(
            ChartParams::for_language(Language::Ko).query(),
            vec![("language", "ko".to_string())]
        );
    }
}
