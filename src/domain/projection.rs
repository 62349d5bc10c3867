use crate::domain::entities::column::ColumnSelection;
use crate::domain::entities::dataset::{DatasetFilter, Mode, SortDirection, SortState};
use crate::domain::entities::row::{compare_cells, Row, DATASET_COLUMN, NAME_COLUMN};
use crate::i18n::collation::TextCollator;
use crate::i18n::Language;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ViewOptions {
    pub sort: SortState,
    pub filter: DatasetFilter,
    pub selection: ColumnSelection,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projection {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

const DATASET_RANK_ASC: [&str; 2] = ["prognosis", "normal"];
const DATASET_RANK_DESC: [&str; 2] = ["normal", "prognosis"];

/// Text columns sort with the collation of `language`.
pub fn project(
    rows: &[Row],
    mode: Mode,
    language: Language,
    options: &ViewOptions,
) -> Projection {
    Projection {
        columns: visible_columns(rows, &options.selection),
        rows: filter_and_sort(rows, mode, language, options),
    }
}

pub fn filter_rows(rows: &[Row], mode: Mode, filter: DatasetFilter) -> Vec<Row> {
    match filter {
        DatasetFilter::All => rows.to_vec(),
        DatasetFilter::Only(code) => rows
            .iter()
            .filter(|row| row.filter_code(mode) == code.as_str())
            .cloned()
            .collect(),
    }
}

fn filter_and_sort(
    rows: &[Row],
    mode: Mode,
    language: Language,
    options: &ViewOptions,
) -> Vec<Row> {
    let mut visible = filter_rows(rows, mode, options.filter);
    let Some(key) = options.sort.key.as_deref() else {
        return visible;
    };
    let direction = options.sort.direction;

    if key == DATASET_COLUMN {
        // The rank list itself encodes direction; unknown codes stay last.
        let order = match direction {
            SortDirection::Asc => DATASET_RANK_ASC,
            SortDirection::Desc => DATASET_RANK_DESC,
        };
        let rank = |row: &Row| {
            let code = row.sort_code(mode);
            order
                .iter()
                .position(|candidate| *candidate == code)
                .unwrap_or(usize::MAX)
        };
        visible.sort_by_key(|row| rank(row));
    } else {
        let collator = TextCollator::for_language(language);
        visible.sort_by(|a, b| {
            direction.apply(compare_cells(a.get(key), b.get(key), &collator))
        });
    }
    visible
}

/// Display columns: `name` when present, the synthetic `dataset` column, then
/// the selected catalog columns in catalog order.
pub fn visible_columns(rows: &[Row], selection: &ColumnSelection) -> Vec<String> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let mut columns = Vec::new();
    if first.contains(NAME_COLUMN) {
        columns.push(NAME_COLUMN.to_string());
    }
    columns.push(DATASET_COLUMN.to_string());
    columns.extend(
        selection
            .in_catalog_order()
            .into_iter()
            .map(str::to_string),
    );
    columns
}

#[derive(Debug, Clone, PartialEq)]
struct ProjectionKey {
    revision: u64,
    mode: Mode,
    language: Language,
    options: ViewOptions,
}

/// Memoizes [`project`] against the rows revision, the collation language and
/// the view options. Any
/// change recomputes the whole projection.
#[derive(Debug, Default)]
pub struct Projector {
    key: Option<ProjectionKey>,
    projection: Projection,
    computations: u64,
}

impl Projector {
    pub fn project(
        &mut self,
        revision: u64,
        rows: &[Row],
        mode: Mode,
        language: Language,
        options: &ViewOptions,
    ) -> &Projection {
        let key = ProjectionKey {
            revision,
            mode,
            language,
            options: options.clone(),
        };
        if self.key.as_ref() != Some(&key) {
            self.projection = project(rows, mode, language, options);
            self.key = Some(key);
            self.computations += 1;
        }
        &self.projection
    }

    pub fn computations(&self) -> u64 {
        self.computations
    }
}
