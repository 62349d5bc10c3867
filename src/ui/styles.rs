use crate::domain::entities::row::DatasetCode;

pub fn root_container_style() -> &'static str {
    "height: 100vh; display: flex; flex-direction: column; overflow: hidden; font-family: sans-serif; padding: 0 12px; box-sizing: border-box;"
}

pub fn table_container_style() -> &'static str {
    "flex: 1; min-height: 0; overflow: auto; border: 1px solid #ddd; border-radius: 6px;"
}

pub fn table_header_cell_style() -> &'static str {
    "position: sticky; top: 0; z-index: 2; background: #f6f6f6; border-bottom: 1px solid #ccc; padding: 6px 10px; text-align: left; white-space: nowrap; cursor: pointer;"
}

pub fn table_cell_style(numeric: bool) -> &'static str {
    if numeric {
        "padding: 4px 10px; border-bottom: 1px solid #eee; text-align: right; white-space: nowrap;"
    } else {
        "padding: 4px 10px; border-bottom: 1px solid #eee; text-align: left; white-space: nowrap;"
    }
}

pub fn tab_button_style(active: bool) -> &'static str {
    if active {
        "border: none; border-bottom: 2px solid #2f6fdf; background: transparent; padding: 8px 14px; font-weight: 600; cursor: pointer;"
    } else {
        "border: none; border-bottom: 2px solid transparent; background: transparent; padding: 8px 14px; cursor: pointer;"
    }
}

pub fn toggle_button_style(active: bool) -> &'static str {
    if active {
        "border: 1px solid #2f6fdf; background: #2f6fdf; color: #fff; padding: 4px 10px; cursor: pointer;"
    } else {
        "border: 1px solid #2f6fdf; background: #fff; color: #2f6fdf; padding: 4px 10px; cursor: pointer;"
    }
}

/// Badge colors for the dataset column.
pub fn dataset_badge_style(code: Option<DatasetCode>) -> &'static str {
    match code {
        Some(DatasetCode::Normal) => {
            "display: inline-block; padding: 2px 8px; border-radius: 10px; background: #e3f0ff; color: #1d4f91; cursor: pointer;"
        }
        Some(DatasetCode::Prognosis) => {
            "display: inline-block; padding: 2px 8px; border-radius: 10px; background: #fff1db; color: #8a5300; cursor: pointer;"
        }
        None => {
            "display: inline-block; padding: 2px 8px; border-radius: 10px; background: #eee; color: #555;"
        }
    }
}

pub fn error_style() -> &'static str {
    "color: #a11; background: #fdecec; border: 1px solid #f3b5b5; border-radius: 6px; padding: 8px 12px;"
}

pub fn image_panel_style() -> &'static str {
    "display: flex; align-items: center; justify-content: center; min-height: 320px; border: 1px solid #ddd; border-radius: 6px; padding: 8px;"
}
