use num_format::ToFormattedString;

use crate::domain::entities::row::CellValue;
use crate::i18n::{Language, Translator};

pub const MISSING: &str = "-";

/// Locale digit grouping with at most two fraction digits.
pub fn format_number(value: f64, language: Language) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    let locale = language.number_locale();
    let rounded = (value * 100.0).round() / 100.0;
    let magnitude = rounded.abs();
    let mut whole = magnitude.trunc() as u64;
    let mut cents = ((magnitude - magnitude.trunc()) * 100.0).round() as u64;
    if cents >= 100 {
        whole += 1;
        cents = 0;
    }

    let mut text = String::new();
    if rounded < 0.0 && (whole > 0 || cents > 0) {
        text.push_str(locale.minus_sign());
    }
    text.push_str(&whole.to_formatted_string(&locale));
    if cents > 0 {
        text.push_str(locale.decimal());
        text.push_str(format!("{cents:02}").trim_end_matches('0'));
    }
    text
}

/// Differences carry an explicit `+` for positive values.
pub fn format_signed(value: f64, language: Language) -> String {
    let text = format_number(value, language);
    if value.is_finite() && (value * 100.0).round() > 0.0 {
        format!("+{text}")
    } else {
        text
    }
}

pub fn format_bool(value: bool, t: &Translator) -> String {
    if value {
        t.t_or("bool_true", "Yes")
    } else {
        t.t_or("bool_false", "No")
    }
}

pub fn format_cell_value(value: Option<&CellValue>, t: &Translator) -> String {
    match value {
        None | Some(CellValue::Null) => MISSING.to_string(),
        Some(CellValue::Number(number)) => format_number(*number, t.language()),
        Some(CellValue::Bool(flag)) => format_bool(*flag, t),
        Some(value @ CellValue::Text(text)) => match value.as_bool() {
            Some(flag) => format_bool(flag, t),
            None if text.trim().is_empty() => MISSING.to_string(),
            None => text.clone(),
        },
        Some(other) => other.plain_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_use_grouping_and_two_decimals() {
        assert_eq!(format_number(1234567.891, Language::En), "1,234,567.89");
        assert_eq!(format_number(-1500.5, Language::En), "-1,500.5");
        assert_eq!(format_number(42.0, Language::En), "42");
        assert_eq!(format_number(f64::NAN, Language::En), MISSING);
    }

    #[test]
    fn signed_numbers_mark_positive_differences() {
        assert_eq!(format_signed(200.0, Language::En), "+200");
        assert_eq!(format_signed(-0.5, Language::En), "-0.5");
        assert_eq!(format_signed(0.0, Language::En), "0");
    }

    #[test]
    fn loose_booleans_are_localized() {
        let t = Translator::new(Language::En);

        assert_eq!(
            format_cell_value(Some(&CellValue::Text("tak".to_string())), &t),
            "Yes"
        );
        assert_eq!(format_cell_value(Some(&CellValue::Bool(false)), &t), "No");
        assert_eq!(format_cell_value(Some(&CellValue::Null), &t), MISSING);
        assert_eq!(format_cell_value(None, &t), MISSING);
        assert_eq!(
            format_cell_value(Some(&CellValue::Text("Warszawa".to_string())), &t),
            "Warszawa"
        );
    }
}
