// src/extractors/record.rs

// --- Imports ---
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::extractors::candidates::generate_candidates;
use crate::extractors::keys::{collapse, is_area_key, is_employee_number_key, is_name_key};
use crate::utils::error::ExtractError;

// --- Data Structures ---
/// The three columns a badge payload must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    EmployeeNumber,
    Area,
}

impl Field {
    /// Column label as written in the register file.
    pub fn column_name(&self) -> &'static str {
        match self {
            Field::Name => "Nombre",
            Field::EmployeeNumber => "Número de empleado",
            Field::Area => "Área",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// A fully resolved badge record. All three fields are trimmed and
/// non-empty; partial records never leave this module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeRecord {
    #[serde(rename = "Nombre")]
    pub name: String,
    #[serde(rename = "Número de empleado")]
    pub employee_number: String,
    #[serde(rename = "Área")]
    pub area: String,
}

/// First-match-wins accumulator for the two resolution passes. A field
/// holding an empty string counts as unset and may still be filled later.
#[derive(Debug, Default)]
struct FieldSlots {
    name: Option<String>,
    employee_number: Option<String>,
    area: Option<String>,
}

impl FieldSlots {
    fn name_unset(&self) -> bool {
        is_unset(&self.name)
    }

    fn employee_number_unset(&self) -> bool {
        is_unset(&self.employee_number)
    }

    fn area_unset(&self) -> bool {
        is_unset(&self.area)
    }

    fn complete(&self) -> bool {
        !self.name_unset() && !self.employee_number_unset() && !self.area_unset()
    }

    /// Final trim and completeness check. Missing fields are reported in the
    /// fixed column order.
    fn finish(self) -> Result<EmployeeRecord, ExtractError> {
        let name = self.name.unwrap_or_default().trim().to_string();
        let employee_number = self.employee_number.unwrap_or_default().trim().to_string();
        let area = self.area.unwrap_or_default().trim().to_string();

        let mut missing = Vec::new();
        if name.is_empty() {
            missing.push(Field::Name);
        }
        if employee_number.is_empty() {
            missing.push(Field::EmployeeNumber);
        }
        if area.is_empty() {
            missing.push(Field::Area);
        }

        if !missing.is_empty() {
            return Err(ExtractError::IncompleteRecord(missing));
        }

        Ok(EmployeeRecord {
            name,
            employee_number,
            area,
        })
    }
}

fn is_unset(slot: &Option<String>) -> bool {
    slot.as_deref().map_or(true, str::is_empty)
}

// --- Extraction ---
/// Resolves a decoded payload into an [`EmployeeRecord`], or an
/// [`ExtractError::IncompleteRecord`] listing every missing column.
///
/// Two passes feed the same accumulator. A JSON-object payload is walked
/// first, in document order; whatever is still unset afterwards is hunted
/// through the candidate pairs scanned from the raw text. Within the
/// structured pass the `else if` chain tries Name, then EmployeeNumber,
/// then Area; the candidate pass tries Name, then Area, then
/// EmployeeNumber. The differing order is long-standing observed behavior
/// and is kept as-is.
///
/// Malformed JSON is not an error; the structured pass is simply skipped.
pub fn extract_employee_fields(text: &str) -> Result<EmployeeRecord, ExtractError> {
    let mut slots = FieldSlots::default();

    if let Some(map) = structured_object(text) {
        for (key, value) in &map {
            let collapsed = collapse(key);
            if slots.name_unset() && is_name_key(key, &collapsed) {
                if let Some(v) = value_text(value) {
                    slots.name = Some(v);
                }
            } else if slots.employee_number_unset() && is_employee_number_key(key, &collapsed) {
                if let Some(v) = value_text(value) {
                    slots.employee_number = Some(v);
                }
            } else if slots.area_unset() && is_area_key(key, &collapsed) {
                if let Some(v) = value_text(value) {
                    slots.area = Some(v);
                }
            }
        }
    }

    if !slots.complete() {
        for pair in generate_candidates(text) {
            let collapsed = collapse(&pair.label);
            if slots.name_unset() && is_name_key(&pair.label, &collapsed) {
                slots.name = Some(pair.value);
                continue;
            }
            if slots.area_unset() && is_area_key(&pair.label, &collapsed) {
                slots.area = Some(pair.value);
                continue;
            }
            if slots.employee_number_unset()
                && (is_employee_number_key(&pair.label, &collapsed) || collapsed == "empleado")
            {
                // A bare "empleado" label is ambiguous ("empleado: Juan");
                // only trust it when the value is all digits.
                if collapsed != "empleado" || is_pure_number(&pair.value) {
                    slots.employee_number = Some(pair.value);
                }
            }
        }
    }

    slots.finish()
}

/// Parses the payload as a JSON object, if it is one. Anything else
/// (malformed JSON, arrays, scalars) means "no structured data".
fn structured_object(text: &str) -> Option<serde_json::Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// String form of a JSON value. Strings are trimmed, scalars keep their
/// JSON rendering (445 -> "445"); null carries no value at all.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn is_pure_number(value: &str) -> bool {
    let v = value.trim();
    !v.is_empty() && v.chars().all(|c| c.is_ascii_digit())
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_flat_delimited_text() {
        let record =
            extract_employee_fields("Nombre: Zuka, N° de empleado: 23130705, Area: Linea de produccion")
                .expect("flat payload should resolve");
        assert_eq!(record.name, "Zuka");
        assert_eq!(record.employee_number, "23130705");
        assert_eq!(record.area, "Linea de produccion");
    }

    #[test]
    fn extracts_from_json_object() {
        let record = extract_employee_fields(r#"{"name": "Ana", "id_empleado": "445", "dept": "IT"}"#)
            .expect("JSON payload should resolve");
        assert_eq!(
            record,
            EmployeeRecord {
                name: "Ana".to_string(),
                employee_number: "445".to_string(),
                area: "IT".to_string(),
            }
        );
    }

    #[test]
    fn numeric_json_values_are_stringified() {
        let record =
            extract_employee_fields(r#"{"nombre": "Ana", "numero de empleado": 445, "area": "IT"}"#)
                .expect("numeric value should be accepted");
        assert_eq!(record.employee_number, "445");
    }

    #[test]
    fn first_name_like_key_wins_within_the_structured_pass() {
        let record = extract_employee_fields(
            r#"{"nombre": "Ana", "name2": "Beta", "no de empleado": 5, "depto": "QA"}"#,
        )
        .expect("payload should resolve");
        assert_eq!(record.name, "Ana");
    }

    #[test]
    fn first_match_wins_across_duplicate_candidates() {
        let record =
            extract_employee_fields("Nombre: Ana, Nombre: Beta, N°empleado: 3, Area: QA")
                .expect("payload should resolve");
        assert_eq!(record.name, "Ana");
        assert_eq!(record.employee_number, "3");
    }

    #[test]
    fn missing_field_is_reported_by_column() {
        let err = extract_employee_fields("Nombre: Ana, Área: IT").unwrap_err();
        assert_eq!(err, ExtractError::IncompleteRecord(vec![Field::EmployeeNumber]));
    }

    #[test]
    fn empty_payload_reports_all_columns_missing() {
        let err = extract_employee_fields("").unwrap_err();
        assert_eq!(
            err,
            ExtractError::IncompleteRecord(vec![Field::Name, Field::EmployeeNumber, Field::Area])
        );
    }

    #[test]
    fn bare_empleado_key_accepts_only_numeric_values() {
        // "empleado: 12345" fills the number; "empleado: Juan" must not.
        let err = extract_employee_fields("empleado: 12345").unwrap_err();
        assert_eq!(err, ExtractError::IncompleteRecord(vec![Field::Name, Field::Area]));

        let err = extract_employee_fields("empleado: Juan").unwrap_err();
        assert_eq!(
            err,
            ExtractError::IncompleteRecord(vec![Field::Name, Field::EmployeeNumber, Field::Area])
        );
    }

    #[test]
    fn non_numeric_bare_empleado_in_json_leaves_number_unset() {
        let err = extract_employee_fields(r#"{"empleado": "not-a-number"}"#).unwrap_err();
        assert_eq!(
            err,
            ExtractError::IncompleteRecord(vec![Field::Name, Field::EmployeeNumber, Field::Area])
        );
    }

    #[test]
    fn ambiguous_key_prefers_employee_number_in_structured_pass() {
        // The key matches both the number and the area detectors. The
        // structured pass assigns the number; the candidate re-scan of the
        // same text then fills the area. Only the name stays missing.
        let err = extract_employee_fields(r#"{"no de empleado del area": "7"}"#).unwrap_err();
        assert_eq!(err, ExtractError::IncompleteRecord(vec![Field::Name]));
    }

    #[test]
    fn ambiguous_key_prefers_area_in_candidate_pass() {
        let err = extract_employee_fields("no de empleado del area: 7").unwrap_err();
        assert_eq!(
            err,
            ExtractError::IncompleteRecord(vec![Field::Name, Field::EmployeeNumber])
        );
    }

    #[test]
    fn structured_values_are_not_overwritten_by_the_candidate_rescan() {
        // The JSON pass fills name and number; the area hides in a free-text
        // note, so the candidate pass re-reads the raw text. It must rescue
        // the area without letting the conflicting "Nombre: Beta" chunk
        // replace the structured name.
        let record = extract_employee_fields(
            r#"{"nombre": "Ana", "legajo": 5, "nota": "x, Nombre: Beta, Area: QA"}"#,
        )
        .expect("payload should resolve");
        assert_eq!(record.name, "Ana");
        assert_eq!(record.employee_number, "5");
        assert_eq!(record.area, "QA\"}");
    }

    #[test]
    fn whitespace_around_values_is_trimmed() {
        let record = extract_employee_fields(r#"{"nombre": "  Ana  ", "legajo": " 8 ", "area": " QA "}"#)
            .expect("payload should resolve");
        assert_eq!(record.name, "Ana");
        assert_eq!(record.employee_number, "8");
        assert_eq!(record.area, "QA");
    }

    #[test]
    fn extraction_is_deterministic() {
        let text = "Nombre: Ana, N° de empleado: 23, Área: Calidad";
        assert_eq!(extract_employee_fields(text), extract_employee_fields(text));
    }
}
