// src/extractors/keys.rs

// --- Imports ---
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// --- Constants ---
// Exact collapsed-form synonyms. Substring detectors below widen the net;
// these sets settle the short labels ("dept", "name") on their own.
const NAME_KEYS: [&str; 2] = ["nombre", "name"];
const AREA_KEYS: [&str; 5] = ["area", "departamento", "dept", "depto", "division"];

// Substring fragments accepted anywhere in a precleaned area label.
const AREA_FRAGMENTS: [&str; 5] = ["area", "depart", "dept", "depto", "division"];

// An employee-number label must pair an "emplead" mention with one of these.
const EMPLOYEE_NUMBER_TOKENS: [&str; 9] = [
    "numero", "num", "no", "nro", "id", "codigo", "clave", "legajo", "matricula",
];

// Collapsed forms that identify the employee number without any token.
const COMPACT_EMPLOYEE_KEYS: [&str; 10] = [
    "numeroempleado",
    "numerodeempleado",
    "numempleado",
    "noempleado",
    "nroempleado",
    "idempleado",
    "codigoempleado",
    "claveempleado",
    "legajo",
    "matricula",
];

/// Lowercases, strips accents (NFD, combining marks dropped) and maps the
/// N°/Nº/No. markers to a plain "no" so the token detectors can see it.
/// Punctuation and spaces survive; substring checks run on this form.
pub fn preclean(label: &str) -> String {
    let folded: String = label
        .trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    folded
        .replace("n°", "no")
        .replace("nº", "no")
        .replace("no.", "no")
}

/// Fully collapsed form of a label: `preclean` filtered to `[a-z0-9]`.
/// Used for exact-set membership.
pub fn collapse(label: &str) -> String {
    preclean(label)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// True when the label names the employee name column.
pub fn is_name_key(label: &str, collapsed: &str) -> bool {
    let pre = preclean(label);
    NAME_KEYS.contains(&collapsed) || pre.contains("nombre") || pre.contains("name")
}

/// True when the label names the area/department column.
pub fn is_area_key(label: &str, collapsed: &str) -> bool {
    let pre = preclean(label);
    AREA_FRAGMENTS.iter().any(|fragment| pre.contains(fragment))
        || AREA_KEYS.contains(&collapsed)
}

/// True when the label names the employee number column. Catches the long
/// forms ("N° de empleado", "código de empleada") by requiring both an
/// "emplead" mention and a number-ish token, and the compact forms
/// ("idempleado", "legajo") by exact collapsed match.
pub fn is_employee_number_key(label: &str, collapsed: &str) -> bool {
    let pre = preclean(label);
    let mentions_employee =
        collapsed.contains("emplead") || pre.replace(' ', "").contains("emplead");
    let has_number_token = EMPLOYEE_NUMBER_TOKENS
        .iter()
        .any(|token| pre.contains(token) || collapsed.contains(token));
    (mentions_employee && has_number_token) || COMPACT_EMPLOYEE_KEYS.contains(&collapsed)
}
