// src/extractors/candidates.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
// A line like "Nombre - Zuka": a label of letters/spaces/#/. followed by a
// hyphen. Accented letters are spelled out; the payloads are Latin-script.
static HYPHEN_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-zÁÉÍÓÚÜáéíóúüñÑ #.]+-\s*")
        .expect("Failed to compile HYPHEN_LABEL_RE")
});

static HYPHEN_SPLIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*-\s*").expect("Failed to compile HYPHEN_SPLIT_RE")
});

// --- Data Structures ---
/// A tentative (label, value) pair pulled out of payload text. Both sides
/// are trimmed and non-empty; classification happens later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePair {
    pub label: String,
    pub value: String,
}

/// Scans free-form payload text for (label, value) candidates.
///
/// Two layered strategies, first non-empty result wins:
/// 1. flat split — newlines flattened, segments split on ';' then ',',
///    each chunk split once on '=' (else ':') into label and value;
/// 2. line fallback — original lines split once on ':', else on a hyphen
///    when the line starts with a letters-only label.
///
/// Stateless; every call re-scans the text from scratch.
pub fn generate_candidates(text: &str) -> Vec<CandidatePair> {
    let pairs = flat_split_pairs(text);
    if !pairs.is_empty() {
        return pairs;
    }
    line_fallback_pairs(text)
}

fn push_pair(pairs: &mut Vec<CandidatePair>, label: &str, value: &str) {
    let label = label.trim();
    let value = value.trim();
    if !label.is_empty() && !value.is_empty() {
        pairs.push(CandidatePair {
            label: label.to_string(),
            value: value.to_string(),
        });
    }
}

/// Handles single-line payloads such as
/// "Nombre: Zuka, N° de empleado: 23130705, Area: Linea de produccion".
fn flat_split_pairs(text: &str) -> Vec<CandidatePair> {
    let mut pairs = Vec::new();
    let flat = text.replace('\n', " ");
    for segment in flat.split(';') {
        for chunk in segment.split(',') {
            let chunk = chunk.trim();
            if chunk.is_empty() {
                continue;
            }
            // '=' beats ':' inside a chunk, so "turno=1:30" keeps its value whole.
            if let Some((label, value)) = chunk.split_once('=') {
                push_pair(&mut pairs, label, value);
            } else if let Some((label, value)) = chunk.split_once(':') {
                push_pair(&mut pairs, label, value);
            }
        }
    }
    pairs
}

/// Handles multi-line payloads with one field per line, either "label: value"
/// or "label - value".
fn line_fallback_pairs(text: &str) -> Vec<CandidatePair> {
    let mut pairs = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((label, value)) = line.split_once(':') {
            push_pair(&mut pairs, label, value);
            continue;
        }
        if line.contains('-') && HYPHEN_LABEL_RE.is_match(line) {
            let mut sides = HYPHEN_SPLIT_RE.splitn(line, 2);
            if let (Some(label), Some(value)) = (sides.next(), sides.next()) {
                push_pair(&mut pairs, label, value);
            }
        }
    }
    pairs
}
