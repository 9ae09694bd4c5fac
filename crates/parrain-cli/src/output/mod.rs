use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Objects become `key | value` rows with nested keys dotted
/// (`filleul.nom`); arrays of objects become one row per element.
fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    let options = table_options();

    match value {
        Value::Array(items) if items.is_empty() => Ok(String::from("(no rows)")),
        Value::Array(items) => {
            let flat: Vec<Vec<(String, String)>> = items.iter().map(flatten).collect();
            let mut headers: Vec<String> = Vec::new();
            for row in &flat {
                for (key, _) in row {
                    if !headers.contains(key) {
                        headers.push(key.clone());
                    }
                }
            }
            let rows: Vec<Vec<String>> = flat
                .into_iter()
                .map(|row| {
                    headers
                        .iter()
                        .map(|header| {
                            row.iter()
                                .find(|(key, _)| key == header)
                                .map_or_else(|| String::from("-"), |(_, cell)| cell.clone())
                        })
                        .collect()
                })
                .collect();
            let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
            Ok(table::render_table(&header_refs, &rows, options))
        }
        other => {
            let rows: Vec<Vec<String>> = flatten(&other)
                .into_iter()
                .map(|(key, cell)| vec![key, cell])
                .collect();
            Ok(table::render_table(&["key", "value"], &rows, options))
        }
    }
}

fn flatten(value: &Value) -> Vec<(String, String)> {
    let mut out = Vec::new();
    match value {
        Value::Object(map) => flatten_into(&mut out, "", map),
        scalar => out.push((String::from("value"), value_to_cell(scalar))),
    }
    out
}

fn flatten_into(out: &mut Vec<(String, String)>, prefix: &str, map: &Map<String, Value>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(inner) => flatten_into(out, &path, inner),
            other => out.push((path, value_to_cell(other))),
        }
    }
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use parrain_core::responses::{DrawResponse, PairMember, SponsorshipStats};

    use super::render;
    use crate::cli::OutputFormat;

    fn draw() -> DrawResponse {
        DrawResponse {
            filleul: PairMember {
                nom: "Martin".into(),
                prenom: "Léa".into(),
                promotion: "B1".into(),
            },
            parrain: PairMember {
                nom: "Durand".into(),
                prenom: "Hugo".into(),
                promotion: "B2".into(),
            },
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&draw(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["parrain"]["nom"], "Durand");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let stats = SponsorshipStats {
            remaining_mentees: 3,
            available_mentors: 9,
        };
        let out = render(&stats, OutputFormat::Raw).expect("raw render should work");
        assert_eq!(out, r#"{"remaining_filleuls":3,"available_parrains":9}"#);
    }

    #[test]
    fn table_render_dots_nested_keys() {
        let out = render(&draw(), OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.starts_with("key")));
        assert!(out.contains("filleul.prenom"));
        assert!(out.contains("parrain.promotion"));
        assert!(out.contains("Léa"));
    }

    #[test]
    fn table_render_for_empty_list() {
        let rows: Vec<DrawResponse> = Vec::new();
        assert_eq!(render(&rows, OutputFormat::Table).unwrap(), "(no rows)");
    }
}
