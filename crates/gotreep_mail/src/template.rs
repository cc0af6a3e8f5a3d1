// --- File: crates/gotreep_mail/src/template.rs ---
//! Minimal HTML templating over JSON.
//!
//! Supported tags:
//! - `{{ a.b.0.c }}` inserts the HTML-escaped value at a dotted path. Numeric
//!   segments index arrays. Missing values, `null`, arrays and objects render
//!   as nothing.
//! - `{{#each path}} ... {{/each}}` repeats its body for every element of the
//!   array at `path`. Blocks nest.
//!
//! Paths starting with `this` resolve against the current `#each` element only.
//! Other paths are tried against the current element first, then outwards up
//! to the root context.

use serde_json::Value;

use crate::error::MailError;

/// Confirmation template compiled into the binary.
pub const DEFAULT_CONFIRMATION_TEMPLATE: &str =
    include_str!("../templates/flight_confirm.html");

pub fn render(template: &str, context: &Value) -> Result<String, MailError> {
    let mut out = String::with_capacity(template.len());
    render_into(template, &[context], &mut out)?;
    Ok(out)
}

fn render_into<'a>(
    template: &str,
    scopes: &[&'a Value],
    out: &mut String,
) -> Result<(), MailError> {
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let (tag, after) = read_tag(&rest[start..])?;
        rest = after;

        if let Some(path) = tag.strip_prefix("#each") {
            let (body, remainder) = split_each_body(rest)?;
            if let Some(Value::Array(items)) = lookup(scopes, path.trim()) {
                let mut inner = scopes.to_vec();
                for item in items {
                    inner.push(item);
                    render_into(body, &inner, out)?;
                    inner.pop();
                }
            }
            rest = remainder;
        } else if tag == "/each" {
            return Err(MailError::TemplateError(
                "`{{/each}}` without matching `{{#each}}`".to_string(),
            ));
        } else if let Some(value) = lookup(scopes, tag) {
            push_escaped(out, &display(value));
        }
    }
    out.push_str(rest);
    Ok(())
}

/// Splits `{{ tag }}rest` into the trimmed tag and what follows it.
fn read_tag(source: &str) -> Result<(&str, &str), MailError> {
    let end = source
        .find("}}")
        .ok_or_else(|| MailError::TemplateError("unclosed `{{`".to_string()))?;
    Ok((source[2..end].trim(), &source[end + 2..]))
}

/// Finds the `{{/each}}` closing the block that `source` starts inside.
fn split_each_body(source: &str) -> Result<(&str, &str), MailError> {
    let mut depth = 0usize;
    let mut offset = 0;
    while let Some(start) = source[offset..].find("{{") {
        let tag_start = offset + start;
        let (tag, after) = read_tag(&source[tag_start..])?;
        let tag_end = source.len() - after.len();
        if tag.starts_with("#each") {
            depth += 1;
        } else if tag == "/each" {
            if depth == 0 {
                return Ok((&source[..tag_start], after));
            }
            depth -= 1;
        }
        offset = tag_end;
    }
    Err(MailError::TemplateError(
        "`{{#each}}` without matching `{{/each}}`".to_string(),
    ))
}

fn lookup<'a>(scopes: &[&'a Value], path: &str) -> Option<&'a Value> {
    if path == "this" {
        return scopes.last().copied();
    }
    if let Some(relative) = path.strip_prefix("this.") {
        return scopes.last().and_then(|scope| walk(scope, relative));
    }
    scopes.iter().rev().find_map(|scope| walk(scope, path))
}

fn walk<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn substitutes_paths_and_array_indices() {
        let context = json!({"booking": {"data": {"id": "eJzTd9f3", "associatedRecords": [{"reference": "QF4XYZ"}]}}});
        let rendered = render(
            "<p>{{ booking.data.id }} / {{booking.data.associatedRecords.0.reference}}</p>",
            &context,
        )
        .unwrap();
        assert_eq!(rendered, "<p>eJzTd9f3 / QF4XYZ</p>");
    }

    #[test]
    fn missing_values_render_empty() {
        let rendered = render("[{{ nope.nothing }}][{{ obj }}]", &json!({"obj": {"a": 1}})).unwrap();
        assert_eq!(rendered, "[][]");
    }

    #[test]
    fn escapes_html() {
        let rendered = render("{{name}}", &json!({"name": "<b>O'Neil & co</b>"})).unwrap();
        assert_eq!(rendered, "&lt;b&gt;O&#39;Neil &amp; co&lt;/b&gt;");
    }

    #[test]
    fn each_blocks_nest() {
        let context = json!({
            "currency": "EUR",
            "itineraries": [
                {"segments": [{"from": "MAD"}, {"from": "LHR"}]},
                {"segments": [{"from": "JFK"}]}
            ]
        });
        let rendered = render(
            "{{#each itineraries}}|{{#each this.segments}}{{from}} {{currency}};{{/each}}{{/each}}",
            &context,
        )
        .unwrap();
        assert_eq!(rendered, "|MAD EUR;LHR EUR;|JFK EUR;");
    }

    #[test]
    fn each_over_missing_array_renders_nothing() {
        let rendered = render("a{{#each list}}x{{/each}}b", &json!({})).unwrap();
        assert_eq!(rendered, "ab");
    }

    #[test]
    fn malformed_templates_are_errors() {
        assert!(render("{{ open", &json!({})).is_err());
        assert!(render("{{#each list}}no end", &json!({"list": []})).is_err());
        assert!(render("stray {{/each}}", &json!({})).is_err());
    }

    #[test]
    fn default_template_ships_inside_the_crate() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/flight_confirm.html");
        let on_disk = std::fs::read_to_string(path).unwrap();
        assert_eq!(on_disk, DEFAULT_CONFIRMATION_TEMPLATE);
    }

    #[test]
    fn default_template_renders_an_order() {
        let order = json!({
            "data": {
                "id": "ORDER1",
                "associatedRecords": [{"reference": "QF4XYZ"}],
                "travelers": [{"name": {"firstName": "ANA", "lastName": "GARCIA"}}],
                "flightOffers": [{
                    "price": {"grandTotal": "245.60", "currency": "EUR"},
                    "itineraries": [{"segments": [{
                        "departure": {"iataCode": "MAD", "at": "2026-11-02T10:00:00"},
                        "arrival": {"iataCode": "LHR", "at": "2026-11-02T11:35:00"},
                        "carrierCode": "IB",
                        "number": "3170"
                    }]}]
                }]
            }
        });
        let rendered = render(DEFAULT_CONFIRMATION_TEMPLATE, &json!({"booking": order})).unwrap();
        assert!(rendered.contains("QF4XYZ"));
        assert!(rendered.contains("ANA"));
        assert!(rendered.contains("MAD"));
        assert!(rendered.contains("245.60"));
    }
}
