//! CSV Export
//!
//! Builds CSV text from the rows a table is currently showing and hands it
//! to the browser as a download. No server round trip.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Quote a field when it contains a delimiter, quote, or line break.
pub fn csv_escape(field: &str) -> String {
    if field.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Assemble header plus rows into CRLF-terminated CSV text.
pub fn to_csv(header: &[String], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    push_row(&mut out, header);
    for row in rows {
        push_row(&mut out, row);
    }
    out
}

fn push_row(out: &mut String, row: &[String]) {
    let mut first = true;
    for field in row {
        if !first {
            out.push(',');
        }
        out.push_str(&csv_escape(field));
        first = false;
    }
    out.push_str("\r\n");
}

/// Offer `content` as a file download via a temporary object URL.
pub fn download(filename: &str, content: &str) {
    if let Err(err) = trigger_download(filename, content) {
        web_sys::console::error_1(&format!("[csv] download failed: {err:?}").into());
    }
}

fn trigger_download(filename: &str, content: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(content));
    let props = BlobPropertyBag::new();
    props.set_type("text/csv;charset=utf-8;");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &props)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    if let Some(body) = document.body() {
        body.append_child(&anchor)?;
    }
    anchor.click();
    anchor.remove();
    Url::revoke_object_url(&url)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal CSV reader for round-trip checks. Handles quoted fields,
    // doubled quotes, and embedded line breaks.
    fn parse_csv(text: &str) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut field = String::new();
        let mut quoted = false;
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if quoted {
                match c {
                    '"' if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    '"' => quoted = false,
                    _ => field.push(c),
                }
            } else {
                match c {
                    '"' => quoted = true,
                    ',' => row.push(std::mem::take(&mut field)),
                    '\r' => {
                        if chars.peek() == Some(&'\n') {
                            chars.next();
                        }
                        row.push(std::mem::take(&mut field));
                        rows.push(std::mem::take(&mut row));
                    }
                    '\n' => {
                        row.push(std::mem::take(&mut field));
                        rows.push(std::mem::take(&mut row));
                    }
                    _ => field.push(c),
                }
            }
        }
        if !field.is_empty() || !row.is_empty() {
            row.push(field);
            rows.push(row);
        }
        rows
    }

    #[test]
    fn plain_fields_stay_unquoted() {
        assert_eq!(csv_escape("Soil survey"), "Soil survey");
        assert_eq!(csv_escape(""), "");
    }

    #[test]
    fn delimiters_and_quotes_get_escaped() {
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn header_comes_first() {
        let text = to_csv(
            &["Task".to_string(), "Status".to_string()],
            &[vec!["Soil survey".to_string(), "Pending".to_string()]],
        );
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Task,Status"));
        assert_eq!(lines.next(), Some("Soil survey,Pending"));
    }

    #[test]
    fn awkward_fields_survive_a_round_trip() {
        let header = vec!["Name".to_string(), "Notes".to_string()];
        let rows = vec![
            vec!["Ravi, Kumar".to_string(), "said \"ok\"".to_string()],
            vec!["Asha".to_string(), "first line\nsecond line".to_string()],
            vec!["".to_string(), "".to_string()],
        ];
        let text = to_csv(&header, &rows);
        let parsed = parse_csv(&text);
        assert_eq!(parsed[0], header);
        assert_eq!(&parsed[1..], rows.as_slice());
    }
}
