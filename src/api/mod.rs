//! REST API Wrappers
//!
//! Frontend bindings to the backend endpoints, organized by domain. GETs
//! return parsed JSON; mutations POST form-encoded bodies with the CSRF
//! token attached and report the server's status message.

mod assigned;
mod catalog;
mod clients;
mod installments;
mod locations;
mod tasks;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::models::{ApiStatus, ListPayload};

// Re-export all public items
pub use assigned::*;
pub use catalog::*;
pub use clients::*;
pub use installments::*;
pub use locations::*;
pub use tasks::*;

/// Percent-encode everything except unreserved characters.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode(value: &str) -> String {
    utf8_percent_encode(value, UNRESERVED).to_string()
}

/// Build a query string, skipping pairs with empty values.
pub(crate) fn encode_query(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build an `application/x-www-form-urlencoded` body. Repeated keys are
/// allowed (the server reads them as a list).
pub(crate) fn encode_form(fields: &[(&str, String)]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn js_error(stage: &str, err: JsValue) -> String {
    format!("{stage}: {err:?}")
}

/// One fetch round trip. `Err` means the request never completed (network,
/// CORS, panic in the bindings); HTTP error statuses come back as
/// `Ok((false, status, body))` so callers can mine the body for a message.
async fn send(method: &str, url: &str, body: Option<String>) -> Result<(bool, u16, String), String> {
    let opts = RequestInit::new();
    opts.set_method(method);

    let headers = Headers::new().map_err(|e| js_error("headers", e))?;
    if let Some(body) = body {
        headers
            .append("Content-Type", "application/x-www-form-urlencoded")
            .map_err(|e| js_error("headers", e))?;
        headers
            .append("X-Requested-With", "XMLHttpRequest")
            .map_err(|e| js_error("headers", e))?;
        if let Some(token) = crate::csrf::token() {
            headers
                .append("X-CSRFToken", &token)
                .map_err(|e| js_error("headers", e))?;
        }
        opts.set_body(&JsValue::from_str(&body));
    }
    opts.set_headers(&headers);

    let request =
        Request::new_with_str_and_init(url, &opts).map_err(|e| js_error("request", e))?;
    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| js_error("fetch", e))?
        .dyn_into()
        .map_err(|e| js_error("response", e))?;

    let text = JsFuture::from(response.text().map_err(|e| js_error("body", e))?)
        .await
        .map_err(|e| js_error("body", e))?
        .as_string()
        .unwrap_or_default();

    Ok((response.ok(), response.status(), text))
}

/// GET a JSON object.
pub(crate) async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let (ok, status, body) = send("GET", url, None).await?;
    if !ok {
        return Err(format!("HTTP {status} from {url}"));
    }
    serde_json::from_str(&body).map_err(|e| format!("unexpected reply from {url}: {e}"))
}

/// GET a list endpoint, accepting both bare arrays and envelopes.
///
/// Transport and HTTP failures are `Err`. A 200 with an unrecognizable body
/// is logged and treated as an empty list so one bad payload cannot wedge
/// the page.
pub(crate) async fn get_list<T: DeserializeOwned>(url: &str) -> Result<Vec<T>, String> {
    let (records, _) = get_page(url).await?;
    Ok(records)
}

/// Like [`get_list`] but keeps the envelope's `count` for server-side paging.
pub(crate) async fn get_page<T: DeserializeOwned>(
    url: &str,
) -> Result<(Vec<T>, Option<u64>), String> {
    let (ok, status, body) = send("GET", url, None).await?;
    if !ok {
        return Err(format!("HTTP {status} from {url}"));
    }
    match serde_json::from_str::<ListPayload<T>>(&body) {
        Ok(payload) => Ok(payload.into_records()),
        Err(e) => {
            web_sys::console::error_1(
                &format!("[api] unexpected list shape from {url}: {e}").into(),
            );
            Ok((Vec::new(), None))
        }
    }
}

/// POST a mutation and interpret the standard `{success, message}` reply.
/// `Ok` carries the success message, `Err` the failure message. The body is
/// consulted even on HTTP errors, which still carry a parseable status.
pub(crate) async fn post_action(url: &str, fields: &[(&str, String)]) -> Result<String, String> {
    let (_ok, status, body) = send("POST", url, Some(encode_form(fields))).await?;
    match serde_json::from_str::<ApiStatus>(&body) {
        Ok(reply) if reply.success => Ok(reply.message.unwrap_or_else(|| "Done".to_string())),
        Ok(reply) => Err(reply
            .message
            .unwrap_or_else(|| format!("Request failed (HTTP {status})"))),
        Err(_) => Err(format!("Request failed (HTTP {status})")),
    }
}

/// POST a mutation whose success reply carries a payload beyond the status
/// flag (e.g. the created record).
pub(crate) async fn post_json<T: DeserializeOwned>(
    url: &str,
    fields: &[(&str, String)],
) -> Result<T, String> {
    let (ok, status, body) = send("POST", url, Some(encode_form(fields))).await?;
    if ok {
        if let Ok(value) = serde_json::from_str::<T>(&body) {
            return Ok(value);
        }
    }
    match serde_json::from_str::<ApiStatus>(&body) {
        Ok(reply) => Err(reply
            .message
            .unwrap_or_else(|| format!("Request failed (HTTP {status})"))),
        Err(_) => Err(format!("Request failed (HTTP {status})")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_are_encoded_and_joined() {
        let query = encode_query(&[
            ("status", "pending_approval".to_string()),
            ("search", "plot 7 & 8".to_string()),
        ]);
        assert_eq!(query, "status=pending_approval&search=plot%207%20%26%208");
    }

    #[test]
    fn empty_query_values_are_skipped() {
        let query = encode_query(&[
            ("page", "2".to_string()),
            ("search", String::new()),
            ("status", "paid".to_string()),
        ]);
        assert_eq!(query, "page=2&status=paid");
    }

    #[test]
    fn form_bodies_escape_reserved_characters() {
        let body = encode_form(&[
            ("admin_notes", "looks good".to_string()),
            ("employee", "7".to_string()),
        ]);
        assert_eq!(body, "admin_notes=looks%20good&employee=7");
    }

    #[test]
    fn repeated_form_keys_are_preserved() {
        let body = encode_form(&[
            ("employees", "3".to_string()),
            ("employees", "5".to_string()),
        ]);
        assert_eq!(body, "employees=3&employees=5");
    }

    #[test]
    fn unreserved_characters_pass_through() {
        assert_eq!(encode("plot-7_a.b~c"), "plot-7_a.b~c");
        assert_eq!(encode("a=b&c"), "a%3Db%26c");
    }
}
