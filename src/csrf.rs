//! CSRF Token Lookup
//!
//! Mutating requests carry the token the server shell planted in the page.
//! Lookup order: hidden form input, then meta tag, then the session cookie.

use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, HtmlInputElement};

pub fn token() -> Option<String> {
    let document = web_sys::window()?.document()?;

    if let Ok(Some(element)) = document.query_selector("input[name='csrfmiddlewaretoken']") {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            let value = input.value();
            if !value.is_empty() {
                return Some(value);
            }
        }
    }

    if let Ok(Some(element)) = document.query_selector("meta[name='csrf-token']") {
        if let Some(content) = element.get_attribute("content") {
            if !content.is_empty() {
                return Some(content);
            }
        }
    }

    let cookies = document.dyn_ref::<HtmlDocument>()?.cookie().ok()?;
    cookie_value(&cookies, "csrftoken")
}

/// Extract a cookie by name from a raw `document.cookie` string.
fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(key, value)| {
            let value = value.trim();
            (key.trim() == name && !value.is_empty()).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::cookie_value;

    #[test]
    fn finds_the_named_cookie() {
        let raw = "sessionid=xyz; csrftoken=abc123; theme=dark";
        assert_eq!(cookie_value(raw, "csrftoken").as_deref(), Some("abc123"));
    }

    #[test]
    fn tolerates_missing_spaces() {
        assert_eq!(
            cookie_value("a=1;csrftoken=tok;b=2", "csrftoken").as_deref(),
            Some("tok")
        );
    }

    #[test]
    fn keeps_equals_signs_inside_the_value() {
        assert_eq!(
            cookie_value("csrftoken=abc=def", "csrftoken").as_deref(),
            Some("abc=def")
        );
    }

    #[test]
    fn absent_or_empty_cookie_is_none() {
        assert_eq!(cookie_value("sessionid=xyz", "csrftoken"), None);
        assert_eq!(cookie_value("csrftoken=; other=1", "csrftoken"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
    }

    #[test]
    fn name_match_is_exact() {
        assert_eq!(cookie_value("xcsrftoken=nope", "csrftoken"), None);
    }
}
