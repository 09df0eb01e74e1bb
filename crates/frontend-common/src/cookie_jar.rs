//! `document.cookie` backed cookie jar

use admissions_core::{CookieJar, Error, Result};
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

/// Reads and writes the page's `document.cookie`.
///
/// Not `HttpOnly`: the cookies must be readable here to attach the bearer
/// header.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentCookieJar;

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<HtmlDocument>()
        .ok()
}

impl CookieJar for DocumentCookieJar {
    fn cookie_header(&self) -> String {
        html_document()
            .and_then(|document| document.cookie().ok())
            .unwrap_or_default()
    }

    fn write(&self, set_cookie: &str) -> Result<()> {
        let document = html_document().ok_or_else(|| Error::cookie_write("no document"))?;
        document
            .set_cookie(set_cookie)
            .map_err(|e| Error::cookie_write(format!("{e:?}")))
    }
}
