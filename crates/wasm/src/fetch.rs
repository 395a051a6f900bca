//! Request to the generation endpoint and the browser download

use notice::error_message_from_response;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, HtmlAnchorElement, Request, RequestInit, RequestMode, Response, Url};

/// POST `body` to `url` and return the document on success
///
/// Failures come back as the message to show the user.
pub(crate) async fn post_notice(url: &str, body: &str) -> Result<Blob, String> {
    let outcome: Result<Result<Blob, String>, JsValue> = async {
        let window = web_sys::window().ok_or("No window")?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(body));

        let request = Request::new_with_str_and_init(url, &opts)?;
        request.headers().set("Content-Type", "application/json")?;

        let response = JsFuture::from(window.fetch_with_request(&request)).await?;
        let response: Response = response.dyn_into()?;

        if !response.ok() {
            let text = JsFuture::from(response.text()?)
                .await?
                .as_string()
                .unwrap_or_default();
            return Ok(Err(error_message_from_response(response.status(), &text)));
        }

        let blob: Blob = JsFuture::from(response.blob()?).await?.dyn_into()?;
        Ok(Ok(blob))
    }
    .await;

    outcome.unwrap_or_else(|err| Err(js_error_message(&err)))
}

/// Save `blob` through a temporary object URL and anchor
pub(crate) fn download_blob(blob: &Blob, filename: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;
    let body = document.body().ok_or("No body")?;

    let url = Url::create_object_url_with_blob(blob)?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);

    body.append_child(&anchor)?;
    anchor.click();
    anchor.remove();
    Url::revoke_object_url(&url)?;
    Ok(())
}

/// Readable text of a thrown JS value
pub(crate) fn js_error_message(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .unwrap_or_else(|| "通信エラーが発生しました".to_string())
}
