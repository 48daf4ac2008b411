//! Browser-side handling of fetched file binaries: object URLs,
//! client-side saves, and the hidden print frame.

use gloo_file::Blob;
use wasm_bindgen::JsCast;
use web_sys::{HtmlAnchorElement, HtmlIFrameElement, Url};

/// An object URL scoped to this handle. Created once per preview or
/// print invocation, revoked exactly once when the handle drops.
pub struct ObjectUrl {
    url: String,
}

impl ObjectUrl {
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let blob = Blob::new(bytes);
        Url::create_object_url_with_blob(blob.as_ref())
            .ok()
            .map(|url| Self { url })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        let _ = Url::revoke_object_url(&self.url);
    }
}

/// Synthesizes a client-side save: anchor element with a `download`
/// attribute, clicked and removed again. The object URL is revoked when
/// this function returns.
pub fn save_bytes(bytes: &[u8], file_name: &str) -> bool {
    let Some(url) = ObjectUrl::from_bytes(bytes) else {
        return false;
    };
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return false;
    };
    let Ok(element) = document.create_element("a") else {
        return false;
    };
    let Ok(anchor) = element.dyn_into::<HtmlAnchorElement>() else {
        return false;
    };
    anchor.set_href(url.as_str());
    anchor.set_download(file_name);
    let Some(body) = document.body() else {
        return false;
    };
    if body.append_child(&anchor).is_err() {
        return false;
    }
    anchor.click();
    let _ = body.remove_child(&anchor);
    true
}

/// A hidden iframe rendering one file for the platform print dialog.
/// Removed from the document (and its object URL revoked) on drop.
pub struct PrintFrame {
    iframe: HtmlIFrameElement,
    _url: ObjectUrl,
}

/// Injects the hidden frame and resolves once the document inside it
/// finished loading, so `print` does not run against a blank frame.
pub async fn open_print_frame(bytes: &[u8]) -> Option<PrintFrame> {
    let url = ObjectUrl::from_bytes(bytes)?;
    let document = web_sys::window()?.document()?;
    let iframe = document
        .create_element("iframe")
        .ok()?
        .dyn_into::<HtmlIFrameElement>()
        .ok()?;
    iframe
        .set_attribute("style", "position:absolute;top:-9999px;left:-9999px;")
        .ok()?;
    iframe.set_src(url.as_str());

    let loaded = js_sys::Promise::new(&mut |resolve, _reject| {
        iframe.set_onload(Some(&resolve));
    });
    document.body()?.append_child(&iframe).ok()?;
    let _ = wasm_bindgen_futures::JsFuture::from(loaded).await;
    iframe.set_onload(None);

    Some(PrintFrame { iframe, _url: url })
}

impl PrintFrame {
    /// Invokes the platform print dialog on the frame's window.
    pub fn print(&self) -> bool {
        self.iframe
            .content_window()
            .map_or(false, |window| window.print().is_ok())
    }
}

impl Drop for PrintFrame {
    fn drop(&mut self) {
        if let Some(parent) = self.iframe.parent_node() {
            let _ = parent.remove_child(&self.iframe);
        }
    }
}
