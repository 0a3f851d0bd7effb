// Page icon painted from an emoji at startup.

use regex_lite::Regex;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlLinkElement};

use crate::error::UiError;
use crate::render::context_2d;

const FAVICON_SIZE: u32 = 512;
const FAVICON_GLYPH: &str = "💩";

/// Replaces the first `<digits>px` token of a CSS font shorthand.
pub fn resize_font(font: &str, px: u32) -> String {
    let Ok(re) = Regex::new(r"\d+px") else {
        return font.to_string();
    };
    re.replacen(font, 1, format!("{}px", px).as_str()).into_owned()
}

pub fn install_favicon() -> Result<(), UiError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| UiError::Dom("no document".into()))?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| UiError::Dom("canvas element".into()))?;
    canvas.set_width(FAVICON_SIZE);
    canvas.set_height(FAVICON_SIZE);

    let ctx = context_2d(&canvas)?;
    ctx.begin_path();
    ctx.set_font(&resize_font(&ctx.font(), FAVICON_SIZE));
    let size = FAVICON_SIZE as f64;
    ctx.fill_text_with_max_width(FAVICON_GLYPH, 0.0, size, size)?;
    ctx.stroke();

    let image = canvas.to_data_url_with_type("image/png")?;

    let link: HtmlLinkElement = document
        .create_element("link")?
        .dyn_into()
        .map_err(|_| UiError::Dom("link element".into()))?;
    link.set_rel("icon");
    let head = document
        .head()
        .ok_or_else(|| UiError::Dom("no <head>".into()))?;
    head.append_child(&link)?;
    link.set_href(&image);
    canvas.remove();
    log::debug!("favicon installed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::resize_font;

    #[test]
    fn replaces_default_canvas_font_size() {
        assert_eq!(resize_font("10px sans-serif", 512), "512px sans-serif");
    }

    #[test]
    fn keeps_other_tokens() {
        assert_eq!(resize_font("bold 12px/1.5 serif", 64), "bold 64px/1.5 serif");
    }

    #[test]
    fn skips_digits_not_followed_by_px() {
        assert_eq!(resize_font("700 16px Roboto", 32), "700 32px Roboto");
    }

    #[test]
    fn leaves_font_without_px_untouched() {
        assert_eq!(resize_font("large serif", 20), "large serif");
    }

    #[test]
    fn fractional_size_keeps_integer_part() {
        // Only the digits directly before `px` are replaced.
        assert_eq!(resize_font("bold 12.5px serif", 64), "bold 12.64px serif");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::install_favicon;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn appends_png_icon_link() {
        install_favicon().unwrap();
        let document = web_sys::window().unwrap().document().unwrap();
        let link = document.query_selector("link[rel=icon]").unwrap().unwrap();
        let href = link.get_attribute("href").unwrap();
        assert!(href.starts_with("data:image/png"));
        assert!(document.query_selector("canvas").unwrap().is_none());
    }
}
