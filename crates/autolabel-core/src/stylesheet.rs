//! Overlay stylesheet.

use tracing::debug;

use autolabel_config::OverlayConfig;
use autolabel_protocols::Document;

use crate::error::LabelError;

/// CSS for the overlay wrapper, markers and badges.
///
/// The wrapper is an absolutely positioned zero-size box at the document
/// origin, so marker coordinates are document coordinates.
pub fn overlay_css(config: &OverlayConfig) -> String {
    let wrapper = &config.wrapper_class;
    let marker = &config.marker_class;
    let badge = config.badge_class();

    format!(
        r#".{wrapper} {{
  position: absolute;
  top: 0;
  left: 0;
  width: 0;
  height: 0;
  overflow: visible;
  pointer-events: none;
  z-index: 2147483647;
}}

.{marker} {{
  position: absolute;
  box-sizing: border-box;
  outline: 2px dashed rgba(255, 69, 0, 0.8);
  pointer-events: none;
}}

.{badge} {{
  position: absolute;
  left: 0;
  bottom: 100%;
  margin-bottom: 6px;
  padding: 1px 5px;
  border-radius: 3px;
  background: rgba(0, 0, 0, 0.75);
  color: #fff;
  font: 12px/16px monospace;
  white-space: nowrap;
}}

.{badge}::before {{
  content: "";
  position: absolute;
  left: 6px;
  top: 100%;
  border-width: 6px 6px 0;
  border-style: solid;
  border-color: rgba(0, 0, 0, 0.75) transparent transparent;
}}
"#
    )
}

/// Insert the overlay `<style>` into `<head>` unless it is already present.
///
/// Returns whether a new element was inserted.
pub fn install<D: Document + ?Sized>(doc: &mut D, config: &OverlayConfig) -> Result<bool, LabelError> {
    if doc.element_by_id(&config.style_id).is_some() {
        return Ok(false);
    }

    let head = doc.head().ok_or(LabelError::MissingHead)?;
    let style = doc.create_element("style");
    doc.set_attribute(style, "id", &config.style_id)?;
    let css = doc.create_text(&overlay_css(config));
    doc.append_child(style, css)?;
    doc.append_child(head, style)?;

    debug!("Installed overlay stylesheet #{}", config.style_id);
    Ok(true)
}
