//! Page geometry from the document part's section properties.

use cascadoc_model::{CssUnit, PageStyle};

use crate::xml::XmlEl;

/// Extract the page style from the last `sectPr` of the document.
/// Values are in twips; missing geometry yields `None`.
pub fn parse_page_style(document: &XmlEl) -> Option<PageStyle> {
    let mut sections = Vec::new();
    document.find_all_deep("sectPr", &mut sections);
    let section = sections.last()?;

    let size = section.find("pgSz")?;
    let margins = section.find("pgMar")?;
    Some(PageStyle {
        page_width: twips_attr(size, "w")?,
        page_height: twips_attr(size, "h")?,
        margin_top: twips_attr(margins, "top")?,
        margin_right: twips_attr(margins, "right")?,
        margin_bottom: twips_attr(margins, "bottom")?,
        margin_left: twips_attr(margins, "left")?,
    })
}

fn twips_attr(el: &XmlEl, name: &str) -> Option<CssUnit> {
    el.attr(name)
        .and_then(|v| v.parse::<i64>().ok())
        .map(CssUnit::from_twips)
}
