use crate::config::{ColorConfig, HexColor};
use dial::DialView;
use dial::geometry::{MID, VIEWBOX};

const DEFAULT_VALUE_COLOR: HexColor = HexColor::from_rgb(0x4f, 0x46, 0xe5);
const DEFAULT_RANGE_COLOR: HexColor = HexColor::from_rgb(0xe2, 0xe8, 0xf0);
const DEFAULT_TEXT_COLOR: HexColor = HexColor::from_rgb(0x1e, 0x29, 0x3b);

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Standalone SVG markup for a dial snapshot.
pub fn svg_document(view: &DialView, colors: &ColorConfig) -> String {
    let value_color = colors.value.unwrap_or(DEFAULT_VALUE_COLOR);
    let range_color = colors.range.unwrap_or(DEFAULT_RANGE_COLOR);
    let text_color = colors.text.unwrap_or(DEFAULT_TEXT_COLOR);

    let mut svg = format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" ",
            "viewBox=\"0 0 {VIEWBOX} {VIEWBOX}\" width=\"{size}\" height=\"{size}\">\n",
        ),
        VIEWBOX = VIEWBOX,
        size = view.size
    );
    svg += &format!(
        "  <path d=\"{}\" stroke-width=\"{}\" stroke=\"{range_color}\" fill=\"none\"/>\n",
        view.range_path, view.stroke_width
    );
    svg += &format!(
        "  <path d=\"{}\" stroke-width=\"{}\" stroke=\"{value_color}\" fill=\"none\"/>\n",
        view.value_path, view.stroke_width
    );
    if let Some(label) = &view.label {
        svg += &format!(
            "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"{text_color}\">{}</text>\n",
            MID.x,
            crate::gui::view::LABEL_BASELINE,
            escape(label)
        );
    }
    svg += "</svg>\n";
    svg
}
