use crate::config::{ColorConfig, HexColor};
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub value: Srgba<f64>,
    pub range: Srgba<f64>,
    pub text: Srgba<f64>,
}

impl ThemeColors {
    /// Configured colors win; the rest come from the GTK theme.
    pub fn from_context(context: &gtk::StyleContext, overrides: &ColorConfig) -> Self {
        Self {
            value: Self::resolve(
                context,
                overrides.value,
                "theme_selected_bg_color",
                Srgba::new(0.31, 0.27, 0.9, 1.0),
            ),
            range: Self::resolve(
                context,
                overrides.range,
                "borders",
                Srgba::new(0.89, 0.91, 0.94, 1.0),
            ),
            text: Self::resolve(
                context,
                overrides.text,
                "theme_fg_color",
                Srgba::new(0.12, 0.16, 0.23, 1.0),
            ),
        }
    }

    fn resolve(
        context: &gtk::StyleContext,
        configured: Option<HexColor>,
        name: &str,
        fallback: Srgba<f64>,
    ) -> Srgba<f64> {
        configured
            .map(to_srgba)
            .unwrap_or_else(|| Self::lookup_color(context, name, fallback))
    }

    fn lookup_color(context: &gtk::StyleContext, name: &str, fallback: Srgba<f64>) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                )
            })
            .unwrap_or(fallback)
    }
}

pub fn to_srgba(color: HexColor) -> Srgba<f64> {
    let (r, g, b) = color.rgb().into_format::<f64>().into_components();
    Srgba::new(r, g, b, 1.0)
}
