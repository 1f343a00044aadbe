use crate::gui::theme::ThemeColors;
use cairo::Context;
use dial::DialView;
use dial::geometry::{MAX_RADIANS, MID, MIN_RADIANS, RADIUS, VIEWBOX};
use palette::Srgba;

pub const LABEL_BASELINE: f64 = 57.0;
pub const LABEL_FONT_SIZE: f64 = 20.0;

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Draws the dial into a `width`×`height` area, scaled from the 100×100 viewbox.
///
/// Dial angles are Y-up; cairo is Y-down, so every angle is negated.
pub fn draw(
    cr: &Context,
    view: &DialView,
    colors: &ThemeColors,
    width: i32,
    height: i32,
) -> Result<(), cairo::Error> {
    let scale = f64::from(width.min(height)) / VIEWBOX;

    cr.save()?;
    cr.scale(scale, scale);
    cr.set_line_width(view.stroke_width);

    draw_track(cr, colors)?;
    draw_value(cr, view, colors)?;
    if let Some(label) = &view.label {
        draw_label(cr, label, colors)?;
    }

    cr.restore()
}

fn draw_track(cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_source(cr, colors.range);
    cr.new_path();
    cr.arc(MID.x, MID.y, RADIUS, -MIN_RADIANS, -MAX_RADIANS);
    cr.stroke()
}

fn draw_value(cr: &Context, view: &DialView, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_source(cr, colors.value);
    cr.new_path();
    let (from, to) = (-view.zero_angle, -view.value_angle);
    if view.value_angle <= view.zero_angle {
        cr.arc(MID.x, MID.y, RADIUS, from, to);
    } else {
        cr.arc_negative(MID.x, MID.y, RADIUS, from, to);
    }
    cr.stroke()
}

fn draw_label(cr: &Context, text: &str, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_source(cr, colors.text);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(LABEL_FONT_SIZE);
    let ext = cr.text_extents(text)?;
    cr.move_to(MID.x - ext.width() / 2.0 - ext.x_bearing(), LABEL_BASELINE);
    cr.show_text(text)
}
