use crate::config::{self, ColorConfig, Config};
use crate::events::AppEvent;
use crate::gui::host::WindowHost;
use crate::gui::theme::ThemeColors;
use crate::gui::view;
use dial::{DialController, DialKey, GestureKind, Point, Propagation};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

type SharedDial = Rc<RefCell<DialController<WindowHost>>>;

const KEY_CODES: &[(gdk::Key, DialKey)] = &[
    (gdk::Key::Up, DialKey::ArrowUp),
    (gdk::Key::KP_Up, DialKey::ArrowUp),
    (gdk::Key::Right, DialKey::ArrowRight),
    (gdk::Key::KP_Right, DialKey::ArrowRight),
    (gdk::Key::Down, DialKey::ArrowDown),
    (gdk::Key::KP_Down, DialKey::ArrowDown),
    (gdk::Key::Left, DialKey::ArrowLeft),
    (gdk::Key::KP_Left, DialKey::ArrowLeft),
    (gdk::Key::Page_Up, DialKey::PageUp),
    (gdk::Key::Page_Down, DialKey::PageDown),
    (gdk::Key::Home, DialKey::Home),
    (gdk::Key::End, DialKey::End),
];

fn dial_key(key: gdk::Key) -> Option<DialKey> {
    KEY_CODES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, dial_key)| *dial_key)
}

fn propagation(p: Propagation) -> glib::Propagation {
    match p {
        Propagation::Stop => glib::Propagation::Stop,
        Propagation::Proceed => glib::Propagation::Proceed,
    }
}

fn gesture_kind(gesture: &impl IsA<gtk::EventController>) -> GestureKind {
    let touch = gesture
        .current_event_device()
        .is_some_and(|d| d.source() == gdk::InputSource::Touchscreen);
    if touch {
        GestureKind::Touch
    } else {
        GestureKind::Mouse
    }
}

fn window_title(dial: &DialController<WindowHost>) -> String {
    format!("Knob ({})", dial.value())
}

pub struct AppModel {
    pub dial: SharedDial,
    pub colors: Rc<RefCell<ColorConfig>>,
    pub title: String,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    PointerMoved(GestureKind, Point),
    PointerReleased(GestureKind),
    ValueChanged(f64),
    WriteValue(Option<f64>),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::WriteValue(v) => AppMsg::WriteValue(v),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            #[watch]
            set_title: Some(&model.title),
            set_default_size: (320, 320),
            add_css_class: "knob-window",
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_halign(gtk::Align::Center);
        drawing_area.set_valign(gtk::Align::Center);
        resize_area(&drawing_area, config.dial.size);
        drawing_area.add_css_class("knob-dial");
        drawing_area.set_focusable(config.dial.tabindex >= 0);

        let host = Rc::new(WindowHost::new(
            root.clone(),
            drawing_area.clone(),
            sender.clone(),
        ));
        let mut dial = DialController::new(config.dial.clone(), host.clone())
            .unwrap_or_else(|e| {
                log::error!("Invalid dial config, using defaults: {}", e);
                DialController::with_default_config(host)
            });
        dial.write_external_value(config.value);
        {
            let sender = sender.clone();
            dial.register_on_change(move |v| sender.input(AppMsg::ValueChanged(v)));
        }
        dial.register_on_touched(|| log::debug!("Dial touched"));

        let model = AppModel {
            title: window_title(&dial),
            dial: Rc::new(RefCell::new(dial)),
            colors: Rc::new(RefCell::new(config.colors)),
            drawing_area: drawing_area.clone(),
        };

        let widgets = view_output!();

        root.set_child(Some(&drawing_area));
        connect_input(&root, &drawing_area, &model.dial);

        let (dial_draw, colors_draw) = (model.dial.clone(), model.colors.clone());
        drawing_area.set_draw_func(move |area, cr, width, height| {
            let colors = ThemeColors::from_context(&area.style_context(), &colors_draw.borrow());
            if let Err(e) = view::draw(cr, &dial_draw.borrow().view(), &colors, width, height) {
                log::error!("Drawing error: {}", e);
            }
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::PointerMoved(kind, position) => {
                self.dial.borrow_mut().pointer_moved(kind, position);
            }
            AppMsg::PointerReleased(kind) => {
                self.dial.borrow_mut().end_pointer_gesture(kind);
            }
            AppMsg::ValueChanged(value) => {
                log::info!("Value changed: {}", value);
                self.title = window_title(&self.dial.borrow());
            }
            AppMsg::WriteValue(value) => {
                let mut dial = self.dial.borrow_mut();
                dial.write_external_value(value);
                self.title = window_title(&dial);
            }
            // `value` is only the startup value: a reload keeps the live reading
            // (clamped into the new range) and the file's `disabled` flag wins.
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    if let Err(e) = self.dial.borrow_mut().set_config(new_config.dial.clone()) {
                        log::error!("Rejected dial config: {}", e);
                        return;
                    }
                    resize_area(&self.drawing_area, new_config.dial.size);
                    *self.colors.borrow_mut() = new_config.colors;
                    self.title = window_title(&self.dial.borrow());
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

fn resize_area(area: &gtk::DrawingArea, size: f64) {
    let size = size.round() as i32;
    area.set_content_width(size);
    area.set_content_height(size);
}

/// Press/click and keyboard input. These act on the dial directly since the
/// press has to start listening before the matching release arrives and key
/// handling decides propagation synchronously.
fn connect_input(window: &gtk::ApplicationWindow, area: &gtk::DrawingArea, dial: &SharedDial) {
    let click = gtk::GestureClick::new();
    {
        let dial = dial.clone();
        click.connect_pressed(move |gesture, _, _, _| {
            let kind = gesture_kind(gesture);
            if dial.borrow_mut().begin_pointer_gesture(kind) == Propagation::Stop {
                gesture.set_state(gtk::EventSequenceState::Claimed);
            }
        });
    }
    {
        let dial = dial.clone();
        click.connect_released(move |_, _, x, y| {
            dial.borrow_mut().handle_click(Point::new(x, y));
        });
    }
    area.add_controller(click);

    let keys = gtk::EventControllerKey::new();
    {
        let dial = dial.clone();
        keys.connect_key_pressed(move |_, key, _, _| match dial_key(key) {
            Some(dial_key) => propagation(dial.borrow_mut().handle_dial_key(dial_key)),
            None => glib::Propagation::Proceed,
        });
    }
    window.add_controller(keys);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(dial_key(gdk::Key::Up), Some(DialKey::ArrowUp));
        assert_eq!(dial_key(gdk::Key::KP_Left), Some(DialKey::ArrowLeft));
        assert_eq!(dial_key(gdk::Key::Page_Down), Some(DialKey::PageDown));
        assert_eq!(dial_key(gdk::Key::Escape), None);
    }

    #[test]
    fn test_propagation_mapping() {
        assert_eq!(propagation(Propagation::Stop), glib::Propagation::Stop);
        assert_eq!(propagation(Propagation::Proceed), glib::Propagation::Proceed);
    }
}
