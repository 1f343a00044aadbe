use crate::gui::app::{AppModel, AppMsg};
use dial::{DialHost, GestureKind, ListenerHandle, ListenerRole, Point, Rect};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::ComponentSender;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Hosts the dial in a GTK window.
///
/// Drag listeners are capture-phase legacy controllers on the window, so
/// moves and releases are seen even after the pointer leaves the drawing area.
pub struct WindowHost {
    window: gtk::ApplicationWindow,
    area: gtk::DrawingArea,
    sender: ComponentSender<AppModel>,
    listeners: RefCell<HashMap<ListenerHandle, gtk::EventControllerLegacy>>,
    next_id: Cell<u64>,
}

impl WindowHost {
    pub fn new(
        window: gtk::ApplicationWindow,
        area: gtk::DrawingArea,
        sender: ComponentSender<AppModel>,
    ) -> Self {
        Self {
            window,
            area,
            sender,
            listeners: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
        }
    }
}

/// Drawing area bounds in surface coordinates, the space gdk events report in.
fn surface_bounds(window: &gtk::ApplicationWindow, area: &gtk::DrawingArea) -> Rect {
    let (sx, sy) = window.surface_transform();
    area.compute_bounds(window)
        .map(|b| {
            Rect::new(
                f64::from(b.x()) + sx,
                f64::from(b.y()) + sy,
                f64::from(b.width()),
                f64::from(b.height()),
            )
        })
        .unwrap_or_default()
}

fn listens_to(kind: GestureKind, role: ListenerRole, event_type: gdk::EventType) -> bool {
    use gdk::EventType;
    match (kind, role) {
        (GestureKind::Mouse, ListenerRole::Move) => event_type == EventType::MotionNotify,
        (GestureKind::Mouse, ListenerRole::End) => event_type == EventType::ButtonRelease,
        (GestureKind::Touch, ListenerRole::Move) => event_type == EventType::TouchUpdate,
        (GestureKind::Touch, ListenerRole::End) => {
            matches!(event_type, EventType::TouchEnd | EventType::TouchCancel)
        }
    }
}

impl DialHost for WindowHost {
    fn attach_listener(&self, kind: GestureKind, role: ListenerRole) -> ListenerHandle {
        let handle = ListenerHandle::new(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);

        let controller = gtk::EventControllerLegacy::new();
        controller.set_propagation_phase(gtk::PropagationPhase::Capture);

        let (sender, window, area) = (self.sender.clone(), self.window.clone(), self.area.clone());
        controller.connect_event(move |_, event| {
            if !listens_to(kind, role, event.event_type()) {
                return glib::Propagation::Proceed;
            }
            match role {
                ListenerRole::Move => {
                    if let Some((x, y)) = event.position() {
                        let position = Point::new(x, y);
                        // mouse moves are delivered as offsets, touches as absolute positions
                        let position = match kind {
                            GestureKind::Mouse => surface_bounds(&window, &area).relative(position),
                            GestureKind::Touch => position,
                        };
                        sender.input(AppMsg::PointerMoved(kind, position));
                    }
                }
                ListenerRole::End => sender.input(AppMsg::PointerReleased(kind)),
            }
            glib::Propagation::Proceed
        });

        self.window.add_controller(controller.clone());
        self.listeners.borrow_mut().insert(handle, controller);
        log::trace!("Attached {kind} {role} listener {handle}");
        handle
    }

    fn detach_listener(&self, handle: ListenerHandle) {
        if let Some(controller) = self.listeners.borrow_mut().remove(&handle) {
            self.window.remove_controller(&controller);
            log::trace!("Detached listener {handle}");
        }
    }

    fn bounds(&self) -> Rect {
        surface_bounds(&self.window, &self.area)
    }

    fn request_redraw(&self) {
        self.area.queue_draw();
    }
}
