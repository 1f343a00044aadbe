//! Transient drag listeners as a scoped resource.
//!
//! A drag attaches two window-level listeners (move + end) through a [`DialHost`]
//! and must release both exactly once. [`GestureSession`] owns the handles and
//! detaches them when dropped.

use crate::geometry::Rect;
use derive_more::{Display, From, Into};
use std::rc::Rc;
use strum::{Display as StrumDisplay, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum GestureKind {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ListenerRole {
    Move,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
pub struct ListenerHandle(u64);

impl ListenerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Whether the host should keep its default handling of the triggering event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Stop,
    Proceed,
}

/// The environment a dial lives in.
///
/// Methods take `&self`: hosts are shared between the controller and any
/// session it has open, so implementations keep their bookkeeping behind
/// interior mutability.
pub trait DialHost {
    /// Registers a global listener that routes `role` events for `kind` back
    /// to the controller.
    fn attach_listener(&self, kind: GestureKind, role: ListenerRole) -> ListenerHandle;

    /// Removes a listener. Unknown handles are ignored.
    fn detach_listener(&self, handle: ListenerHandle);

    /// Current bounding box of the control, used to localize touch positions.
    fn bounds(&self) -> Rect;

    fn request_redraw(&self);
}

/// An active drag: both listeners stay attached for as long as this value lives.
pub struct GestureSession<H: DialHost> {
    host: Rc<H>,
    kind: GestureKind,
    move_listener: Option<ListenerHandle>,
    end_listener: Option<ListenerHandle>,
}

impl<H: DialHost> GestureSession<H> {
    pub fn begin(host: Rc<H>, kind: GestureKind) -> Self {
        let move_listener = host.attach_listener(kind, ListenerRole::Move);
        let end_listener = host.attach_listener(kind, ListenerRole::End);
        log::debug!("{kind} gesture started ({move_listener}, {end_listener})");

        Self {
            host,
            kind,
            move_listener: Some(move_listener),
            end_listener: Some(end_listener),
        }
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    /// Detaches any listener still held. Safe to call more than once.
    pub fn release(&mut self) {
        for handle in [self.move_listener.take(), self.end_listener.take()]
            .into_iter()
            .flatten()
        {
            self.host.detach_listener(handle);
        }
    }

    pub fn is_released(&self) -> bool {
        self.move_listener.is_none() && self.end_listener.is_none()
    }
}

impl<H: DialHost> Drop for GestureSession<H> {
    fn drop(&mut self) {
        if !self.is_released() {
            log::debug!("{} gesture ended", self.kind);
        }
        self.release();
    }
}

impl<H: DialHost> std::fmt::Debug for GestureSession<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureSession")
            .field("kind", &self.kind)
            .field("move_listener", &self.move_listener)
            .field("end_listener", &self.end_listener)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// Host that records attached listeners and redraw requests.
    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub attached: RefCell<Vec<(ListenerHandle, GestureKind, ListenerRole)>>,
        pub detach_calls: Cell<usize>,
        pub redraws: Cell<usize>,
        pub bounds: Cell<Rect>,
        next_id: Cell<u64>,
    }

    impl RecordingHost {
        pub fn with_bounds(bounds: Rect) -> Self {
            let host = Self::default();
            host.bounds.set(bounds);
            host
        }

        pub fn listener_count(&self) -> usize {
            self.attached.borrow().len()
        }

        pub fn roles_for(&self, kind: GestureKind) -> Vec<ListenerRole> {
            self.attached
                .borrow()
                .iter()
                .filter(|(_, k, _)| *k == kind)
                .map(|(_, _, role)| *role)
                .collect()
        }
    }

    impl DialHost for RecordingHost {
        fn attach_listener(&self, kind: GestureKind, role: ListenerRole) -> ListenerHandle {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            let handle = ListenerHandle::new(id);
            self.attached.borrow_mut().push((handle, kind, role));
            handle
        }

        fn detach_listener(&self, handle: ListenerHandle) {
            self.detach_calls.set(self.detach_calls.get() + 1);
            self.attached.borrow_mut().retain(|(h, _, _)| *h != handle);
        }

        fn bounds(&self) -> Rect {
            self.bounds.get()
        }

        fn request_redraw(&self) {
            self.redraws.set(self.redraws.get() + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingHost;
    use super::*;

    #[test]
    fn test_begin_attaches_move_and_end() {
        let host = Rc::new(RecordingHost::default());
        let session = GestureSession::begin(host.clone(), GestureKind::Touch);

        assert_eq!(session.kind(), GestureKind::Touch);
        assert_eq!(
            host.roles_for(GestureKind::Touch),
            vec![ListenerRole::Move, ListenerRole::End]
        );
    }

    #[test]
    fn test_release_is_idempotent() {
        let host = Rc::new(RecordingHost::default());
        let mut session = GestureSession::begin(host.clone(), GestureKind::Mouse);

        session.release();
        session.release();
        assert!(session.is_released());
        assert_eq!(host.listener_count(), 0);
        assert_eq!(host.detach_calls.get(), 2);

        drop(session);
        assert_eq!(host.detach_calls.get(), 2);
    }

    #[test]
    fn test_drop_releases_listeners() {
        let host = Rc::new(RecordingHost::default());
        {
            let _session = GestureSession::begin(host.clone(), GestureKind::Mouse);
            assert_eq!(host.listener_count(), 2);
        }
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_release_survives_unwinding() {
        let host = Rc::new(RecordingHost::default());
        let inner = host.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _session = GestureSession::begin(inner, GestureKind::Mouse);
            panic!("update failed mid-drag");
        }));

        assert!(result.is_err());
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_gesture_kind_display() {
        assert_eq!(GestureKind::Mouse.to_string(), "mouse");
        assert_eq!(ListenerRole::End.to_string(), "end");
    }
}
