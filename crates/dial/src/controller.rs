use crate::config::{ConfigError, DialConfig};
use crate::geometry::{self, Point};
use crate::gesture::{DialHost, GestureKind, GestureSession, Propagation};
use crate::key::{DialKey, KeyAction};
use crate::render::DialView;
use std::rc::Rc;

type ChangeCallback = Box<dyn FnMut(f64)>;
type TouchedCallback = Box<dyn FnMut()>;

/// Owns the dial value and turns raw input into value updates.
///
/// Mouse and touch drags share one gesture slot: while either is active, a
/// drag of the other kind cannot start.
pub struct DialController<H: DialHost> {
    config: DialConfig,
    host: Rc<H>,
    value: Option<f64>,
    disabled: bool,
    gesture: Option<GestureSession<H>>,
    touched: bool,
    on_change: Option<ChangeCallback>,
    on_touched: Option<TouchedCallback>,
    subscribers: Vec<ChangeCallback>,
}

impl<H: DialHost> DialController<H> {
    pub fn new(config: DialConfig, host: Rc<H>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, host))
    }

    /// Controller over the default `0..=100` dial, which is always valid.
    pub fn with_default_config(host: Rc<H>) -> Self {
        Self::build(DialConfig::default(), host)
    }

    fn build(config: DialConfig, host: Rc<H>) -> Self {
        Self {
            disabled: config.disabled,
            config,
            host,
            value: None,
            gesture: None,
            touched: false,
            on_change: None,
            on_touched: None,
            subscribers: Vec::new(),
        }
    }

    pub fn config(&self) -> &DialConfig {
        &self.config
    }

    /// Swaps in a new configuration.
    ///
    /// The configured `disabled` flag replaces any state set through
    /// [`set_disabled`](Self::set_disabled). A stored value is clamped into the
    /// new range without emitting a change.
    pub fn set_config(&mut self, config: DialConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.disabled = config.disabled;
        self.config = config;
        self.value = self.value.map(|v| self.config.clamp(v));
        if !self.is_interactive() {
            self.gesture = None;
        }
        self.host.request_redraw();
        Ok(())
    }

    /// Effective value: `min` until something has been set.
    pub fn value(&self) -> f64 {
        self.value.unwrap_or(self.config.min)
    }

    pub fn raw_value(&self) -> Option<f64> {
        self.value
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_interactive(&self) -> bool {
        !self.disabled && !self.config.readonly
    }

    pub fn active_gesture(&self) -> Option<GestureKind> {
        self.gesture.as_ref().map(GestureSession::kind)
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn view(&self) -> DialView {
        DialView::new(&self.config, self.value())
    }

    pub fn register_on_change(&mut self, callback: impl FnMut(f64) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn register_on_touched(&mut self, callback: impl FnMut() + 'static) {
        self.on_touched = Some(Box::new(callback));
    }

    pub fn subscribe(&mut self, callback: impl FnMut(f64) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Form-binding disabled state. Disabling ends any drag in progress.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled && self.gesture.take().is_some() {
            log::debug!("Dial disabled during drag, listeners released");
        }
        self.host.request_redraw();
    }

    /// Sets the value from an external binding without emitting a change.
    pub fn write_external_value(&mut self, value: Option<f64>) {
        self.value = value;
        self.host.request_redraw();
    }

    pub fn handle_click(&mut self, offset: Point) -> Option<f64> {
        if !self.is_interactive() {
            return None;
        }
        self.update_from_angle(offset)
    }

    /// Commits the stepped value under `offset`, unless it lies in the dead gap.
    pub fn update_from_angle(&mut self, offset: Point) -> Option<f64> {
        let angle = geometry::angle_from_point(offset, self.config.size);
        let raw = geometry::value_from_angle(angle, self.config.min, self.config.max).value()?;
        let stepped = geometry::round_to_step(raw, self.config.min, self.config.step);
        self.commit(stepped);
        Some(stepped)
    }

    /// Commits `value + delta`, clamped to `[min, max]`.
    pub fn update_from_delta(&mut self, delta: f64) -> f64 {
        self.commit_clamped(self.value() + delta)
    }

    fn commit_clamped(&mut self, candidate: f64) -> f64 {
        let value = self.config.clamp(candidate);
        self.commit(value);
        value
    }

    fn commit(&mut self, value: f64) {
        log::trace!("Dial value -> {value}");
        self.value = Some(value);

        if !self.touched {
            self.touched = true;
            if let Some(on_touched) = self.on_touched.as_mut() {
                on_touched();
            }
        }
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(value);
        }
        for subscriber in &mut self.subscribers {
            subscriber(value);
        }
        self.host.request_redraw();
    }

    pub fn begin_pointer_gesture(&mut self, kind: GestureKind) -> Propagation {
        if !self.is_interactive() {
            return Propagation::Proceed;
        }
        if let Some(active) = self.active_gesture() {
            log::warn!("Ignoring {kind} press while a {active} drag is active");
            return Propagation::Proceed;
        }
        self.gesture = Some(GestureSession::begin(self.host.clone(), kind));
        Propagation::Stop
    }

    /// Routes a move event from an attached listener.
    ///
    /// Mouse positions are offsets inside the control; touch positions are
    /// absolute and get localized against the host bounds first.
    pub fn pointer_moved(&mut self, kind: GestureKind, position: Point) -> Option<f64> {
        if !self.is_interactive() || self.active_gesture() != Some(kind) {
            return None;
        }
        let offset = match kind {
            GestureKind::Mouse => position,
            GestureKind::Touch => self.host.bounds().relative(position),
        };
        self.update_from_angle(offset)
    }

    /// Ends the drag of `kind`. Returns whether a session was released.
    pub fn end_pointer_gesture(&mut self, kind: GestureKind) -> bool {
        if !self.is_interactive() || self.active_gesture() != Some(kind) {
            return false;
        }
        self.gesture.take().is_some()
    }

    pub fn handle_key(&mut self, code: &str) -> Propagation {
        match DialKey::from_code(code) {
            Some(key) => self.handle_dial_key(key),
            None => Propagation::Proceed,
        }
    }

    pub fn handle_dial_key(&mut self, key: DialKey) -> Propagation {
        if !self.is_interactive() {
            return Propagation::Proceed;
        }
        match key.action() {
            KeyAction::Delta(delta) => self.update_from_delta(delta),
            KeyAction::ToMin => self.commit_clamped(self.config.min),
            KeyAction::ToMax => self.commit_clamped(self.config.max),
        };
        Propagation::Stop
    }
}

impl<H: DialHost> std::fmt::Debug for DialController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialController")
            .field("config", &self.config)
            .field("value", &self.value)
            .field("disabled", &self.disabled)
            .field("gesture", &self.gesture)
            .finish_non_exhaustive()
    }
}
