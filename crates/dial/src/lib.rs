//! Headless circular dial: value/angle geometry and the pointer and keyboard
//! interaction state machine. Hosts supply input and draw the [`render::DialView`].

pub mod config;
pub mod controller;
pub mod geometry;
pub mod gesture;
pub mod key;
pub mod render;

pub use config::{ConfigError, DialConfig};
pub use controller::DialController;
pub use geometry::{AngleMapping, Point, Rect};
pub use gesture::{DialHost, GestureKind, ListenerHandle, ListenerRole, Propagation};
pub use key::DialKey;
pub use render::DialView;
