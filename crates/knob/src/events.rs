#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Value written by an external binding; `None` clears it.
    WriteValue(Option<f64>),
    ConfigReload,
}
