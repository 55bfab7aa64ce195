/// UI configuration options derived from config/environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    /// Replace emoji glyphs with plain ASCII.
    pub ascii_only: bool,
    pub high_contrast: bool,
    /// Skip overlay animations and particle drift.
    pub reduced_motion: bool,
}
