/// Top-level views the presentation layer switches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Lobby,
    Game,
    Disconnected,
}

/// Presentation-layer callbacks. Rendering itself lives outside this crate.
pub trait Presenter {
    fn show(&mut self, screen: Screen);

    /// Blocking notification the user has to acknowledge.
    fn alert(&mut self, title: &str, body: &str);
}

/// Presenter that remembers what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub screens: Vec<Screen>,
    pub alerts: Vec<(String, String)>,
}

impl RecordingPresenter {
    pub fn current(&self) -> Option<Screen> {
        self.screens.last().copied()
    }
}

impl Presenter for RecordingPresenter {
    fn show(&mut self, screen: Screen) {
        self.screens.push(screen);
    }

    fn alert(&mut self, title: &str, body: &str) {
        self.alerts.push((title.to_string(), body.to_string()));
    }
}
