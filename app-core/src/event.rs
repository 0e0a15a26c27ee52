/// Outcome of applying an [`AppEvent`]: events that wait on something (for
/// example a file dialog running on a helper thread) report `Busy` and are
/// retried on the next iteration of the GUI event loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventState {
    Finished,
    Busy,
}

pub trait AppEvent {
    type App;
    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String>;
}
