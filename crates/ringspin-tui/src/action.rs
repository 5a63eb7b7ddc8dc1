/// Operations on the hosted spinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerAction {
    /// Start if idle, stop (leaving the ring on screen) if animating.
    Toggle,
    StopAndHide,
    ToggleVisibility,
    Rerender,
    StepForward,
    StepBack,
}

/// Everything that can flow from input to the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Tick,
    Quit,
    Resize(u16, u16),
    Spinner(SpinnerAction),
    ShowHelp,
    ToggleLogPanel,
    ClosePopup,
    /// Outcome of a spinner action, for the status bar and the log.
    StatusMessage(String),
    None,
}
