//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    Restore,
    NewGame,
    Switch,
    Inject { word: String },
    Submit,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Restore => "restore",
            BackendCommand::NewGame => "new_game",
            BackendCommand::Switch => "switch",
            BackendCommand::Inject { .. } => "inject",
            BackendCommand::Submit => "submit",
        }
    }
}
