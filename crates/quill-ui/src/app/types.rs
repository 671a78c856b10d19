use std::path::PathBuf;

use quill_core::Config;

/// Launch options passed from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    pub config: Config,
    /// File to open at startup
    pub file: Option<PathBuf>,
}

/// State of the search-and-replace dialog.
#[derive(Debug, Clone, Default)]
pub struct ReplaceDialog {
    pub visible: bool,
    pub find: String,
    pub replace: String,
}

impl ReplaceDialog {
    pub fn open(&mut self) {
        self.visible = true;
    }

    /// Hides the dialog, keeping the inputs for next time.
    pub fn close(&mut self) {
        self.visible = false;
    }
}
