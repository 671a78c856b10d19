//! Native file pickers.
//!
//! A cancelled picker yields `None`; the update loop treats that as
//! "do nothing" rather than as an error.

use iced::Task;
use std::path::{Path, PathBuf};

use super::Message;

/// Asks for a file to open.
pub fn pick_open_path(extension: String) -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .add_filter("Text", &[extension.as_str()])
                .add_filter("All Files", &["*"])
                .pick_file()
                .await
                .map(|file| file.path().to_path_buf())
        },
        Message::OpenPathChosen,
    )
}

/// Asks where to save, suggesting the current file name.
pub fn pick_save_path(extension: String, current: Option<PathBuf>) -> Task<Message> {
    Task::perform(
        async move {
            let mut dialog = rfd::AsyncFileDialog::new()
                .add_filter("Text", &[extension.as_str()])
                .add_filter("All Files", &["*"]);
            if let Some(path) = &current {
                if let Some(dir) = path.parent() {
                    dialog = dialog.set_directory(dir);
                }
                dialog = dialog.set_file_name(display_name(path));
            }
            dialog.save_file().await.map(|file| file.path().to_path_buf())
        },
        Message::SavePathChosen,
    )
}

/// Short name for the status bar.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/tmp/notes.txt")), "notes.txt");
        assert_eq!(display_name(Path::new("/")), "/");
    }
}
