use crate::domain::{FileError, FileResult};

pub struct ClipboardService;

impl ClipboardService {
    pub fn copy_text(text: &str) -> FileResult<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| FileError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| FileError::Clipboard(e.to_string()))
    }
}
