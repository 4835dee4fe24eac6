//! File-backed destination chat pointer, the only state that survives a
//! restart.

use payday::{ChatId, DestinationStore, StoreError};
use std::io;
use std::path::PathBuf;

pub struct FileDestination {
    path: PathBuf,
}

impl FileDestination {
    pub fn new(path: PathBuf) -> Self {
        FileDestination { path }
    }
}

fn unavailable(e: io::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

impl DestinationStore for FileDestination {
    fn load(&self) -> Result<Option<ChatId>, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(unavailable(e)),
        };
        text.trim()
            .parse()
            .map(Some)
            .map_err(|_| StoreError::Unavailable(format!("corrupt destination file {:?}", self.path)))
    }

    fn save(&self, chat: ChatId) -> Result<(), StoreError> {
        // Write-then-rename so a crash mid-write cannot leave a torn value.
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, chat.to_string()).map_err(unavailable)?;
        std::fs::rename(&tmp, &self.path).map_err(unavailable)
    }
}
