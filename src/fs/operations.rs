use std::{io::ErrorKind, path::Path};

use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{self, AsyncReadExt, AsyncSeekExt, AsyncWriteExt},
};
use tracing::trace;

/// Reads the whole file under a shared lock. A missing file is not an error, it simply has no
/// contents yet.
pub async fn read_locked(path: &Path) -> Result<Option<String>, io::Error> {
    let mut file = match File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    file.lock_shared()?;
    let mut contents = String::new();
    let result = file.read_to_string(&mut contents).await;
    file.unlock_async().await?;
    result?;
    trace!("Read {} bytes from {path:?}", contents.len());
    Ok(Some(contents))
}

/// Replaces the contents of a file under an exclusive lock. The file is truncated only once the
/// lock is held, so a concurrent reader never observes a half-cleared document.
pub async fn overwrite_locked(path: &Path, contents: &[u8]) -> Result<(), io::Error> {
    let mut file = File::options()
        .write(true)
        .create(true)
        .read(true)
        .truncate(false)
        .open(path)
        .await?;

    file.lock_exclusive()?;
    let result = overwrite_with_file(&mut file, contents).await;
    file.unlock_async().await?;
    result
}

async fn overwrite_with_file(file: &mut File, contents: &[u8]) -> Result<(), io::Error> {
    file.set_len(0).await?;
    file.rewind().await?;
    file.write_all(contents).await?;
    file.flush().await?;
    file.sync_all().await?;
    Ok(())
}
