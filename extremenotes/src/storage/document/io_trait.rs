use std::ffi::OsString;
use std::path::Path;
use async_trait::async_trait;
use tokio::{fs, io};
use uuid::Uuid;
use crate::rng::make_uuid;

#[async_trait]
pub trait DocumentIo: Send + Sync + 'static {
    async fn metadata(
        &self,
        path: impl AsRef<Path> + Send,
    ) -> io::Result<Metadata>;

    async fn create_dir_all(
        &self,
        path: impl AsRef<Path> + Send,
    ) -> io::Result<()>;

    async fn read_file(
        &self,
        path: impl AsRef<Path> + Send,
    ) -> io::Result<Vec<u8>>;

    async fn write_file(
        &self,
        path: impl AsRef<Path> + Send,
        data: impl AsRef<[u8]> + Send,
    ) -> io::Result<()>;

    async fn rename_file(
        &self,
        from: impl AsRef<Path> + Send,
        to: impl AsRef<Path> + Send,
    ) -> io::Result<()>;

    async fn remove_file(
        &self,
        path: impl AsRef<Path> + Send,
    ) -> io::Result<()>;

    /// Names of the directory entries, without the directory prefix.
    async fn list_dir(
        &self,
        path: impl AsRef<Path> + Send,
    ) -> io::Result<Vec<OsString>>;

    fn generate_uuid(&self) -> Uuid;
}

pub struct Metadata {
    pub is_dir: bool,
}

#[derive(Debug)]
pub struct ProductionDocumentIo;

impl ProductionDocumentIo {
    pub fn new() -> Self {
        ProductionDocumentIo
    }
}

#[async_trait]
impl DocumentIo for ProductionDocumentIo {
    async fn metadata(
        &self,
        path: impl AsRef<Path> + Send,
    ) -> io::Result<Metadata> {
        let meta = fs::metadata(path).await?;
        Ok(Metadata {
            is_dir: meta.is_dir(),
        })
    }

    async fn create_dir_all(
        &self,
        path: impl AsRef<Path> + Send,
    ) -> io::Result<()> {
        fs::create_dir_all(path).await
    }

    async fn read_file(
        &self,
        path: impl AsRef<Path> + Send,
    ) -> io::Result<Vec<u8>> {
        fs::read(path).await
    }

    async fn write_file(
        &self,
        path: impl AsRef<Path> + Send,
        data: impl AsRef<[u8]> + Send,
    ) -> io::Result<()> {
        fs::write(path, data).await
    }

    async fn rename_file(
        &self,
        from: impl AsRef<Path> + Send,
        to: impl AsRef<Path> + Send,
    ) -> io::Result<()> {
        fs::rename(from, to).await
    }

    async fn remove_file(
        &self,
        path: impl AsRef<Path> + Send,
    ) -> io::Result<()> {
        fs::remove_file(path).await
    }

    async fn list_dir(
        &self,
        path: impl AsRef<Path> + Send,
    ) -> io::Result<Vec<OsString>> {
        let mut entries = fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name());
        }
        Ok(names)
    }

    fn generate_uuid(&self) -> Uuid {
        make_uuid(&mut rand::rng())
    }
}
