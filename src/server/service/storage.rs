//! File storage under the CDN root.
//!
//! Every resource kind has its own folder with a `temp/` staging folder inside.
//! Uploads made before their record exists land in `temp/` under a random name and
//! are promoted once the record is saved; final names start with the owning id.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::Utc;

use crate::server::{
    error::AppError,
    util::random::random_code,
};

const TEMP_FOLDER: &str = "temp";
const TEMP_NAME_LENGTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Folder {
    Cars,
    Locations,
    Users,
    Licenses,
    Contracts,
}

impl Folder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cars => "cars",
            Self::Locations => "locations",
            Self::Users => "users",
            Self::Licenses => "licenses",
            Self::Contracts => "contracts",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, folder: Folder, name: &str) -> PathBuf {
        self.root.join(folder.as_str()).join(name)
    }

    fn temp_path(&self, folder: Folder, name: &str) -> PathBuf {
        self.root.join(folder.as_str()).join(TEMP_FOLDER).join(name)
    }

    /// Stores an upload in the staging folder.
    ///
    /// # Returns
    /// - `Ok(String)` - Generated name, `{random}_{millis}{ext}`
    pub async fn save_temp(
        &self,
        folder: Folder,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, AppError> {
        let name = format!(
            "{}_{}{}",
            random_code(TEMP_NAME_LENGTH),
            Utc::now().timestamp_millis(),
            extension(original_name)
        );

        let path = self.temp_path(folder, &name);
        write_file(&path, bytes).await?;

        Ok(name)
    }

    /// Moves a staged upload into its folder under a name owned by `id`.
    ///
    /// # Returns
    /// - `Ok(String)` - Final name, `{id}_{millis}{ext}`
    /// - `Err(AppError::BadRequest)` - The name is not a plain file name
    /// - `Err(AppError::NotFound)` - No staged file has this name
    pub async fn promote(&self, folder: Folder, temp_name: &str, id: i32) -> Result<String, AppError> {
        self.check_temp(folder, temp_name).await?;

        let source = self.temp_path(folder, temp_name);
        let name = owned_name(id, temp_name);
        let target = self.path(folder, &name);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::rename(&source, &target).await?;

        Ok(name)
    }

    /// Checks that a staged upload can be promoted, before its record is saved.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - The name is not a plain file name
    /// - `Err(AppError::NotFound)` - No staged file has this name
    pub async fn check_temp(&self, folder: Folder, temp_name: &str) -> Result<(), AppError> {
        check_name(temp_name)?;

        if !tokio::fs::try_exists(self.temp_path(folder, temp_name)).await? {
            return Err(AppError::NotFound(format!(
                "Temporary file {} not found",
                temp_name
            )));
        }
        Ok(())
    }

    /// Stores an upload directly under a name owned by `id`, replacing `previous`.
    pub async fn replace(
        &self,
        folder: Folder,
        id: i32,
        original_name: &str,
        bytes: &[u8],
        previous: Option<&str>,
    ) -> Result<String, AppError> {
        let name = owned_name(id, original_name);
        write_file(&self.path(folder, &name), bytes).await?;

        if let Some(previous) = previous.filter(|previous| *previous != name) {
            self.delete(folder, previous).await?;
        }

        Ok(name)
    }

    /// Writes a file under a fixed name, overwriting any existing one.
    pub async fn write_named(&self, folder: Folder, name: &str, bytes: &[u8]) -> Result<(), AppError> {
        check_name(name)?;
        write_file(&self.path(folder, name), bytes).await
    }

    /// Reads a stored file; `None` when it does not exist.
    pub async fn read(&self, folder: Folder, name: &str) -> Result<Option<Vec<u8>>, AppError> {
        check_name(name)?;
        match tokio::fs::read(self.path(folder, name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes a stored file. Missing files are ignored.
    pub async fn delete(&self, folder: Folder, name: &str) -> Result<(), AppError> {
        check_name(name)?;
        remove_file(&self.path(folder, name)).await
    }

    /// Deletes a staged upload. Missing files are ignored.
    pub async fn delete_temp(&self, folder: Folder, name: &str) -> Result<(), AppError> {
        check_name(name)?;
        remove_file(&self.temp_path(folder, name)).await
    }
}

/// Lower-cased extension of a file name including the dot, or an empty string.
fn extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

fn owned_name(id: i32, original_name: &str) -> String {
    format!(
        "{}_{}{}",
        id,
        Utc::now().timestamp_millis(),
        extension(original_name)
    )
}

/// Rejects names that could escape their folder.
fn check_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(AppError::BadRequest(format!("Invalid file name: {}", name)));
    }
    Ok(())
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

async fn remove_file(path: &Path) -> Result<(), AppError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
