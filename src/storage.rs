use crate::model::Agenda;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge un agenda depuis un support.
    fn load(&self) -> anyhow::Result<Agenda>;
    /// Sauvegarde de manière atomique.
    fn save(&self, agenda: &Agenda) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    /// Charge l'agenda ou construit celui de repli (fichier absent, illisible).
    pub fn load_or_else<F: FnOnce() -> Agenda>(&self, fallback: F) -> Agenda {
        self.load().unwrap_or_else(|_| fallback())
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Agenda> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let agenda: Agenda =
            serde_json::from_slice(&data).with_context(|| "parsing agenda.json")?;
        Ok(agenda)
    }

    fn save(&self, agenda: &Agenda) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(agenda)?;
        let mut tmp =
            NamedTempFile::new_in(self.path.parent().unwrap_or_else(|| Path::new(".")))
                .with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
