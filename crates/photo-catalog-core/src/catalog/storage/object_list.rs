//! Typed table rows persisted as JSON, one file per table name.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use crate::error::Result;

#[derive(Debug)]
pub struct ObjectListStorage {
    tables_dir: PathBuf,
}

impl ObjectListStorage {
    pub fn new(tables_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&tables_dir)?;
        Ok(Self { tables_dir })
    }

    fn table_path(&self, table_name: &str) -> PathBuf {
        self.tables_dir.join(format!("{}.json", table_name))
    }

    /// Read all rows of a table. A table that was never written is empty, not
    /// an error.
    pub fn read_object_list<T: DeserializeOwned>(&self, table_name: &str) -> Result<Vec<T>> {
        let path = self.table_path(table_name);
        if !path.is_file() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Replace all rows of a table
    pub fn write_object_list<T: Serialize>(&self, table_name: &str, rows: &[T]) -> Result<()> {
        let writer = BufWriter::new(File::create(self.table_path(table_name))?);
        serde_json::to_writer(writer, rows)?;
        Ok(())
    }
}

// -- Tests --
