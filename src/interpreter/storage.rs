//! File-backed program parameters
//!
//! Programs can read inputs from and append results to conventional files
//! named after the program (`<name>.in`, `<name>.out`). The interpreter
//! core only sees the [`Storage`] trait; the file implementation lives
//! here, and tests can substitute an in-memory one.

use std::fs;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::interpreter::constants::{INPUT_SUFFIX, OUTPUT_SUFFIX};
use crate::interpreter::errors::RuntimeError;

/// Side-effecting collaborator behind the file commands.
pub trait Storage {
    /// Read the next line of the program's input, if any.
    fn load_line(&mut self, name: &str) -> Result<Option<String>, RuntimeError>;

    /// Append one line to the program's output. The first write of a run
    /// truncates any previous output.
    fn save_line(&mut self, name: &str, line: &str) -> Result<(), RuntimeError>;

    /// All lines of the program's input.
    fn read_all(&mut self, name: &str) -> Result<Option<Vec<String>>, RuntimeError>;
}

/// Conventional file storage rooted at a directory.
///
/// Input is preferred from `<name>.in`, falling back to `<name>.out`.
pub struct FileStorage {
    dir: PathBuf,
    reader: Option<BufReader<File>>,
    appending: bool,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        FileStorage {
            dir,
            reader: None,
            appending: false,
        }
    }

    fn input_path(&self, name: &str) -> Option<PathBuf> {
        let path_in = self.dir.join(format!("{}{}", name, INPUT_SUFFIX));
        if path_in.exists() {
            return Some(path_in);
        }
        let path_out = self.dir.join(format!("{}{}", name, OUTPUT_SUFFIX));
        if path_out.exists() {
            return Some(path_out);
        }
        None
    }
}

impl Storage for FileStorage {
    fn load_line(&mut self, name: &str) -> Result<Option<String>, RuntimeError> {
        if self.reader.is_none() {
            let Some(path) = self.input_path(name) else {
                return Ok(None);
            };
            let file = File::open(&path).map_err(|e| RuntimeError::Storage {
                message: format!("cannot open {}: {}", path.display(), e),
            })?;
            self.reader = Some(BufReader::new(file));
        }

        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };
        let mut line = String::new();
        let read = reader.read_line(&mut line).map_err(|e| RuntimeError::Storage {
            message: format!("read failed: {}", e),
        })?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_matches(['\n', '\r', '\t', ' ']).to_string()))
    }

    fn save_line(&mut self, name: &str, line: &str) -> Result<(), RuntimeError> {
        let path = self.dir.join(format!("{}{}", name, OUTPUT_SUFFIX));
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(self.appending)
            .truncate(!self.appending)
            .write(true)
            .open(&path)
            .map_err(|e| RuntimeError::Storage {
                message: format!("cannot open {}: {}", path.display(), e),
            })?;
        self.appending = true;
        writeln!(file, "{}", line).map_err(|e| RuntimeError::Storage {
            message: format!("write failed: {}", e),
        })
    }

    fn read_all(&mut self, name: &str) -> Result<Option<Vec<String>>, RuntimeError> {
        let Some(path) = self.input_path(name) else {
            return Ok(None);
        };
        let text = fs::read_to_string(&path).map_err(|e| RuntimeError::Storage {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Ok(Some(
            text.lines()
                .map(|l| l.trim_matches(['\n', '\r', '\t', ' ']).to_string())
                .collect(),
        ))
    }
}
