//! Loading problem definitions from JSON files.
//!
//! Expected shape:
//!
//! ```json
//! {"capacity": 10, "items": [{"name": "map", "weight": 2, "value": 3}]}
//! ```
//!
//! `capacity` is optional and `name` may be omitted. Numeric fields accept
//! JSON integers, floats (truncated), booleans and integer strings.

use crate::error::LoadError;
use crate::problem::{Item, KnapsackProblem};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A parsed problem file. The capacity is optional in the file format and
/// has to be resolved before a [`KnapsackProblem`] can be built.
#[derive(Clone, Debug, PartialEq)]
pub struct ProblemFile {
    pub items: Vec<Item>,
    pub capacity: Option<u64>,
}

impl ProblemFile {
    pub fn into_problem(self, capacity: u64) -> KnapsackProblem {
        KnapsackProblem::new(self.items, capacity)
    }
}

/// Parsed problem files keyed by canonical path.
#[derive(Clone, Debug, Default)]
pub struct ProblemCache {
    entries: HashMap<PathBuf, ProblemFile>,
}

impl ProblemCache {
    pub fn get(&self, path: &Path) -> Option<&ProblemFile> {
        self.entries.get(path)
    }

    pub fn insert(&mut self, path: PathBuf, file: ProblemFile) {
        self.entries.insert(path, file);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct ProblemLoader {
    cache: ProblemCache,
}

impl ProblemLoader {
    pub fn new(cache: ProblemCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &ProblemCache {
        &self.cache
    }

    pub fn into_cache(self) -> ProblemCache {
        self.cache
    }

    /// Loads `path`, serving repeated loads of the same file from the cache.
    pub fn load(&mut self, path: &Path) -> Result<ProblemFile, LoadError> {
        let canonical = fs::canonicalize(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(file) = self.cache.get(&canonical) {
            tracing::debug!(path = %canonical.display(), "problem served from cache");
            return Ok(file.clone());
        }

        let file = read_problem_file(&canonical)?;
        tracing::debug!(
            path = %canonical.display(),
            items = file.items.len(),
            "problem loaded"
        );
        self.cache.insert(canonical, file.clone());
        Ok(file)
    }
}

pub fn read_problem_file(path: &Path) -> Result<ProblemFile, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&contents).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    parse_problem(&value)
}

pub fn parse_problem(value: &Value) -> Result<ProblemFile, LoadError> {
    let object = value
        .as_object()
        .ok_or_else(|| LoadError::InvalidFormat("top level is not an object".to_string()))?;

    let capacity = match object.get("capacity") {
        None | Some(Value::Null) => None,
        Some(raw) => Some(
            coerce_int(raw)
                .and_then(|capacity| u64::try_from(capacity).ok())
                .ok_or_else(|| LoadError::InvalidCapacity(raw.to_string()))?,
        ),
    };

    let raw_items = object
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| LoadError::InvalidFormat("missing 'items' array".to_string()))?;

    let items = raw_items
        .iter()
        .enumerate()
        .map(|(index, raw)| parse_item(index, raw))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProblemFile { items, capacity })
}

fn parse_item(index: usize, raw: &Value) -> Result<Item, LoadError> {
    let object = raw
        .as_object()
        .ok_or_else(|| LoadError::InvalidFormat(format!("item {} is not an object", index)))?;

    let field = |name: &str| -> Result<u64, LoadError> {
        object
            .get(name)
            .and_then(coerce_int)
            .and_then(|value| u64::try_from(value).ok())
            .ok_or_else(|| {
                LoadError::InvalidFormat(format!(
                    "item {} needs a non-negative integer '{}'",
                    index, name
                ))
            })
    };

    let name = match object.get("name") {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(name.clone()),
        Some(other) => Some(other.to_string()),
    };

    Ok(Item {
        name,
        weight: field("weight")?,
        value: field("value")?,
    })
}

fn coerce_int(value: &Value) -> Option<i128> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .map(i128::from)
            .or_else(|| number.as_u64().map(i128::from))
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|float| float.is_finite())
                    .map(|float| float.trunc() as i128)
            }),
        Value::String(text) => text.trim().parse::<i128>().ok(),
        Value::Bool(flag) => Some(i128::from(*flag)),
        _ => None,
    }
}

/// `*.json` file names in `dir`, sorted. Unreadable directories yield an
/// empty list.
pub fn list_json_files(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(dir = %dir.display(), "cannot list directory: {}", err);
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".json"))
        .collect();
    names.sort();
    names
}
