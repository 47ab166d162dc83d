use crate::loader::list_json_files;
use crate::prompt::{ask_with_default, ask_yes_no, Prompt};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name the last used JSON folder is remembered in.
pub const LAST_DIR_FILE: &str = ".last_json_dir";

/// Remembers the folder problem files were last picked from.
pub trait DirStore {
    fn load(&self) -> Option<PathBuf>;
    fn save(&mut self, dir: &Path);
}

/// Keeps the last folder in a `.last_json_dir` file under `root`.
#[derive(Clone, Debug)]
pub struct FileDirStore {
    path: PathBuf,
}

impl FileDirStore {
    pub fn new(root: &Path) -> Self {
        Self {
            path: root.join(LAST_DIR_FILE),
        }
    }
}

impl DirStore for FileDirStore {
    fn load(&self) -> Option<PathBuf> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let dir = contents.trim();
        (!dir.is_empty()).then(|| PathBuf::from(dir))
    }

    fn save(&mut self, dir: &Path) {
        if let Err(err) = fs::write(&self.path, dir.to_string_lossy().as_bytes()) {
            tracing::warn!(path = %self.path.display(), "cannot remember folder: {}", err);
        }
    }
}

/// In-memory store, for sessions that should leave no trace on disk.
#[derive(Clone, Debug, Default)]
pub struct MemoryDirStore {
    pub dir: Option<PathBuf>,
}

impl DirStore for MemoryDirStore {
    fn load(&self) -> Option<PathBuf> {
        self.dir.clone()
    }

    fn save(&mut self, dir: &Path) {
        self.dir = Some(dir.to_path_buf());
    }
}

/// Full file selection of the interactive session.
///
/// Offers the remembered folder first, then the `*.json` files of `root`.
/// When the chosen folder has no JSON files the user may name another one.
/// The folder of the picked file is remembered in `store`.
pub fn choose_problem_file(
    prompt: &mut dyn Prompt,
    root: &Path,
    store: &mut dyn DirStore,
) -> io::Result<Option<PathBuf>> {
    let mut dir = root.to_path_buf();

    if let Some(last) = store.load() {
        if ask_yes_no(prompt, &format!("Use saved JSON folder {}?", last.display()), true)? {
            if last.is_dir() {
                dir = last;
            } else {
                prompt.tell(&format!(
                    "{} is not a folder, staying in {}.",
                    last.display(),
                    dir.display()
                ));
            }
        }
    }

    if list_json_files(&dir).is_empty()
        && ask_yes_no(prompt, "No JSON files found here. Choose another folder?", true)?
    {
        let answer = ask_with_default(
            prompt,
            "Path of the folder containing JSON files",
            &dir.to_string_lossy(),
        )?;
        let folder = PathBuf::from(answer);
        if folder.is_dir() {
            store.save(&folder);
            dir = folder;
        } else {
            prompt.tell(&format!("{} is not a folder.", folder.display()));
        }
    }

    let chosen = choose_file(prompt, &dir)?;
    if let Some(parent) = chosen
        .as_deref()
        .and_then(Path::parent)
        .filter(|parent| !parent.as_os_str().is_empty() && parent.is_dir())
    {
        store.save(parent);
    }
    Ok(chosen)
}

/// Lets the user pick a problem file from the `*.json` files in `dir`.
///
/// The answer may be a list number, `0` to type a path, an existing path,
/// or part of a file name. Returns `None` when the user gives no path.
pub fn choose_file(prompt: &mut dyn Prompt, dir: &Path) -> io::Result<Option<PathBuf>> {
    let names = list_json_files(dir);
    if names.is_empty() {
        prompt.tell(&format!("No JSON files found in {}.", dir.display()));
        return ask_path(prompt);
    }

    prompt.tell("JSON files found:");
    for (position, name) in names.iter().enumerate() {
        prompt.tell(&format!("  {}) {}", position + 1, name));
    }
    prompt.tell("  0) type a path");

    loop {
        let choice = ask_with_default(prompt, "Choice (number, part of the name)", "1")?;

        if let Ok(number) = choice.parse::<usize>() {
            if number == 0 {
                return ask_path(prompt);
            }
            if let Some(name) = names.get(number - 1) {
                return Ok(Some(dir.join(name)));
            }
            prompt.tell("Number out of range, try again.");
            continue;
        }

        if Path::new(&choice).exists() {
            return Ok(Some(PathBuf::from(choice)));
        }

        let needle = choice.to_lowercase();
        let matches: Vec<&String> = names
            .iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect();

        match matches.as_slice() {
            [] => prompt.tell("No matching file, try again."),
            [name] => return Ok(Some(dir.join(name))),
            _ => {
                prompt.tell("Several files match:");
                for (position, name) in matches.iter().enumerate() {
                    prompt.tell(&format!("  {}) {}", position + 1, name));
                }
                let pick = ask_with_default(prompt, "Number of the file (ENTER to cancel)", "")?;
                match pick.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
                    Some(index) if index < matches.len() => {
                        return Ok(Some(dir.join(matches[index])))
                    }
                    _ => prompt.tell("Invalid choice, try again."),
                }
            }
        }
    }
}

fn ask_path(prompt: &mut dyn Prompt) -> io::Result<Option<PathBuf>> {
    let path = ask_with_default(prompt, "Path of the JSON file", "")?;
    Ok((!path.is_empty()).then(|| PathBuf::from(path)))
}
