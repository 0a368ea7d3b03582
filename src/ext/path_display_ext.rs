use std::path::{Component, Path, PathBuf};

/// Renders `path` as an absolute path for messages, even when it does not
/// exist (yet). Existing paths are canonicalized, missing ones are joined onto
/// the current directory and lexically normalized.
fn best_effort_display(path: &Path) -> String {
    if let Ok(canonical) = path.canonicalize() {
        return canonical.display().to_string();
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    lexically_normalize(&absolute).display().to_string()
}

fn lexically_normalize(path: &Path) -> PathBuf {
    let mut kept: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match kept.last() {
                Some(Component::Normal(_)) => {
                    kept.pop();
                }
                // `..` above the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => kept.push(component),
            },
            _ => kept.push(component),
        }
    }

    kept.iter().collect()
}

pub trait PathDisplayExt {
    fn best_effort_display(&self) -> String;

    /// The final path component, or the whole path when there is none.
    fn file_name_display(&self) -> String;
}

impl PathDisplayExt for Path {
    fn best_effort_display(&self) -> String {
        best_effort_display(self)
    }

    fn file_name_display(&self) -> String {
        self.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.display().to_string())
    }
}

impl PathDisplayExt for PathBuf {
    fn best_effort_display(&self) -> String {
        self.as_path().best_effort_display()
    }

    fn file_name_display(&self) -> String {
        self.as_path().file_name_display()
    }
}
