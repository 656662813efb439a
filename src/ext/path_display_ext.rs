use std::path::{Component, Path, PathBuf};

/// Absolute, lexically normalized rendering of a path for messages.
///
/// Scanned entries may disappear at any moment, so this never touches the
/// filesystem: `..` and `.` are resolved textually against the current directory.
pub fn absolute_path_display(path: &Path) -> String {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|current_dir| current_dir.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    normalize_path(&absolute).display().to_string()
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir) | None => components.push(component),
                Some(_) => {
                    components.pop();
                }
            },
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

pub trait PathDisplayExt {
    fn absolute_display(&self) -> String;
}

impl<P: AsRef<Path> + ?Sized> PathDisplayExt for P {
    fn absolute_display(&self) -> String {
        absolute_path_display(self.as_ref())
    }
}
