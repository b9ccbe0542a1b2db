use std::io;
use std::path::Path;

/// File extensions recognized as catalog images, matched case-insensitively.
const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Lists the names of the immediate child directories of `path`.
///
/// An absent path yields an empty list; other filesystem errors propagate.
/// Order follows filesystem enumeration and carries no guarantee.
pub fn list_subdirectories(path: &Path) -> io::Result<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    Ok(names)
}

/// Lists the image file names directly inside `path`.
///
/// Filters to the recognized extension set; an absent path yields an empty
/// list. Order follows filesystem enumeration and carries no guarantee.
pub fn list_image_files(path: &Path) -> io::Result<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if has_image_extension(&name) {
            names.push(name);
        }
    }

    Ok(names)
}

fn has_image_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn absent_path_yields_empty_lists() {
        let missing = Path::new("/definitely/not/a/real/path");
        assert!(list_subdirectories(missing).expect("subdirs").is_empty());
        assert!(list_image_files(missing).expect("images").is_empty());
    }

    #[test]
    fn subdirectories_exclude_files() {
        let root = TempDir::new().expect("tempdir");
        fs::create_dir(root.path().join("Snacks")).expect("mkdir");
        fs::create_dir(root.path().join("Dairy")).expect("mkdir");
        fs::write(root.path().join("readme.txt"), b"not a dir").expect("write");

        let mut dirs = list_subdirectories(root.path()).expect("subdirs");
        dirs.sort();
        assert_eq!(dirs, vec!["Dairy".to_string(), "Snacks".to_string()]);
    }

    #[test]
    fn image_listing_filters_by_extension_case_insensitively() {
        let root = TempDir::new().expect("tempdir");
        for name in ["a.jpg", "b.JPEG", "c.Png", "d.webp"] {
            fs::write(root.path().join(name), b"img").expect("write");
        }
        fs::write(root.path().join("notes.txt"), b"skip").expect("write");
        fs::write(root.path().join("archive.zip"), b"skip").expect("write");
        fs::create_dir(root.path().join("nested.png")).expect("mkdir");

        let mut images = list_image_files(root.path()).expect("images");
        images.sort();
        assert_eq!(
            images,
            vec![
                "a.jpg".to_string(),
                "b.JPEG".to_string(),
                "c.Png".to_string(),
                "d.webp".to_string()
            ]
        );
    }

    #[test]
    fn files_without_extension_are_ignored() {
        let root = TempDir::new().expect("tempdir");
        fs::write(root.path().join("noext"), b"skip").expect("write");

        assert!(list_image_files(root.path()).expect("images").is_empty());
    }
}
