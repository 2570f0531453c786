//! Lock marker path derivation.

use std::path::PathBuf;

/// Derive the lock marker path for a target file.
///
/// The marker lives in the same directory as the target, with `.#` spliced
/// in front of the final path segment: `dir/name.ext` becomes
/// `dir/.#name.ext`, and a bare `name.ext` becomes `.#name.ext`.
///
/// This is a pure string transformation: no existence check is performed
/// and the target does not need to be a valid path on disk.
pub fn marker_path(target: &str) -> PathBuf {
    match target.rfind(std::path::is_separator) {
        Some(idx) => {
            let (dir, name) = target.split_at(idx + 1);
            PathBuf::from(format!("{dir}.#{name}"))
        }
        None => PathBuf::from(format!(".#{target}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_is_placed_next_to_the_target() {
        assert_eq!(marker_path("a/b/c.txt"), PathBuf::from("a/b/.#c.txt"));
    }

    #[test]
    fn bare_filename_gets_prefix_in_current_directory() {
        assert_eq!(marker_path("c.txt"), PathBuf::from(".#c.txt"));
    }

    #[test]
    fn absolute_paths_keep_their_directory() {
        assert_eq!(
            marker_path("/var/tmp/notes.org"),
            PathBuf::from("/var/tmp/.#notes.org")
        );
    }

    #[test]
    fn single_directory_level() {
        assert_eq!(marker_path("dir/file"), PathBuf::from("dir/.#file"));
    }
}
