//! String path helpers shared by local paths and `scheme://` remote paths.

use crate::core::{ASCEND_LABEL, ASCEND_VALUE, FOLDER_MARKER};

fn is_sep(c: char) -> bool {
    c == '/' || c == std::path::MAIN_SEPARATOR
}

/// Splits `s3://bucket/key` into (`s3`, `bucket/key`).
pub(crate) fn split_scheme(path: &str) -> (Option<&str>, &str) {
    if let Some(i) = path.find("://") {
        let scheme = &path[..i];
        let valid = !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if valid {
            return (Some(scheme), &path[i + 3..]);
        }
    }
    (None, path)
}

/// Protocol prefix (`s3://`) of a remote path, or the empty string.
pub(crate) fn scheme_prefix(path: &str) -> String {
    match split_scheme(path).0 {
        Some(scheme) => format!("{scheme}://"),
        None => String::new(),
    }
}

fn separator_for(path: &str) -> char {
    if split_scheme(path).0.is_some() {
        '/'
    } else {
        std::path::MAIN_SEPARATOR
    }
}

fn segments(rest: &str) -> Vec<&str> {
    rest.split(is_sep).filter(|s| !s.is_empty()).collect()
}

/// Trims trailing separators, keeping a bare root (`/`, `s3://`) intact.
pub(crate) fn trim_trailing_sep(path: &str) -> &str {
    let rest = split_scheme(path).1;
    let trimmed = rest.trim_end_matches(is_sep);
    if trimmed.is_empty() {
        return path;
    }
    let prefix_len = path.len() - rest.len();
    &path[..prefix_len + trimmed.len()]
}

/// Resolves `.` and `..` segments lexically, keeping any `scheme://` prefix.
pub(crate) fn collapse_dots(path: &str) -> String {
    let (scheme, rest) = split_scheme(path);
    let absolute = rest.starts_with(is_sep);
    let mut out: Vec<&str> = Vec::new();
    for segment in segments(rest) {
        match segment {
            "." => {}
            ".." => {
                if out.last().is_some_and(|s| *s != "..") {
                    out.pop();
                } else if !absolute && scheme.is_none() {
                    out.push("..");
                }
            }
            s => out.push(s),
        }
    }
    let sep = separator_for(path);
    let body = out.join(&sep.to_string());
    match scheme {
        Some(scheme) => format!("{scheme}://{body}"),
        None if absolute => format!("{sep}{body}"),
        None if body.is_empty() => ".".to_string(),
        None => body,
    }
}

/// Last segment of a path (`/data/a.txt` -> `a.txt`).
pub(crate) fn file_name(path: &str) -> &str {
    let path = path.trim_end_matches(is_sep);
    match path.rfind(is_sep) {
        Some(i) => &path[i + 1..],
        None => split_scheme(path).1,
    }
}

/// Whether the basename starts with a dot.
pub(crate) fn is_hidden(path: &str) -> bool {
    file_name(path).starts_with('.')
}

/// Joins a relative segment onto `base`. Absolute `rel` values win.
pub(crate) fn join(base: &str, rel: &str) -> String {
    if rel.starts_with(is_sep) || split_scheme(rel).0.is_some() {
        return rel.to_string();
    }
    let sep = separator_for(base);
    let base = base.trim_end_matches(is_sep);
    if base.ends_with(':') {
        return format!("{base}//{rel}");
    }
    format!("{base}{sep}{rel}")
}

/// Drops the last segment; falls back to the filesystem root.
pub(crate) fn parent(path: &str) -> String {
    let (scheme, rest) = split_scheme(path);
    let rest = rest.trim_end_matches(is_sep);
    match (rest.rfind(is_sep), scheme) {
        (Some(0), None) => std::path::MAIN_SEPARATOR.to_string(),
        (Some(i), None) => rest[..i].to_string(),
        (Some(i), Some(scheme)) => format!("{scheme}://{}", &rest[..i]),
        (None, None) => std::path::MAIN_SEPARATOR.to_string(),
        (None, Some(_)) => path.to_string(),
    }
}

/// Component-wise containment: `/data/sub` is within `/data`, `/data2` is not.
pub(crate) fn is_within(path: &str, root: &str) -> bool {
    let (path_scheme, path_rest) = split_scheme(path);
    let (root_scheme, root_rest) = split_scheme(root);
    if path_scheme != root_scheme {
        return false;
    }
    let path_segments = segments(path_rest);
    let root_segments = segments(root_rest);
    path_segments.len() >= root_segments.len()
        && path_segments.iter().zip(&root_segments).all(|(a, b)| a == b)
}

/// Lexical relative path from `base` to `path` (`..` segments as needed).
pub(crate) fn relative_to(path: &str, base: &str) -> String {
    let (path_scheme, path_rest) = split_scheme(path);
    let (base_scheme, base_rest) = split_scheme(base);
    if path_scheme != base_scheme {
        return path.to_string();
    }
    let path_segments = segments(path_rest);
    let base_segments = segments(base_rest);
    let common = path_segments
        .iter()
        .zip(&base_segments)
        .take_while(|(a, b)| a == b)
        .count();
    let mut parts: Vec<&str> = Vec::new();
    parts.extend(std::iter::repeat(ASCEND_VALUE).take(base_segments.len() - common));
    parts.extend(&path_segments[common..]);
    if parts.is_empty() {
        return ".".to_string();
    }
    parts.join(&separator_for(path).to_string())
}

/// Number of segments `path` sits below `root` (0 for the root itself).
pub(crate) fn depth_below(path: &str, root: &str) -> usize {
    let path_segments = segments(split_scheme(path).1).len();
    let root_segments = segments(split_scheme(root).1).len();
    path_segments.saturating_sub(root_segments)
}

/// Removes the folder marker and the ascend arrow from a displayed label.
pub(crate) fn strip_markers(label: &str) -> String {
    if label == ASCEND_LABEL {
        return ASCEND_VALUE.to_string();
    }
    label.replace(FOLDER_MARKER, "").replace("⬆ ", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_scheme_prefix() {
        assert_eq!(split_scheme("s3://bucket/key"), (Some("s3"), "bucket/key"));
        assert_eq!(split_scheme("/data/x"), (None, "/data/x"));
        assert_eq!(scheme_prefix("gcs://b/k"), "gcs://");
        assert_eq!(scheme_prefix("/data"), "");
    }

    #[cfg(unix)]
    #[test]
    fn parent_falls_back_to_root() {
        assert_eq!(parent("/data/sub"), "/data");
        assert_eq!(parent("/data"), "/");
        assert_eq!(parent("/"), "/");
        assert_eq!(parent("s3://bucket/dir"), "s3://bucket");
        assert_eq!(parent("s3://bucket"), "s3://bucket");
    }

    #[test]
    fn containment_is_per_component() {
        assert!(is_within("/data/sub", "/data"));
        assert!(is_within("/data", "/data/"));
        assert!(!is_within("/data2", "/data"));
        assert!(!is_within("/", "/data"));
        assert!(!is_within("s3://data/x", "/data"));
    }

    #[cfg(unix)]
    #[test]
    fn relative_paths_climb_with_dotdot() {
        assert_eq!(relative_to("/data/a.txt", "/data"), "a.txt");
        assert_eq!(relative_to("/other/x.csv", "/data/sub"), "../../other/x.csv");
        assert_eq!(relative_to("/data", "/data"), ".");
        assert_eq!(relative_to("s3://b/k/f", "s3://b/k"), "f");
    }

    #[cfg(unix)]
    #[test]
    fn join_respects_absolute_and_remote_paths() {
        assert_eq!(join("/data", "sub"), "/data/sub");
        assert_eq!(join("/data/", "sub"), "/data/sub");
        assert_eq!(join("/data", "/etc"), "/etc");
        assert_eq!(join("s3://bucket", "k"), "s3://bucket/k");
    }

    #[test]
    fn dot_segments_collapse_under_a_scheme() {
        assert_eq!(collapse_dots("s3://b/k/../x/./y"), "s3://b/x/y");
        assert_eq!(collapse_dots("s3://b/.."), "s3://");
    }

    #[test]
    fn trailing_separators_are_trimmed() {
        assert_eq!(trim_trailing_sep("s3://bucket/dir/"), "s3://bucket/dir");
        assert_eq!(trim_trailing_sep("/"), "/");
        assert_eq!(trim_trailing_sep("s3://"), "s3://");
    }

    #[test]
    fn names_and_markers() {
        assert_eq!(file_name("/data/sub/"), "sub");
        assert_eq!(file_name("s3://bucket"), "bucket");
        assert!(is_hidden("/data/.git"));
        assert_eq!(strip_markers("📁sub"), "sub");
        assert_eq!(strip_markers("⬆ .."), "..");
        assert_eq!(depth_below("/data/sub/deep", "/data"), 2);
        assert_eq!(depth_below("/data", "/data"), 0);
    }
}
