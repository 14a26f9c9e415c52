// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::errors::Error;

/// Split a logical name of the form `<disk>/<relative/path>` into the
/// disk identifier and the path relative to that disk's root.
///
/// Redundant separators and `.` components are collapsed and a leading
/// separator is tolerated, so `a/b/c`, `/a/b/c` and `a//b/c` all resolve
/// to `("a", "b/c")`. Both components must be non-empty and the path must
/// not climb out of the root.
pub fn split_disk_path(name: &str) -> Result<(String, String), Error> {
    let mut parts = Vec::new();
    for part in name.split('/') {
        match part {
            "" | "." => continue,
            ".." => return Err(Error::BadName(name.to_string())),
            p => parts.push(p),
        }
    }
    if parts.len() < 2 {
        return Err(Error::BadName(name.to_string()));
    }
    Ok((parts[0].to_string(), parts[1..].join("/")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names_resolve() {
        for name in ["a/b/c", "/a/b/c", "a//b/c", "a/./b/c"] {
            let (disk, rel) = split_disk_path(name).unwrap();
            assert_eq!((disk.as_str(), rel.as_str()), ("a", "b/c"), "{name}");
        }
        assert_eq!(
            split_disk_path("cfs0/x").unwrap(),
            ("cfs0".to_string(), "x".to_string())
        );
    }

    #[test]
    fn invalid_names_are_rejected() {
        for name in ["a", "", "/", "//", "a/", "/a", "a/..", "a/../b", "../a/b"] {
            assert!(
                matches!(split_disk_path(name), Err(Error::BadName(_))),
                "{name:?} should not resolve"
            );
        }
    }
}
