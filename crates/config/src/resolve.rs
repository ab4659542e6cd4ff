//! Values derived from [`Settings`] for the sync engine.
//!
//! Every function here reads the settings it is handed and nothing else, so a
//! settings edit mid-session is picked up by the next call.

use std::path;

use crate::Result;
use crate::Settings;
use crate::Status;

/// Vault-relative directories that are never synced.
///
/// An empty `exclude_dir` yields no entries.  Blank segments between commas
/// (`"a,,b"`, a trailing comma) are kept as empty strings; callers matching
/// against this list must tolerate them.
pub fn resolved_exclude_dirs(settings: &Settings) -> Vec<String> {
    if settings.exclude_dir.is_empty() {
        return Vec::new();
    }
    settings
        .exclude_dir
        .split(',')
        .map(|s| s.to_owned())
        .collect()
}

/// `site_dir/blog_dir`
pub fn resolved_blog_dir(settings: &Settings) -> path::PathBuf {
    join_lexical(&settings.site_dir, &[settings.blog_dir.as_str()])
}

/// `site_dir/static/static_dir`
///
/// Resolved regardless of `page_bundle`; see [`wipe_targets`] for when it is used.
pub fn resolved_static_dir(settings: &Settings) -> path::PathBuf {
    join_lexical(
        &settings.site_dir,
        &[STATIC_DIR, settings.static_dir.as_str()],
    )
}

const STATIC_DIR: &str = "static";

/// Compile `keep_list` into matchers.
///
/// Look-around and backreferences are supported, as in JavaScript patterns.
/// Empty segments are skipped.  The first segment that is not a valid regular
/// expression fails the whole call.
pub fn resolved_keep_patterns(settings: &Settings) -> Result<KeepList> {
    let patterns = settings
        .keep_list
        .split(',')
        .filter(|s| !s.is_empty())
        .map(compile_keep_pattern)
        .collect::<Result<Vec<_>>>()?;
    Ok(KeepList { patterns })
}

fn compile_keep_pattern(pattern: &str) -> Result<fancy_regex::Regex> {
    log::trace!("compiling keep pattern `{pattern}`");
    fancy_regex::Regex::new(pattern).map_err(|e| {
        Status::new("Invalid keep-list pattern")
            .with_source(e)
            .context_with(|c| c.insert("Pattern", pattern.to_owned()))
    })
}

/// Directories a sync clears before copying.
///
/// The static directory is only a target when posts are not exported as page
/// bundles.
pub fn wipe_targets(settings: &Settings) -> Vec<path::PathBuf> {
    let mut targets = vec![resolved_blog_dir(settings)];
    if !settings.page_bundle {
        targets.push(resolved_static_dir(settings));
    }
    targets
}

/// Whether a note with `tags` should be exported.
pub fn is_published<S: AsRef<str>>(settings: &Settings, tags: &[S]) -> bool {
    settings.blog_tag.is_empty() || tags.iter().any(|t| t.as_ref() == settings.blog_tag)
}

/// Tag to write into exported front matter, if any.
pub fn exported_tag(settings: &Settings) -> Option<&str> {
    if settings.export_blog_tag && !settings.blog_tag.is_empty() {
        Some(settings.blog_tag.as_str())
    } else {
        None
    }
}

/// Compiled `keep_list`, in the order the patterns were written.
#[derive(Clone, Debug, Default)]
pub struct KeepList {
    patterns: Vec<fancy_regex::Regex>,
}

impl KeepList {
    /// True if any pattern matches somewhere in `path`.
    ///
    /// Patterns are unanchored; write `^...$` to match a whole name.  A pattern
    /// that gives up (backtrack limit) counts as a match, so the file is kept.
    pub fn is_match(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| {
            p.is_match(path).unwrap_or_else(|e| {
                log::warn!("keep pattern `{}` failed on {path:?}: {e}", p.as_str());
                true
            })
        })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, fancy_regex::Regex> {
        self.patterns.iter()
    }
}

impl<'a> IntoIterator for &'a KeepList {
    type Item = &'a fancy_regex::Regex;
    type IntoIter = std::slice::Iter<'a, fancy_regex::Regex>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Join `parts` onto `base` without touching the filesystem.
///
/// Parts are always relative: a leading separator does not replace what came
/// before.  `.` is dropped and `..` removes the preceding directory.  An empty
/// result is `.`.
fn join_lexical(base: &str, parts: &[&str]) -> path::PathBuf {
    let mut joined = path::PathBuf::new();
    push_normalized(&mut joined, path::Path::new(base), true);
    for part in parts {
        push_normalized(&mut joined, path::Path::new(part), false);
    }
    if joined.as_os_str().is_empty() {
        joined.push(path::Component::CurDir.as_os_str());
    }
    joined
}

fn push_normalized(joined: &mut path::PathBuf, part: &path::Path, keep_root: bool) {
    for component in part.components() {
        match component {
            path::Component::Prefix(_) | path::Component::RootDir => {
                if keep_root {
                    joined.push(component.as_os_str());
                }
            }
            path::Component::CurDir => {}
            path::Component::ParentDir => match joined.components().next_back() {
                Some(path::Component::Normal(_)) => {
                    joined.pop();
                }
                // Can't climb above the root
                Some(path::Component::RootDir) | Some(path::Component::Prefix(_)) => {}
                _ => joined.push(component.as_os_str()),
            },
            path::Component::Normal(name) => joined.push(name),
        }
    }
}
