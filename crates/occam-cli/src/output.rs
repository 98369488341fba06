//! Formatted output helpers for CLI commands.

use std::fmt::Write;

use occam_docker::Image;

/// Renders a short, human-readable summary of an image and the buildpacks
/// that built it.
#[must_use]
pub fn image_summary(name: &str, image: &Image) -> String {
    let mut out = format!("{name}\t{}", short_id(&image.id));
    if let Some(created) = image.created {
        let _ = write!(out, "\t{}", created.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    for buildpack in &image.buildpacks {
        let version = buildpack.version.as_deref().unwrap_or("-");
        let _ = write!(
            out,
            "\n  {}@{version}\t{} layer(s)",
            buildpack.key,
            buildpack.layers.len()
        );
    }
    out
}

/// Truncates a `sha256:` image ID to the 12 hex characters docker prints.
#[must_use]
pub fn short_id(id: &str) -> &str {
    let hex = id.strip_prefix("sha256:").unwrap_or(id);
    hex.get(..12).unwrap_or(hex)
}

/// Renders a command line that can be pasted into a POSIX shell.
#[must_use]
pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(shell_quote)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Single-quotes `word` unless it only contains shell-safe characters.
fn shell_quote(word: &str) -> String {
    if !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_=./:@,+*".contains(c))
    {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
