//! Pure formatting functions for UI output.
//!
//! Rendering is split from printing so the text can be tested; the
//! `display_*` functions only print what the `format_*` functions return.

use console::style;

use crate::version::TaggedVersion;

/// Render the tag list, marking the last (highest) version as current.
pub fn format_tags(versions: &[TaggedVersion]) -> String {
    let mut out = format!("{}\n", style("tags:").cyan());
    let last = versions.len().saturating_sub(1);

    for (i, version) in versions.iter().enumerate() {
        if i < last {
            out.push_str(&format!("  - {}\n", version));
        } else {
            out.push_str(&format!(
                "{}\n",
                style(format!("  - {} (current version)", version)).yellow()
            ));
        }
    }
    out
}

/// Render the confirmation shown after a successful push.
pub fn format_bumped(tag: &str) -> String {
    format!("\nbump version to {}", style(tag).magenta())
}

/// Render an error line with a red `ERROR:` marker.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red(), message)
}

pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Print the sorted tag list followed by a blank line.
pub fn display_tags(versions: &[TaggedVersion]) {
    println!("{}", format_tags(versions));
}

pub fn display_bumped(tag: &str) {
    println!("{}", format_bumped(tag));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::parse_versions;

    #[test]
    fn test_format_tags_marks_current() {
        console::set_colors_enabled(false);
        let versions = parse_versions(&["v1.0.0", "v1.1.0"]);
        let out = format_tags(&versions);
        assert_eq!(
            out,
            "tags:\n  - v1.0.0\n  - v1.1.0 (current version)\n"
        );
    }

    #[test]
    fn test_format_bumped_names_tag() {
        console::set_colors_enabled(false);
        assert_eq!(format_bumped("v1.2.4"), "\nbump version to v1.2.4");
    }

    #[test]
    fn test_format_error_prefixes_marker() {
        console::set_colors_enabled(false);
        assert_eq!(format_error("test error"), "ERROR: test error");
    }
}
