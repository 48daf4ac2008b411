//! Filenames for client-side saves. Downloads are written as
//! `<username>_<filename>` with both parts sanitized.

/// Collapses whitespace runs to `_` and strips everything outside
/// `[A-Za-z0-9_.-]`.
pub fn sanitize_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_whitespace = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-' {
            out.push(c);
        }
    }
    out
}

/// Name under which the owner dashboard saves a downloaded file, with
/// the uploader's name first.
pub fn download_file_name(username: &str, file_name: &str) -> String {
    format!(
        "{}_{}",
        sanitize_component(username),
        sanitize_component(file_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn whitespace_becomes_single_underscore() {
        assert_eq!(sanitize_component("my  great\tfile.pdf"), "my_great_file.pdf");
    }

    #[test]
    fn special_characters_are_stripped() {
        assert_eq!(sanitize_component("weird/\\:*?name!.txt"), "weirdname.txt");
        assert_eq!(sanitize_component("safe-name_v2.pdf"), "safe-name_v2.pdf");
    }

    #[test]
    fn download_name_puts_username_first() {
        assert_eq!(
            download_file_name("Maya R", "term paper.pdf"),
            "Maya_R_term_paper.pdf"
        );
    }

    proptest! {
        #[test]
        fn sanitized_output_is_fixed_point(raw in ".{0,64}") {
            let once = sanitize_component(&raw);
            prop_assert_eq!(sanitize_component(&once), once.clone());
            prop_assert!(once
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-'));
        }
    }
}
