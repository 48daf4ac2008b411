//! Submit-gate checks shared by the entry and upload forms. Each
//! returns the message to display, or `None` when the submit may
//! proceed; no request is issued while a message is returned.

pub fn name_error(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        Some("Please enter a name!")
    } else {
        None
    }
}

pub fn selection_error(selected: usize) -> Option<&'static str> {
    if selected == 0 {
        Some("Please upload files!")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(name_error(""), Some("Please enter a name!"));
        assert_eq!(name_error("   \t"), Some("Please enter a name!"));
        assert_eq!(name_error(" maya "), None);
    }

    #[test]
    fn empty_selection_is_rejected() {
        assert_eq!(selection_error(0), Some("Please upload files!"));
        assert_eq!(selection_error(1), None);
        assert_eq!(selection_error(4), None);
    }
}
