//! Download filename

/// Fixed prefix of every generated file name
pub const FILENAME_PREFIX: &str = "校外学習お便り";

/// Used in place of the date when the date field is empty
pub const DATE_PLACEHOLDER: &str = "日付未設定";

/// File name for a notice dated `date`
///
/// `notice_filename("2026年2月3日")` is `校外学習お便り_2026年2月3日.docx`.
pub fn notice_filename(date: &str) -> String {
    let date = if date.is_empty() {
        DATE_PLACEHOLDER
    } else {
        date
    };
    format!("{FILENAME_PREFIX}_{date}.docx")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filename_with_date() {
        assert_eq!(
            notice_filename("2026年2月3日"),
            "校外学習お便り_2026年2月3日.docx"
        );
    }

    #[test]
    fn test_filename_without_date() {
        assert_eq!(notice_filename(""), "校外学習お便り_日付未設定.docx");
    }
}
