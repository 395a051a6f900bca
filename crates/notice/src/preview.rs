//! Plain-text preview of a notice

use crate::NoticeFields;

/// Render the human-readable preview shown next to the form
///
/// Pure function of the fields; callers recompute it on every change.
pub fn render_preview(fields: &NoticeFields) -> String {
    let grade_class = [fields.grade.as_str(), fields.class_name.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "【{title}】

保護者の皆様

このたび、{grade_class}では下記のとおり校外学習を実施いたします。

■ 行事名
{event_name}

■ 目的
{purpose}

■ 日時
{date}

■ 集合
{meet_time}　{meet_place}

■ 解散
{dismiss_time}　{dismiss_place}

■ 行き先
{destination}

■ 服装
{clothes}

■ 持ち物
{items}

■ 注意事項
{notes}

{issued_at}
担任　{teacher_name}
",
        title = fields.title,
        event_name = fields.event_name,
        purpose = fields.purpose,
        date = fields.date,
        meet_time = fields.meet_time,
        meet_place = fields.meet_place,
        dismiss_time = fields.dismiss_time,
        dismiss_place = fields.dismiss_place,
        destination = fields.destination,
        clothes = fields.clothes,
        items = fields.items,
        notes = fields.notes,
        issued_at = fields.issued_at,
        teacher_name = fields.teacher_name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldName;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preview_sample_layout() {
        let preview = render_preview(&NoticeFields::sample());
        let lines: Vec<&str> = preview.lines().collect();

        assert_eq!(lines[0], "【校外学習のお知らせ】");
        assert_eq!(lines[2], "保護者の皆様");
        assert_eq!(
            lines[4],
            "このたび、3年 1組では下記のとおり校外学習を実施いたします。"
        );
        assert!(preview.contains("■ 集合\n8:30　学校運動場\n"));
        assert!(preview.contains("■ 持ち物\n筆記用具\nしおり\n"));
        assert!(preview.ends_with("2026年1月10日\n担任　〇〇 〇〇\n"));
    }

    #[test]
    fn test_preview_grade_class_skips_empty() {
        let fields = NoticeFields::default().with_field(FieldName::ClassName, "2組");
        let preview = render_preview(&fields);
        assert!(preview.contains("このたび、2組では"));

        let preview = render_preview(&NoticeFields::default());
        assert!(preview.contains("このたび、では"));
    }

    #[test]
    fn test_preview_tracks_field_changes() {
        let fields = NoticeFields::sample();
        let before = render_preview(&fields);
        let after = render_preview(&fields.with_field(FieldName::Destination, "奈良公園"));

        assert_ne!(before, after);
        assert!(after.contains("■ 行き先\n奈良公園\n"));
    }
}
