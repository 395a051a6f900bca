//! Notice field record, defaults and merging

use crate::{NoticeError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Title used when a request does not supply one
pub const DEFAULT_TITLE: &str = "校外学習のお知らせ";

/// Illustrative values the form starts with
pub const SAMPLE_VALUES: [(FieldName, &str); 16] = [
    (FieldName::Title, DEFAULT_TITLE),
    (FieldName::Grade, "3年"),
    (FieldName::ClassName, "1組"),
    (FieldName::EventName, "姫路城・歴史学習"),
    (
        FieldName::Purpose,
        "社会科の学習の一環として、地域の歴史や文化に触れ、学びを深めることを目的とします。",
    ),
    (FieldName::Date, "2026年2月3日（火）"),
    (FieldName::MeetTime, "8:30"),
    (FieldName::MeetPlace, "学校運動場"),
    (FieldName::DismissTime, "15:10"),
    (FieldName::DismissPlace, "学校"),
    (FieldName::Destination, "姫路城（兵庫県姫路市本町68）"),
    (FieldName::Clothes, "体操服、歩きやすい靴"),
    (
        FieldName::Items,
        "筆記用具\nしおり\n水筒\nハンカチ・ティッシュ\nお弁当\n雨具",
    ),
    (
        FieldName::Notes,
        "雨天の場合も原則実施します。\n欠席される場合は当日朝までに連絡帳でご連絡ください。\n貴重品の持参はご遠慮ください。",
    ),
    (FieldName::IssuedAt, "2026年1月10日"),
    (FieldName::TeacherName, "〇〇 〇〇"),
];

/// Name of one notice field
///
/// The wire names (`as_str`) are also the tag names used in templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Title,
    Grade,
    ClassName,
    EventName,
    Purpose,
    Date,
    MeetTime,
    MeetPlace,
    DismissTime,
    DismissPlace,
    Destination,
    Clothes,
    Items,
    Notes,
    IssuedAt,
    TeacherName,
}

impl FieldName {
    /// All fields in form order
    pub const ALL: [FieldName; 16] = [
        FieldName::Title,
        FieldName::Grade,
        FieldName::ClassName,
        FieldName::EventName,
        FieldName::Purpose,
        FieldName::Date,
        FieldName::MeetTime,
        FieldName::MeetPlace,
        FieldName::DismissTime,
        FieldName::DismissPlace,
        FieldName::Destination,
        FieldName::Clothes,
        FieldName::Items,
        FieldName::Notes,
        FieldName::IssuedAt,
        FieldName::TeacherName,
    ];

    /// Wire and tag name
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Title => "title",
            FieldName::Grade => "grade",
            FieldName::ClassName => "class_name",
            FieldName::EventName => "event_name",
            FieldName::Purpose => "purpose",
            FieldName::Date => "date",
            FieldName::MeetTime => "meet_time",
            FieldName::MeetPlace => "meet_place",
            FieldName::DismissTime => "dismiss_time",
            FieldName::DismissPlace => "dismiss_place",
            FieldName::Destination => "destination",
            FieldName::Clothes => "clothes",
            FieldName::Items => "items",
            FieldName::Notes => "notes",
            FieldName::IssuedAt => "issued_at",
            FieldName::TeacherName => "teacher_name",
        }
    }

    /// Form label
    pub fn label(self) -> &'static str {
        match self {
            FieldName::Title => "タイトル",
            FieldName::Grade => "学年",
            FieldName::ClassName => "学級",
            FieldName::EventName => "行事名",
            FieldName::Purpose => "目的",
            FieldName::Date => "日付",
            FieldName::MeetTime => "集合時間",
            FieldName::MeetPlace => "集合場所",
            FieldName::DismissTime => "解散時間",
            FieldName::DismissPlace => "解散場所",
            FieldName::Destination => "行き先",
            FieldName::Clothes => "服装",
            FieldName::Items => "持ち物（改行で区切る）",
            FieldName::Notes => "注意事項（改行で区切る）",
            FieldName::IssuedAt => "発行日",
            FieldName::TeacherName => "担任名",
        }
    }

    /// Whether the field holds newline-separated lines
    pub fn is_multiline(self) -> bool {
        matches!(
            self,
            FieldName::Purpose | FieldName::Items | FieldName::Notes
        )
    }
}

impl FromStr for FieldName {
    type Err = NoticeError;

    fn from_str(s: &str) -> Result<Self> {
        FieldName::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| NoticeError::UnknownField(s.to_string()))
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete set of notice values
///
/// Missing keys deserialize to the defaults, so a value of this type never
/// has an undefined field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeFields {
    pub title: String,
    pub grade: String,
    pub class_name: String,
    pub event_name: String,
    pub purpose: String,
    pub date: String,
    pub meet_time: String,
    pub meet_place: String,
    pub dismiss_time: String,
    pub dismiss_place: String,
    pub destination: String,
    pub clothes: String,
    pub items: String,
    pub notes: String,
    pub issued_at: String,
    pub teacher_name: String,
}

impl Default for NoticeFields {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            grade: String::new(),
            class_name: String::new(),
            event_name: String::new(),
            purpose: String::new(),
            date: String::new(),
            meet_time: String::new(),
            meet_place: String::new(),
            dismiss_time: String::new(),
            dismiss_place: String::new(),
            destination: String::new(),
            clothes: String::new(),
            items: String::new(),
            notes: String::new(),
            issued_at: String::new(),
            teacher_name: String::new(),
        }
    }
}

impl NoticeFields {
    /// The sample notice the form starts with
    pub fn sample() -> Self {
        SAMPLE_VALUES
            .iter()
            .fold(Self::default(), |fields, (name, value)| {
                fields.with_field(*name, *value)
            })
    }

    /// Build the record for one generation request
    ///
    /// Merges the input over the defaults, then normalizes line endings.
    pub fn from_request(partial: PartialNoticeFields) -> Self {
        partial.merge_over(Self::default()).normalized()
    }

    /// Get a field value
    pub fn get(&self, field: FieldName) -> &str {
        self.slot(field)
    }

    /// Return a copy with one field replaced
    pub fn with_field(&self, field: FieldName, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.slot_mut(field) = value.into();
        next
    }

    /// Convert CRLF line endings in `items` and `notes` to LF
    pub fn normalized(mut self) -> Self {
        self.items = normalize_newlines(&self.items);
        self.notes = normalize_newlines(&self.notes);
        self
    }

    /// JSON object keyed by tag name, used as template data
    pub fn to_template_data(&self) -> serde_json::Value {
        serde_json::Value::Object(
            FieldName::ALL
                .iter()
                .map(|f| {
                    (
                        f.as_str().to_string(),
                        serde_json::Value::String(self.get(*f).to_string()),
                    )
                })
                .collect(),
        )
    }

    fn slot(&self, field: FieldName) -> &String {
        match field {
            FieldName::Title => &self.title,
            FieldName::Grade => &self.grade,
            FieldName::ClassName => &self.class_name,
            FieldName::EventName => &self.event_name,
            FieldName::Purpose => &self.purpose,
            FieldName::Date => &self.date,
            FieldName::MeetTime => &self.meet_time,
            FieldName::MeetPlace => &self.meet_place,
            FieldName::DismissTime => &self.dismiss_time,
            FieldName::DismissPlace => &self.dismiss_place,
            FieldName::Destination => &self.destination,
            FieldName::Clothes => &self.clothes,
            FieldName::Items => &self.items,
            FieldName::Notes => &self.notes,
            FieldName::IssuedAt => &self.issued_at,
            FieldName::TeacherName => &self.teacher_name,
        }
    }

    fn slot_mut(&mut self, field: FieldName) -> &mut String {
        match field {
            FieldName::Title => &mut self.title,
            FieldName::Grade => &mut self.grade,
            FieldName::ClassName => &mut self.class_name,
            FieldName::EventName => &mut self.event_name,
            FieldName::Purpose => &mut self.purpose,
            FieldName::Date => &mut self.date,
            FieldName::MeetTime => &mut self.meet_time,
            FieldName::MeetPlace => &mut self.meet_place,
            FieldName::DismissTime => &mut self.dismiss_time,
            FieldName::DismissPlace => &mut self.dismiss_place,
            FieldName::Destination => &mut self.destination,
            FieldName::Clothes => &mut self.clothes,
            FieldName::Items => &mut self.items,
            FieldName::Notes => &mut self.notes,
            FieldName::IssuedAt => &mut self.issued_at,
            FieldName::TeacherName => &mut self.teacher_name,
        }
    }
}

/// Request input: any subset of the notice fields
///
/// `null` and absent keys are both treated as "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialNoticeFields {
    pub title: Option<String>,
    pub grade: Option<String>,
    pub class_name: Option<String>,
    pub event_name: Option<String>,
    pub purpose: Option<String>,
    pub date: Option<String>,
    pub meet_time: Option<String>,
    pub meet_place: Option<String>,
    pub dismiss_time: Option<String>,
    pub dismiss_place: Option<String>,
    pub destination: Option<String>,
    pub clothes: Option<String>,
    pub items: Option<String>,
    pub notes: Option<String>,
    pub issued_at: Option<String>,
    pub teacher_name: Option<String>,
}

impl PartialNoticeFields {
    /// Fill every missing field from `defaults`
    pub fn merge_over(self, defaults: NoticeFields) -> NoticeFields {
        NoticeFields {
            title: self.title.unwrap_or(defaults.title),
            grade: self.grade.unwrap_or(defaults.grade),
            class_name: self.class_name.unwrap_or(defaults.class_name),
            event_name: self.event_name.unwrap_or(defaults.event_name),
            purpose: self.purpose.unwrap_or(defaults.purpose),
            date: self.date.unwrap_or(defaults.date),
            meet_time: self.meet_time.unwrap_or(defaults.meet_time),
            meet_place: self.meet_place.unwrap_or(defaults.meet_place),
            dismiss_time: self.dismiss_time.unwrap_or(defaults.dismiss_time),
            dismiss_place: self.dismiss_place.unwrap_or(defaults.dismiss_place),
            destination: self.destination.unwrap_or(defaults.destination),
            clothes: self.clothes.unwrap_or(defaults.clothes),
            items: self.items.unwrap_or(defaults.items),
            notes: self.notes.unwrap_or(defaults.notes),
            issued_at: self.issued_at.unwrap_or(defaults.issued_at),
            teacher_name: self.teacher_name.unwrap_or(defaults.teacher_name),
        }
    }
}

impl From<NoticeFields> for PartialNoticeFields {
    fn from(fields: NoticeFields) -> Self {
        Self {
            title: Some(fields.title),
            grade: Some(fields.grade),
            class_name: Some(fields.class_name),
            event_name: Some(fields.event_name),
            purpose: Some(fields.purpose),
            date: Some(fields.date),
            meet_time: Some(fields.meet_time),
            meet_place: Some(fields.meet_place),
            dismiss_time: Some(fields.dismiss_time),
            dismiss_place: Some(fields.dismiss_place),
            destination: Some(fields.destination),
            clothes: Some(fields.clothes),
            items: Some(fields.items),
            notes: Some(fields.notes),
            issued_at: Some(fields.issued_at),
            teacher_name: Some(fields.teacher_name),
        }
    }
}

/// Convert CRLF (and stray CR) line endings to LF
///
/// The result contains no `\r`, so applying it twice is the same as once.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_title_only() {
        let fields = NoticeFields::default();
        assert_eq!(fields.title, "校外学習のお知らせ");
        for field in FieldName::ALL.into_iter().skip(1) {
            assert_eq!(fields.get(field), "", "{field} should default to empty");
        }
    }

    #[test]
    fn test_sample_populates_every_field() {
        let sample = NoticeFields::sample();
        for field in FieldName::ALL {
            assert!(!sample.get(field).is_empty(), "{field} should have a sample");
        }
        assert_eq!(sample.event_name, "姫路城・歴史学習");
        assert_eq!(sample.items.lines().count(), 6);
    }

    #[test]
    fn test_field_name_roundtrip() {
        for field in FieldName::ALL {
            assert_eq!(field.as_str().parse::<FieldName>().unwrap(), field);
        }
        assert!(matches!(
            "bus_company".parse::<FieldName>(),
            Err(NoticeError::UnknownField(_))
        ));
    }

    #[test]
    fn test_field_name_serde_matches_as_str() {
        for field in FieldName::ALL {
            let json = serde_json::to_value(field).unwrap();
            assert_eq!(json, serde_json::Value::String(field.as_str().to_string()));
        }
    }

    #[test]
    fn test_with_field_is_immutable_update() {
        let original = NoticeFields::sample();
        let updated = original.with_field(FieldName::Grade, "4年");

        assert_eq!(original.grade, "3年");
        assert_eq!(updated.grade, "4年");
        assert_eq!(updated.with_field(FieldName::Grade, "3年"), original);
    }

    #[test]
    fn test_merge_keeps_supplied_values() {
        let partial = PartialNoticeFields {
            date: Some("2026年2月3日".to_string()),
            title: Some(String::new()),
            ..Default::default()
        };
        let fields = partial.merge_over(NoticeFields::default());

        assert_eq!(fields.date, "2026年2月3日");
        // An explicit empty string is a value, not an absence
        assert_eq!(fields.title, "");
        assert_eq!(fields.grade, "");
    }

    #[test]
    fn test_partial_from_json_treats_null_as_absent() {
        let partial: PartialNoticeFields =
            serde_json::from_str(r#"{"title": null, "grade": "3年", "unknown": "x"}"#).unwrap();
        let fields = NoticeFields::from_request(partial);

        assert_eq!(fields.title, DEFAULT_TITLE);
        assert_eq!(fields.grade, "3年");
    }

    #[test]
    fn test_from_request_normalizes_lists_only() {
        let partial = PartialNoticeFields {
            items: Some("A\r\nB\r\nC".to_string()),
            notes: Some("x\r\ny".to_string()),
            purpose: Some("p\r\nq".to_string()),
            ..Default::default()
        };
        let fields = NoticeFields::from_request(partial);

        assert_eq!(fields.items, "A\nB\nC");
        assert_eq!(fields.notes, "x\ny");
        assert_eq!(fields.purpose, "p\r\nq");
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb"), "a\nb");
        assert_eq!(normalize_newlines("a\r\r\nb"), "a\n\nb");
        assert_eq!(normalize_newlines("a\nb"), "a\nb");
        assert_eq!(normalize_newlines(""), "");
    }

    #[test]
    fn test_to_template_data_has_every_tag() {
        let data = NoticeFields::default().to_template_data();
        let object = data.as_object().unwrap();

        assert_eq!(object.len(), 16);
        assert_eq!(object["title"], DEFAULT_TITLE);
        assert_eq!(object["teacher_name"], "");
    }

    #[test]
    fn test_notice_fields_deserialize_missing_keys() {
        let fields: NoticeFields = serde_json::from_str(r#"{"grade": "2年"}"#).unwrap();
        assert_eq!(fields.title, DEFAULT_TITLE);
        assert_eq!(fields.grade, "2年");
    }
}
