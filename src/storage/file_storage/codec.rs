//! 管道分隔行编解码
//!
//! 三个数据文件都是一行一条记录、`|` 分隔字段的文本文件。
//! 字段数随版本增长，解码时对缺失的尾部字段取默认值；
//! 整行无法解析（字段过少、数字字段非法）则跳过该行。

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::models::submissions::entities::{Submission, SubmissionStatus};
use crate::models::users::entities::{User, UserRole, UserStatus};

const FIELD_SEP: char = '|';

// 历史占位值，见原始数据文件
const LEGACY_NO_FEEDBACK: &str = "No feedback";
const LEGACY_NO_GRADE: &str = "N/A";

/// 清洗写入字段
///
/// 字段值里的 `|` 会破坏行格式，写入前统一替换为 `/`；
/// 换行同理压成空格。
pub fn sanitize_field(value: &str) -> String {
    value
        .replace(FIELD_SEP, "/")
        .replace(['\r', '\n'], " ")
}

fn encode_optional(value: &Option<String>, legacy_empty: &str) -> String {
    match value {
        Some(v) => sanitize_field(v),
        None => legacy_empty.to_string(),
    }
}

fn decode_optional(raw: &str, legacy_markers: &[&str]) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || legacy_markers.iter().any(|m| trimmed.eq_ignore_ascii_case(m)) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ---------- users.txt ----------
// id|name|username|email|password|role|status|created_at|last_login
// 前六个字段是最初的布局，status 起为后加字段。

pub fn encode_user(user: &User) -> String {
    format!(
        "{}|{}|{}|{}|{}|{}|{}|{}|{}",
        user.id,
        sanitize_field(&user.name),
        sanitize_field(&user.username),
        sanitize_field(&user.email),
        user.password_hash,
        user.role,
        user.status,
        user.created_at.to_rfc3339(),
        user.last_login.map(|t| t.to_rfc3339()).unwrap_or_default(),
    )
}

pub fn decode_user(line: &str) -> Option<User> {
    let fields: Vec<&str> = line.split(FIELD_SEP).collect();
    if fields.len() < 6 {
        return None;
    }

    let id: i64 = fields[0].trim().parse().ok()?;
    let role: UserRole = fields[5].trim().parse().ok()?;

    let status = fields
        .get(6)
        .and_then(|s| s.trim().parse::<UserStatus>().ok())
        .unwrap_or(UserStatus::Active);
    let created_at = fields
        .get(7)
        .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH);
    let last_login = fields
        .get(8)
        .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|t| t.with_timezone(&Utc));

    Some(User {
        id,
        name: fields[1].to_string(),
        username: fields[2].to_string(),
        email: fields[3].to_string(),
        password_hash: fields[4].to_string(),
        role,
        status,
        created_at,
        last_login,
    })
}

// ---------- submissions.txt ----------
// title|course|studentName|status|feedback|grade|description|organizationName|email|creditHours|lastUpdated|id|viewedByStudent|assignment|category|completionDate|fileName
// 前十一个字段是旧版布局，id 起为后加字段。

pub fn encode_submission(submission: &Submission) -> String {
    format!(
        "{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}",
        sanitize_field(&submission.title),
        sanitize_field(&submission.course),
        sanitize_field(&submission.student_name),
        submission.status.as_record_str(),
        encode_optional(&submission.feedback, ""),
        encode_optional(&submission.grade, LEGACY_NO_GRADE),
        sanitize_field(&submission.description),
        sanitize_field(&submission.organization_name),
        sanitize_field(&submission.organization_email),
        encode_optional(&submission.credit_hours, ""),
        submission.last_updated.to_rfc3339(),
        submission.id,
        submission.viewed_by_student,
        sanitize_field(&submission.assignment),
        sanitize_field(&submission.category),
        submission.completion_date,
        sanitize_field(&submission.file_name),
    )
}

pub fn decode_submission(line: &str) -> Option<Submission> {
    let fields: Vec<&str> = line.split(FIELD_SEP).collect();
    if fields.len() < 6 {
        return None;
    }

    let status: SubmissionStatus = fields[3].trim().parse().ok()?;

    let last_updated = fields
        .get(10)
        .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH);
    // 旧版行没有 id，补发一个新的
    let id = fields
        .get(11)
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
        .unwrap_or_else(Uuid::new_v4);
    let viewed_by_student = fields
        .get(12)
        .and_then(|s| s.trim().parse::<bool>().ok())
        .unwrap_or(false);
    let completion_date = fields
        .get(15)
        .and_then(|s| s.trim().parse::<NaiveDate>().ok())
        .unwrap_or_else(|| Utc::now().date_naive());

    Some(Submission {
        id,
        title: fields[0].to_string(),
        course: fields[1].to_string(),
        student_name: fields[2].to_string(),
        status,
        feedback: decode_optional(fields[4], &[LEGACY_NO_FEEDBACK]),
        grade: decode_optional(fields[5], &[LEGACY_NO_GRADE]),
        description: fields.get(6).unwrap_or(&"").to_string(),
        organization_name: fields.get(7).unwrap_or(&"").to_string(),
        organization_email: fields.get(8).unwrap_or(&"").to_string(),
        credit_hours: fields.get(9).and_then(|s| decode_optional(s, &[LEGACY_NO_GRADE])),
        last_updated,
        viewed_by_student,
        assignment: fields.get(13).unwrap_or(&"Project").to_string(),
        category: fields.get(14).unwrap_or(&"General").to_string(),
        completion_date,
        file_name: fields.get(16).unwrap_or(&"").to_string(),
    })
}

// ---------- history_config.txt ----------
// studentName|timestampMillis（仅追加）

pub fn encode_watermark(student_name: &str, at: DateTime<Utc>) -> String {
    format!("{}|{}", sanitize_field(student_name), at.timestamp_millis())
}

pub fn decode_watermark(line: &str) -> Option<(String, DateTime<Utc>)> {
    let (name, millis) = line.split_once(FIELD_SEP)?;
    let millis: i64 = millis.trim().parse().ok()?;
    let at = DateTime::from_timestamp_millis(millis)?;
    Some((name.to_string(), at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_submission() -> Submission {
        Submission {
            id: Uuid::new_v4(),
            student_name: "Abay Shimelis".to_string(),
            title: "Capstone Project".to_string(),
            course: "Computer Science".to_string(),
            assignment: "Project".to_string(),
            category: "Academic".to_string(),
            description: "Final year capstone".to_string(),
            file_name: "capstone.pdf".to_string(),
            completion_date: NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(),
            status: SubmissionStatus::Approved,
            grade: Some("A".to_string()),
            feedback: Some("Well done".to_string()),
            credit_hours: Some("3".to_string()),
            organization_name: "Acme Corp".to_string(),
            organization_email: "careers@acme.org".to_string(),
            viewed_by_student: false,
            last_updated: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_submission_round_trip() {
        let original = sample_submission();
        let decoded = decode_submission(&encode_submission(&original)).unwrap();
        assert_eq!(decoded.id, original.id);
        assert_eq!(decoded.title, original.title);
        assert_eq!(decoded.student_name, original.student_name);
        assert_eq!(decoded.status, original.status);
        assert_eq!(decoded.feedback, original.feedback);
        assert_eq!(decoded.grade, original.grade);
        assert_eq!(decoded.credit_hours, original.credit_hours);
        assert_eq!(decoded.last_updated, original.last_updated);
        assert_eq!(decoded.completion_date, original.completion_date);
    }

    #[test]
    fn test_submission_short_line_defaults() {
        // 旧版布局只有六个字段
        let decoded =
            decode_submission("Old Project|Art|Jane Doe|PENDING|No feedback|N/A").unwrap();
        assert_eq!(decoded.status, SubmissionStatus::Submitted);
        assert_eq!(decoded.feedback, None);
        assert_eq!(decoded.grade, None);
        assert_eq!(decoded.credit_hours, None);
        assert!(!decoded.viewed_by_student);
        assert_eq!(decoded.assignment, "Project");
        assert_eq!(decoded.last_updated, DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_submission_malformed_line_skipped() {
        assert!(decode_submission("just|a|few|fields").is_none());
        assert!(decode_submission("T|C|S|NOT_A_STATUS|f|g").is_none());
        assert!(decode_submission("").is_none());
    }

    #[test]
    fn test_user_round_trip() {
        let user = User {
            id: 7,
            name: "Faculty User".to_string(),
            username: "faculty".to_string(),
            email: "faculty@amazi.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            role: UserRole::Faculty,
            status: UserStatus::Active,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            last_login: None,
        };
        let decoded = decode_user(&encode_user(&user)).unwrap();
        assert_eq!(decoded.id, user.id);
        assert_eq!(decoded.username, user.username);
        assert_eq!(decoded.password_hash, user.password_hash);
        assert_eq!(decoded.role, user.role);
        assert_eq!(decoded.status, user.status);
        assert_eq!(decoded.last_login, None);
    }

    #[test]
    fn test_user_short_line_defaults_to_active() {
        let decoded = decode_user("3|Student User|student|student@amazi.com|hash|student").unwrap();
        assert_eq!(decoded.status, UserStatus::Active);
        assert_eq!(decoded.created_at, DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_user_malformed_line_skipped() {
        // 非数字 id
        assert!(decode_user("abc|N|u|e|p|student").is_none());
        // 未知角色
        assert!(decode_user("1|N|u|e|p|overlord").is_none());
        // 字段过少
        assert!(decode_user("1|N|u").is_none());
    }

    #[test]
    fn test_sanitize_strips_separator() {
        let mut submission = sample_submission();
        submission.title = "Pipes | and\nnewlines".to_string();
        let line = encode_submission(&submission);
        assert_eq!(line.lines().count(), 1);
        let decoded = decode_submission(&line).unwrap();
        assert_eq!(decoded.title, "Pipes / and newlines");
    }

    #[test]
    fn test_watermark_round_trip() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 45).unwrap();
        let line = encode_watermark("Abay Shimelis", at);
        let (name, decoded_at) = decode_watermark(&line).unwrap();
        assert_eq!(name, "Abay Shimelis");
        assert_eq!(decoded_at, at);
        assert!(decode_watermark("name-without-timestamp").is_none());
    }
}
