use tracing::warn;

/// 字母成绩对应的绩点
///
/// 不在表内的成绩（含 "N/A"、空串、百分制误录）一律按 0.0 计。
pub fn grade_points(grade: &str) -> f64 {
    match grade.trim().to_uppercase().as_str() {
        "A" | "A+" => 4.0,
        "B+" => 3.5,
        "B" => 3.0,
        "C+" => 2.5,
        "C" => 2.0,
        "D" => 1.0,
        _ => 0.0,
    }
}

/// 按学分加权计算 GPA
///
/// 输入为 (字母成绩, 学分字符串) 对；学分解析为整数，
/// 解析失败的条目跳过并告警，不中断统计。总学分为 0 时返回 0.00。
/// 返回值保留两位小数。
pub fn compute_gpa<'a, I>(graded: I) -> (f64, i64)
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut quality_points = 0.0;
    let mut total_credits: i64 = 0;

    for (grade, credit_hours) in graded {
        let credits: i64 = match credit_hours.trim().parse() {
            Ok(c) => c,
            Err(_) => {
                warn!(
                    "Skipping GPA entry with non-numeric credit hours: '{}'",
                    credit_hours
                );
                continue;
            }
        };
        quality_points += grade_points(grade) * credits as f64;
        total_credits += credits;
    }

    if total_credits == 0 {
        return (0.0, 0);
    }

    let gpa = quality_points / total_credits as f64;
    ((gpa * 100.0).round() / 100.0, total_credits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_points_table() {
        assert_eq!(grade_points("A"), 4.0);
        assert_eq!(grade_points("a+"), 4.0);
        assert_eq!(grade_points("B+"), 3.5);
        assert_eq!(grade_points("B"), 3.0);
        assert_eq!(grade_points("C+"), 2.5);
        assert_eq!(grade_points("C"), 2.0);
        assert_eq!(grade_points("D"), 1.0);
        assert_eq!(grade_points("F"), 0.0);
        assert_eq!(grade_points("N/A"), 0.0);
    }

    #[test]
    fn test_weighted_gpa() {
        // (4.0*3 + 3.0*2) / 5 = 3.60
        let (gpa, credits) = compute_gpa([("A", "3"), ("B", "2")]);
        assert_eq!(gpa, 3.6);
        assert_eq!(credits, 5);
    }

    #[test]
    fn test_non_numeric_credits_skipped() {
        let (gpa, credits) = compute_gpa([("A", "3"), ("B", "two")]);
        assert_eq!(gpa, 4.0);
        assert_eq!(credits, 3);
    }

    #[test]
    fn test_no_credits_yields_zero() {
        let (gpa, credits) = compute_gpa([("A", "n/a")]);
        assert_eq!(gpa, 0.0);
        assert_eq!(credits, 0);
        let (gpa, credits) = compute_gpa(std::iter::empty::<(&str, &str)>());
        assert_eq!(gpa, 0.0);
        assert_eq!(credits, 0);
    }
}
