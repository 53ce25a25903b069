//! 提交附件的存储路径推导
//!
//! 布局：`submissions/{教室名}_{教室ID}/{学生用户名}/{作业ID}_{文件名}`，
//! 所有路径段中的空格替换为下划线。

// 文件名来自 multipart 表单，路径分隔符与 `..` 必须在拼接前消毒，
// 否则构造出的相对路径可以逃出上传目录。
fn sanitize_segment(segment: &str) -> String {
    segment
        .replace(['/', '\\', ' '], "_")
        .replace("..", "_")
}

/// 推导提交文件的相对存储路径
pub fn submission_file_path(
    classroom_name: &str,
    classroom_id: i64,
    student_username: &str,
    assignment_id: i64,
    file_name: &str,
) -> String {
    format!(
        "submissions/{}_{}/{}/{}_{}",
        sanitize_segment(classroom_name),
        classroom_id,
        sanitize_segment(student_username),
        assignment_id,
        sanitize_segment(file_name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_layout() {
        let path = submission_file_path("Algebra", 3, "stu01", 11, "essay.pdf");
        assert_eq!(path, "submissions/Algebra_3/stu01/11_essay.pdf");
    }

    #[test]
    fn test_spaces_replaced_in_every_segment() {
        let path = submission_file_path("Linear Algebra", 3, "john doe", 11, "final essay.pdf");
        assert_eq!(
            path,
            "submissions/Linear_Algebra_3/john_doe/11_final_essay.pdf"
        );
        assert!(!path.contains(' '));
    }

    #[test]
    fn test_traversal_filename_cannot_escape_layout() {
        let path = submission_file_path("Algo", 1, "stu", 2, "../../../../tmp/evil.sh");
        // 消毒后的路径不含分隔符与父目录引用，始终停留在 submissions/ 之下
        assert!(path.starts_with("submissions/Algo_1/stu/2_"));
        assert!(!path.contains(".."));
        assert_eq!(path.matches('/').count(), 3);
    }

    #[test]
    fn test_separators_stripped_from_name_segments() {
        let path = submission_file_path("a/b", 1, "..\\stu", 2, "report.pdf");
        assert_eq!(path, "submissions/a_b_1/__stu/2_report.pdf");
    }
}
