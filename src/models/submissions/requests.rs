use serde::Deserialize;

/// 提交列表查询参数
///
/// ordering 支持 `submission_time` 与 `student`（按学生用户名），
/// `-` 前缀表示倒序；search 匹配学生用户名或显示名。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionListParams {
    pub ordering: Option<String>,
    pub search: Option<String>,
}
