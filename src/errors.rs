//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_classtrack_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum ClasstrackError {
            $($variant(String),)*
        }

        impl ClasstrackError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ClasstrackError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ClasstrackError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ClasstrackError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ClasstrackError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ClasstrackError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_classtrack_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    PermissionDenied("E006", "Permission Denied"),
    NotFound("E007", "Resource Not Found"),
    Conflict("E008", "Conflict"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
}

impl ClasstrackError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ClasstrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClasstrackError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ClasstrackError {
    fn from(err: sea_orm::DbErr) -> Self {
        ClasstrackError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ClasstrackError {
    fn from(err: std::io::Error) -> Self {
        ClasstrackError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ClasstrackError {
    fn from(err: serde_json::Error) -> Self {
        ClasstrackError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for ClasstrackError {
    fn from(err: chrono::ParseError) -> Self {
        ClasstrackError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClasstrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ClasstrackError::database_config("test").code(), "E001");
        assert_eq!(ClasstrackError::validation("test").code(), "E005");
        assert_eq!(ClasstrackError::permission_denied("test").code(), "E006");
        assert_eq!(ClasstrackError::conflict("test").code(), "E008");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ClasstrackError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            ClasstrackError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = ClasstrackError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = ClasstrackError::conflict("Already enrolled");
        let formatted = err.format_simple();
        assert!(formatted.contains("Conflict"));
        assert!(formatted.contains("Already enrolled"));
    }
}
