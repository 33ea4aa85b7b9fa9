//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 数据库返回的错误文本可以通过 [`PortalError::classify`] 归类。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_portal_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum PortalError {
            $($variant(String),)*
        }

        impl PortalError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PortalError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PortalError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PortalError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_portal_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    PolicyViolation("E013", "Row Level Security Violation"),
    Conflict("E014", "Conflict"),
}

impl PortalError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PortalError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for PortalError {
    fn from(err: sea_orm::DbErr) -> Self {
        PortalError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PortalError {
    fn from(err: std::io::Error) -> Self {
        PortalError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for PortalError {
    fn from(err: chrono::ParseError) -> Self {
        PortalError::DateParse(err.to_string())
    }
}

impl PortalError {
    /// 按数据库错误文本归类
    ///
    /// 后端只通过错误消息暴露行级安全策略和约束冲突，这里按子串匹配，
    /// 顺序：行级安全 > 唯一约束 > 外键约束 > 其他。
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains("violates row-level security policy") {
            PortalError::PolicyViolation(message)
        } else if message.contains("UNIQUE constraint failed")
            || message.contains("duplicate key")
            || message.contains("Duplicate entry")
        {
            PortalError::Conflict(message)
        } else if message.contains("FOREIGN KEY constraint failed")
            || message.contains("violates foreign key constraint")
            || message.contains("a foreign key constraint fails")
        {
            PortalError::Validation(message)
        } else {
            PortalError::DatabaseOperation(message)
        }
    }

    /// 将数据库错误重新归类（非数据库错误保持不变）
    pub fn classified(self) -> Self {
        match self {
            PortalError::DatabaseOperation(msg) => Self::classify(msg),
            other => other,
        }
    }

    pub fn is_policy_violation(&self) -> bool {
        matches!(self, PortalError::PolicyViolation(_))
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PortalError::cache_connection("test").code(), "E001");
        assert_eq!(PortalError::database_config("test").code(), "E003");
        assert_eq!(PortalError::validation("test").code(), "E007");
        assert_eq!(PortalError::authentication("test").code(), "E011");
        assert_eq!(PortalError::policy_violation("test").code(), "E013");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            PortalError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            PortalError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = PortalError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_classify_row_level_security() {
        let err = PortalError::classify(
            "new row violates row-level security policy for table \"courses\"",
        );
        assert!(err.is_policy_violation());
        assert_eq!(err.error_type(), "Row Level Security Violation");
    }

    #[test]
    fn test_classify_constraints() {
        assert!(matches!(
            PortalError::classify("UNIQUE constraint failed: subjects.code"),
            PortalError::Conflict(_)
        ));
        assert!(matches!(
            PortalError::classify("duplicate key value violates unique constraint"),
            PortalError::Conflict(_)
        ));
        assert!(matches!(
            PortalError::classify("FOREIGN KEY constraint failed"),
            PortalError::Validation(_)
        ));
        assert!(matches!(
            PortalError::classify("connection reset"),
            PortalError::DatabaseOperation(_)
        ));
    }

    #[test]
    fn test_classified_keeps_other_variants() {
        let err = PortalError::not_found("violates row-level security policy").classified();
        assert!(matches!(err, PortalError::NotFound(_)));

        let err = PortalError::database_operation("violates row-level security policy")
            .classified();
        assert!(err.is_policy_violation());
    }

    #[test]
    fn test_format_simple() {
        let err = PortalError::validation("Unknown class level");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Unknown class level"));
    }
}
