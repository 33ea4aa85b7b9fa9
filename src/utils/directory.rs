//! 用户目录过滤（内存中线性扫描）

use crate::models::users::entities::{User, UserRole};

/// 角色过滤条件
#[derive(Debug, Clone, PartialEq)]
pub enum RoleFilter {
    All,
    Only(UserRole),
}

impl RoleFilter {
    /// 缺省、空字符串或 "all" 表示不过滤
    pub fn parse(value: Option<&str>) -> Result<Self, String> {
        match value.map(str::trim) {
            None | Some("") | Some("all") => Ok(RoleFilter::All),
            Some(v) => v.parse::<UserRole>().map(RoleFilter::Only),
        }
    }

    fn accepts(&self, role: &UserRole) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Only(r) => r == role,
        }
    }
}

/// 用户是否匹配：角色相等，且 "first last email" 小写后包含小写的搜索词
pub fn matches(user: &User, role: &RoleFilter, search: &str) -> bool {
    if !role.accepts(&user.role) {
        return false;
    }
    let haystack = format!("{} {} {}", user.first_name, user.last_name, user.email).to_lowercase();
    haystack.contains(&search.to_lowercase())
}

pub fn filter_directory(users: Vec<User>, role: &RoleFilter, search: &str) -> Vec<User> {
    users
        .into_iter()
        .filter(|u| matches(u, role, search))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserStatus;

    fn user(id: i64, first: &str, last: &str, email: &str, role: UserRole) -> User {
        let now = chrono::Utc::now();
        User {
            id,
            email: email.to_string(),
            password_hash: String::new(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            role,
            status: UserStatus::Active,
            phone: None,
            address: None,
            date_of_birth: None,
            profile_picture_url: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample() -> Vec<User> {
        vec![
            user(1, "Awa", "Diop", "awa.diop@ecole.sn", UserRole::Student),
            user(2, "Moussa", "Ndiaye", "m.ndiaye@ecole.sn", UserRole::Teacher),
            user(3, "Fatou", "Sarr", "direction@ecole.sn", UserRole::Admin),
            user(4, "Ibrahima", "Diop", "ibou@ecole.sn", UserRole::Teacher),
        ]
    }

    #[test]
    fn test_role_filter_parse() {
        assert_eq!(RoleFilter::parse(None), Ok(RoleFilter::All));
        assert_eq!(RoleFilter::parse(Some("all")), Ok(RoleFilter::All));
        assert_eq!(
            RoleFilter::parse(Some("teacher")),
            Ok(RoleFilter::Only(UserRole::Teacher))
        );
        assert!(RoleFilter::parse(Some("parent")).is_err());
    }

    #[test]
    fn test_filter_by_search_case_insensitive() {
        let ids: Vec<i64> = filter_directory(sample(), &RoleFilter::All, "DIOP")
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_filter_search_spans_name_and_email() {
        let found = filter_directory(sample(), &RoleFilter::All, "awa diop");
        assert_eq!(found.len(), 1);
        // 搜索串跨越 "名 姓 邮箱" 的拼接边界
        let found = filter_directory(sample(), &RoleFilter::All, "diop awa");
        assert_eq!(found.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1]);
        let found = filter_directory(sample(), &RoleFilter::All, "ndiaye m.nd");
        assert_eq!(found.iter().map(|u| u.id).collect::<Vec<_>>(), vec![2]);

        assert!(filter_directory(sample(), &RoleFilter::All, "diop m.ndiaye").is_empty());
        assert!(filter_directory(sample(), &RoleFilter::All, "awa ibou").is_empty());
    }

    #[test]
    fn test_filter_by_role_and_search() {
        let found = filter_directory(
            sample(),
            &RoleFilter::Only(UserRole::Teacher),
            "diop",
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 4);

        let all_teachers = filter_directory(sample(), &RoleFilter::Only(UserRole::Teacher), "");
        assert_eq!(all_teachers.len(), 2);
    }
}
