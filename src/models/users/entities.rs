use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "user.ts")]
pub enum UserRole {
    Lecturer,          // 讲师
    PrincipalLecturer, // 首席讲师，负责审核报告
    ProgramLeader,     // 项目负责人，负责课程与班级管理
    Student,           // 学生
}

impl UserRole {
    pub const LECTURER: &'static str = "lecturer";
    pub const PRINCIPAL_LECTURER: &'static str = "principal_lecturer";
    pub const PROGRAM_LEADER: &'static str = "program_leader";
    pub const STUDENT: &'static str = "student";

    pub fn lecturer_roles() -> &'static [&'static UserRole] {
        &[&Self::Lecturer]
    }
    pub fn reviewer_roles() -> &'static [&'static UserRole] {
        &[&Self::PrincipalLecturer]
    }
    pub fn leader_roles() -> &'static [&'static UserRole] {
        &[&Self::ProgramLeader]
    }
    pub fn management_roles() -> &'static [&'static UserRole] {
        &[&Self::PrincipalLecturer, &Self::ProgramLeader]
    }
    pub fn teaching_roles() -> &'static [&'static UserRole] {
        &[&Self::Lecturer, &Self::PrincipalLecturer]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[
            &Self::Lecturer,
            &Self::PrincipalLecturer,
            &Self::ProgramLeader,
            &Self::Student,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Lecturer => Self::LECTURER,
            UserRole::PrincipalLecturer => Self::PRINCIPAL_LECTURER,
            UserRole::ProgramLeader => Self::PROGRAM_LEADER,
            UserRole::Student => Self::STUDENT,
        }
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid user role: '{s}'. Supported roles: lecturer, principal_lecturer, program_leader, student"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::LECTURER => Ok(UserRole::Lecturer),
            Self::PRINCIPAL_LECTURER => Ok(UserRole::PrincipalLecturer),
            Self::PROGRAM_LEADER => Ok(UserRole::ProgramLeader),
            Self::STUDENT => Ok(UserRole::Student),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(&self) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(self.id, &self.username, self.role)
            .map_err(|e| format!("Failed to generate token pair: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_str() {
        for role in UserRole::all_roles() {
            assert_eq!(role.to_string().parse::<UserRole>().unwrap(), **role);
        }
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_deserialize_rejects_unknown() {
        let role: UserRole = serde_json::from_str("\"principal_lecturer\"").unwrap();
        assert_eq!(role, UserRole::PrincipalLecturer);
        assert!(serde_json::from_str::<UserRole>("\"teacher\"").is_err());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: 1,
            username: "lect01".into(),
            name: "Lecturer One".into(),
            email: "l1@luct.ac.ls".into(),
            password_hash: "secret-hash".into(),
            role: UserRole::Lecturer,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"role\":\"lecturer\""));
    }
}
