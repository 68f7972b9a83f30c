use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

const SEED_USERNAME: &str = "leader";
const SEED_EMAIL: &str = "leader@luct.local";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认项目负责人账号
/// 数据库中没有任何用户时，创建一个 program_leader 账号用于后续管理
pub async fn seed_program_leader(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping program leader seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating default program leader account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping program leader seed", e);
            return;
        }
    }

    // 优先从环境变量读取密码，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated program leader password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!(
                "Failed to hash program leader password: {}, skipping seed",
                e
            );
            return;
        }
    };

    let leader_request = CreateUserRequest {
        username: SEED_USERNAME.to_string(),
        password: password_hash,
        name: "Program Leader".to_string(),
        email: SEED_EMAIL.to_string(),
        role: UserRole::ProgramLeader,
    };

    match storage.create_user(leader_request).await {
        Ok(user) => {
            info!(
                "Default program leader created (ID: {}, username: {})",
                user.id, user.username
            );
        }
        Err(e) => {
            warn!("Failed to create program leader account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文：存储后端、数据库迁移与初始账号
pub async fn prepare_server_startup() -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    seed_program_leader(&storage).await;

    StartupContext { storage }
}
