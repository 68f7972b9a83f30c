use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::UserListQuery;
use crate::services::UserService;

// 懒加载的全局 UserService 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

pub async fn list_users(
    req: HttpRequest,
    query: web::Query<UserListQuery>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_users(&req, query.into_inner()).await
}

pub async fn get_profile(req: HttpRequest) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_profile(&req).await
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .wrap(middlewares::RequireJWT)
            .route("/profile", web::get().to(get_profile))
            .service(
                web::resource("").route(
                    web::get()
                        .to(list_users)
                        .wrap(middlewares::RequireRole::new(&UserRole::ProgramLeader)),
                ),
            ),
    );
}
