//! Account Access API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/accounts/{employeeId}/platform/{platform}/add | POST | 添加仓库协作者 |
//! | /api/accounts/{employeeId}/platform/{platform}/remove | DELETE | 移除仓库协作者 |
//! | /api/accounts/mongodb/validate-user | POST | 校验 Atlas 数据库用户 |
//! | /api/accounts/mongodb/change-password | PATCH | 修改 Atlas 数据库用户密码 |

mod handler;

use axum::{
    Router,
    routing::{delete, patch, post},
};

use crate::core::ServerState;

/// Account access router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/accounts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{employee_id}/platform/{platform}/add", post(handler::grant))
        .route(
            "/{employee_id}/platform/{platform}/remove",
            delete(handler::revoke),
        )
        .route("/mongodb/validate-user", post(handler::validate_atlas_user))
        .route(
            "/mongodb/change-password",
            patch(handler::change_atlas_password),
        )
}
