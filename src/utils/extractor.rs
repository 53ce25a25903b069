//! 路径参数安全提取器
//!
//! 把 `{classroom_id}` 一类路径段解析为 i64，解析失败时返回
//! 统一信封的 400 响应，而不是 actix 默认的纯文本错误。

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, err, ok};

use crate::models::common::response::ApiResponse;

fn parse_path_i64(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(name).unwrap_or_default();
    raw.parse::<i64>().map_err(|_| {
        let message = format!("Invalid {name}: must be an integer");
        actix_web::error::InternalError::from_response(
            message.clone(),
            HttpResponse::BadRequest().json(ApiResponse::error_empty(message)),
        )
        .into()
    })
}

macro_rules! define_path_id_extractor {
    ($(#[$meta:meta])* $name:ident, $segment:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                match parse_path_i64(req, $segment) {
                    Ok(id) => ok($name(id)),
                    Err(e) => err(e),
                }
            }
        }
    };
}

define_path_id_extractor!(
    /// `{classroom_id}` 路径段
    SafeClassroomIdI64, "classroom_id");
define_path_id_extractor!(
    /// `{assignment_id}` 路径段
    SafeAssignmentIdI64, "assignment_id");
define_path_id_extractor!(
    /// `{submission_id}` 路径段
    SafeSubmissionIdI64, "submission_id");
