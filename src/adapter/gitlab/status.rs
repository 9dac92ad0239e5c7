//! GitLab API Response Classification
//!
//! レスポンスステータスの判定

use crate::domain::errors::{StepError, StepResult};

/// プロジェクト作成成功のステータス
pub const STATUS_CREATED: u16 = 201;

/// プロジェクト作成が成功したかどうか
///
/// 201 Created のみを成功とみなす（200 も失敗扱い）
pub fn is_created(status: u16) -> bool {
    status == STATUS_CREATED
}

/// ステータスコードをステップ結果に変換
pub fn classify(status: u16) -> StepResult {
    if is_created(status) {
        Ok(())
    } else {
        Err(StepError::Api { status })
    }
}

/// ログ出力用の補足説明
pub fn describe_failure(status: u16) -> &'static str {
    match status {
        400 => "bad request (project may already exist or name is invalid)",
        401 => "unauthorized (check GL_PRIVATE_TOKEN)",
        403 => "forbidden (token lacks api scope or group permission)",
        404 => "namespace not found (check GL_GROUP_ID)",
        409 => "conflict (project already exists)",
        422 => "unprocessable entity",
        429 => "rate limited",
        500..=599 => "server error",
        _ => "unexpected status",
    }
}
