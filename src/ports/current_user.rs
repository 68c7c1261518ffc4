use crate::domain::UserIdentity;
use async_trait::async_trait;

/// 認証コンテキストのポート
///
/// トークンの保存形式は認証コンテキストの責務であり、ここでは扱わない。
#[async_trait]
pub trait CurrentUser: Send + Sync {
    /// サインイン中の利用者（未サインインなら`None`）
    async fn current_user(&self) -> Option<UserIdentity>;
}
