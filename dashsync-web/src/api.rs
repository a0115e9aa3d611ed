use crate::config::FrontendConfig;
use once_cell::unsync::OnceCell;
use shared::client::DirectoryClient;

thread_local! {
    static SHARED_CLIENT: OnceCell<DirectoryClient> = OnceCell::new();
}

/// The page-wide directory client, authorized with `token` when given.
///
/// The underlying connection pool is built once; each call hands out a cheap
/// clone carrying the caller's token.
pub fn directory_client(token: Option<&str>) -> DirectoryClient {
    SHARED_CLIENT.with(|cell| {
        cell.get_or_init(|| DirectoryClient::new(FrontendConfig::new().client_config()))
            .clone()
            .with_token(token.map(str::to_string))
    })
}
