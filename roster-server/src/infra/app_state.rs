use std::{fmt, sync::Arc};

use roster_core::UserDirectory;

use crate::infra::config::Config;
use crate::users::auth::token::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<UserDirectory>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(directory: Arc<UserDirectory>, tokens: Arc<TokenService>, config: Arc<Config>) -> Self {
        Self {
            directory,
            tokens,
            config,
        }
    }
}
