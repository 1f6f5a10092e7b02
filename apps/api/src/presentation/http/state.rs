use crate::{
    application::{
        accounts::use_case::AccountUseCase, comments::use_case::CommentUseCase,
        content::use_case::ContentUseCase, identity::resolver::IdentityResolver,
        media::use_case::MediaUseCase, reactions::use_case::ReactionUseCase,
    },
    config::Config,
    domain::{account::repository::AccountRepository, entry::repository::ContentRepository},
    infrastructure::{
        security::{MediaLimits, PasswordHasher, TokenService},
        storage::traits::StorageService,
    },
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub redis: Option<redis::Client>,
    pub content_repo: Arc<dyn ContentRepository>,
    pub identity: IdentityResolver,
    pub media_limits: MediaLimits,
    pub accounts: Arc<AccountUseCase>,
    pub content: Arc<ContentUseCase>,
    pub reactions: Arc<ReactionUseCase>,
    pub comments: Arc<CommentUseCase>,
    pub media: Arc<MediaUseCase>,
}

impl AppState {
    /// Wires the use cases over the given repositories and storage.
    pub fn new(
        config: Config,
        content_repo: Arc<dyn ContentRepository>,
        account_repo: Arc<dyn AccountRepository>,
        storage: Arc<dyn StorageService>,
        redis: Option<redis::Client>,
    ) -> Self {
        let tokens = TokenService::new(&config.jwt_secret, config.jwt_ttl_minutes);
        let hasher = PasswordHasher::new(config.bcrypt_cost);
        let media = MediaUseCase::new(storage);

        Self {
            redis,
            identity: IdentityResolver::new(tokens.clone()),
            media_limits: config.media_limits,
            accounts: Arc::new(AccountUseCase::new(account_repo, hasher, tokens)),
            content: Arc::new(ContentUseCase::new(content_repo.clone(), media.clone())),
            reactions: Arc::new(ReactionUseCase::new(content_repo.clone())),
            comments: Arc::new(CommentUseCase::new(content_repo.clone())),
            media: Arc::new(media),
            content_repo,
            config,
        }
    }
}
