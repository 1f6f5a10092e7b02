use super::dto::{ReactionResponse, ToggleReactionRequest};
use crate::{
    application::{content::use_case::not_found, identity::resolver::reactor_for},
    domain::{
        entry::{entity::EntryKind, repository::ContentRepository},
        identity::{entity::Identity, value_objects::GuestId},
        shared::errors::DomainError,
        social::reaction::ReactionKind,
    },
};
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

pub struct ReactionUseCase {
    repository: Arc<dyn ContentRepository>,
}

impl ReactionUseCase {
    pub fn new(repository: Arc<dyn ContentRepository>) -> Self {
        Self { repository }
    }

    /// Flips the caller's like or heart on a document.
    ///
    /// The flip itself happens inside the store in one atomic step, so two
    /// concurrent toggles by different callers never lose each other's
    /// update. `anonymous_key` names callers with no identity at all
    /// (normally `ip:<client address>`).
    #[instrument(skip(self, request, identity), fields(reaction = %request.reaction_type))]
    pub async fn toggle(
        &self,
        kind: EntryKind,
        id: Uuid,
        request: ToggleReactionRequest,
        identity: &Identity,
        anonymous_key: &str,
    ) -> Result<ReactionResponse, DomainError> {
        let reaction: ReactionKind = request.reaction_type.parse()?;

        let identity = match (identity, request.guest_id) {
            (Identity::Anonymous, Some(raw)) => match GuestId::new(raw) {
                Ok(guest) => Identity::Guest {
                    id: guest.value,
                    display_name: None,
                },
                Err(_) => Identity::Anonymous,
            },
            (identity, _) => identity.clone(),
        };
        let reactor = reactor_for(&identity, anonymous_key);

        let reactions = self
            .repository
            .toggle_reaction(kind, id, reaction, &reactor)
            .await?
            .ok_or_else(|| not_found(kind))?;

        let active = reactions.contains(reaction, &reactor);
        debug!(%id, reactor = reactor.key(), active, "Reaction toggled");

        Ok(ReactionResponse {
            active,
            counts: reactions.counts(),
            mine: reactions.state_for(&reactor),
            reactions,
        })
    }
}
