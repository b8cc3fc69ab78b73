//! The matchmaking query client.

use codeword_protocol::{
    JoinCode, SearchCriteria, SessionRecord, SessionSummary, CODEWORD_SEARCH,
};
use codeword_transport::RpcSession;

use crate::MatchmakingError;

/// Runs matchmaking searches over a borrowed, logged-in session.
///
/// The client is cheap and short-lived: build one per lookup, around the
/// session the lookup owns.
pub struct MatchmakeClient<'s, S: RpcSession> {
    session: &'s mut S,
}

impl<'s, S: RpcSession> MatchmakeClient<'s, S> {
    pub fn new(session: &'s mut S) -> Self {
        Self { session }
    }

    /// Runs one search and returns every candidate, undecoded.
    pub async fn browse(
        &mut self,
        criteria: &SearchCriteria<'_>,
    ) -> Result<Vec<SessionSummary>, MatchmakingError> {
        let conn_id = self.session.id();
        tracing::debug!(%conn_id, codeword = criteria.codeword, "browsing matchmake sessions");
        let candidates = self.session.browse_matchmake_sessions(criteria).await?;
        tracing::debug!(%conn_id, count = candidates.len(), "search returned");
        Ok(candidates)
    }

    /// Finds the session advertising `code`.
    ///
    /// If several sessions match, the first one the backend returned wins.
    ///
    /// # Errors
    /// - [`MatchmakingError::NotFound`] if nothing matches
    /// - [`MatchmakingError::Transport`] if the search call fails
    /// - [`MatchmakingError::Protocol`] if the match's name can't be decoded
    pub async fn find_session_by_code(
        &mut self,
        code: &JoinCode,
    ) -> Result<SessionRecord, MatchmakingError> {
        let criteria = CODEWORD_SEARCH.with_codeword(code);
        let candidates = self.browse(&criteria).await?;

        let Some(first) = candidates.first() else {
            return Err(MatchmakingError::NotFound(code.clone()));
        };
        if candidates.len() > 1 {
            tracing::warn!(
                %code,
                count = candidates.len(),
                chosen = first.id,
                "join code matched several sessions, using the first"
            );
        }

        Ok(SessionRecord::from_summary(first)?)
    }
}
