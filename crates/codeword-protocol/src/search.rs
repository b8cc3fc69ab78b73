//! The matchmaking search query.
//!
//! The backend's session-search RPC takes a criteria record with many
//! fields. For a join-code lookup every field except the codeword is fixed
//! by the protocol, so the fixed part lives in one `static`
//! ([`CODEWORD_SEARCH`]) and the codeword is attached per call via
//! [`SearchParams::with_codeword`]. There is no mutable builder, so a field
//! can't be forgotten on one code path.

use serde::Serialize;

use crate::JoinCode;

// ---------------------------------------------------------------------------
// SearchParams
// ---------------------------------------------------------------------------

/// The fixed fields of a matchmaking session search.
///
/// Several numeric-looking fields are strings on the wire (`min_players`,
/// `max_players`, `game_mode`, `matchmake_system`); `max_players` is a
/// `"min,max"` range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchParams {
    pub attribs: [&'static str; 6],
    pub game_mode: &'static str,
    pub min_players: &'static str,
    pub max_players: &'static str,
    pub matchmake_system: &'static str,
    pub vacant_only: bool,
    pub exclude_locked: bool,
    pub exclude_non_host_pid: bool,
    pub selection_method: u32,
    pub vacant_participants: u16,
    pub exclude_user_password: bool,
    pub exclude_system_password: bool,
    pub refer_gid: u32,
}

/// Search parameters for finding a session by its join code.
pub static CODEWORD_SEARCH: SearchParams = SearchParams {
    attribs: ["", "", "", "", "", ""],
    game_mode: "2",
    min_players: "1",
    max_players: "1,8",
    matchmake_system: "1",
    vacant_only: false,
    exclude_locked: true,
    exclude_non_host_pid: true,
    selection_method: 0,
    vacant_participants: 1,
    exclude_user_password: true,
    exclude_system_password: true,
    refer_gid: 0,
};

impl SearchParams {
    /// Attaches a codeword, producing the full criteria for one search.
    pub fn with_codeword<'a>(&'static self, code: &'a JoinCode) -> SearchCriteria<'a> {
        SearchCriteria {
            params: self,
            codeword: code.as_str(),
        }
    }
}

// ---------------------------------------------------------------------------
// SearchCriteria
// ---------------------------------------------------------------------------

/// A complete search request: fixed parameters plus one codeword.
///
/// Serializes flat, with `codeword` alongside the fixed fields, which is
/// the layout transports encode onto the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchCriteria<'a> {
    #[serde(flatten)]
    pub params: &'static SearchParams,
    pub codeword: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codeword_search_fixed_fields() {
        let p = &CODEWORD_SEARCH;
        assert_eq!(p.attribs, [""; 6]);
        assert_eq!(p.game_mode, "2");
        assert_eq!(p.min_players, "1");
        assert_eq!(p.max_players, "1,8");
        assert_eq!(p.matchmake_system, "1");
        assert!(!p.vacant_only);
        assert!(p.exclude_locked);
        assert!(p.exclude_non_host_pid);
        assert_eq!(p.selection_method, 0);
        assert_eq!(p.vacant_participants, 1);
        assert!(p.exclude_user_password);
        assert!(p.exclude_system_password);
        assert_eq!(p.refer_gid, 0);
    }

    #[test]
    fn test_with_codeword_only_sets_codeword() {
        let code = JoinCode::parse("AB123").unwrap();
        let criteria = CODEWORD_SEARCH.with_codeword(&code);
        assert_eq!(criteria.codeword, "AB123");
        assert_eq!(criteria.params, &CODEWORD_SEARCH);
    }

    #[test]
    fn test_criteria_serializes_flat() {
        let code = JoinCode::parse("XY789").unwrap();
        let json = serde_json::to_value(CODEWORD_SEARCH.with_codeword(&code)).unwrap();
        assert_eq!(json["codeword"], "XY789");
        assert_eq!(json["max_players"], "1,8");
        assert_eq!(json["exclude_locked"], true);
        assert_eq!(json["attribs"].as_array().map(Vec::len), Some(6));
    }
}
