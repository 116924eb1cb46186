//! Access scopes published by the Qiita API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlowError;

/// An access scope the user may grant during authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    ReadQiita,
    ReadQiitaTeam,
    WriteQiita,
    WriteQiitaTeam,
}

impl Scope {
    /// Every scope the provider publishes, in its documented order.
    pub const ALL: [Scope; 4] = [
        Scope::ReadQiita,
        Scope::ReadQiitaTeam,
        Scope::WriteQiita,
        Scope::WriteQiitaTeam,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::ReadQiita => "read_qiita",
            Scope::ReadQiitaTeam => "read_qiita_team",
            Scope::WriteQiita => "write_qiita",
            Scope::WriteQiitaTeam => "write_qiita_team",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read_qiita" => Ok(Scope::ReadQiita),
            "read_qiita_team" => Ok(Scope::ReadQiitaTeam),
            "write_qiita" => Ok(Scope::WriteQiita),
            "write_qiita_team" => Ok(Scope::WriteQiitaTeam),
            other => Err(FlowError::InvalidRequest(format!("unknown scope: {other}"))),
        }
    }
}

/// Join scopes with `+` in selection order, as the authorization endpoint
/// expects them in its `scope` query parameter.
pub(crate) fn join_scopes(scopes: &[Scope]) -> String {
    scopes
        .iter()
        .map(Scope::as_str)
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for scope in Scope::ALL {
            assert_eq!(scope.as_str().parse::<Scope>().unwrap(), scope);
        }
    }

    #[test]
    fn unknown_scope_is_rejected() {
        let err = "admin_qiita".parse::<Scope>().unwrap_err();
        assert!(matches!(err, FlowError::InvalidRequest(_)));
    }

    #[test]
    fn join_preserves_selection_order() {
        let joined = join_scopes(&[Scope::WriteQiita, Scope::ReadQiita]);
        assert_eq!(joined, "write_qiita+read_qiita");
    }

    #[test]
    fn join_of_single_scope_has_no_separator() {
        assert_eq!(join_scopes(&[Scope::ReadQiita]), "read_qiita");
    }
}
