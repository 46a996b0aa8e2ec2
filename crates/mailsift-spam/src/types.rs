//! Domain records flowing between pipeline stages.
//!
//! Every record is created by one stage, handed off by value, and never
//! mutated downstream.

use std::fmt;

/// Resolved mail account. Only `email` matters to the pipeline (it is
/// the deduplication key); the rest is profile payload carried through
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub name: String,
}

/// Message identifier, scoped to a user's mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MsgId(pub u64);

impl fmt::Display for MsgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Terminal per-message result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub id: MsgId,
    pub has_spam: bool,
}

impl Verdict {
    /// Composite sort key: spam verdicts first, then ids ascending.
    /// This is the one deterministic ordering the pipeline guarantees.
    pub fn sort_key(&self) -> (bool, MsgId) {
        (!self.has_spam, self.id)
    }

    /// Report line format: `<bool> <id>`.
    pub fn to_line(&self) -> String {
        format!("{} {}", self.has_spam, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_puts_spam_first_then_id() {
        let mut verdicts = vec![
            Verdict {
                id: MsgId(3),
                has_spam: false,
            },
            Verdict {
                id: MsgId(2),
                has_spam: true,
            },
            Verdict {
                id: MsgId(1),
                has_spam: false,
            },
            Verdict {
                id: MsgId(5),
                has_spam: true,
            },
        ];
        verdicts.sort_unstable_by_key(Verdict::sort_key);
        let ids: Vec<u64> = verdicts.iter().map(|v| v.id.0).collect();
        assert_eq!(ids, vec![2, 5, 1, 3]);
    }

    #[test]
    fn line_format() {
        let verdict = Verdict {
            id: MsgId(41),
            has_spam: true,
        };
        assert_eq!(verdict.to_line(), "true 41");
    }
}
