//! Classification of storage faults
//!
//! Every statement result is inspected here before a repository decides what
//! to report. SQLite's extended result code (exposed by sqlx as
//! `DatabaseError::code`) is matched against a fixed table.

/// What kind of storage fault a statement ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fault {
    /// `SQLITE_CONSTRAINT_FOREIGNKEY`
    ForeignKey,
    /// `SQLITE_CONSTRAINT_UNIQUE` / `SQLITE_CONSTRAINT_PRIMARYKEY`
    Unique,
    /// `SQLITE_CONSTRAINT_CHECK` / `SQLITE_CONSTRAINT_NOTNULL`
    Invalid,
    /// `SQLITE_BUSY` / `SQLITE_LOCKED` and their extended forms
    Busy,
    Other,
}

const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;
const SQLITE_CONSTRAINT_CHECK: i32 = 275;
const SQLITE_CONSTRAINT_FOREIGNKEY: i32 = 787;
const SQLITE_CONSTRAINT_NOTNULL: i32 = 1299;
const SQLITE_CONSTRAINT_PRIMARYKEY: i32 = 1555;
const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;

pub(crate) fn classify(err: &sqlx::Error) -> Fault {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .map_or(Fault::Other, |code| classify_code(&code)),
        // The repository's only connection is checked out by another caller.
        sqlx::Error::PoolTimedOut => Fault::Busy,
        _ => Fault::Other,
    }
}

fn classify_code(code: &str) -> Fault {
    let Ok(code) = code.parse::<i32>() else {
        return Fault::Other;
    };

    match code {
        SQLITE_CONSTRAINT_FOREIGNKEY => Fault::ForeignKey,
        SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY => Fault::Unique,
        SQLITE_CONSTRAINT_CHECK | SQLITE_CONSTRAINT_NOTNULL => Fault::Invalid,
        // Primary code lives in the low byte.
        code if matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED) => Fault::Busy,
        _ => Fault::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_codes() {
        assert_eq!(classify_code("787"), Fault::ForeignKey);
        assert_eq!(classify_code("2067"), Fault::Unique);
        assert_eq!(classify_code("1555"), Fault::Unique);
        assert_eq!(classify_code("275"), Fault::Invalid);
        assert_eq!(classify_code("1299"), Fault::Invalid);
    }

    #[test]
    fn test_busy_family() {
        for code in ["5", "261", "517", "773", "6", "262", "518"] {
            assert_eq!(classify_code(code), Fault::Busy, "code {code}");
        }
    }

    #[test]
    fn test_everything_else_is_other() {
        // plain SQLITE_CONSTRAINT, SQLITE_ERROR, SQLITE_IOERR_READ, garbage
        for code in ["19", "1", "266", "", "HY000"] {
            assert_eq!(classify_code(code), Fault::Other, "code {code:?}");
        }
        assert_eq!(classify(&sqlx::Error::RowNotFound), Fault::Other);
        assert_eq!(classify(&sqlx::Error::PoolTimedOut), Fault::Busy);
    }
}
