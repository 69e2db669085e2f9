//! The user directory.
//!
//! Users are compiled into the binary as a `'static` slice. The directory is
//! read-only, so handlers on any worker thread can borrow it without locking.

use serde::Serialize;

/// A user record as returned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: &'static str,
    pub email: &'static str,
}

/// All known users, in response order.
pub const USERS: &[User] = &[
    User {
        id: 1,
        name: "John Doe",
        email: "john@example.com",
    },
    User {
        id: 2,
        name: "Jane Smith",
        email: "jane@example.com",
    },
];

/// Returns every user in directory order.
pub fn all() -> &'static [User] {
    USERS
}

/// Looks up a user by id. `None` never matches.
pub fn find(id: Option<i64>) -> Option<&'static User> {
    let id = id?;
    USERS.iter().find(|user| user.id == id)
}

/// Parses a path segment as a base-10 user id.
///
/// Leading whitespace and a single `+`/`-` sign are accepted, and the longest
/// run of leading ASCII digits is used, so `"1abc"` and `"2.5"` parse as 1 and
/// 2. The radix is always 10, so `"0x1"` parses as 0. Returns `None` when
/// there are no leading digits or the value does not fit in an `i64`.
pub fn parse_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let digits = &rest[..digits_len];
    if negative {
        format!("-{}", digits).parse().ok()
    } else {
        digits.parse().ok()
    }
}
