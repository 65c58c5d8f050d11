//! `@name` → `$n` rewriting for drivers that take positional parameters.

use crate::error::{PgResult, PgStringError};
use crate::record::BindingTable;
use crate::value::Value;
use tokio_postgres::types::ToSql;

/// SQL text with `$n` placeholders and the matching parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalQuery {
    sql: String,
    params: Vec<Value>,
}

impl PositionalQuery {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Parameters in placeholder order; `params()[0]` binds `$1`.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Parameters as driver references, ready for `tokio_postgres::Client::query`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

/// Rewrite `@name` placeholders in `sql` as `$1, $2, ...`.
///
/// A name used more than once reuses its first index. Quoted strings and
/// identifiers (including `E'...'` escape strings), dollar-quoted bodies
/// (`$$...$$`, `$tag$...$tag$`) and `--` / `/* */` comments are copied
/// verbatim, as is an `@` that does not start an identifier or directly
/// follows an identifier character (`a@b`, `@@`).
///
/// Fails with [`PgStringError::UnboundParameter`] when a placeholder has no
/// entry in `args`.
///
/// ```rust
/// use pgstring::{BindingTable, to_positional};
///
/// let args = BindingTable::new().with("id", 7i64).with("name", "alice");
/// let query = to_positional("SELECT * FROM t WHERE id = @id OR owner = @id AND name = @name", &args)?;
/// assert_eq!(query.sql(), "SELECT * FROM t WHERE id = $1 OR owner = $1 AND name = $2");
/// assert_eq!(query.params().len(), 2);
/// # Ok::<(), pgstring::PgStringError>(())
/// ```
pub fn to_positional(sql: &str, args: &BindingTable) -> PgResult<PositionalQuery> {
    let mut out = String::with_capacity(sql.len());
    let mut names: Vec<&str> = Vec::new();
    let mut params = Vec::new();

    let bytes = sql.as_bytes();
    let mut i = 0;
    let mut copied = 0;

    while i < bytes.len() {
        if let Some(end) = skip_verbatim(bytes, i) {
            i = end;
            continue;
        }
        if bytes[i] != b'@' || !starts_placeholder(bytes, i) {
            i += 1;
            continue;
        }

        let start = i + 1;
        let mut end = start;
        while end < bytes.len() && is_ident_byte(bytes[end]) {
            end += 1;
        }
        let name = &sql[start..end];
        let value = args
            .get(name)
            .ok_or_else(|| PgStringError::UnboundParameter(name.to_string()))?;

        let index = match names.iter().position(|n| *n == name) {
            Some(pos) => pos + 1,
            None => {
                names.push(name);
                params.push(value.clone());
                names.len()
            }
        };

        out.push_str(&sql[copied..i]);
        out.push('$');
        out.push_str(&index.to_string());
        copied = end;
        i = end;
    }
    out.push_str(&sql[copied..]);

    tracing::debug!(
        target: "pgstring",
        sql = %out,
        param_count = params.len(),
        "rewrote named parameters"
    );
    Ok(PositionalQuery { sql: out, params })
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn starts_placeholder(bytes: &[u8], at: usize) -> bool {
    let next_ok = bytes
        .get(at + 1)
        .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'_');
    let prev_ok = at == 0 || !(is_ident_byte(bytes[at - 1]) || bytes[at - 1] == b'@');
    next_ok && prev_ok
}

/// End of the literal, quoted identifier or comment starting at `at`, if any.
/// Unterminated spans run to the end of the text.
fn skip_verbatim(bytes: &[u8], at: usize) -> Option<usize> {
    match (bytes[at], bytes.get(at + 1)) {
        (b'\'', _) => Some(quoted_end(bytes, at + 1, b'\'', is_escape_string(bytes, at))),
        (b'"', _) => Some(quoted_end(bytes, at + 1, b'"', false)),
        (b'-', Some(b'-')) => Some(
            bytes[at..]
                .iter()
                .position(|b| *b == b'\n')
                .map_or(bytes.len(), |pos| at + pos),
        ),
        (b'/', Some(b'*')) => Some(block_comment_end(bytes, at + 2)),
        (b'$', _) => dollar_quoted_end(bytes, at),
        _ => None,
    }
}

/// `E'...'` / `e'...'`, where a backslash escapes the next byte.
fn is_escape_string(bytes: &[u8], quote_at: usize) -> bool {
    quote_at > 0
        && matches!(bytes[quote_at - 1], b'E' | b'e')
        && (quote_at < 2 || !is_ident_byte(bytes[quote_at - 2]))
}

fn quoted_end(bytes: &[u8], mut i: usize, quote: u8, backslash_escapes: bool) -> usize {
    while i < bytes.len() {
        let b = bytes[i];
        if backslash_escapes && b == b'\\' {
            i += 2;
        } else if b == quote && bytes.get(i + 1) == Some(&quote) {
            i += 2;
        } else if b == quote {
            return i + 1;
        } else {
            i += 1;
        }
    }
    bytes.len()
}

/// Block comments nest in PostgreSQL.
fn block_comment_end(bytes: &[u8], mut i: usize) -> usize {
    let mut depth = 1;
    while i < bytes.len() {
        match (bytes[i], bytes.get(i + 1)) {
            (b'/', Some(b'*')) => {
                depth += 1;
                i += 2;
            }
            (b'*', Some(b'/')) => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    return i;
                }
            }
            _ => i += 1,
        }
    }
    bytes.len()
}

/// `$tag$ ... $tag$` with an empty or identifier tag. `$1` and a `$` inside
/// an identifier do not open a body.
fn dollar_quoted_end(bytes: &[u8], at: usize) -> Option<usize> {
    if at > 0 && is_ident_byte(bytes[at - 1]) {
        return None;
    }
    let mut i = at + 1;
    if bytes.get(i).is_some_and(u8::is_ascii_digit) {
        return None;
    }
    while i < bytes.len() && is_ident_byte(bytes[i]) {
        i += 1;
    }
    if bytes.get(i) != Some(&b'$') {
        return None;
    }

    let tag = &bytes[at..=i];
    let body = i + 1;
    Some(
        bytes[body..]
            .windows(tag.len())
            .position(|w| w == tag)
            .map_or(bytes.len(), |pos| body + pos + tag.len()),
    )
}
