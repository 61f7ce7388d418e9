use super::{Formatter, Params, ToSql};

/// A quoted identifier
pub(super) struct Ident<S>(pub(super) S);

/// `"table"."column"`
pub(super) struct Qualified<S1, S2>(pub(super) S1, pub(super) S2);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push('"');
        for c in self.0.as_ref().chars() {
            if c == '"' {
                f.dst.push('"');
            }
            f.dst.push(c);
        }
        f.dst.push('"');
    }
}

impl<S1: AsRef<str>, S2: AsRef<str>> ToSql for Qualified<S1, S2> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, Ident(self.0) "." Ident(self.1));
    }
}
