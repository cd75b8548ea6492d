use super::{Flavor, Formatter, Params, ToSql};

/// A table or column name, quoted per flavor.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let name = self.0.as_ref();

        match f.serializer.flavor {
            Flavor::Mysql => {
                f.dst.push('`');
                f.dst.push_str(&name.replace('`', "``"));
                f.dst.push('`');
            }
            Flavor::Sqlite => f.dst.push_str(name),
        }
    }
}
