use heck::{ToLowerCamelCase, ToSnakeCase};

/// Default foreign-key column for references to `entity`: the entity name in
/// lower camel case followed by its capitalized primary key, e.g. `userId`.
pub fn foreign_key_name(entity: &str, primary_key: &str) -> String {
    let mut name = entity.to_lower_camel_case();
    let mut chars = primary_key.chars();
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.push_str(chars.as_str());
    }
    name
}

/// Default pivot table for a many-to-many relationship: both table names,
/// sorted, joined by `_`.
pub fn pivot_table_name(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}_{b}")
    } else {
        format!("{b}_{a}")
    }
}

pub(crate) fn default_table_name(entity: &str) -> String {
    entity.to_snake_case()
}
