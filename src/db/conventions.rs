/// Column conventions applied to every table the client touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConventions {
    /// Tables carry automatically maintained created/updated columns
    pub timestamps: bool,
    /// Field names map to snake_case column names
    pub underscored: bool,
}

impl Default for TableConventions {
    fn default() -> Self {
        Self {
            timestamps: true,
            underscored: true,
        }
    }
}

impl TableConventions {
    /// Column name for a camelCase field name
    pub fn column_name(&self, field: &str) -> String {
        if self.underscored {
            underscore(field)
        } else {
            field.to_string()
        }
    }

    /// Names of the `(created, updated)` timestamp columns, if any
    pub fn timestamp_columns(&self) -> Option<(String, String)> {
        if !self.timestamps {
            return None;
        }
        Some((self.column_name("createdAt"), self.column_name("updatedAt")))
    }
}

fn underscore(field: &str) -> String {
    let chars: Vec<char> = field.chars().collect();
    let mut out = String::with_capacity(field.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // Break before a new word, and at the end of an acronym ("CNPJNumber")
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}
