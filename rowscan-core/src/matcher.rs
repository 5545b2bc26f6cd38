/// Decides whether a column belongs to a field.
///
/// `field` is the label of the record field, `column` the name returned by the
/// row source.
pub trait NameMatcher {
    fn matches(&self, field: &str, column: &str) -> bool;
}

impl<F: Fn(&str, &str) -> bool> NameMatcher for F {
    fn matches(&self, field: &str, column: &str) -> bool {
        self(field, column)
    }
}

/// Both names must be non empty and equal under Unicode case folding.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultNameMatcher;

impl NameMatcher for DefaultNameMatcher {
    fn matches(&self, field: &str, column: &str) -> bool {
        if field.is_empty() || column.is_empty() {
            return false;
        }
        equal_fold(field, column)
    }
}

/// Case insensitive comparison, character by character.
pub fn equal_fold(a: &str, b: &str) -> bool {
    if a.len() == b.len() && a.eq_ignore_ascii_case(b) {
        return true;
    }
    let mut a = a.chars();
    let mut b = b.chars();
    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(l), Some(r)) => {
                if l != r
                    && !l.to_lowercase().eq(r.to_lowercase())
                    && !l.to_uppercase().eq(r.to_uppercase())
                {
                    return false;
                }
            }
            _ => return false,
        }
    }
}
