//! Title-case helpers.
//!
//! A word starts at every cased character that follows an uncased one, so
//! digits and apostrophes break words: `86th` becomes `86Th` and `zabar's`
//! becomes `Zabar'S`.

fn is_cased(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase()
}

/// Upper-cases the first cased character of every word and lower-cases the rest.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_cased = false;
    for c in value.chars() {
        if previous_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_cased = is_cased(c);
    }
    out
}

/// True when the value has at least one cased character and is already in
/// [`title_case`] form.
pub fn is_title_case(value: &str) -> bool {
    let mut previous_cased = false;
    let mut saw_cased = false;
    for c in value.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            saw_cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            saw_cased = true;
        } else {
            previous_cased = false;
        }
    }
    saw_cased
}
