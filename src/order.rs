use crate::map::{normalize_key, NameValues};

/// Builds a collection holding only the entries named in `key_order`, in that
/// order.
///
/// Names match case-insensitively. Requested names with no entry are skipped,
/// entries that are not requested are dropped, and a name requested twice keeps
/// its first position. With no order, or an empty one, the result is a copy of
/// `values`.
///
/// # Examples
///
/// ```
/// use sovran_namevalue::{sort_by_key, NameValues};
///
/// let row = NameValues::new([("b", 2i64), ("a", 1i64), ("c", 3i64)]);
///
/// let sorted = sort_by_key(&row, Some(&["A", "b"][..]));
/// assert_eq!(sorted.keys().collect::<Vec<_>>(), vec!["a", "b"]);
///
/// assert_eq!(sort_by_key(&row, None::<&[&str]>), row);
/// ```
pub fn sort_by_key<S: AsRef<str>>(values: &NameValues, key_order: Option<&[S]>) -> NameValues {
    let order = match key_order {
        Some(order) if !order.is_empty() => order,
        _ => return values.clone(),
    };

    let mut sorted = NameValues::default();
    for wanted in order {
        let wanted = normalize_key(wanted.as_ref());
        if let Some((key, value)) = values.iter().find(|(key, _)| **key == wanted) {
            sorted.push_normalized(key.clone(), value.clone());
        }
    }
    sorted
}
