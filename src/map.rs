use crate::coerce::Scalar;
use crate::error::MapError;
use crate::interpolate;
use crate::order;
use crate::record::NameValue;
use crate::value::Value;
use indexmap::IndexMap;
use log::{debug, trace};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Folds a name to the form keys are stored under
pub fn normalize_key(name: &str) -> String {
    name.to_lowercase()
}

/// A case-insensitive collection of names mapped to dynamically-typed values
///
/// `NameValues` lowercases every key once, when it is built, and answers typed
/// questions about its entries afterwards. Each typed accessor returns the
/// converted value together with a flag telling whether the name was present.
/// A present value that cannot be converted yields the type's zero value with
/// the flag still set; use [`try_get`](Self::try_get) to tell the two apart.
///
/// Reads never mutate, so a built collection can be shared freely between
/// threads.
///
/// # Examples
///
/// ```
/// use sovran_namevalue::NameValues;
///
/// let form = NameValues::new([
///     ("Name", "Zaldy"),
///     ("AGE", "48"),
///     ("tags", "rock,pop"),
/// ]);
///
/// assert_eq!(form.string("name"), ("Zaldy".to_string(), true));
/// assert_eq!(form.int("age"), (48, true));
/// assert_eq!(form.strings("Tags"), vec!["rock", "pop"]);
/// assert_eq!(form.int("height"), (0, false));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NameValues {
    pairs: IndexMap<String, Value>,
}

impl NameValues {
    /// Builds a collection, lowercasing every key
    ///
    /// When two keys fold to the same lowercase name only one of their values
    /// is kept. Which one is unspecified.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut values = Self::default();
        values.extend(entries);
        values
    }

    /// Stores a value, returning the one it replaced
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let key = normalize_key(&name);
        let previous = self.pairs.insert(key.clone(), value.into());
        if previous.is_some() {
            debug!("{:?} replaced the existing entry for {:?}", name, key);
        }
        previous
    }

    /// Removes a value by name, keeping the order of the remaining entries
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.pairs.shift_remove(&normalize_key(name))
    }

    /// Returns true if `name` is present, in any casing
    pub fn exists(&self, name: &str) -> bool {
        self.pairs.contains_key(&normalize_key(name))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Stored (lowercase) names in iteration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.pairs.iter()
    }

    /// Every stored value in iteration order
    pub fn to_values(&self) -> Vec<Value> {
        self.pairs.values().cloned().collect()
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<(&String, &Value)> {
        self.pairs.get_key_value(&normalize_key(name))
    }

    /// Inserts under a key that is already lowercase
    pub(crate) fn push_normalized(&mut self, key: String, value: Value) {
        self.pairs.insert(key, value);
    }

    /// Coerces the value stored under `name` into `T`
    ///
    /// Returns `(T::default(), false)` when the name is absent and
    /// `(T::default(), true)` when the value cannot be converted.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_namevalue::NameValues;
    ///
    /// let row = NameValues::new([("Active", "yes"), ("Score", "9.5")]);
    ///
    /// assert_eq!(row.get::<bool>("active"), (true, true));
    /// assert_eq!(row.get::<f32>("score"), (9.5, true));
    /// assert_eq!(row.get::<i64>("score"), (0, true));
    /// assert_eq!(row.get::<i64>("missing"), (0, false));
    /// ```
    pub fn get<T: Scalar>(&self, name: &str) -> (T, bool) {
        match self.lookup(name) {
            None => (T::default(), false),
            Some((key, value)) => match T::try_from_value(value) {
                Ok(converted) => (converted, true),
                Err(e) => {
                    trace!("{}: {}, using zero value", key, e);
                    (T::default(), true)
                }
            },
        }
    }

    /// Like [`get`](Self::get), but `None` when the name is absent
    pub fn get_opt<T: Scalar>(&self, name: &str) -> Option<T> {
        match self.get(name) {
            (value, true) => Some(value),
            (_, false) => None,
        }
    }

    /// Strict variant of [`get`](Self::get)
    ///
    /// # Errors
    ///
    /// - Returns `MapError::KeyNotFound` if the name is absent
    /// - Returns `MapError::Coerce` if the stored value cannot become `T`
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_namevalue::{MapError, NameValues};
    ///
    /// let row = NameValues::new([("age", "forty")]);
    ///
    /// assert!(matches!(row.try_get::<i32>("age"), Err(MapError::Coerce { .. })));
    /// assert!(matches!(row.try_get::<i32>("height"), Err(MapError::KeyNotFound(_))));
    /// ```
    pub fn try_get<T: Scalar>(&self, name: &str) -> Result<T, MapError> {
        let (key, value) = self
            .lookup(name)
            .ok_or_else(|| MapError::KeyNotFound(name.to_string()))?;
        T::try_from_value(value).map_err(|source| MapError::Coerce {
            name: key.clone(),
            source,
        })
    }

    /// Builds a transport record for a present entry, named by its stored key
    pub fn record<T: Scalar>(&self, name: &str) -> Option<NameValue<T>> {
        let (key, _) = self.lookup(name)?;
        let (value, _) = self.get::<T>(key);
        Some(NameValue::new(key.clone(), value))
    }

    fn wrap<T: Scalar>(&self, name: &str) -> Vec<T> {
        self.get_opt(name).into_iter().collect()
    }

    /// The value as text; values stored in any other form read as `""`
    pub fn string(&self, name: &str) -> (String, bool) {
        self.get(name)
    }

    /// The value split on commas
    ///
    /// An absent name gives an empty vector and text without commas gives a
    /// single element. Elements are not trimmed.
    ///
    /// ```
    /// use sovran_namevalue::NameValues;
    ///
    /// let form = NameValues::new([("key2", "This is a string, this is madness")]);
    /// assert_eq!(form.strings("key2"), vec!["This is a string", " this is madness"]);
    /// assert!(form.strings("unknown").is_empty());
    /// ```
    pub fn strings(&self, name: &str) -> Vec<String> {
        match self.string(name) {
            (_, false) => Vec::new(),
            (text, true) => text.split(',').map(String::from).collect(),
        }
    }

    pub fn opt_string(&self, name: &str) -> Option<String> {
        self.get_opt(name)
    }

    /// The value as `i32`, parsing base-10 text
    pub fn int(&self, name: &str) -> (i32, bool) {
        self.get(name)
    }

    pub fn ints(&self, name: &str) -> Vec<i32> {
        self.wrap(name)
    }

    pub fn opt_int(&self, name: &str) -> Option<i32> {
        self.get_opt(name)
    }

    /// The value as `i64`, parsing base-10 text
    pub fn int64(&self, name: &str) -> (i64, bool) {
        self.get(name)
    }

    pub fn int64s(&self, name: &str) -> Vec<i64> {
        self.wrap(name)
    }

    pub fn opt_int64(&self, name: &str) -> Option<i64> {
        self.get_opt(name)
    }

    pub fn float64(&self, name: &str) -> (f64, bool) {
        self.get(name)
    }

    pub fn float64s(&self, name: &str) -> Vec<f64> {
        self.wrap(name)
    }

    pub fn opt_float64(&self, name: &str) -> Option<f64> {
        self.get_opt(name)
    }

    /// The value as a boolean
    ///
    /// Text reads as `true` only when it is exactly one of `"true"`, `"yes"`,
    /// `"1"`, `"-1"` or `"on"`.
    pub fn bool(&self, name: &str) -> (bool, bool) {
        self.get(name)
    }

    pub fn bools(&self, name: &str) -> Vec<bool> {
        self.wrap(name)
    }

    pub fn opt_bool(&self, name: &str) -> Option<bool> {
        self.get_opt(name)
    }

    /// The value as a decimal
    ///
    /// Text has thousands separators and spaces removed before parsing, and
    /// integers and floats are converted.
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use sovran_namevalue::NameValues;
    /// use std::str::FromStr;
    ///
    /// let row = NameValues::new([("total", "10,281,028.4321")]);
    /// let expected = Decimal::from_str("10281028.4321").unwrap();
    /// assert_eq!(row.decimal("TOTAL"), (expected, true));
    /// ```
    pub fn decimal(&self, name: &str) -> (Decimal, bool) {
        self.get(name)
    }

    pub fn decimals(&self, name: &str) -> Vec<Decimal> {
        self.wrap(name)
    }

    pub fn opt_decimal(&self, name: &str) -> Option<Decimal> {
        self.get_opt(name)
    }

    /// The stored value without conversion; an untyped null when absent
    pub fn plain(&self, name: &str) -> (Value, bool) {
        match self.opt_plain(name) {
            Some(value) => (value.clone(), true),
            None => (Value::default(), false),
        }
    }

    pub fn opt_plain(&self, name: &str) -> Option<&Value> {
        self.lookup(name).map(|(_, value)| value)
    }

    /// See [`interpolate`](crate::interpolate())
    pub fn interpolate(&self, template: &str) -> (String, Vec<Value>) {
        interpolate::interpolate(template, self)
    }

    /// See [`sort_by_key`](crate::sort_by_key); an empty order returns a copy
    pub fn sort_by_key<S: AsRef<str>>(&self, key_order: &[S]) -> NameValues {
        order::sort_by_key(self, Some(key_order))
    }
}

impl<K, V> Extend<(K, V)> for NameValues
where
    K: Into<String>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) {
        for (name, value) in entries {
            self.insert(name, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for NameValues
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        Self::new(entries)
    }
}

impl From<HashMap<String, Value>> for NameValues {
    fn from(pairs: HashMap<String, Value>) -> Self {
        Self::new(pairs)
    }
}

impl IntoIterator for NameValues {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<'a> IntoIterator for &'a NameValues {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn band() -> NameValues {
        NameValues::new([
            ("Name", Value::from("Zaldy")),
            ("BAND", Value::from("Razzie")),
            ("active", Value::from(false)),
            ("Age", Value::from("48")),
            ("man", Value::from("true")),
        ])
    }

    #[test]
    fn test_keys_are_lowercased_at_construction() {
        let values = band();
        let mut keys: Vec<&str> = values.keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["active", "age", "band", "man", "name"]);
    }

    #[test]
    fn test_exists_ignores_case() {
        let values = band();
        assert!(values.exists("name"));
        assert!(values.exists("NAME"));
        assert!(values.exists("nAmE"));
        assert!(!values.exists("namex"));
    }

    #[test]
    fn test_case_fold_collision_keeps_one_entry() {
        let values = NameValues::new([("Key", 1i32), ("KEY", 2i32), ("key", 3i32)]);
        assert_eq!(values.len(), 1);
        let (found, exists) = values.int("kEy");
        assert!(exists);
        assert!([1, 2, 3].contains(&found));
    }

    #[test]
    fn test_insert_and_remove_fold_names() {
        let mut values = NameValues::default();
        assert!(values.insert("Color", "red").is_none());
        assert_eq!(values.insert("COLOR", "blue"), Some(Value::from("red")));
        assert_eq!(values.string("color"), ("blue".to_string(), true));
        assert_eq!(values.remove("CoLoR"), Some(Value::from("blue")));
        assert!(values.is_empty());
        assert_eq!(values.remove("color"), None);
    }

    #[test]
    fn test_generic_get() {
        let values = band();
        assert_eq!(values.get::<String>("namex"), (String::new(), false));
        assert_eq!(values.get::<bool>("active"), (false, true));
        assert_eq!(values.get::<i32>("age"), (48, true));
        assert_eq!(values.get::<bool>("man"), (true, true));
        assert_eq!(values.get::<u64>("age"), (48, true));
    }

    #[test]
    fn test_get_opt_is_none_only_when_absent() {
        let values = band();
        assert_eq!(values.get_opt::<String>("name"), Some("Zaldy".to_string()));
        assert_eq!(values.get_opt::<i32>("name"), Some(0));
        assert_eq!(values.get_opt::<i32>("unknown"), None);
    }

    #[test]
    fn test_try_get_separates_absent_from_malformed() {
        let values = band();
        assert_eq!(values.try_get::<i32>("AGE"), Ok(48));
        assert_eq!(
            values.try_get::<i32>("unknown"),
            Err(MapError::KeyNotFound("unknown".to_string()))
        );
        match values.try_get::<i32>("Name") {
            Err(MapError::Coerce { name, source }) => {
                assert_eq!(name, "name");
                assert_eq!(
                    source,
                    crate::CoerceError::Parse {
                        target: Kind::Int,
                        input: "Zaldy".to_string()
                    }
                );
            }
            other => panic!("expected a coercion error, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_returns_stored_value() {
        let values = band();
        assert_eq!(values.plain("ACTIVE"), (Value::Bool(false), true));
        assert_eq!(values.plain("unknown"), (Value::default(), false));
        assert_eq!(values.opt_plain("age"), Some(&Value::from("48")));
        assert_eq!(values.opt_plain("unknown"), None);
    }

    #[test]
    fn test_array_wrappers() {
        let values = NameValues::new([
            ("n", Value::from("1028")),
            ("csv", Value::from("1,2")),
        ]);
        assert_eq!(values.ints("n"), vec![1028]);
        assert_eq!(values.ints("missing"), Vec::<i32>::new());
        // Only strings split on commas.
        assert_eq!(values.ints("csv"), vec![0]);
        assert_eq!(values.strings("csv"), vec!["1", "2"]);
        assert_eq!(values.strings("n"), vec!["1028"]);
    }

    #[test]
    fn test_record_uses_stored_key() {
        let values = band();
        let record = values.record::<i32>("AGE").unwrap();
        assert_eq!(record, NameValue::new("age", 48));
        assert!(values.record::<i32>("unknown").is_none());
    }

    #[test]
    fn test_to_values_and_iteration_follow_insertion_order() {
        let values = NameValues::new([("b", 2i64), ("A", 1i64), ("c", 3i64)]);
        assert_eq!(
            values.to_values(),
            vec![Value::Int64(2), Value::Int64(1), Value::Int64(3)]
        );
        let keys: Vec<&String> = (&values).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        let owned: Vec<(String, Value)> = values.into_iter().collect();
        assert_eq!(owned[1], ("a".to_string(), Value::Int64(1)));
    }

    #[test]
    fn test_from_hash_map_and_collect() {
        let mut raw = HashMap::new();
        raw.insert("Total".to_string(), Value::from("1,000.5"));
        let values = NameValues::from(raw);
        assert_eq!(
            values.decimal("total"),
            (Decimal::from_str("1000.5").unwrap(), true)
        );

        let collected: NameValues = vec![("X", 1i32)].into_iter().collect();
        assert_eq!(collected.int("x"), (1, true));
    }
}
