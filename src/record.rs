use serde::{Deserialize, Serialize};

/// A single name paired with a typed value
///
/// Used to hand one strongly-typed entry to code that does not want a whole
/// [`NameValues`](crate::NameValues). Serializes as `{"name": .., "value": ..}`
/// with empty names and zero values left out.
///
/// # Examples
///
/// ```
/// use sovran_namevalue::NameValue;
///
/// let age = NameValue::new("age", 48);
/// assert_eq!(age.name, "age");
/// assert_eq!(age.value, 48);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize + Default + PartialEq",
    deserialize = "T: Deserialize<'de> + Default"
))]
pub struct NameValue<T> {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub value: T,
}

fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

impl<T> NameValue<T> {
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn into_pair(self) -> (String, T) {
        (self.name, self.value)
    }
}

impl<S: Into<String>, T> From<(S, T)> for NameValue<T> {
    fn from((name, value): (S, T)) -> Self {
        Self::new(name, value)
    }
}
